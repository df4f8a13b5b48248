//! Error types for schema resolution and XML serialization.

use thiserror::Error;

/// The error type for directive resolution and XML writing.
#[derive(Error, Debug)]
pub enum SerializeError {
    /// A required path segment did not resolve against the declared fields
    /// of the type it was applied to, ancestors included.
    #[error("unknown field `{segment}` in path `{path}`")]
    UnknownField { path: String, segment: String },

    /// A walked struct has no schema registered under its serde name.
    #[error("type `{name}` is not registered")]
    UnregisteredType { name: String },

    /// A serialized field is missing from its type's schema and from every
    /// ancestor schema.
    #[error("field `{field}` is not registered on type `{type_name}`")]
    UnregisteredField { type_name: String, field: String },

    /// A date field's raw value could not be parsed by the converter.
    #[error("invalid date value `{value}`")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// XML writing error.
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error while writing to the sink.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Anything serde reports through `ser::Error::custom`, plus value
    /// shapes the driver does not support.
    #[error("{0}")]
    Custom(String),
}

impl serde::ser::Error for SerializeError {
    fn custom<T: std::fmt::Display>(msg: T) -> Self {
        SerializeError::Custom(msg.to_string())
    }
}

/// Result type alias for serialization operations.
pub type Result<T> = std::result::Result<T, SerializeError>;
