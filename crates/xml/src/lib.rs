//! Selective XML serialization for registered object graphs.
//!
//! This crate serializes arbitrary `serde`-serializable values to indented
//! XML while letting the caller pick, per call, which fields appear. A
//! fluent builder accumulates dotted field-path directives; the paths are
//! resolved against an [`arbor_schema::SchemaRegistry`] before anything is
//! written, and the actual tree walk is `serde` traversal streamed through
//! `quick-xml`.
//!
//! ## Selection rules
//!
//! - Scalar fields are visible by default; `exclude_all()` hides them.
//! - Composite fields (nested structs, collections, maps) are hidden until
//!   a directive includes them, or `recursive()` is on.
//! - Including `client.address` also makes `client` a visible container;
//!   siblings stay untouched.
//! - The last directive on the same exact path wins; an exclude issued
//!   after an include hides the field, and the other way around.
//! - A `?` prefix marks a path segment optional: if it does not resolve,
//!   the directive is silently dropped instead of failing the call.
//!
//! ## Example
//!
//! ```ignore
//! use arbor_xml::XmlSerialization;
//!
//! let mut out = Vec::new();
//! XmlSerialization::new(&registry, &mut out)
//!     .from(&order)
//!     .include(["client"])
//!     .exclude(["client.name"])
//!     .serialize()?;
//! ```
//!
//! Resolution failures (a required segment naming no declared or inherited
//! field) are reported as [`SerializeError::UnknownField`] before the first
//! byte is written, so a failed call produces no partial output.

pub mod convert;
pub mod error;
mod path;
mod selection;
mod ser;
mod serializer;

pub use convert::{DateConverter, Iso8601DateConverter};
pub use error::{Result, SerializeError};
pub use serializer::{Serializer, XmlSerialization, to_xml_string};
