//! Date rendering for fields registered as dates.

use chrono::DateTime;

use crate::error::{Result, SerializeError};

/// Formats the raw serialized form of a date field.
///
/// chrono types serialize as RFC 3339 text; the converter receives that text
/// and returns what the XML element should contain. Implementations must be
/// pure, the driver may call them in any order.
pub trait DateConverter {
    fn convert(&self, raw: &str) -> Result<String>;
}

/// Default converter: ISO 8601 with seconds precision and a numeric UTC
/// offset, e.g. `2013-09-12T22:09:13-03:00`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Iso8601DateConverter;

impl DateConverter for Iso8601DateConverter {
    fn convert(&self, raw: &str) -> Result<String> {
        let parsed = DateTime::parse_from_rfc3339(raw).map_err(|source| {
            SerializeError::InvalidDate {
                value: raw.to_string(),
                source,
            }
        })?;
        Ok(parsed.format("%Y-%m-%dT%H:%M:%S%:z").to_string())
    }
}
