//! Field-path parsing and resolution.
//!
//! Paths are dot-separated declared field names; a leading `?` on a segment
//! marks it optional. Resolution walks the schema registry, descending into
//! composite child types and collection element types, and returns the chain
//! of declared names a directive binds to.

use arbor_schema::SchemaRegistry;

use crate::error::{Result, SerializeError};

/// One parsed path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Segment<'p> {
    pub name: &'p str,
    pub optional: bool,
}

pub(crate) fn parse(path: &str) -> Vec<Segment<'_>> {
    path.split('.')
        .map(|raw| match raw.strip_prefix('?') {
            Some(name) => Segment {
                name,
                optional: true,
            },
            None => Segment {
                name: raw,
                optional: false,
            },
        })
        .collect()
}

/// Resolves `path` against the `root` type.
///
/// `Ok(None)` means an optional segment failed to resolve and the directive
/// is a no-op. A failed required segment is an `UnknownField` error, as is
/// descending into a field with no child type.
pub(crate) fn resolve(
    registry: &SchemaRegistry,
    root: &str,
    path: &str,
) -> Result<Option<Vec<&'static str>>> {
    let mut resolved = Vec::new();
    let mut current: Option<&str> = Some(root);
    for segment in parse(path) {
        let field = current.and_then(|ty| registry.field(ty, segment.name));
        let Some(field) = field else {
            if segment.optional {
                return Ok(None);
            }
            return Err(SerializeError::UnknownField {
                path: path.to_string(),
                segment: segment.name.to_string(),
            });
        };
        resolved.push(field.name());
        current = field.kind().child_type();
    }
    Ok(Some(resolved))
}
