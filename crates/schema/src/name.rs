//! Tag-name derivation for XML elements.

/// Derives the XML tag for a type or field name.
///
/// Type names are `CamelCase` and field names are `snake_case`; both map to
/// the lower-camel-case convention used for tags, so `GenericWrapper`
/// becomes `genericWrapper` and `entity_list` becomes `entityList`.
pub fn tag_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for (i, c) in name.chars().enumerate() {
        if c == '_' {
            upper_next = true;
        } else if i == 0 {
            out.extend(c.to_lowercase());
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
