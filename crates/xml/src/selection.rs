//! Directive accumulation and the compiled visibility table.

use std::collections::HashMap;

use arbor_schema::{FieldKind, SchemaRegistry};

use crate::error::{Result, SerializeError};
use crate::path;

/// One include/exclude instruction, kept in call order.
#[derive(Debug, Clone)]
pub(crate) enum Directive {
    Include(String),
    Exclude(String),
    ExcludeAll,
}

/// The per-call visibility table the driver consults for every field.
///
/// Lookup order: an exact-path override wins, then recursive mode makes
/// everything visible, then scalar fields follow the default flag while
/// composite fields stay hidden.
#[derive(Debug)]
pub(crate) struct Selection {
    default_visible: bool,
    recursive: bool,
    overrides: HashMap<String, bool>,
}

impl Selection {
    /// Resolves and folds the directives of one serialize call.
    ///
    /// `ExcludeAll` resets the baseline no matter where it appears in the
    /// chain; the remaining directives then apply in call order, the last
    /// writer winning on the same exact path. Includes cascade, every prefix
    /// of an included path becomes a visible container.
    pub fn compile(
        registry: &SchemaRegistry,
        root: &str,
        directives: &[Directive],
        recursive: bool,
    ) -> Result<Selection> {
        if registry.get(root).is_none() {
            return Err(SerializeError::UnregisteredType {
                name: root.to_string(),
            });
        }
        let default_visible = !directives
            .iter()
            .any(|d| matches!(d, Directive::ExcludeAll));
        let mut overrides = HashMap::new();
        for directive in directives {
            match directive {
                Directive::Include(raw) => {
                    if let Some(resolved) = path::resolve(registry, root, raw)? {
                        for depth in 1..=resolved.len() {
                            overrides.insert(resolved[..depth].join("."), true);
                        }
                    }
                }
                Directive::Exclude(raw) => {
                    if let Some(resolved) = path::resolve(registry, root, raw)? {
                        overrides.insert(resolved.join("."), false);
                    }
                }
                Directive::ExcludeAll => {}
            }
        }
        Ok(Selection {
            default_visible,
            recursive,
            overrides,
        })
    }

    /// Whether the field at `dotted` should be emitted. The path is the
    /// declared-name chain from the root; collection elements are
    /// transparent, so a directive on a collection field covers every
    /// element uniformly.
    pub fn visible(&self, dotted: &str, kind: FieldKind) -> bool {
        if let Some(&explicit) = self.overrides.get(dotted) {
            return explicit;
        }
        if self.recursive {
            return true;
        }
        if kind.is_value() {
            self.default_visible
        } else {
            false
        }
    }
}
