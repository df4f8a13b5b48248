//! The name-keyed schema registry and the `Described` trait.

use std::collections::HashMap;

use crate::descriptor::Field;

/// Ties a serializable Rust type to its registry entry.
///
/// `NAME` must match the struct identifier serde reports while walking the
/// value, or the driver fails with an unregistered-type error. Collections
/// defer to their element type so that directives applied to a collection
/// root resolve against the element schema.
pub trait Described {
    const NAME: &'static str;
}

impl<T: Described> Described for Vec<T> {
    const NAME: &'static str = T::NAME;
}

impl<T: Described> Described for [T] {
    const NAME: &'static str = T::NAME;
}

/// Registry entry for one type: its declared fields in order plus an
/// optional parent entry searched after them.
#[derive(Debug, Clone)]
pub struct TypeSchema {
    name: &'static str,
    parent: Option<&'static str>,
    fields: Vec<Field>,
}

impl TypeSchema {
    pub fn new<T: Described + ?Sized>() -> Self {
        TypeSchema {
            name: T::NAME,
            parent: None,
            fields: Vec::new(),
        }
    }

    /// Declares the parent type searched when a field is not declared here.
    pub fn extends<P: Described + ?Sized>(mut self) -> Self {
        self.parent = Some(P::NAME);
        self
    }

    /// Appends a declared field. Declaration order is emission order.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Option<&'static str> {
        self.parent
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// The field declared directly on this type, ignoring ancestors.
    pub fn own_field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name() == name)
    }
}

/// Name-keyed store of type schemas, built once at startup and immutable
/// during serialization.
#[derive(Debug, Default)]
pub struct SchemaRegistry {
    types: HashMap<&'static str, TypeSchema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a schema. A second registration under the same name
    /// replaces the first.
    pub fn register(&mut self, schema: TypeSchema) -> &mut Self {
        self.types.insert(schema.name(), schema);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TypeSchema> {
        self.types.get(name)
    }

    /// Resolves a field against `type_name`, walking the ancestor chain
    /// most-derived first so a child declaration shadows a parent's field of
    /// the same name.
    pub fn field(&self, type_name: &str, field: &str) -> Option<&Field> {
        let mut current = self.get(type_name);
        // a registration cycle would otherwise loop forever
        let mut hops = 0usize;
        while let Some(schema) = current {
            if let Some(found) = schema.own_field(field) {
                return Some(found);
            }
            hops += 1;
            if hops > 64 {
                return None;
            }
            current = schema.parent().and_then(|p| self.get(p));
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::FieldKind;

    struct Base;
    struct Derived;

    impl Described for Base {
        const NAME: &'static str = "Base";
    }
    impl Described for Derived {
        const NAME: &'static str = "Derived";
    }

    fn registry() -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        registry
            .register(
                TypeSchema::new::<Base>()
                    .field(Field::value("id"))
                    .field(Field::value("shadowed")),
            )
            .register(
                TypeSchema::new::<Derived>()
                    .extends::<Base>()
                    .field(Field::value("extra"))
                    .field(Field::date("shadowed")),
            );
        registry
    }

    #[test]
    fn test_own_fields_resolve_first() {
        let registry = registry();
        let field = registry.field("Derived", "extra").expect("declared field");
        assert_eq!(field.name(), "extra");
    }

    #[test]
    fn test_inherited_fields_resolve_through_parent() {
        let registry = registry();
        let field = registry.field("Derived", "id").expect("inherited field");
        assert_eq!(field.name(), "id");
    }

    #[test]
    fn test_child_declaration_shadows_parent() {
        let registry = registry();
        let field = registry.field("Derived", "shadowed").expect("field");
        assert_eq!(field.kind(), FieldKind::DateTime);
    }

    #[test]
    fn test_unknown_fields_do_not_resolve() {
        let registry = registry();
        assert!(registry.field("Derived", "missing").is_none());
        assert!(registry.field("Missing", "id").is_none());
    }

    #[test]
    fn test_collections_share_the_element_name() {
        assert_eq!(<Vec<Derived> as Described>::NAME, "Derived");
        assert_eq!(<[Derived] as Described>::NAME, "Derived");
    }
}
