//! Type schemas for arbor's selective XML serialization.
//!
//! Serialization decisions in arbor are driven by an explicit registry built
//! once at startup instead of runtime reflection. Each serializable type
//! registers a [`TypeSchema`]: its declared fields in order, each classified
//! by [`FieldKind`], plus an optional parent entry whose fields are searched
//! when a name is not declared on the type itself. The [`Described`] trait
//! ties a Rust type to its registry name.
//!
//! ## Example
//!
//! ```ignore
//! use arbor_schema::{Described, Field, SchemaRegistry, TypeSchema};
//!
//! struct Client { name: String }
//! struct Order { client: Option<Client>, price: f64 }
//!
//! impl Described for Client { const NAME: &'static str = "Client"; }
//! impl Described for Order { const NAME: &'static str = "Order"; }
//!
//! let mut registry = SchemaRegistry::new();
//! registry
//!     .register(TypeSchema::new::<Client>().field(Field::value("name")))
//!     .register(
//!         TypeSchema::new::<Order>()
//!             .field(Field::composite::<Client>("client"))
//!             .field(Field::value("price")),
//!     );
//! ```

mod descriptor;
mod name;
mod registry;

pub use descriptor::{Field, FieldKind};
pub use name::tag_name;
pub use registry::{Described, SchemaRegistry, TypeSchema};
