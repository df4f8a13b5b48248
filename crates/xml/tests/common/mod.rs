//! Shared fixtures: a small order-taking domain and its schema registry.

#![allow(dead_code)]

use std::collections::HashMap;

use arbor_schema::{Described, Field, SchemaRegistry, TypeSchema};
use chrono::{DateTime, FixedOffset};
use serde::Serialize;

#[derive(Serialize)]
pub struct Address {
    pub street: String,
}

#[derive(Serialize)]
pub struct Client {
    pub name: String,
    pub address: Option<Address>,
    pub creation: Option<DateTime<FixedOffset>>,
}

#[derive(Serialize)]
pub struct Item {
    pub name: String,
    pub price: f64,
}

#[derive(Serialize)]
pub struct Order {
    pub client: Option<Client>,
    pub price: f64,
    pub comments: String,
    pub items: Vec<Item>,
}

#[derive(Serialize)]
pub struct Properties {
    pub map: HashMap<String, String>,
}

#[derive(Serialize)]
pub struct AdvancedOrder {
    pub client: Option<Client>,
    pub price: f64,
    pub comments: String,
    pub notes: String,
}

#[derive(Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Basic,
    Advanced,
}

#[derive(Serialize)]
pub struct BasicOrder {
    pub client: Option<Client>,
    pub price: f64,
    pub comments: String,
    pub level: Level,
}

#[derive(Serialize)]
pub struct GenericWrapper<T> {
    pub entity_list: Vec<T>,
    pub total: i32,
}

#[derive(Serialize)]
pub struct WithAlias {
    pub abc: String,
}

#[derive(Serialize)]
pub struct WithAliasedAttribute {
    pub aliased: WithAlias,
}

#[derive(Serialize)]
pub struct Blank {}

#[derive(Serialize)]
pub struct A {
    pub field1: Blank,
}

#[derive(Serialize)]
pub struct B {
    pub field1: Blank,
    pub field2: Blank,
}

impl Described for Address {
    const NAME: &'static str = "Address";
}
impl Described for Client {
    const NAME: &'static str = "Client";
}
impl Described for Item {
    const NAME: &'static str = "Item";
}
impl Described for Order {
    const NAME: &'static str = "Order";
}
impl Described for Properties {
    const NAME: &'static str = "Properties";
}
impl Described for AdvancedOrder {
    const NAME: &'static str = "AdvancedOrder";
}
impl Described for BasicOrder {
    const NAME: &'static str = "BasicOrder";
}
impl Described for GenericWrapper<Client> {
    const NAME: &'static str = "GenericWrapper";
}
impl Described for WithAlias {
    const NAME: &'static str = "WithAlias";
}
impl Described for WithAliasedAttribute {
    const NAME: &'static str = "WithAliasedAttribute";
}
impl Described for Blank {
    const NAME: &'static str = "Blank";
}
impl Described for A {
    const NAME: &'static str = "A";
}
impl Described for B {
    const NAME: &'static str = "B";
}

pub fn registry() -> SchemaRegistry {
    let mut registry = SchemaRegistry::new();
    registry
        .register(TypeSchema::new::<Address>().field(Field::value("street")))
        .register(
            TypeSchema::new::<Client>()
                .field(Field::value("name"))
                .field(Field::composite::<Address>("address"))
                .field(Field::date("creation")),
        )
        .register(
            TypeSchema::new::<Item>()
                .field(Field::value("name"))
                .field(Field::value("price")),
        )
        .register(
            TypeSchema::new::<Order>()
                .field(Field::composite::<Client>("client"))
                .field(Field::value("price"))
                .field(Field::value("comments"))
                .field(Field::collection::<Item>("items")),
        )
        .register(TypeSchema::new::<Properties>().field(Field::map("map")))
        .register(
            TypeSchema::new::<AdvancedOrder>()
                .extends::<Order>()
                .field(Field::value("notes")),
        )
        .register(
            TypeSchema::new::<BasicOrder>()
                .extends::<Order>()
                .field(Field::value("level")),
        )
        .register(
            TypeSchema::new::<GenericWrapper<Client>>()
                .field(Field::collection::<Client>("entity_list"))
                .field(Field::value("total")),
        )
        .register(TypeSchema::new::<WithAlias>().field(Field::value("abc").aliased("def")))
        .register(
            TypeSchema::new::<WithAliasedAttribute>()
                .field(Field::composite::<WithAlias>("aliased")),
        )
        .register(TypeSchema::new::<Blank>())
        .register(TypeSchema::new::<A>().field(Field::composite::<Blank>("field1")))
        .register(
            TypeSchema::new::<B>()
                .extends::<A>()
                .field(Field::composite::<Blank>("field2")),
        );
    registry
}

pub fn order() -> Order {
    Order {
        client: Some(Client {
            name: "guilherme silveira".to_string(),
            address: None,
            creation: None,
        }),
        price: 15.0,
        comments: "pack it nicely, please".to_string(),
        items: Vec::new(),
    }
}

pub fn order_with_address() -> Order {
    Order {
        client: Some(Client {
            name: "guilherme silveira".to_string(),
            address: Some(Address {
                street: "R. Vergueiro".to_string(),
            }),
            creation: None,
        }),
        price: 15.0,
        comments: "pack it nicely, please".to_string(),
        items: Vec::new(),
    }
}

pub fn order_with_item() -> Order {
    Order {
        client: Some(Client {
            name: "guilherme silveira".to_string(),
            address: None,
            creation: None,
        }),
        price: 15.0,
        comments: "pack it nicely, please".to_string(),
        items: vec![Item {
            name: "any item".to_string(),
            price: 12.99,
        }],
    }
}
