//! XML emission driver.
//!
//! This module implements a custom `serde::Serializer` that receives
//! serialize calls as the object graph is traversed and writes quick-xml
//! events directly to the sink. Start tags are deferred until a child
//! actually renders, so composites and collections whose content is
//! suppressed or absent come out self-closing. Every struct field is checked
//! against the compiled [`Selection`] before its value is serialized;
//! suppressed fields are never walked.

use std::io::Write;
use std::mem;

use arbor_schema::{FieldKind, SchemaRegistry, TypeSchema, tag_name};
use quick_xml::Writer;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use serde::ser::{self, Serialize};

use crate::convert::DateConverter;
use crate::error::{Result, SerializeError};
use crate::selection::Selection;

/// What the next serialized value stands for.
enum Slot {
    /// The root value handed to `serialize()`.
    Root,
    /// A visible struct field, carrying the emitted tag and registered kind.
    Field { tag: String, kind: FieldKind },
    /// An element of the enclosing collection.
    Item,
    /// A map entry key, rendered as `<key>`.
    Key,
    /// A map entry value, rendered as `<value>`.
    Value,
    /// Nothing expected; a value landing here is a driver bug.
    Idle,
}

/// A start tag not yet written; it becomes `<tag/>` if no child renders.
struct Element {
    tag: String,
    opened: bool,
}

struct SeqFrame {
    /// Tag for scalar items. Composite items are tagged by their own type
    /// name instead.
    item_tag: Option<String>,
}

pub(crate) struct XmlDriver<'a, W: Write> {
    registry: &'a SchemaRegistry,
    selection: Selection,
    dates: &'a dyn DateConverter,
    writer: Writer<W>,
    root_tag: Option<String>,
    elements: Vec<Element>,
    schemas: Vec<&'a TypeSchema>,
    seqs: Vec<SeqFrame>,
    path: Vec<&'static str>,
    slot: Slot,
}

impl<'a, W: Write> XmlDriver<'a, W> {
    pub fn new(
        registry: &'a SchemaRegistry,
        selection: Selection,
        dates: &'a dyn DateConverter,
        root_tag: Option<String>,
        sink: W,
    ) -> Self {
        XmlDriver {
            registry,
            selection,
            dates,
            writer: Writer::new_with_indent(sink, b' ', 2),
            root_tag,
            elements: Vec::new(),
            schemas: Vec::new(),
            seqs: Vec::new(),
            path: Vec::new(),
            slot: Slot::Root,
        }
    }

    fn take_slot(&mut self) -> Slot {
        mem::replace(&mut self.slot, Slot::Idle)
    }

    fn schema(&self, name: &str) -> Result<&'a TypeSchema> {
        self.registry
            .get(name)
            .ok_or_else(|| SerializeError::UnregisteredType {
                name: name.to_string(),
            })
    }

    fn defer(&mut self, tag: String) {
        self.elements.push(Element { tag, opened: false });
    }

    /// Writes the start tags of every element still deferred.
    fn open_pending(&mut self) -> Result<()> {
        for element in &mut self.elements {
            if !element.opened {
                self.writer
                    .write_event(Event::Start(BytesStart::new(element.tag.as_str())))?;
                element.opened = true;
            }
        }
        Ok(())
    }

    /// Closes the innermost element: an end tag if anything rendered inside
    /// it, a self-closing tag otherwise.
    fn close(&mut self) -> Result<()> {
        let element = self
            .elements
            .pop()
            .ok_or_else(|| SerializeError::Custom("element stack underflow".to_string()))?;
        if element.opened {
            self.writer
                .write_event(Event::End(BytesEnd::new(element.tag.as_str())))?;
        } else {
            // ancestors may still be deferred when the first rendered child
            // is itself childless
            self.open_pending()?;
            self.writer
                .write_event(Event::Empty(BytesStart::new(element.tag.as_str())))?;
        }
        Ok(())
    }

    fn write_text_element(&mut self, tag: &str, text: &str) -> Result<()> {
        self.open_pending()?;
        self.writer.write_event(Event::Start(BytesStart::new(tag)))?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        self.writer.write_event(Event::End(BytesEnd::new(tag)))?;
        Ok(())
    }

    /// Emits a scalar into whatever slot is waiting for it.
    fn emit_scalar(&mut self, text: &str) -> Result<()> {
        match self.take_slot() {
            Slot::Field { tag, kind } => {
                let rendered = if kind == FieldKind::DateTime {
                    self.dates.convert(text)?
                } else {
                    text.to_string()
                };
                self.write_text_element(&tag, &rendered)
            }
            Slot::Item => {
                let tag = self
                    .seqs
                    .last()
                    .and_then(|frame| frame.item_tag.clone())
                    .ok_or_else(|| {
                        SerializeError::Custom(
                            "collection of scalars needs a registered element name".to_string(),
                        )
                    })?;
                self.write_text_element(&tag, text)
            }
            Slot::Key => self.write_text_element("key", text),
            Slot::Value => self.write_text_element("value", text),
            Slot::Root => Err(SerializeError::Custom(
                "the root value must be a registered struct or a collection".to_string(),
            )),
            Slot::Idle => Err(SerializeError::Custom(
                "scalar outside of any field, item or map entry".to_string(),
            )),
        }
    }

    fn dotted_path(&self) -> String {
        self.path.join(".")
    }
}

impl<'w, 'a, W: Write> ser::Serializer for &'w mut XmlDriver<'a, W> {
    type Ok = ();
    type Error = SerializeError;

    type SerializeSeq = SeqWalker<'w, 'a, W>;
    type SerializeTuple = ser::Impossible<(), SerializeError>;
    type SerializeTupleStruct = ser::Impossible<(), SerializeError>;
    type SerializeTupleVariant = ser::Impossible<(), SerializeError>;
    type SerializeMap = MapWalker<'w, 'a, W>;
    type SerializeStruct = StructWalker<'w, 'a, W>;
    type SerializeStructVariant = ser::Impossible<(), SerializeError>;

    fn serialize_bool(self, v: bool) -> Result<()> {
        self.emit_scalar(if v { "true" } else { "false" })
    }

    fn serialize_i8(self, v: i8) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<()> {
        self.serialize_i64(i64::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<()> {
        self.emit_scalar(&v.to_string())
    }

    fn serialize_u8(self, v: u8) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<()> {
        self.serialize_u64(u64::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<()> {
        self.emit_scalar(&v.to_string())
    }

    fn serialize_f32(self, v: f32) -> Result<()> {
        self.serialize_f64(f64::from(v))
    }

    fn serialize_f64(self, v: f64) -> Result<()> {
        // {:?} keeps the trailing .0 on integral values
        self.emit_scalar(&format!("{v:?}"))
    }

    fn serialize_char(self, v: char) -> Result<()> {
        self.emit_scalar(&v.to_string())
    }

    fn serialize_str(self, v: &str) -> Result<()> {
        self.emit_scalar(v)
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(SerializeError::Custom(
            "raw bytes are not supported".to_string(),
        ))
    }

    fn serialize_none(self) -> Result<()> {
        // absent optional fields produce no element at all
        self.slot = Slot::Idle;
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        self.slot = Slot::Idle;
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        self.slot = Slot::Idle;
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<()> {
        self.emit_scalar(variant)
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(SerializeError::Custom(
            "newtype enum variants are not supported".to_string(),
        ))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        match self.take_slot() {
            Slot::Root => {
                let tag = self.root_tag.take().unwrap_or_else(|| "list".to_string());
                self.defer(tag);
                self.seqs.push(SeqFrame { item_tag: None });
                Ok(SeqWalker { driver: self })
            }
            Slot::Field {
                tag,
                kind: FieldKind::Collection(element),
            } => {
                self.defer(tag);
                self.seqs.push(SeqFrame {
                    item_tag: Some(tag_name(element)),
                });
                Ok(SeqWalker { driver: self })
            }
            _ => Err(SerializeError::Custom(
                "sequences are only supported at the root or in collection fields".to_string(),
            )),
        }
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(SerializeError::Custom(
            "tuples are not supported".to_string(),
        ))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(SerializeError::Custom(
            "tuple structs are not supported".to_string(),
        ))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(SerializeError::Custom(
            "tuple enum variants are not supported".to_string(),
        ))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        match self.take_slot() {
            Slot::Field {
                tag,
                kind: FieldKind::Map,
            } => {
                self.defer(tag);
                Ok(MapWalker {
                    driver: self,
                    entry_open: false,
                })
            }
            _ => Err(SerializeError::Custom(
                "maps are only supported in fields registered as maps".to_string(),
            )),
        }
    }

    fn serialize_struct(self, name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        match self.take_slot() {
            Slot::Root => {
                let schema = self.schema(name)?;
                let tag = self.root_tag.take().unwrap_or_else(|| tag_name(name));
                self.defer(tag);
                self.schemas.push(schema);
                Ok(StructWalker { driver: self })
            }
            Slot::Field {
                tag,
                kind: FieldKind::Composite(_),
            } => {
                let schema = self.schema(name)?;
                self.defer(tag);
                self.schemas.push(schema);
                Ok(StructWalker { driver: self })
            }
            Slot::Item => {
                let schema = self.schema(name)?;
                self.defer(tag_name(name));
                self.schemas.push(schema);
                Ok(StructWalker { driver: self })
            }
            Slot::Field { .. } => Err(SerializeError::Custom(format!(
                "struct `{name}` serialized into a field not registered as composite"
            ))),
            Slot::Key | Slot::Value => Err(SerializeError::Custom(
                "map keys and values must be value-typed".to_string(),
            )),
            Slot::Idle => Err(SerializeError::Custom(
                "struct outside of any field, item or root".to_string(),
            )),
        }
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(SerializeError::Custom(
            "struct enum variants are not supported".to_string(),
        ))
    }
}

pub(crate) struct StructWalker<'w, 'a, W: Write> {
    driver: &'w mut XmlDriver<'a, W>,
}

impl<'w, 'a, W: Write> ser::SerializeStruct for StructWalker<'w, 'a, W> {
    type Ok = ();
    type Error = SerializeError;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let driver = &mut *self.driver;
        let schema = driver
            .schemas
            .last()
            .copied()
            .ok_or_else(|| SerializeError::Custom("no active schema".to_string()))?;
        let field = driver.registry.field(schema.name(), key).ok_or_else(|| {
            SerializeError::UnregisteredField {
                type_name: schema.name().to_string(),
                field: key.to_string(),
            }
        })?;
        driver.path.push(field.name());
        let result = if driver
            .selection
            .visible(&driver.dotted_path(), field.kind())
        {
            driver.slot = Slot::Field {
                tag: field.tag().to_string(),
                kind: field.kind(),
            };
            value.serialize(&mut *driver)
        } else {
            Ok(())
        };
        driver.path.pop();
        result
    }

    fn end(self) -> Result<()> {
        self.driver.schemas.pop();
        self.driver.close()
    }
}

pub(crate) struct SeqWalker<'w, 'a, W: Write> {
    driver: &'w mut XmlDriver<'a, W>,
}

impl<'w, 'a, W: Write> ser::SerializeSeq for SeqWalker<'w, 'a, W> {
    type Ok = ();
    type Error = SerializeError;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.driver.slot = Slot::Item;
        value.serialize(&mut *self.driver)
    }

    fn end(self) -> Result<()> {
        self.driver.seqs.pop();
        self.driver.close()
    }
}

pub(crate) struct MapWalker<'w, 'a, W: Write> {
    driver: &'w mut XmlDriver<'a, W>,
    entry_open: bool,
}

impl<'w, 'a, W: Write> ser::SerializeMap for MapWalker<'w, 'a, W> {
    type Ok = ();
    type Error = SerializeError;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.driver.open_pending()?;
        self.driver
            .writer
            .write_event(Event::Start(BytesStart::new("entry")))?;
        self.entry_open = true;
        self.driver.slot = Slot::Key;
        key.serialize(&mut *self.driver)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.driver.slot = Slot::Value;
        value.serialize(&mut *self.driver)?;
        self.driver
            .writer
            .write_event(Event::End(BytesEnd::new("entry")))?;
        self.entry_open = false;
        Ok(())
    }

    fn end(self) -> Result<()> {
        if self.entry_open {
            self.driver
                .writer
                .write_event(Event::End(BytesEnd::new("entry")))?;
        }
        self.driver.close()
    }
}
