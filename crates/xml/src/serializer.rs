//! Fluent serialization entry points.

use std::io::Write;

use arbor_schema::{Described, SchemaRegistry};
use serde::Serialize;

use crate::convert::{DateConverter, Iso8601DateConverter};
use crate::error::{Result, SerializeError};
use crate::selection::{Directive, Selection};
use crate::ser::XmlDriver;

/// Session object tying a schema registry to an output sink.
///
/// One `from(..)`/`serialize()` round trip writes one XML document to the
/// sink. The session can be reused for further documents; the registry is
/// shared and immutable, so concurrent serializations simply use separate
/// sessions.
pub struct XmlSerialization<'r, W: Write> {
    registry: &'r SchemaRegistry,
    dates: Box<dyn DateConverter>,
    sink: W,
}

impl<'r, W: Write> XmlSerialization<'r, W> {
    pub fn new(registry: &'r SchemaRegistry, sink: W) -> Self {
        XmlSerialization {
            registry,
            dates: Box::new(Iso8601DateConverter),
            sink,
        }
    }

    /// Replaces the converter applied to date fields.
    pub fn with_date_converter(mut self, converter: impl DateConverter + 'static) -> Self {
        self.dates = Box::new(converter);
        self
    }

    /// Starts serializing `value` under the default root tag, the
    /// lower-camel-cased type name, or `list` for collection roots.
    pub fn from<'s, T>(&'s mut self, value: &'s T) -> Serializer<'s, 'r, T, W>
    where
        T: Described + Serialize + ?Sized,
    {
        Serializer {
            session: self,
            value,
            root_tag: None,
            directives: Vec::new(),
            recursive: false,
        }
    }

    /// Starts serializing `value` under an explicit root tag.
    pub fn from_tagged<'s, T>(&'s mut self, value: &'s T, root_tag: &str) -> Serializer<'s, 'r, T, W>
    where
        T: Described + Serialize + ?Sized,
    {
        let mut serializer = self.from(value);
        serializer.root_tag = Some(root_tag.to_string());
        serializer
    }

    /// Consumes the session and hands the sink back.
    pub fn into_inner(self) -> W {
        self.sink
    }
}

/// Single-use builder accumulating the directives of one document.
///
/// `serialize` consumes the builder, so a second call on the same chain is a
/// compile error rather than undefined behavior. Path problems surface in
/// `serialize` before any byte reaches the sink.
pub struct Serializer<'s, 'r, T: ?Sized, W: Write> {
    session: &'s mut XmlSerialization<'r, W>,
    value: &'s T,
    root_tag: Option<String>,
    directives: Vec<Directive>,
    recursive: bool,
}

impl<'s, 'r, T, W> Serializer<'s, 'r, T, W>
where
    T: Described + Serialize + ?Sized,
    W: Write,
{
    /// Marks the given paths visible. Every prefix of an included path
    /// becomes a visible container as well.
    pub fn include<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directives
            .extend(paths.into_iter().map(|p| Directive::Include(p.into())));
        self
    }

    /// Marks the given exact paths hidden.
    pub fn exclude<I, S>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.directives
            .extend(paths.into_iter().map(|p| Directive::Exclude(p.into())));
        self
    }

    /// Hides scalar fields by default; explicit includes still apply.
    pub fn exclude_all(mut self) -> Self {
        self.directives.push(Directive::ExcludeAll);
        self
    }

    /// Makes every reachable field visible unless explicitly excluded.
    pub fn recursive(mut self) -> Self {
        self.recursive = true;
        self
    }

    /// Resolves the accumulated directives and writes the document.
    ///
    /// Nothing reaches the sink when resolution fails.
    pub fn serialize(self) -> Result<()> {
        let selection = Selection::compile(
            self.session.registry,
            T::NAME,
            &self.directives,
            self.recursive,
        )?;
        let mut driver = XmlDriver::new(
            self.session.registry,
            selection,
            self.session.dates.as_ref(),
            self.root_tag,
            &mut self.session.sink,
        );
        self.value.serialize(&mut driver)
    }
}

/// Serializes `value` with the default selection rules into a string.
pub fn to_xml_string<T>(registry: &SchemaRegistry, value: &T) -> Result<String>
where
    T: Described + Serialize + ?Sized,
{
    let mut buffer = Vec::new();
    XmlSerialization::new(registry, &mut buffer)
        .from(value)
        .serialize()?;
    String::from_utf8(buffer).map_err(|e| SerializeError::Custom(e.to_string()))
}
