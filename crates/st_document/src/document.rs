use core::fmt;
use core::str::FromStr;
use std::sync::Arc;

use st_node::text::{TextReader, TextWriter};
use st_node::{MapNode, NodeError, NodeOptions};
use st_reflect::SerializerError;
use st_reflect::mapper::{Configurable, ObjectMapper};
use st_reflect::registry::SerializerRegistry;

// -----------------------------------------------------------------------------
// Document

/// Header lines plus a root map, in memory.
///
/// The root and every node added to it share the document's
/// [`NodeOptions`]. Objects are mapped through the document's
/// [`ObjectMapper`], which resolves codecs in the global registry unless
/// another one is given.
///
/// ```
/// use st_document::Document;
///
/// let mut document: Document = "#! demo\n\nname = a b\nport = 80".parse().unwrap();
/// assert_eq!(document.headers(), ["demo"]);
///
/// document.root_mut().add("debug", "true").unwrap();
/// assert_eq!(document.to_string(), "#! demo\n\nname = a b\nport = 80\ndebug = true\n");
/// ```
#[derive(Clone)]
pub struct Document {
    headers: Vec<String>,
    root: MapNode,
    mapper: ObjectMapper,
}

impl Document {
    /// An empty document with fresh options and the global registry.
    pub fn new() -> Self {
        Self::with_options(NodeOptions::shared())
    }

    pub fn with_options(options: Arc<NodeOptions>) -> Self {
        Self {
            headers: Vec::new(),
            root: MapNode::with_options(options.clone()),
            mapper: ObjectMapper::default().with_options(options),
        }
    }

    /// Resolves codecs in `registry`, usually a
    /// [`child`](SerializerRegistry::child) of the global registry.
    pub fn with_registry(mut self, registry: Arc<SerializerRegistry>) -> Self {
        self.mapper = ObjectMapper::new(registry).with_options(self.options().clone());
        self
    }

    /// Parses `text`, keeping comments when `preserve_comments` is set.
    pub fn parse(text: &str, preserve_comments: bool) -> Result<Self, NodeError> {
        let mut document = Self::new();
        document.read(text, preserve_comments)?;
        Ok(document)
    }

    /// Replaces headers and root with the content of `text`.
    ///
    /// On error the root keeps the entries read before the failing line.
    pub fn read(&mut self, text: &str, preserve_comments: bool) -> Result<(), NodeError> {
        self.root.clear();
        self.headers = TextReader::new(text)
            .preserve_comments(preserve_comments)
            .read_document(&mut self.root)?;
        Ok(())
    }

    #[inline]
    pub fn options(&self) -> &Arc<NodeOptions> {
        self.root.options()
    }

    #[inline]
    pub fn mapper(&self) -> &ObjectMapper {
        &self.mapper
    }

    #[inline]
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn set_headers(&mut self, headers: impl IntoIterator<Item = impl Into<String>>) {
        self.headers = headers.into_iter().map(Into::into).collect();
    }

    /// Appends a header. A multi-line header is written as several `#! `
    /// lines.
    pub fn add_header(&mut self, header: impl Into<String>) {
        self.headers.push(header.into());
    }

    #[inline]
    pub fn root(&self) -> &MapNode {
        &self.root
    }

    #[inline]
    pub fn root_mut(&mut self) -> &mut MapNode {
        &mut self.root
    }

    /// Takes the root out, leaving an empty map with the same options.
    pub fn take_root(&mut self) -> MapNode {
        let empty = MapNode::with_options(self.options().clone());
        core::mem::replace(&mut self.root, empty)
    }

    /// Puts `root` back in place, returning the current one.
    pub fn replace_root(&mut self, root: MapNode) -> MapNode {
        core::mem::replace(&mut self.root, root)
    }

    /// Replaces the root with the fields of `source`.
    pub fn extract(&mut self, source: &dyn Configurable) -> Result<(), SerializerError> {
        self.root.clear();
        self.mapper.extract_into(source, &mut self.root)
    }

    /// Assigns the fields of `target` from the root.
    pub fn modify(&self, target: &mut dyn Configurable) -> Result<(), SerializerError> {
        self.mapper.modify(target, &self.root)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("headers", &self.headers)
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

/// Headers, a blank line, the root and a final newline.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TextWriter::new(f, self.options().indent()).write_document(&self.headers, &self.root)
    }
}

/// Parses with comments preserved.
impl FromStr for Document {
    type Err = NodeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text, true)
    }
}

// -----------------------------------------------------------------------------
// Tests
