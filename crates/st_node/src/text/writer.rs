use core::fmt::{self, Write};

use crate::{ListNode, MapNode, Node};

use super::quote;

// -----------------------------------------------------------------------------
// TextWriter

/// Writes a node tree in the text format.
///
/// Entries are separated by newlines and the output carries no trailing
/// newline; [`write_document`](TextWriter::write_document) adds headers and
/// the final newline of a file. Comments of the root map itself are not
/// written, headers take their place.
///
/// ```
/// use st_node::MapNode;
/// use st_node::text::TextWriter;
///
/// let mut root = MapNode::new();
/// root.add("name", "a b").unwrap();
/// root.new_list("ports").unwrap().push("80");
///
/// let mut out = String::new();
/// TextWriter::new(&mut out, 2).write_map(&root).unwrap();
/// assert_eq!(out, "name = a b\nports [\n  80\n]");
/// ```
pub struct TextWriter<W> {
    out: W,
    indent: usize,
}

impl<W: Write> TextWriter<W> {
    /// Creates a writer that indents `indent` spaces per level.
    #[inline]
    pub fn new(out: W, indent: usize) -> Self {
        Self { out, indent }
    }

    #[inline]
    pub fn into_inner(self) -> W {
        self.out
    }

    /// Writes the entries of `root` at nesting level zero.
    pub fn write_map(&mut self, root: &MapNode) -> fmt::Result {
        if root.options().debug() {
            log::debug!("writing map with {} entries", root.len());
        }
        self.map_entries(root, 0)
    }

    /// Writes `#! ` header lines, a blank line, the root and a final newline.
    ///
    /// The blank line is only written when both headers and entries exist.
    pub fn write_document(&mut self, headers: &[String], root: &MapNode) -> fmt::Result {
        for header in headers {
            // An empty header is a bare `#!`.
            if header.is_empty() {
                self.out.write_str("#!\n")?;
            }
            for line in header.lines() {
                if line.is_empty() {
                    self.out.write_str("#!\n")?;
                } else {
                    writeln!(self.out, "#! {line}")?;
                }
            }
        }
        if root.is_empty() {
            return Ok(());
        }
        if !headers.is_empty() {
            self.out.write_char('\n')?;
        }
        self.write_map(root)?;
        self.out.write_char('\n')
    }

    fn pad(&mut self, level: usize) -> fmt::Result {
        for _ in 0..level * self.indent {
            self.out.write_char(' ')?;
        }
        Ok(())
    }

    fn comments(&mut self, comments: &[String], level: usize) -> fmt::Result {
        for comment in comments {
            // An empty comment is a bare `#`.
            if comment.is_empty() {
                self.pad(level)?;
                self.out.write_str("#\n")?;
            }
            for line in comment.lines() {
                self.pad(level)?;
                if line.is_empty() {
                    self.out.write_str("#\n")?;
                } else {
                    writeln!(self.out, "# {line}")?;
                }
            }
        }
        Ok(())
    }

    fn map_entries(&mut self, map: &MapNode, level: usize) -> fmt::Result {
        for (index, (key, node)) in map.iter().enumerate() {
            if index > 0 {
                self.out.write_char('\n')?;
            }
            self.comments(node.comments(), level)?;
            self.pad(level)?;
            self.out.write_str(&quote(key))?;
            match node {
                Node::Scalar(scalar) => write!(self.out, " = {}", scalar.quoted())?,
                Node::Map(child) => {
                    self.out.write_str(" {\n")?;
                    self.map_entries(child, level + 1)?;
                    self.close('}', level)?;
                }
                Node::List(child) => {
                    self.out.write_str(" [\n")?;
                    self.list_items(child, level + 1)?;
                    self.close(']', level)?;
                }
            }
        }
        Ok(())
    }

    fn list_items(&mut self, list: &ListNode, level: usize) -> fmt::Result {
        for (index, node) in list.iter().enumerate() {
            if index > 0 {
                self.out.write_char('\n')?;
            }
            self.comments(node.comments(), level)?;
            self.pad(level)?;
            match node {
                Node::Scalar(scalar) => self.out.write_str(&scalar.quoted())?,
                Node::Map(child) => {
                    self.out.write_str("{\n")?;
                    self.map_entries(child, level + 1)?;
                    self.close('}', level)?;
                }
                Node::List(child) => {
                    self.out.write_str("[\n")?;
                    self.list_items(child, level + 1)?;
                    self.close(']', level)?;
                }
            }
        }
        Ok(())
    }

    fn close(&mut self, delimiter: char, level: usize) -> fmt::Result {
        self.out.write_char('\n')?;
        self.pad(level)?;
        self.out.write_char(delimiter)
    }
}

// -----------------------------------------------------------------------------
// Tests
