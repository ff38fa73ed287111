use core::iter::{Enumerate, Peekable};
use core::mem;
use core::str::Lines;

use crate::{ListNode, MapNode, NodeError, ScalarNode};

use super::unquote;

// -----------------------------------------------------------------------------
// Line helpers

fn trim(line: &str) -> &str {
    line.trim_matches([' ', '\t'])
}

/// Strips indentation only. Comment and header text keeps trailing blanks.
fn trim_indent(line: &str) -> &str {
    line.trim_start_matches([' ', '\t'])
}

/// Finds the first `{`, `[` or `=` outside of a quoted span.
fn find_opener(line: &str) -> Option<(usize, char)> {
    let mut quoted = false;
    let mut escaped = false;
    for (index, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if quoted => escaped = true,
            '"' => quoted = !quoted,
            '{' | '[' | '=' if !quoted => return Some((index, c)),
            _ => {}
        }
    }
    None
}

fn comment_text(line: &str) -> String {
    let text = &line[1..];
    text.strip_prefix(' ').unwrap_or(text).to_owned()
}

fn scalar(text: &str) -> ScalarNode {
    if text == "null" {
        ScalarNode::null()
    } else {
        ScalarNode::new(unquote(text))
    }
}

// -----------------------------------------------------------------------------
// TextReader

/// Reads the text format into a [`MapNode`].
///
/// Reading is line oriented: every container opens at the end of a line and
/// closes on a line of its own. End of input closes the root map only.
/// Comment and header lines lose their indentation and the `# ` or `#! `
/// marker; the rest of the line is kept as written.
///
/// ```
/// use st_node::MapNode;
/// use st_node::text::TextReader;
///
/// let text = "#! header\n\n# the name\nname = \"a, b\"\nports [\n  80\n  443\n]";
///
/// let mut root = MapNode::new();
/// let headers = TextReader::new(text)
///     .preserve_comments(true)
///     .read_document(&mut root)
///     .unwrap();
///
/// assert_eq!(headers, ["header"]);
/// let name = root.get("name").unwrap();
/// assert_eq!(name.as_scalar().unwrap().as_str(), Some("a, b"));
/// assert_eq!(name.comments(), ["the name"]);
/// assert_eq!(root.get("ports").unwrap().as_list().unwrap().len(), 2);
/// ```
pub struct TextReader<'a> {
    lines: Peekable<Enumerate<Lines<'a>>>,
    preserve_comments: bool,
    pending: Vec<String>,
    count: usize,
}

impl<'a> TextReader<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            lines: text.lines().enumerate().peekable(),
            preserve_comments: false,
            pending: Vec::new(),
            count: 0,
        }
    }

    /// Attaches comment lines to the node that follows them.
    ///
    /// Comments are discarded when this is off, which is the default.
    pub fn preserve_comments(mut self, preserve: bool) -> Self {
        self.preserve_comments = preserve;
        self
    }

    /// Reads the whole input into a fresh map.
    pub fn read(self) -> Result<MapNode, NodeError> {
        let mut root = MapNode::new();
        self.read_document(&mut root)?;
        Ok(root)
    }

    /// Reads leading `#! ` headers, then the entries of the root into `root`.
    ///
    /// Returns the header lines. On error `root` keeps the entries that were
    /// read before the failing line.
    pub fn read_document(mut self, root: &mut MapNode) -> Result<Vec<String>, NodeError> {
        let mut headers = Vec::new();
        while let Some(&(_, line)) = self.lines.peek() {
            let line = trim_indent(line);
            if let Some(header) = line.strip_prefix("#!") {
                headers.push(header.strip_prefix(' ').unwrap_or(header).to_owned());
            } else if !trim(line).is_empty() {
                break;
            }
            self.lines.next();
        }

        self.read_map(root, 0)?;
        if root.options().debug() {
            log::debug!(
                "read {} lines, {} nodes, {} headers",
                self.count,
                root.len(),
                headers.len()
            );
        }
        Ok(headers)
    }

    fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let (index, line) = self.lines.next()?;
        self.count = index + 1;
        Some((index + 1, trim_indent(line)))
    }

    /// Handles blank and comment lines. Returns `true` if the line was consumed.
    fn skip_trivia(&mut self, line: &str) -> bool {
        if trim(line).is_empty() {
            return true;
        }
        if line.starts_with('#') {
            if self.preserve_comments {
                self.pending.push(comment_text(line));
            }
            return true;
        }
        false
    }

    fn take_comments(&mut self) -> Vec<String> {
        mem::take(&mut self.pending)
    }

    fn expect_line_end(number: usize, rest: &str, opener: char) -> Result<(), NodeError> {
        if trim(rest).is_empty() {
            Ok(())
        } else {
            Err(NodeError::syntax(
                number,
                format!("`{opener}` must end the line"),
            ))
        }
    }

    fn read_map(&mut self, map: &mut MapNode, depth: usize) -> Result<(), NodeError> {
        while let Some((number, line)) = self.next_line() {
            if self.skip_trivia(line) {
                continue;
            }
            let line = trim(line);
            if let Some(rest) = line.strip_prefix('}') {
                if depth == 0 {
                    return Err(NodeError::syntax(number, "unmatched `}`"));
                }
                Self::expect_line_end(number, rest, '}')?;
                self.pending.clear();
                return Ok(());
            }

            let Some((at, opener)) = find_opener(line) else {
                return Err(NodeError::syntax(number, "expected `=`, `{` or `[`"));
            };
            let raw_key = trim(&line[..at]);
            if raw_key.is_empty() {
                return Err(NodeError::syntax(number, "missing key"));
            }
            let key = unquote(raw_key);
            let rest = &line[at + 1..];

            match opener {
                '{' => {
                    Self::expect_line_end(number, rest, '{')?;
                    let comments = self.take_comments();
                    let child = map.new_map(key)?;
                    *child.comments_mut() = comments;
                    self.read_map(child, depth + 1)?;
                }
                '[' => {
                    Self::expect_line_end(number, rest, '[')?;
                    let comments = self.take_comments();
                    let child = map.new_list(key)?;
                    *child.comments_mut() = comments;
                    self.read_list(child, depth + 1)?;
                }
                _ => {
                    let mut node = scalar(trim(rest));
                    *node.comments_mut() = self.take_comments();
                    map.add(key, node)?;
                }
            }
        }

        self.pending.clear();
        if depth == 0 {
            Ok(())
        } else {
            Err(NodeError::UnexpectedEof { expected: '}' })
        }
    }

    fn read_list(&mut self, list: &mut ListNode, depth: usize) -> Result<(), NodeError> {
        while let Some((number, line)) = self.next_line() {
            if self.skip_trivia(line) {
                continue;
            }
            let line = trim(line);
            if let Some(rest) = line.strip_prefix(']') {
                Self::expect_line_end(number, rest, ']')?;
                self.pending.clear();
                return Ok(());
            }
            if line.starts_with('}') {
                return Err(NodeError::syntax(number, "unmatched `}`"));
            }

            let comments = self.take_comments();
            if let Some(rest) = line.strip_prefix('{') {
                Self::expect_line_end(number, rest, '{')?;
                let child = list.new_map();
                *child.comments_mut() = comments;
                self.read_map(child, depth + 1)?;
            } else if let Some(rest) = line.strip_prefix('[') {
                Self::expect_line_end(number, rest, '[')?;
                let child = list.new_list();
                *child.comments_mut() = comments;
                self.read_list(child, depth + 1)?;
            } else {
                let mut node = scalar(line);
                *node.comments_mut() = comments;
                list.push(node);
            }
        }

        Err(NodeError::UnexpectedEof { expected: ']' })
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::TextReader;
    use crate::text::TextWriter;
    use crate::{MapNode, Node, NodeError, NodePath, ScalarNode};

    fn read(text: &str) -> Result<MapNode, NodeError> {
        TextReader::new(text).preserve_comments(true).read()
    }

    fn text_at<'a>(root: &'a MapNode, path: &str) -> Option<&'a str> {
        root.get_path(&NodePath::parse(path))?.as_scalar()?.as_str()
    }

    #[test]
    fn reads_nested_containers() {
        let root = read(
            "a = 1\n\
             b {\n  c = \"x y \"\n  d [\n    1\n    {\n      e = f\n    }\n    [\n    ]\n  ]\n}",
        )
        .unwrap();

        assert_eq!(text_at(&root, "a"), Some("1"));
        assert_eq!(text_at(&root, "b.c"), Some("x y "));
        let d = root.get_path(&NodePath::parse("b.d")).unwrap().as_list().unwrap();
        assert_eq!(d.len(), 3);
        assert_eq!(d.get(0), Some(&Node::from("1")));
        assert_eq!(text_at(d.get(1).unwrap().as_map().unwrap(), "e"), Some("f"));
        assert!(d.get(2).unwrap().as_list().unwrap().is_empty());
    }

    #[test]
    fn null_only_when_bare() {
        let root = read("a = null\nb = \"null\"").unwrap();
        assert!(root.get("a").unwrap().is_null());
        assert_eq!(text_at(&root, "b"), Some("null"));
    }

    #[test]
    fn first_opener_outside_quotes_wins() {
        let root = read("\"k=[\" = v{\nm = \"{\"").unwrap();
        // `v{` is the value: `=` comes first.
        assert_eq!(text_at(&root, "k=["), Some("v{"));
        assert_eq!(text_at(&root, "m"), Some("{"));
    }

    #[test]
    fn comments_are_attached_or_dropped() {
        let text = "# about a\na = 1\nb {\n  # lost before close\n}\n# trailing";
        let root = read(text).unwrap();
        assert_eq!(root.get("a").unwrap().comments(), ["about a"]);
        assert!(root.get("b").unwrap().comments().is_empty());

        let plain = TextReader::new(text).read().unwrap();
        assert!(plain.get("a").unwrap().comments().is_empty());
    }

    #[test]
    fn comment_text_is_kept_verbatim() {
        let mut root = MapNode::new();
        let node = root.add("a", "1").unwrap();
        node.comments_mut()
            .extend(["abc  ".to_owned(), "\t".to_owned(), "  indented".to_owned()]);
        let inner = root.new_map("b").unwrap().add("c", "2").unwrap();
        inner.comments_mut().push("nested ".into());

        let text = root.to_string();
        assert_eq!(text, "# abc  \n# \t\n#   indented\na = 1\nb {\n  # nested \n  c = 2\n}");

        let back = read(&text).unwrap();
        assert_eq!(back.get("a").unwrap().comments(), ["abc  ", "\t", "  indented"]);
        let c = back.get_path(&NodePath::parse("b.c")).unwrap();
        assert_eq!(c.comments(), ["nested "]);
        assert_eq!(back, root);
    }

    #[test]
    fn empty_and_padded_headers_round_trip() {
        let mut root = MapNode::new();
        root.add("x", "1").unwrap();
        let headers = vec![String::new(), "x".to_owned(), "padded  ".to_owned()];

        let mut text = String::new();
        TextWriter::new(&mut text, 2).write_document(&headers, &root).unwrap();
        assert_eq!(text, "#!\n#! x\n#! padded  \n\nx = 1\n");

        let mut back = MapNode::new();
        let read_headers = TextReader::new(&text).read_document(&mut back).unwrap();
        assert_eq!(read_headers, headers);
        assert_eq!(back, root);
    }

    #[test]
    fn syntax_errors_carry_line_numbers() {
        assert!(matches!(
            read("a = 1\njust words"),
            Err(NodeError::Syntax { line: 2, .. })
        ));
        assert!(matches!(read("}"), Err(NodeError::Syntax { line: 1, .. })));
        assert!(matches!(read("a { }"), Err(NodeError::Syntax { line: 1, .. })));
        assert!(matches!(read(" = 3"), Err(NodeError::Syntax { .. })));
    }

    #[test]
    fn eof_closes_the_root_only() {
        assert!(matches!(
            read("a {\n  b = 1"),
            Err(NodeError::UnexpectedEof { expected: '}' })
        ));
        assert!(matches!(
            read("a [\n  1"),
            Err(NodeError::UnexpectedEof { expected: ']' })
        ));
    }

    #[test]
    fn duplicate_keys_are_rejected() {
        assert!(matches!(
            read("a = 1\na = 2"),
            Err(NodeError::DuplicatePath { .. })
        ));
    }

    #[test]
    fn partial_read_is_kept_on_error() {
        let mut root = MapNode::new();
        let result = TextReader::new("x = 1\ny {\n").read_document(&mut root);
        assert!(result.is_err());
        assert_eq!(root.get("x"), Some(&Node::Scalar(ScalarNode::new("1"))));
    }

    #[test]
    fn headers_only_before_entries() {
        let mut root = MapNode::new();
        let headers = TextReader::new("#! one\n#!two\n\nx = 1\n#! late")
            .read_document(&mut root)
            .unwrap();
        assert_eq!(headers, ["one", "two"]);
        assert_eq!(root.len(), 1);
    }
}
