use core::fmt;

// -----------------------------------------------------------------------------
// NodePath

/// A dotted path into a tree of [`MapNode`](crate::MapNode)s.
///
/// [`parse`](NodePath::parse) splits on `.`; a single segment built with
/// [`segment`](NodePath::segment) keeps its text but replaces any `.` with `_`,
/// so a field name can never be mistaken for a nested path.
///
/// ```
/// use st_node::NodePath;
///
/// let path = NodePath::parse("server.http.port");
/// assert_eq!(path.segments(), ["server", "http", "port"]);
///
/// let key = NodePath::segment("log.level");
/// assert_eq!(key.to_string(), "log_level");
///
/// assert_eq!(NodePath::parse("a").join("b.c").to_string(), "a.b_c");
/// assert_eq!(path.parent(), Some(NodePath::parse("server.http")));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    segments: Vec<String>,
}

impl NodePath {
    /// The empty path, naming the root.
    #[inline]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Splits `text` on `.`; empty segments are dropped.
    pub fn parse(text: &str) -> Self {
        Self {
            segments: text
                .split('.')
                .filter(|s| !s.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    /// A path with exactly one segment.
    pub fn segment(name: &str) -> Self {
        Self {
            segments: vec![Self::normalize(name)],
        }
    }

    /// Appends one segment, normalizing it like [`segment`](Self::segment).
    pub fn join(mut self, name: &str) -> Self {
        self.segments.push(Self::normalize(name));
        self
    }

    #[inline]
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    #[inline]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// The last segment, if any.
    #[inline]
    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    /// The path without its last segment. The root has no parent.
    pub fn parent(&self) -> Option<NodePath> {
        let (_, parents) = self.segments.split_last()?;
        Some(Self {
            segments: parents.to_vec(),
        })
    }

    fn normalize(name: &str) -> String {
        name.replace('.', "_")
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<&str> for NodePath {
    #[inline]
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

// -----------------------------------------------------------------------------
// Tests
