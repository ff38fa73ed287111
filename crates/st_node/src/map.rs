use core::fmt;
use std::sync::Arc;

use st_utils::hash::HashMap;

use crate::{ListNode, Node, NodeError, NodeOptions, NodePath};

// -----------------------------------------------------------------------------
// MapNode

/// An insertion-ordered mapping from keys to nodes.
///
/// Keys are unique: [`add`](MapNode::add) rejects a key that is already
/// present with [`NodeError::DuplicatePath`]. Nodes added to a map adopt its
/// [`NodeOptions`].
///
/// ```
/// use st_node::{MapNode, NodeError, NodePath};
///
/// let mut root = MapNode::new();
/// root.add("name", "demo").unwrap();
/// root.ensure_map(&NodePath::parse("server.http"))
///     .unwrap()
///     .add("port", "8080")
///     .unwrap();
///
/// assert!(matches!(root.add("name", "again"), Err(NodeError::DuplicatePath { .. })));
///
/// let port = root.get_path(&NodePath::parse("server.http.port")).unwrap();
/// assert_eq!(port.as_scalar().unwrap().as_str(), Some("8080"));
/// ```
#[derive(Clone)]
pub struct MapNode {
    entries: Vec<(String, Node)>,
    index: HashMap<String, usize>,
    comments: Vec<String>,
    options: Arc<NodeOptions>,
}

impl MapNode {
    #[inline]
    pub fn new() -> Self {
        Self::with_options(NodeOptions::shared())
    }

    #[inline]
    pub fn with_options(options: Arc<NodeOptions>) -> Self {
        Self {
            entries: Vec::new(),
            index: HashMap::default(),
            comments: Vec::new(),
            options,
        }
    }

    #[inline]
    pub fn options(&self) -> &Arc<NodeOptions> {
        &self.options
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Node> {
        let index = *self.index.get(key)?;
        Some(&self.entries[index].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Node> {
        let index = *self.index.get(key)?;
        Some(&mut self.entries[index].1)
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&str, &Node)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn iter_mut(&mut self) -> impl ExactSizeIterator<Item = (&str, &mut Node)> {
        self.entries.iter_mut().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl ExactSizeIterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    /// Adds `node` under `key` and returns it.
    ///
    /// The node adopts the options of this map.
    ///
    /// # Errors
    ///
    /// [`NodeError::DuplicatePath`] if `key` is already present; the map is
    /// left unchanged.
    pub fn add(&mut self, key: impl Into<String>, node: impl Into<Node>) -> Result<&mut Node, NodeError> {
        let key = key.into();
        if self.index.contains_key(key.as_str()) {
            return Err(NodeError::DuplicatePath { path: key });
        }
        let mut node = node.into();
        node.adopt(&self.options);

        let index = self.entries.len();
        self.index.insert(key.clone(), index);
        self.entries.push((key, node));
        Ok(&mut self.entries[index].1)
    }

    /// Adds an empty map under `key` and returns it.
    pub fn new_map(&mut self, key: impl Into<String>) -> Result<&mut MapNode, NodeError> {
        let map = MapNode::with_options(self.options.clone());
        match self.add(key, map)? {
            Node::Map(map) => Ok(map),
            _ => unreachable!(),
        }
    }

    /// Adds an empty list under `key` and returns it.
    pub fn new_list(&mut self, key: impl Into<String>) -> Result<&mut ListNode, NodeError> {
        let list = ListNode::with_options(self.options.clone());
        match self.add(key, list)? {
            Node::List(list) => Ok(list),
            _ => unreachable!(),
        }
    }

    /// Removes the entry under `key`, keeping the order of the others.
    pub fn remove(&mut self, key: &str) -> Option<Node> {
        let index = self.index.remove(key)?;
        let (_, node) = self.entries.remove(index);
        for slot in self.index.values_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(node)
    }

    #[inline]
    pub fn clear(&mut self) {
        self.entries.clear();
        self.index.clear();
    }

    /// Follows `path` through nested maps. The root path yields `None`.
    pub fn get_path(&self, path: &NodePath) -> Option<&Node> {
        let (last, parents) = path.segments().split_last()?;
        let mut current = self;
        for segment in parents {
            current = current.get(segment)?.as_map()?;
        }
        current.get(last)
    }

    pub fn get_path_mut(&mut self, path: &NodePath) -> Option<&mut Node> {
        let (last, parents) = path.segments().split_last()?;
        let mut current = self;
        for segment in parents {
            current = current.get_mut(segment)?.as_map_mut()?;
        }
        current.get_mut(last)
    }

    /// Returns the map at `path`, creating missing maps along the way.
    ///
    /// # Errors
    ///
    /// [`NodeError::NotMap`] if an existing node on the path is not a map.
    pub fn ensure_map(&mut self, path: &NodePath) -> Result<&mut MapNode, NodeError> {
        let mut current = self;
        for segment in path.segments() {
            if !current.contains(segment) {
                current.new_map(segment.as_str())?;
            }
            current = match current.get_mut(segment) {
                Some(Node::Map(map)) => map,
                _ => {
                    return Err(NodeError::NotMap {
                        path: path.to_string(),
                    });
                }
            };
        }
        Ok(current)
    }

    #[inline]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    #[inline]
    pub fn comments_mut(&mut self) -> &mut Vec<String> {
        &mut self.comments
    }

    /// Removes the comments of this map and all of its descendants.
    pub fn strip_comments(&mut self) {
        self.comments.clear();
        for (_, node) in &mut self.entries {
            node.strip_comments();
        }
    }

    pub(crate) fn adopt(&mut self, options: &Arc<NodeOptions>) {
        if Arc::ptr_eq(&self.options, options) {
            return;
        }
        self.options = options.clone();
        for (_, node) in &mut self.entries {
            node.adopt(options);
        }
    }
}

impl Default for MapNode {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for MapNode {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries && self.comments == other.comments
    }
}

impl fmt::Debug for MapNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Writes the map in the text format, without document headers.
impl fmt::Display for MapNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        crate::text::TextWriter::new(f, self.options.indent()).write_map(self)
    }
}

// -----------------------------------------------------------------------------
// Tests
