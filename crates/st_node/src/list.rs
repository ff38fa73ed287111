use core::fmt;
use std::sync::Arc;

use crate::{MapNode, Node, NodeOptions};

// -----------------------------------------------------------------------------
// ListNode

/// An ordered sequence of nodes. Duplicates are allowed.
///
/// ```
/// use st_node::{ListNode, Node};
///
/// let mut list = ListNode::new();
/// list.push("a");
/// list.push("a");
/// list.new_map().add("k", "v").unwrap();
///
/// assert_eq!(list.len(), 3);
/// assert!(matches!(list.get(2), Some(Node::Map(_))));
/// ```
#[derive(Clone)]
pub struct ListNode {
    items: Vec<Node>,
    comments: Vec<String>,
    options: Arc<NodeOptions>,
}

impl ListNode {
    #[inline]
    pub fn new() -> Self {
        Self::with_options(NodeOptions::shared())
    }

    #[inline]
    pub fn with_options(options: Arc<NodeOptions>) -> Self {
        Self {
            items: Vec::new(),
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
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.items.get(index)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.items.get_mut(index)
    }

    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Node> {
        self.items.iter()
    }

    #[inline]
    pub fn iter_mut(&mut self) -> core::slice::IterMut<'_, Node> {
        self.items.iter_mut()
    }

    /// Appends `node`, which adopts the options of this list.
    pub fn push(&mut self, node: impl Into<Node>) -> &mut Node {
        let mut node = node.into();
        node.adopt(&self.options);
        let index = self.items.len();
        self.items.push(node);
        &mut self.items[index]
    }

    /// Appends an empty map element and returns it.
    pub fn new_map(&mut self) -> &mut MapNode {
        let map = MapNode::with_options(self.options.clone());
        match self.push(map) {
            Node::Map(map) => map,
            _ => unreachable!(),
        }
    }

    /// Appends an empty list element and returns it.
    pub fn new_list(&mut self) -> &mut ListNode {
        let list = ListNode::with_options(self.options.clone());
        match self.push(list) {
            Node::List(list) => list,
            _ => unreachable!(),
        }
    }

    /// Removes the element at `index`, shifting the rest.
    pub fn remove(&mut self, index: usize) -> Option<Node> {
        (index < self.items.len()).then(|| self.items.remove(index))
    }

    #[inline]
    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn comments(&self) -> &[String] {
        &self.comments
    }

    #[inline]
    pub fn comments_mut(&mut self) -> &mut Vec<String> {
        &mut self.comments
    }

    pub fn strip_comments(&mut self) {
        self.comments.clear();
        self.items.iter_mut().for_each(Node::strip_comments);
    }

    pub(crate) fn adopt(&mut self, options: &Arc<NodeOptions>) {
        if Arc::ptr_eq(&self.options, options) {
            return;
        }
        self.options = options.clone();
        for item in &mut self.items {
            item.adopt(options);
        }
    }
}

impl Default for ListNode {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl PartialEq for ListNode {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items && self.comments == other.comments
    }
}

impl fmt::Debug for ListNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.items).finish()
    }
}

impl<'a> IntoIterator for &'a ListNode {
    type Item = &'a Node;
    type IntoIter = core::slice::Iter<'a, Node>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<N: Into<Node>> FromIterator<N> for ListNode {
    fn from_iter<I: IntoIterator<Item = N>>(iter: I) -> Self {
        let mut list = Self::new();
        for node in iter {
            list.push(node);
        }
        list
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::{ListNode, Node, NodeOptions, ScalarNode};

    #[test]
    fn pushed_containers_adopt_options() {
        let options = NodeOptions::shared();
        let mut list = ListNode::with_options(options.clone());

        let mut inner = ListNode::new();
        inner.new_map();
        list.push(inner);

        let Some(Node::List(inner)) = list.get(0) else {
            panic!("expected a list element");
        };
        assert!(Arc::ptr_eq(inner.options(), &options));
        let Some(Node::Map(map)) = inner.get(0) else {
            panic!("expected a map element");
        };
        assert!(Arc::ptr_eq(map.options(), &options));
    }

    #[test]
    fn clone_is_deep() {
        let mut a: ListNode = ["x", "y"].into_iter().collect();
        let b = a.clone();
        a.push(ScalarNode::null());
        a.get_mut(0).unwrap().comments_mut().push("changed".into());
        assert_eq!(b.len(), 2);
        assert!(b.get(0).unwrap().comments().is_empty());
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut list: ListNode = ["x"].into_iter().collect();
        assert!(list.remove(3).is_none());
        assert_eq!(list.remove(0), Some(Node::from("x")));
        assert!(list.is_empty());
    }
}
