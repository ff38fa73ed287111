use std::sync::Arc;

use crate::{ListNode, MapNode, NodeOptions, ScalarNode};

// -----------------------------------------------------------------------------
// Node

/// One node of a document tree.
///
/// Children are owned by value, so a tree can never contain itself.
#[derive(Clone, Debug, PartialEq)]
pub enum Node {
    Scalar(ScalarNode),
    Map(MapNode),
    List(ListNode),
}

impl Node {
    /// A null scalar.
    #[inline]
    pub const fn null() -> Self {
        Self::Scalar(ScalarNode::null())
    }

    /// `"scalar"`, `"map"` or `"list"`.
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Map(_) => "map",
            Self::List(_) => "list",
        }
    }

    /// `true` for a null scalar.
    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Scalar(s) if s.is_null())
    }

    #[inline]
    pub fn as_scalar(&self) -> Option<&ScalarNode> {
        match self {
            Self::Scalar(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map(&self) -> Option<&MapNode> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut MapNode> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&ListNode> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list_mut(&mut self) -> Option<&mut ListNode> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    pub fn comments(&self) -> &[String] {
        match self {
            Self::Scalar(s) => s.comments(),
            Self::Map(m) => m.comments(),
            Self::List(l) => l.comments(),
        }
    }

    pub fn comments_mut(&mut self) -> &mut Vec<String> {
        match self {
            Self::Scalar(s) => s.comments_mut(),
            Self::Map(m) => m.comments_mut(),
            Self::List(l) => l.comments_mut(),
        }
    }

    /// Removes the comments of this node and all of its descendants.
    pub fn strip_comments(&mut self) {
        match self {
            Self::Scalar(s) => s.comments_mut().clear(),
            Self::Map(m) => m.strip_comments(),
            Self::List(l) => l.strip_comments(),
        }
    }

    /// Makes this node and its descendants share `options`.
    pub(crate) fn adopt(&mut self, options: &Arc<NodeOptions>) {
        match self {
            Self::Scalar(_) => {}
            Self::Map(m) => m.adopt(options),
            Self::List(l) => l.adopt(options),
        }
    }
}

impl From<ScalarNode> for Node {
    #[inline]
    fn from(value: ScalarNode) -> Self {
        Self::Scalar(value)
    }
}

impl From<MapNode> for Node {
    #[inline]
    fn from(value: MapNode) -> Self {
        Self::Map(value)
    }
}

impl From<ListNode> for Node {
    #[inline]
    fn from(value: ListNode) -> Self {
        Self::List(value)
    }
}

impl From<&str> for Node {
    #[inline]
    fn from(value: &str) -> Self {
        Self::Scalar(ScalarNode::new(value))
    }
}
