use std::borrow::Cow;

use st_node::{NodeError, NodePath};
use thiserror::Error;

// -----------------------------------------------------------------------------
// TypeError

/// A descriptor that cannot take part in a variance check.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TypeError {
    /// A generic type was used without its type arguments.
    #[error("generic type `{ty}` is used without type arguments")]
    RawType { ty: String },

    #[error("type `{ty}` takes {expected} type arguments but {found} were given")]
    ArgCount {
        ty: String,
        expected: usize,
        found: usize,
    },
}

// -----------------------------------------------------------------------------
// SerializerError

/// Failure while converting between a value and a node.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SerializerError {
    /// No node exists at the expected path.
    #[error("no node at `{path}`")]
    NullNode { path: NodePath },

    /// A scalar without a value was found where a value is required.
    #[error("scalar has no value")]
    NullValue,

    #[error("expected a {expected} node, found a {found} node")]
    NotMatch {
        expected: &'static str,
        found: &'static str,
    },

    /// The object has no base to map into.
    #[error("the object has no base schema")]
    NotBase,

    #[error(transparent)]
    RawType(#[from] TypeError),

    /// A collection type carried no element type.
    #[error("`{ty}` needs exactly one type argument to map as a list")]
    NotParamList { ty: String },

    /// A map type carried no key and value types.
    #[error("`{ty}` needs exactly two type arguments to map as a map")]
    NotParamMap { ty: String },

    #[error("cannot read `{text}` as {ty}: {reason}")]
    Deserialize {
        ty: String,
        text: String,
        reason: Cow<'static, str>,
    },

    #[error("cannot write {ty}: {reason}")]
    Serialize {
        ty: String,
        reason: Cow<'static, str>,
    },

    #[error("{0}")]
    Serializer(Cow<'static, str>),

    #[error(transparent)]
    Node(NodeError),

    /// A failure scoped to one field of an object.
    #[error("field `{path}`: {source}")]
    Field {
        path: NodePath,
        #[source]
        source: Box<SerializerError>,
    },
}

impl SerializerError {
    /// Wraps `self` as the failure of the field at `path`.
    pub fn at(self, path: &NodePath) -> Self {
        Self::Field {
            path: path.clone(),
            source: Box::new(self),
        }
    }

    pub(crate) fn general(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Serializer(message.into())
    }

    /// The innermost error below any [`Field`](Self::Field) wrappers.
    pub fn root_cause(&self) -> &Self {
        match self {
            Self::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Scalar conversion failures keep their own kinds, the rest wrap as
/// [`SerializerError::Node`].
impl From<NodeError> for SerializerError {
    fn from(value: NodeError) -> Self {
        match value {
            NodeError::NullValue => Self::NullValue,
            NodeError::Convert {
                text,
                target,
                reason,
            } => Self::Deserialize {
                ty: target.to_owned(),
                text,
                reason: Cow::Owned(reason),
            },
            other => Self::Node(other),
        }
    }
}
