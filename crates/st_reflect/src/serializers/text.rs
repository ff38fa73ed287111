use core::fmt::Display;
use core::marker::PhantomData;
use core::str::FromStr;
use std::path::PathBuf;

use st_node::{Node, ScalarNode};

use super::{expect_scalar, invalid, value_as};
use crate::info::Type;
use crate::registry::{Context, TypeSerializer};
use crate::{Reflect, SerializerError};

// -----------------------------------------------------------------------------
// TextSerializer

/// Any type with a `FromStr`/`Display` text form.
///
/// ```
/// use st_reflect::info::Typed;
/// use st_reflect::registry::{SerializerRegistry, TypePredicate};
/// use st_reflect::serializers::TextSerializer;
///
/// let registry = SerializerRegistry::new();
/// registry.register(TypePredicate::Exact(u16::ty()), TextSerializer::<u16>::new());
/// assert!(registry.resolve(&u16::ty()).is_some());
/// assert!(registry.resolve(&u32::ty()).is_none());
/// ```
pub struct TextSerializer<T>(PhantomData<fn() -> T>);

impl<T> TextSerializer<T> {
    #[inline]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T> Default for TextSerializer<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TypeSerializer for TextSerializer<T>
where
    T: FromStr + Display + Reflect,
    T::Err: Display,
{
    fn serialize(
        &self,
        value: Option<&dyn Reflect>,
        ty: &Type,
        _: &Context<'_>,
    ) -> Result<Node, SerializerError> {
        let Some(value) = value else {
            return Ok(Node::null());
        };
        Ok(ScalarNode::from_display(value_as::<T>(value, ty)?).into())
    }

    fn deserialize(
        &self,
        node: &Node,
        ty: &Type,
        _: &Context<'_>,
    ) -> Result<Box<dyn Reflect>, SerializerError> {
        let text = expect_scalar(node)?.require()?;
        let value = text.parse::<T>().map_err(|e| invalid(ty, text, e))?;
        Ok(Box::new(value))
    }
}

// -----------------------------------------------------------------------------
// PathSerializer

/// File system paths. Paths that are not valid UTF-8 cannot be written.
#[derive(Debug, Default, Clone, Copy)]
pub struct PathSerializer;

impl TypeSerializer for PathSerializer {
    fn serialize(
        &self,
        value: Option<&dyn Reflect>,
        ty: &Type,
        _: &Context<'_>,
    ) -> Result<Node, SerializerError> {
        let Some(value) = value else {
            return Ok(Node::null());
        };
        let path = value_as::<PathBuf>(value, ty)?;
        let text = path.to_str().ok_or_else(|| SerializerError::Serialize {
            ty: ty.to_string(),
            reason: format!("`{}` is not valid UTF-8", path.display()).into(),
        })?;
        Ok(ScalarNode::new(text).into())
    }

    fn deserialize(
        &self,
        node: &Node,
        _: &Type,
        _: &Context<'_>,
    ) -> Result<Box<dyn Reflect>, SerializerError> {
        let text = expect_scalar(node)?.require()?;
        Ok(Box::new(PathBuf::from(text)))
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use st_node::Node;

    use crate::serializers::testing::{read, write};

    #[test]
    fn paths() {
        let path = PathBuf::from("config/app.conf");
        let node = write(&path).unwrap();
        assert_eq!(node, Node::from("config/app.conf"));
        assert_eq!(read::<PathBuf>(&node).unwrap(), path);
    }

    #[cfg(feature = "url")]
    #[test]
    fn urls() {
        let url: url::Url = "https://example.com/a?b=c".parse().unwrap();
        let node = write(&url).unwrap();
        assert_eq!(node, Node::from("https://example.com/a?b=c"));
        assert_eq!(read::<url::Url>(&node).unwrap(), url);
        assert!(read::<url::Url>(&Node::from("not a url")).is_err());
    }

    #[cfg(feature = "uuid")]
    #[test]
    fn uuids() {
        let text = "67e55044-10b1-426f-9247-bb680e5fe0c8";
        let id = read::<uuid::Uuid>(&Node::from(text)).unwrap();
        assert_eq!(write(&id).unwrap(), Node::from(text));
    }

    #[cfg(feature = "regex")]
    #[test]
    fn patterns() {
        let pattern = read::<regex::Regex>(&Node::from(r"^\d+$")).unwrap();
        assert!(pattern.is_match("123"));
        assert_eq!(write(&pattern).unwrap(), Node::from(r"^\d+$"));
        assert!(read::<regex::Regex>(&Node::from("(")).is_err());
    }
}
