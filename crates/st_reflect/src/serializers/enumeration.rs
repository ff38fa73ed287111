use st_node::{Node, ScalarNode};

use super::{expect_scalar, invalid, mismatch};
use crate::info::Type;
use crate::ops::ReflectRef;
use crate::registry::{Context, TypeSerializer};
use crate::{Reflect, SerializerError};

/// Field-less enums as their variant name.
///
/// Reading tries an exact match first, then ignores ASCII case.
#[derive(Debug, Default, Clone, Copy)]
pub struct EnumSerializer;

impl TypeSerializer for EnumSerializer {
    fn serialize(
        &self,
        value: Option<&dyn Reflect>,
        ty: &Type,
        _: &Context<'_>,
    ) -> Result<Node, SerializerError> {
        let Some(value) = value else {
            return Ok(Node::null());
        };
        match value.reflect_ref() {
            ReflectRef::Enum(variant) => Ok(ScalarNode::new(variant.variant_name()).into()),
            _ => Err(mismatch(value, ty)),
        }
    }

    fn deserialize(
        &self,
        node: &Node,
        ty: &Type,
        _: &Context<'_>,
    ) -> Result<Box<dyn Reflect>, SerializerError> {
        let text = expect_scalar(node)?.require()?;
        let ops = ty
            .ops()
            .enum_ops()
            .ok_or_else(|| SerializerError::general(format!("`{ty}` is not an enum")))?;
        ops.from_variant(text)
            .or_else(|| {
                ops.variants()
                    .iter()
                    .find(|name| name.eq_ignore_ascii_case(text))
                    .and_then(|name| ops.from_variant(name))
            })
            .ok_or_else(|| {
                invalid(ty, text, format!("expected one of: {}", ops.variants().join(", ")))
            })
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use st_node::Node;

    use crate::SerializerError;
    use crate::derive::ConfigEnum;
    use crate::serializers::testing::{read, write};

    #[derive(ConfigEnum, Debug, Clone, Copy, PartialEq)]
    #[allow(clippy::upper_case_acronyms)]
    enum Level {
        Debug,
        Info,
        INFO,
    }

    #[test]
    fn variant_names() {
        assert_eq!(write(&Level::Debug).unwrap(), Node::from("Debug"));
        assert_eq!(read::<Level>(&Node::from("Debug")).unwrap(), Level::Debug);
    }

    #[test]
    fn exact_match_before_case_insensitive() {
        assert_eq!(read::<Level>(&Node::from("INFO")).unwrap(), Level::INFO);
        assert_eq!(read::<Level>(&Node::from("Info")).unwrap(), Level::Info);
        assert_eq!(read::<Level>(&Node::from("debug")).unwrap(), Level::Debug);
    }

    #[test]
    fn unknown_variant() {
        let err = read::<Level>(&Node::from("trace")).unwrap_err();
        let SerializerError::Deserialize { reason, .. } = err else {
            panic!("unexpected {err:?}");
        };
        assert_eq!(reason, "expected one of: Debug, Info, INFO");
    }
}
