use core::any::TypeId;

use st_node::{Node, ScalarNode};

use super::{expect_scalar, invalid, mismatch};
use crate::info::Type;
use crate::registry::{Context, TypeSerializer};
use crate::{Reflect, SerializerError};

/// `String` as its text, `char` as a one-character text.
#[derive(Debug, Default, Clone, Copy)]
pub struct StringSerializer;

impl TypeSerializer for StringSerializer {
    fn serialize(
        &self,
        value: Option<&dyn Reflect>,
        ty: &Type,
        _: &Context<'_>,
    ) -> Result<Node, SerializerError> {
        let Some(value) = value else {
            return Ok(Node::null());
        };
        if let Some(text) = value.downcast_ref::<String>() {
            return Ok(ScalarNode::new(text.as_str()).into());
        }
        let c = match (value.downcast_ref::<char>(), value.downcast_ref::<Box<char>>()) {
            (Some(c), _) => *c,
            (None, Some(c)) => **c,
            (None, None) => return Err(mismatch(value, ty)),
        };
        Ok(ScalarNode::from_display(c).into())
    }

    fn deserialize(
        &self,
        node: &Node,
        ty: &Type,
        _: &Context<'_>,
    ) -> Result<Box<dyn Reflect>, SerializerError> {
        let text = expect_scalar(node)?.require()?;
        let type_id = ty.ops().type_id();
        if type_id == Some(TypeId::of::<String>()) {
            return Ok(Box::new(text.to_owned()));
        }

        let mut chars = text.chars();
        let c = match (chars.next(), chars.next()) {
            (Some(c), None) => c,
            _ => return Err(invalid(ty, text, "expected exactly one character")),
        };
        if type_id == Some(TypeId::of::<char>()) {
            Ok(Box::new(c))
        } else if type_id == Some(TypeId::of::<Box<char>>()) {
            Ok(Box::new(Box::new(c)))
        } else {
            Err(SerializerError::general(format!("`{ty}` is not a string type")))
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
