use core::any::TypeId;

use st_node::{Node, ScalarNode};

use super::{expect_scalar, mismatch};
use crate::info::Type;
use crate::registry::{Context, TypeSerializer};
use crate::{Reflect, SerializerError};

/// Booleans, read leniently.
///
/// Any text in [`TRUE_WORDS`](st_node::TRUE_WORDS) reads as `true`, any other
/// text as `false`. Only a null scalar fails.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolSerializer;

impl TypeSerializer for BoolSerializer {
    fn serialize(
        &self,
        value: Option<&dyn Reflect>,
        ty: &Type,
        _: &Context<'_>,
    ) -> Result<Node, SerializerError> {
        let Some(value) = value else {
            return Ok(Node::null());
        };
        let flag = match (value.downcast_ref::<bool>(), value.downcast_ref::<Box<bool>>()) {
            (Some(flag), _) => *flag,
            (None, Some(flag)) => **flag,
            (None, None) => return Err(mismatch(value, ty)),
        };
        Ok(ScalarNode::from(flag).into())
    }

    fn deserialize(
        &self,
        node: &Node,
        ty: &Type,
        _: &Context<'_>,
    ) -> Result<Box<dyn Reflect>, SerializerError> {
        let scalar = expect_scalar(node)?;
        if scalar.is_null() {
            return Err(SerializerError::NullValue);
        }
        let flag = scalar.to_bool();
        match ty.ops().type_id() {
            Some(id) if id == TypeId::of::<bool>() => Ok(Box::new(flag)),
            Some(id) if id == TypeId::of::<Box<bool>>() => Ok(Box::new(Box::new(flag))),
            _ => Err(SerializerError::general(format!("`{ty}` is not a boolean type"))),
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
