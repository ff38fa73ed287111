use st_node::Node;

use super::{mismatch, no_constructor};
use crate::info::Type;
use crate::ops::{ReflectMut, ReflectRef};
use crate::registry::{Context, TypeSerializer};
use crate::{Reflect, SerializerError};

/// Nested [`Configurable`](crate::mapper::Configurable) objects as map nodes.
///
/// Reading constructs a default value and modifies it from the map.
#[derive(Debug, Default, Clone, Copy)]
pub struct ObjectSerializer;

impl TypeSerializer for ObjectSerializer {
    fn serialize(
        &self,
        value: Option<&dyn Reflect>,
        ty: &Type,
        cx: &Context<'_>,
    ) -> Result<Node, SerializerError> {
        let Some(value) = value else {
            return Ok(Node::null());
        };
        match value.reflect_ref() {
            ReflectRef::Object(object) => Ok(cx.extract(object)?.into()),
            _ => Err(mismatch(value, ty)),
        }
    }

    fn deserialize(
        &self,
        node: &Node,
        ty: &Type,
        cx: &Context<'_>,
    ) -> Result<Box<dyn Reflect>, SerializerError> {
        let map = node.as_map().ok_or(SerializerError::NotMatch {
            expected: "map",
            found: node.kind_name(),
        })?;
        let mut value = ty.ops().construct().ok_or_else(|| no_constructor(ty))?;
        match value.reflect_mut() {
            ReflectMut::Object(object) => cx.modify(object, map)?,
            _ => {
                return Err(SerializerError::general(format!(
                    "`{ty}` does not construct an object"
                )));
            }
        }
        Ok(value)
    }
}
