use st_node::{ListNode, Node};

use super::{mismatch, no_constructor};
use crate::info::Type;
use crate::ops::{ReflectMut, ReflectRef};
use crate::registry::{Context, TypeSerializer};
use crate::{Reflect, SerializerError};

/// Lists, sets and queues as list nodes, one element per item.
///
/// The element type is the single type argument of the descriptor.
#[derive(Debug, Default, Clone, Copy)]
pub struct CollectionSerializer;

fn element_type(ty: &Type) -> Result<&Type, SerializerError> {
    match ty.args() {
        [element] => Ok(element),
        _ => Err(SerializerError::NotParamList { ty: ty.to_string() }),
    }
}

impl TypeSerializer for CollectionSerializer {
    fn serialize(
        &self,
        value: Option<&dyn Reflect>,
        ty: &Type,
        cx: &Context<'_>,
    ) -> Result<Node, SerializerError> {
        let element = element_type(ty)?;
        let Some(value) = value else {
            return Ok(Node::null());
        };
        let ReflectRef::List(items) = value.reflect_ref() else {
            return Err(mismatch(value, ty));
        };
        let mut list = ListNode::with_options(cx.options().clone());
        for item in items.iter() {
            list.push(cx.serialize(Some(item), element)?);
        }
        Ok(list.into())
    }

    fn deserialize(
        &self,
        node: &Node,
        ty: &Type,
        cx: &Context<'_>,
    ) -> Result<Box<dyn Reflect>, SerializerError> {
        let element = element_type(ty)?;
        let nodes = node.as_list().ok_or(SerializerError::NotMatch {
            expected: "list",
            found: node.kind_name(),
        })?;
        let mut value = ty.ops().construct().ok_or_else(|| no_constructor(ty))?;
        let ReflectMut::List(items) = value.reflect_mut() else {
            return Err(SerializerError::general(format!("`{ty}` does not construct a list")));
        };
        for node in nodes.iter() {
            items.push(cx.deserialize(node, element)?).map_err(|rejected| {
                SerializerError::general(format!(
                    "`{}` is not an element of `{ty}`",
                    rejected.reflect_type_name()
                ))
            })?;
        }
        Ok(value)
    }
}

// -----------------------------------------------------------------------------
// Tests
