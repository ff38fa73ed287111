use st_node::{MapNode, Node};

use super::{mismatch, no_constructor};
use crate::info::Type;
use crate::ops::{ReflectMut, ReflectRef};
use crate::registry::{Context, TypeSerializer};
use crate::{Reflect, SerializerError};

/// Maps as map nodes. Keys are written through their own serializer and must
/// come out as non-null scalars.
#[derive(Debug, Default, Clone, Copy)]
pub struct MapSerializer;

fn entry_types(ty: &Type) -> Result<(&Type, &Type), SerializerError> {
    match ty.args() {
        [key, value] => Ok((key, value)),
        _ => Err(SerializerError::NotParamMap { ty: ty.to_string() }),
    }
}

impl TypeSerializer for MapSerializer {
    fn serialize(
        &self,
        value: Option<&dyn Reflect>,
        ty: &Type,
        cx: &Context<'_>,
    ) -> Result<Node, SerializerError> {
        let (key_ty, value_ty) = entry_types(ty)?;
        let Some(value) = value else {
            return Ok(Node::null());
        };
        let ReflectRef::Map(entries) = value.reflect_ref() else {
            return Err(mismatch(value, ty));
        };
        let mut map = MapNode::with_options(cx.options().clone());
        for (key, value) in entries.iter() {
            let key = match cx.serialize(Some(key), key_ty)? {
                Node::Scalar(scalar) => scalar.require()?.to_owned(),
                other => {
                    return Err(SerializerError::NotMatch {
                        expected: "scalar",
                        found: other.kind_name(),
                    });
                }
            };
            map.add(key, cx.serialize(Some(value), value_ty)?)?;
        }
        Ok(map.into())
    }

    fn deserialize(
        &self,
        node: &Node,
        ty: &Type,
        cx: &Context<'_>,
    ) -> Result<Box<dyn Reflect>, SerializerError> {
        let (key_ty, value_ty) = entry_types(ty)?;
        let nodes = node.as_map().ok_or(SerializerError::NotMatch {
            expected: "map",
            found: node.kind_name(),
        })?;
        let mut value = ty.ops().construct().ok_or_else(|| no_constructor(ty))?;
        let ReflectMut::Map(entries) = value.reflect_mut() else {
            return Err(SerializerError::general(format!("`{ty}` does not construct a map")));
        };
        for (key, node) in nodes.iter() {
            let key = cx.deserialize(&Node::from(key), key_ty)?;
            let item = cx.deserialize(node, value_ty)?;
            entries.insert(key, item).map_err(|(key, value)| {
                SerializerError::general(format!(
                    "`{}` => `{}` is not an entry of `{ty}`",
                    key.reflect_type_name(),
                    value.reflect_type_name(),
                ))
            })?;
        }
        Ok(value)
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};

    use st_node::{MapNode, Node};

    use crate::SerializerError;
    use crate::info::{MAP, Type, Typed};
    use crate::serializers::testing::{read, with_cx, write};

    #[test]
    fn btree_map_keeps_key_order() {
        let value: BTreeMap<String, u32> = [("b".to_owned(), 2), ("a".to_owned(), 1)].into();
        let node = write(&value).unwrap();
        let keys: Vec<_> = node.as_map().unwrap().keys().collect();
        assert_eq!(keys, ["a", "b"]);
        assert_eq!(read::<BTreeMap<String, u32>>(&node).unwrap(), value);
    }

    #[test]
    fn non_string_keys_and_nested_values() {
        let value: HashMap<i64, Vec<bool>> = [(-1, vec![true]), (7, vec![])].into();
        let node = write(&value).unwrap();
        assert!(node.as_map().unwrap().contains("-1"));
        assert_eq!(read::<HashMap<i64, Vec<bool>>>(&node).unwrap(), value);
    }

    #[test]
    fn bad_key_aborts() {
        let mut map = MapNode::new();
        map.add("1", "a").unwrap();
        map.add("two", "b").unwrap();
        let err = read::<BTreeMap<u8, String>>(&Node::from(map)).unwrap_err();
        assert!(matches!(err, SerializerError::Deserialize { ref text, .. } if text == "two"));
    }

    #[test]
    fn map_needs_two_arguments() {
        let node = Node::from(MapNode::new());
        let half = Type::generic(&MAP, [Type::wildcard()]);
        let err = with_cx(|cx| cx.deserialize(&node, &half)).unwrap_err();
        assert!(matches!(err, SerializerError::NotParamMap { .. }));

        let erased = Type::class(<HashMap<u8, u8>>::ty().raw().unwrap());
        let err = with_cx(|cx| cx.deserialize(&node, &erased)).unwrap_err();
        assert!(matches!(err, SerializerError::NotParamMap { .. }));
    }
}
