use core::any::TypeId;
use core::fmt::Display;
use core::str::FromStr;
use std::sync::OnceLock;

use st_node::{Node, ScalarNode};
use st_utils::TypeIdMap;

use super::{expect_scalar, invalid, mismatch};
use crate::info::Type;
use crate::registry::{Context, TypeSerializer};
use crate::{Reflect, SerializerError};

/// Parses and formats one numeric type.
struct NumberCodec {
    parse: fn(&str) -> Result<Box<dyn Reflect>, String>,
    format: fn(&dyn Reflect) -> Option<String>,
}

fn parse<N>(text: &str) -> Result<Box<dyn Reflect>, String>
where
    N: FromStr + Reflect,
    N::Err: Display,
{
    text.parse::<N>()
        .map(|n| Box::new(n) as Box<dyn Reflect>)
        .map_err(|e| e.to_string())
}

fn parse_boxed<N>(text: &str) -> Result<Box<dyn Reflect>, String>
where
    N: FromStr,
    N::Err: Display,
    Box<N>: Reflect,
{
    text.parse::<N>()
        .map(|n| Box::new(Box::new(n)) as Box<dyn Reflect>)
        .map_err(|e| e.to_string())
}

fn format<N: Display + Reflect>(value: &dyn Reflect) -> Option<String> {
    value.downcast_ref::<N>().map(ToString::to_string)
}

fn format_boxed<N: Display + 'static>(value: &dyn Reflect) -> Option<String> {
    value.downcast_ref::<Box<N>>().map(ToString::to_string)
}

macro_rules! number_codecs {
    ($map:ident => $($ty:ty),+ $(,)?) => {
        $(
            $map.insert(TypeId::of::<$ty>(), NumberCodec {
                parse: parse::<$ty>,
                format: format::<$ty>,
            });
            $map.insert(TypeId::of::<Box<$ty>>(), NumberCodec {
                parse: parse_boxed::<$ty>,
                format: format_boxed::<$ty>,
            });
        )+
    };
}

fn codecs() -> &'static TypeIdMap<NumberCodec> {
    static CODECS: OnceLock<TypeIdMap<NumberCodec>> = OnceLock::new();
    CODECS.get_or_init(|| {
        let mut map = TypeIdMap::new();
        number_codecs!(map => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
        map
    })
}

// -----------------------------------------------------------------------------
// NumberSerializer

/// Integers and floats, primitive or boxed, in their `Display`/`FromStr`
/// text form.
#[derive(Debug, Default, Clone, Copy)]
pub struct NumberSerializer;

impl TypeSerializer for NumberSerializer {
    fn serialize(
        &self,
        value: Option<&dyn Reflect>,
        ty: &Type,
        _: &Context<'_>,
    ) -> Result<Node, SerializerError> {
        let Some(value) = value else {
            return Ok(Node::null());
        };
        let text = codecs()
            .get(&value.ty_id())
            .and_then(|codec| (codec.format)(value))
            .ok_or_else(|| mismatch(value, ty))?;
        Ok(ScalarNode::new(text).into())
    }

    fn deserialize(
        &self,
        node: &Node,
        ty: &Type,
        _: &Context<'_>,
    ) -> Result<Box<dyn Reflect>, SerializerError> {
        let text = expect_scalar(node)?.require()?;
        let codec = ty
            .ops()
            .type_id()
            .and_then(|type_id| codecs().get(&type_id))
            .ok_or_else(|| SerializerError::general(format!("`{ty}` is not a known number type")))?;
        (codec.parse)(text).map_err(|reason| invalid(ty, text, reason))
    }
}

// -----------------------------------------------------------------------------
// Tests
