//! Built-in [`TypeSerializer`](crate::registry::TypeSerializer)s.
//!
//! | Serializer | Handles |
//! |---|---|
//! | [`NumberSerializer`] | every type extending [`NUMBER`] |
//! | [`StringSerializer`] | `String`, `char` |
//! | [`BoolSerializer`] | `bool`, leniently |
//! | [`CollectionSerializer`] | every type extending [`COLLECTION`] |
//! | [`MapSerializer`] | every type extending [`MAP`] |
//! | [`EnumSerializer`] | types with an [`EnumOps`](crate::info::EnumOps) table |
//! | [`ObjectSerializer`] | [`Configurable`](crate::mapper::Configurable) types |
//! | [`PathSerializer`] | `PathBuf` |
//! | [`TextSerializer`] | `Regex`, `Url` and `Uuid`, behind their features |

use core::any::Any;
use std::path::PathBuf;

use st_node::{Node, ScalarNode};

use crate::info::{COLLECTION, MAP, NUMBER, Type, Typed};
use crate::registry::{SerializerRegistry, TypePredicate};
use crate::{Reflect, SerializerError};

mod boolean;
mod collection;
mod enumeration;
mod map;
mod number;
mod object;
mod string;
mod text;

pub use boolean::BoolSerializer;
pub use collection::CollectionSerializer;
pub use enumeration::EnumSerializer;
pub use map::MapSerializer;
pub use number::NumberSerializer;
pub use object::ObjectSerializer;
pub use string::StringSerializer;
pub use text::{PathSerializer, TextSerializer};

/// Registers the built-in serializers on `registry`.
pub(crate) fn register_builtins(registry: &SerializerRegistry) {
    registry.register(TypePredicate::Raw(&NUMBER), NumberSerializer);
    registry.register(TypePredicate::Exact(String::ty()), StringSerializer);
    registry.register(TypePredicate::Exact(char::ty()), StringSerializer);
    registry.register(TypePredicate::Exact(bool::ty()), BoolSerializer);
    registry.register(TypePredicate::Raw(&COLLECTION), CollectionSerializer);
    registry.register(TypePredicate::Raw(&MAP), MapSerializer);
    registry.register(
        TypePredicate::custom(|ty| ty.ops().enum_ops().is_some()),
        EnumSerializer,
    );
    registry.register(
        TypePredicate::custom(|ty| ty.ops().schema().is_some()),
        ObjectSerializer,
    );
    registry.register(TypePredicate::Exact(PathBuf::ty()), PathSerializer);

    #[cfg(feature = "regex")]
    registry.register(
        TypePredicate::Exact(regex::Regex::ty()),
        TextSerializer::<regex::Regex>::new(),
    );
    #[cfg(feature = "url")]
    registry.register(
        TypePredicate::Exact(url::Url::ty()),
        TextSerializer::<url::Url>::new(),
    );
    #[cfg(feature = "uuid")]
    registry.register(
        TypePredicate::Exact(uuid::Uuid::ty()),
        TextSerializer::<uuid::Uuid>::new(),
    );
}

// -----------------------------------------------------------------------------
// Helpers

fn expect_scalar(node: &Node) -> Result<&ScalarNode, SerializerError> {
    node.as_scalar().ok_or(SerializerError::NotMatch {
        expected: "scalar",
        found: node.kind_name(),
    })
}

fn value_as<'a, T: Any>(value: &'a dyn Reflect, ty: &Type) -> Result<&'a T, SerializerError> {
    value.downcast_ref::<T>().ok_or_else(|| mismatch(value, ty))
}

fn mismatch(value: &dyn Reflect, ty: &Type) -> SerializerError {
    SerializerError::general(format!(
        "`{}` cannot be written as `{ty}`",
        value.reflect_type_name()
    ))
}

fn no_constructor(ty: &Type) -> SerializerError {
    SerializerError::general(format!("`{ty}` has no parameterless constructor"))
}

fn invalid(ty: &Type, text: &str, reason: impl ToString) -> SerializerError {
    SerializerError::Deserialize {
        ty: ty.to_string(),
        text: text.to_owned(),
        reason: reason.to_string().into(),
    }
}

// -----------------------------------------------------------------------------
// Test support
