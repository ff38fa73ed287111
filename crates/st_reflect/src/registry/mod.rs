//! Resolution of [`TypeSerializer`]s by type descriptor.

mod context;
mod predicate;
mod serializer_registry;
mod type_serializer;

pub use context::Context;
pub use predicate::TypePredicate;
pub use serializer_registry::SerializerRegistry;
pub use type_serializer::TypeSerializer;
