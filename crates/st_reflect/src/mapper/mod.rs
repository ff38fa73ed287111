//! Field-by-field mapping between objects and map nodes.
//!
//! - [`Schema`] and [`FieldInfo`]: the static description of a
//!   [`Configurable`] type.
//! - [`Introspector`]: flattens schemas, embedded bases first, and caches
//!   the result per type.
//! - [`ObjectMapper`]: `extract` an object into a [`MapNode`](st_node::MapNode)
//!   and `modify` an object from one.

mod introspector;
mod object_mapper;
mod schema;

pub use introspector::{BoundField, Introspector};
pub use object_mapper::ObjectMapper;
pub use schema::{Configurable, FieldGetter, FieldGetterMut, FieldInfo, FieldSetter, Schema};

pub(crate) use object_mapper::{extract_into, modify_object};
