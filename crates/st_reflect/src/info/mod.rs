//! Reified type descriptors.
//!
//! - [`RawType`]: the static identity of a type: path, kind, parameters and
//!   declared supertypes.
//! - [`Type`]: a raw type applied to arguments, an array, a variable or a
//!   wildcard; compared structurally.
//! - [`TypeOps`]: constructor, enum table and object schema attached to a
//!   descriptor without affecting its identity.
//! - [`Typed`]: the descriptor of a Rust type.
//! - [`TypeInterner`]: canonical shared handles.

mod interfaces;
mod interner;
mod raw_type;
mod ty;
mod type_ops;
mod typed;

pub use interfaces::{ANY, COLLECTION, LIST, MAP, NUMBER, QUEUE, SET};
pub use interner::TypeInterner;
pub use raw_type::{RawType, TypeKind};
pub use ty::{Bound, Shape, Type};
pub use type_ops::{EnumOps, TypeOps};
pub use typed::{TypeCell, Typed};
