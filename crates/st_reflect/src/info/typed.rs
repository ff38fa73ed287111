use core::any::{Any, TypeId};
use std::sync::{PoisonError, RwLock};

use st_utils::TypeIdMap;

use crate::info::Type;

// -----------------------------------------------------------------------------
// Typed

/// A static accessor to the descriptor of a type.
///
/// Implemented for the supported std types and by
/// [`#[derive(Config)]`](crate::derive::Config) and
/// [`#[derive(ConfigEnum)]`](crate::derive::ConfigEnum).
///
/// `Option<T>` is transparent: it marks a field as nullable and describes
/// itself as `T`.
///
/// ```
/// use st_reflect::info::Typed;
///
/// assert_eq!(<Option<String>>::ty(), String::ty());
/// assert_eq!(<Vec<u8>>::ty().to_string(), "Vec<u8>");
/// ```
pub trait Typed: 'static {
    fn ty() -> Type;
}

// -----------------------------------------------------------------------------
// TypeCell

/// Static storage of the descriptors of a generic type.
///
/// A `static` inside a generic function is shared by every instantiation,
/// so the cell keys descriptors by [`TypeId`].
///
/// ```
/// use st_reflect::info::{Type, TypeCell, Typed, LIST};
///
/// struct Wrapper<T>(T);
///
/// impl<T: Typed> Typed for Wrapper<T> {
///     fn ty() -> Type {
///         static CELL: TypeCell = TypeCell::new();
///         CELL.get_or_insert::<Self>(|| Type::generic(&LIST, [T::ty()]))
///     }
/// }
///
/// assert_eq!(<Wrapper<i32>>::ty().to_string(), "List<i32>");
/// assert_eq!(<Wrapper<bool>>::ty().to_string(), "List<bool>");
/// ```
pub struct TypeCell(RwLock<TypeIdMap<Type>>);

impl TypeCell {
    #[inline]
    pub const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    /// Returns the descriptor stored for `G`, building it with `f` on first use.
    #[inline(always)]
    pub fn get_or_insert<G: Any + ?Sized>(&self, f: impl FnOnce() -> Type) -> Type {
        self.get_or_insert_by_type_id(TypeId::of::<G>(), f)
    }

    #[inline(never)]
    fn get_or_insert_by_type_id(&self, type_id: TypeId, f: impl FnOnce() -> Type) -> Type {
        if let Some(ty) = self
            .0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
        {
            return ty.clone();
        }
        // Built outside the lock: argument descriptors may use this same cell.
        let ty = f();
        self.0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || ty)
            .clone()
    }
}

impl Default for TypeCell {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
