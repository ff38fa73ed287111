use crate::info::{Type, Typed};

/// Nullability marker: an optional field is described by its inner type.
impl<T: Typed> Typed for Option<T> {
    #[inline]
    fn ty() -> Type {
        T::ty()
    }
}
