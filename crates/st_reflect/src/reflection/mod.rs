use core::any::{Any, TypeId};
use core::fmt;

use crate::ops::{ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// Dynamic access to a value whose type is only known through its
/// [`Type`](crate::info::Type) descriptor.
///
/// The serializers never see concrete types: they read values through
/// [`reflect_ref`](Reflect::reflect_ref), fill containers through
/// [`reflect_mut`](Reflect::reflect_mut) and hand results around as
/// `Box<dyn Reflect>`.
///
/// Use [`#[derive(Config)]`](crate::derive::Config) or
/// [`#[derive(ConfigEnum)]`](crate::derive::ConfigEnum) rather than
/// implementing it by hand.
///
/// ```
/// use st_reflect::Reflect;
/// use st_reflect::ops::ReflectRef;
///
/// let value: Box<dyn Reflect> = Box::new(vec![1_i32, 2]);
/// let ReflectRef::List(list) = value.reflect_ref() else { unreachable!() };
/// assert_eq!(list.len(), 2);
///
/// let vec: Vec<i32> = value.take().unwrap();
/// assert_eq!(vec, [1, 2]);
/// ```
pub trait Reflect: Any + Send + Sync {
    /// The [`TypeId`] of the underlying value.
    ///
    /// Unlike [`Any::type_id`] on a `Box<dyn Reflect>`, this never returns the
    /// id of the box.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// The Rust type name, for diagnostics.
    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        core::any::type_name::<Self>()
    }

    fn as_reflect(&self) -> &dyn Reflect;

    fn as_reflect_mut(&mut self) -> &mut dyn Reflect;

    fn reflect_ref(&self) -> ReflectRef<'_>;

    fn reflect_mut(&mut self) -> ReflectMut<'_>;
}

impl dyn Reflect {
    /// Returns `true` if the underlying value is a `T`.
    #[inline]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }

    /// Downcasts the value to `T`, handing the box back on mismatch.
    pub fn downcast<T: Any>(self: Box<dyn Reflect>) -> Result<Box<T>, Box<dyn Reflect>> {
        if self.is::<T>() {
            let any: Box<dyn Any> = self;
            Ok(any
                .downcast::<T>()
                .unwrap_or_else(|_| unreachable!("type is already checked")))
        } else {
            Err(self)
        }
    }

    /// Downcasts and unboxes the value, handing the box back on mismatch.
    #[inline]
    pub fn take<T: Any>(self: Box<dyn Reflect>) -> Result<T, Box<dyn Reflect>> {
        self.downcast::<T>().map(|value| *value)
    }
}

impl fmt::Debug for dyn Reflect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Reflect({})", self.reflect_type_name())
    }
}

/// Implements the casting methods of [`Reflect`] for a value of the given kind.
macro_rules! impl_reflect_cast_fn {
    ($kind:ident) => {
        #[inline]
        fn as_reflect(&self) -> &dyn $crate::Reflect {
            self
        }

        #[inline]
        fn as_reflect_mut(&mut self) -> &mut dyn $crate::Reflect {
            self
        }

        #[inline]
        fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
            $crate::ops::ReflectRef::$kind(self)
        }

        #[inline]
        fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
            $crate::ops::ReflectMut::$kind(self)
        }
    };
}

pub(crate) use impl_reflect_cast_fn;
