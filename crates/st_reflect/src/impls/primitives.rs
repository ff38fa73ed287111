use std::sync::OnceLock;

use crate::info::{NUMBER, RawType, Type, TypeKind, TypeOps, Typed};
use crate::reflection::impl_reflect_cast_fn;
use crate::Reflect;

fn number_supertypes() -> Vec<Type> {
    vec![Type::class(&NUMBER)]
}

fn no_supertypes() -> Vec<Type> {
    Vec::new()
}

macro_rules! impl_primitive {
    ($supertypes:ident => $($ty:ident),+ $(,)?) => {
        $(
            impl Typed for $ty {
                fn ty() -> Type {
                    static RAW: RawType = RawType::new(stringify!($ty), stringify!($ty), TypeKind::Primitive)
                        .with_boxed(<Box<$ty> as Typed>::ty);
                    static CELL: OnceLock<Type> = OnceLock::new();
                    CELL.get_or_init(|| {
                        Type::class(&RAW).with_ops(TypeOps::of::<$ty>().with_default::<$ty>())
                    })
                    .clone()
                }
            }

            impl Typed for Box<$ty> {
                fn ty() -> Type {
                    static RAW: RawType = RawType::new(
                        concat!("alloc::boxed::Box<", stringify!($ty), ">"),
                        concat!("Box<", stringify!($ty), ">"),
                        TypeKind::Class,
                    )
                    .with_supertypes($supertypes);
                    static CELL: OnceLock<Type> = OnceLock::new();
                    CELL.get_or_init(|| {
                        Type::class(&RAW).with_ops(TypeOps::of::<Self>().with_default::<Self>())
                    })
                    .clone()
                }
            }

            impl Reflect for $ty {
                impl_reflect_cast_fn!(Scalar);
            }

            impl Reflect for Box<$ty> {
                impl_reflect_cast_fn!(Scalar);
            }
        )+
    };
}

impl_primitive!(number_supertypes => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize, f32, f64);
impl_primitive!(no_supertypes => bool, char);

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::Reflect;
    use crate::info::{NUMBER, TypeKind, Typed};
    use crate::ops::ReflectRef;

    #[test]
    fn primitives_link_to_boxed() {
        let int = i32::ty();
        assert_eq!(int.raw().unwrap().kind(), TypeKind::Primitive);
        let boxed = int.boxed();
        assert_eq!(boxed.to_string(), "Box<i32>");
        assert!(boxed.raw().unwrap().extends(&NUMBER));
        assert!(!<Box<bool>>::ty().raw().unwrap().extends(&NUMBER));
    }

    #[test]
    fn descriptors_are_cached() {
        assert!(crate::info::Type::ptr_eq(&u8::ty(), &u8::ty()));
    }

    #[test]
    fn scalars_reflect_as_scalars() {
        let value: Box<dyn Reflect> = Box::new(Box::new(3_u64));
        assert!(matches!(value.reflect_ref(), ReflectRef::Scalar(_)));
        assert!(value.is::<Box<u64>>());
        assert!(!value.is::<u64>());
        let back: Box<u64> = value.take().unwrap();
        assert_eq!(*back, 3);
    }
}
