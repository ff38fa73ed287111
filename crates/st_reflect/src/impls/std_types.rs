use std::path::PathBuf;
use std::sync::OnceLock;

use crate::Reflect;
use crate::info::{RawType, Type, TypeKind, TypeOps, Typed};
use crate::reflection::impl_reflect_cast_fn;

impl Typed for String {
    fn ty() -> Type {
        static RAW: RawType = RawType::new("alloc::string::String", "String", TypeKind::Class);
        static CELL: OnceLock<Type> = OnceLock::new();
        CELL.get_or_init(|| Type::class(&RAW).with_ops(TypeOps::of::<Self>().with_default::<Self>()))
            .clone()
    }
}

impl Reflect for String {
    impl_reflect_cast_fn!(Scalar);
}

impl Typed for PathBuf {
    fn ty() -> Type {
        static RAW: RawType = RawType::new("std::path::PathBuf", "PathBuf", TypeKind::Class);
        static CELL: OnceLock<Type> = OnceLock::new();
        CELL.get_or_init(|| Type::class(&RAW).with_ops(TypeOps::of::<Self>().with_default::<Self>()))
            .clone()
    }
}

impl Reflect for PathBuf {
    impl_reflect_cast_fn!(Scalar);
}
