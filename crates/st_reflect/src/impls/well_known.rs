use std::sync::OnceLock;

use crate::Reflect;
use crate::info::{RawType, Type, TypeKind, TypeOps, Typed};
use crate::reflection::impl_reflect_cast_fn;

macro_rules! impl_well_known {
    ($feature:literal, $($path:ident)::+, $full:literal, $name:literal) => {
        #[cfg(feature = $feature)]
        impl Typed for $($path)::+ {
            fn ty() -> Type {
                static RAW: RawType = RawType::new($full, $name, TypeKind::Class);
                static CELL: OnceLock<Type> = OnceLock::new();
                CELL.get_or_init(|| Type::class(&RAW).with_ops(TypeOps::of::<Self>())).clone()
            }
        }

        #[cfg(feature = $feature)]
        impl Reflect for $($path)::+ {
            impl_reflect_cast_fn!(Scalar);
        }
    };
}

impl_well_known!("regex", regex::Regex, "regex::Regex", "Regex");
impl_well_known!("url", url::Url, "url::Url", "Url");
impl_well_known!("uuid", uuid::Uuid, "uuid::Uuid", "Uuid");
