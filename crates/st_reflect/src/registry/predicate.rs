use core::fmt;
use std::sync::Arc;

use crate::TypeError;
use crate::info::{RawType, Type};
use crate::variance::VarianceChecker;

/// Selects the types a registry entry handles.
#[derive(Clone)]
pub enum TypePredicate {
    /// `target` and every subtype of it.
    Supertype(Type),
    /// Exactly `target`.
    Exact(Type),
    /// Every type whose raw type is or extends the raw type, whatever its
    /// arguments. Erased generics match too.
    Raw(&'static RawType),
    /// An arbitrary test. Never compared for specificity.
    Custom(Arc<dyn Fn(&Type) -> bool + Send + Sync>),
}

impl TypePredicate {
    /// Wraps a closure as a [`Custom`](Self::Custom) predicate.
    pub fn custom(test: impl Fn(&Type) -> bool + Send + Sync + 'static) -> Self {
        Self::Custom(Arc::new(test))
    }

    /// Primitive targets stand for their boxed counterparts.
    pub(crate) fn normalized(self) -> Self {
        match self {
            Self::Supertype(target) => Self::Supertype(target.boxed()),
            Self::Exact(target) => Self::Exact(target.boxed()),
            other => other,
        }
    }

    pub fn matches(&self, ty: &Type, checker: &VarianceChecker) -> Result<bool, TypeError> {
        match self {
            Self::Supertype(target) => checker.is_supertype_of(target, ty),
            Self::Exact(target) => Ok(target == ty),
            Self::Raw(raw) => Ok(checker.extends_raw(ty, raw)),
            Self::Custom(test) => Ok(test(ty)),
        }
    }

    /// Returns `true` if `self` matches a strict subset of what `other`
    /// matches.
    pub(crate) fn is_narrower_than(&self, other: &Self, checker: &VarianceChecker) -> bool {
        match (self.target(), other.target()) {
            (Target::Type(narrow), Target::Type(wide)) => {
                narrow != wide && checker.is_supertype_of(wide, narrow) == Ok(true)
            }
            (Target::Raw(narrow), Target::Raw(wide)) => narrow != wide && narrow.extends(wide),
            (Target::Type(narrow), Target::Raw(wide)) => checker.extends_raw(narrow, wide),
            (Target::Raw(narrow), Target::Type(wide)) => wide
                .raw()
                .is_some_and(|wide| wide != narrow && narrow.extends(wide)),
            _ => false,
        }
    }

    fn target(&self) -> Target<'_> {
        match self {
            Self::Supertype(target) | Self::Exact(target) => Target::Type(target),
            Self::Raw(raw) => Target::Raw(*raw),
            Self::Custom(_) => Target::Opaque,
        }
    }
}

enum Target<'a> {
    Type(&'a Type),
    Raw(&'static RawType),
    Opaque,
}

impl From<Type> for TypePredicate {
    #[inline]
    fn from(value: Type) -> Self {
        Self::Supertype(value)
    }
}

impl From<&'static RawType> for TypePredicate {
    #[inline]
    fn from(value: &'static RawType) -> Self {
        Self::Raw(value)
    }
}

impl fmt::Debug for TypePredicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Supertype(target) => write!(f, "Supertype({target})"),
            Self::Exact(target) => write!(f, "Exact({target})"),
            Self::Raw(raw) => write!(f, "Raw({})", raw.name()),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}
