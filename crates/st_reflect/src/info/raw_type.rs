use core::fmt;
use core::hash::{Hash, Hasher};

use crate::info::Type;

/// The declaration-level category of a [`RawType`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// The universal supertype, see [`ANY`](crate::info::ANY).
    Top,
    /// A primitive value type with a boxed counterpart.
    Primitive,
    Class,
    /// An abstract type that only appears as a supertype.
    Interface,
    Enum,
}

fn no_supertypes() -> Vec<Type> {
    Vec::new()
}

// -----------------------------------------------------------------------------
// RawType

/// The static identity of a type, without type arguments.
///
/// Raw types are compared by their unique [`path`](RawType::path).
/// Declared supertypes may mention the raw type's own parameters through
/// [`Type::var`]; they are substituted with the actual arguments when a
/// descriptor is projected onto one of its supertypes.
///
/// ```
/// use st_reflect::info::{LIST, RawType, Type, TypeKind};
///
/// static STACK: RawType = RawType::new("demo::Stack", "Stack", TypeKind::Class)
///     .with_params(&["T"])
///     .with_supertypes(|| vec![Type::generic(&LIST, [Type::var("T")])]);
///
/// assert!(STACK.is_generic());
/// assert_eq!(STACK.supertypes()[0].to_string(), "List<T>");
/// ```
pub struct RawType {
    path: &'static str,
    name: &'static str,
    kind: TypeKind,
    params: &'static [&'static str],
    supertypes: fn() -> Vec<Type>,
    boxed: Option<fn() -> Type>,
}

impl RawType {
    pub const fn new(path: &'static str, name: &'static str, kind: TypeKind) -> Self {
        Self {
            path,
            name,
            kind,
            params: &[],
            supertypes: no_supertypes,
            boxed: None,
        }
    }

    /// Declares the type parameter names, in order.
    pub const fn with_params(mut self, params: &'static [&'static str]) -> Self {
        self.params = params;
        self
    }

    pub const fn with_supertypes(mut self, supertypes: fn() -> Vec<Type>) -> Self {
        self.supertypes = supertypes;
        self
    }

    /// Links a primitive to its boxed counterpart.
    pub const fn with_boxed(mut self, boxed: fn() -> Type) -> Self {
        self.boxed = Some(boxed);
        self
    }

    #[inline]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    #[inline]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }

    #[inline]
    pub const fn params(&self) -> &'static [&'static str] {
        self.params
    }

    #[inline]
    pub const fn is_generic(&self) -> bool {
        !self.params.is_empty()
    }

    /// The directly declared supertypes.
    #[inline]
    pub fn supertypes(&self) -> Vec<Type> {
        (self.supertypes)()
    }

    /// The boxed counterpart of a primitive.
    #[inline]
    pub fn boxed(&self) -> Option<Type> {
        self.boxed.map(|boxed| boxed())
    }

    /// Returns `true` if `self` is `other` or declares it as a transitive
    /// supertype. Type arguments are ignored.
    pub fn extends(&self, other: &RawType) -> bool {
        self == other
            || self
                .supertypes()
                .iter()
                .any(|sup| sup.raw().is_some_and(|raw| raw.extends(other)))
    }
}

impl PartialEq for RawType {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        core::ptr::eq(self, other) || self.path == other.path
    }
}

impl Eq for RawType {}

impl Hash for RawType {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.path.hash(state);
    }
}

impl fmt::Debug for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawType")
            .field("path", &self.path)
            .field("kind", &self.kind)
            .field("params", &self.params)
            .finish()
    }
}
