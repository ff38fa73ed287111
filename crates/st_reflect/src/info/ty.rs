use core::fmt;
use core::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use crate::info::{ANY, RawType, TypeKind, TypeOps};

static EMPTY_OPS: TypeOps = TypeOps::new();

// -----------------------------------------------------------------------------
// Bound

/// The bounds of a type variable or wildcard.
///
/// The upper bound defaults to [`Type::any`]; the lower bound is optional.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Bound {
    pub upper: Type,
    pub lower: Option<Type>,
}

impl Bound {
    /// `extends upper`.
    #[inline]
    pub fn upper(upper: Type) -> Self {
        Self { upper, lower: None }
    }

    /// `super lower`, with the default upper bound.
    #[inline]
    pub fn lower(lower: Type) -> Self {
        Self {
            upper: Type::any(),
            lower: Some(lower),
        }
    }
}

impl Default for Bound {
    #[inline]
    fn default() -> Self {
        Self::upper(Type::any())
    }
}

// -----------------------------------------------------------------------------
// Shape

/// The structure of a [`Type`].
#[derive(Clone)]
pub enum Shape {
    /// A raw type applied to its arguments. `ops` is not part of the identity.
    Class {
        raw: &'static RawType,
        args: Box<[Type]>,
        ops: TypeOps,
    },
    /// An array of `component`, covariant in it.
    Array(Type),
    /// A named type variable.
    Var { name: &'static str, bound: Bound },
    Wildcard(Bound),
}

impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Class {
                    raw: a, args: x, ..
                },
                Self::Class {
                    raw: b, args: y, ..
                },
            ) => a == b && x == y,
            (Self::Array(a), Self::Array(b)) => a == b,
            (Self::Var { name: a, bound: x }, Self::Var { name: b, bound: y }) => a == b && x == y,
            (Self::Wildcard(a), Self::Wildcard(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Shape {}

impl Hash for Shape {
    fn hash<H: Hasher>(&self, state: &mut H) {
        core::mem::discriminant(self).hash(state);
        match self {
            Self::Class { raw, args, .. } => {
                raw.hash(state);
                args.hash(state);
            }
            Self::Array(component) => component.hash(state),
            Self::Var { name, bound } => {
                name.hash(state);
                bound.hash(state);
            }
            Self::Wildcard(bound) => bound.hash(state),
        }
    }
}

// -----------------------------------------------------------------------------
// Type

/// A reified type descriptor.
///
/// Descriptors are immutable and cheap to clone. Two descriptors are equal when
/// their raw types and all type arguments are recursively equal; the attached
/// [`TypeOps`] never take part in equality or hashing.
///
/// Use [`Typed::ty`](crate::info::Typed::ty) to get the descriptor of a Rust
/// type, or the constructors below to build one by hand.
///
/// ```
/// use st_reflect::info::{Type, Typed, LIST};
///
/// let vec = <Vec<i32>>::ty();
/// assert_eq!(vec.to_string(), "Vec<i32>");
/// assert_eq!(vec.args(), [i32::ty()]);
///
/// let list = Type::generic(&LIST, [Type::wildcard()]);
/// assert_eq!(list.to_string(), "List<?>");
/// ```
#[derive(Clone)]
pub struct Type(Arc<Shape>);

impl Type {
    #[inline]
    fn from_shape(shape: Shape) -> Self {
        Self(Arc::new(shape))
    }

    /// A raw type without arguments.
    #[inline]
    pub fn class(raw: &'static RawType) -> Self {
        Self::generic(raw, [])
    }

    /// A raw type applied to `args`.
    pub fn generic(raw: &'static RawType, args: impl IntoIterator<Item = Type>) -> Self {
        Self::from_shape(Shape::Class {
            raw,
            args: args.into_iter().collect(),
            ops: TypeOps::new(),
        })
    }

    /// Attaches `ops`. Only class descriptors carry operations.
    pub fn with_ops(self, ops: TypeOps) -> Self {
        if let Shape::Class { raw, args, .. } = &*self.0 {
            return Self::from_shape(Shape::Class {
                raw: *raw,
                args: args.clone(),
                ops,
            });
        }
        self
    }

    #[inline]
    pub fn array(component: Type) -> Self {
        Self::from_shape(Shape::Array(component))
    }

    /// An unbounded type variable.
    #[inline]
    pub fn var(name: &'static str) -> Self {
        Self::bounded_var(name, Bound::default())
    }

    #[inline]
    pub fn bounded_var(name: &'static str, bound: Bound) -> Self {
        Self::from_shape(Shape::Var { name, bound })
    }

    /// The unbounded wildcard `?`.
    #[inline]
    pub fn wildcard() -> Self {
        Self::bounded_wildcard(Bound::default())
    }

    #[inline]
    pub fn bounded_wildcard(bound: Bound) -> Self {
        Self::from_shape(Shape::Wildcard(bound))
    }

    /// The universal supertype.
    pub fn any() -> Self {
        static ANY_TYPE: OnceLock<Type> = OnceLock::new();
        ANY_TYPE.get_or_init(|| Type::class(&ANY)).clone()
    }

    #[inline]
    pub fn shape(&self) -> &Shape {
        &self.0
    }

    /// The raw type of a class descriptor.
    #[inline]
    pub fn raw(&self) -> Option<&'static RawType> {
        match &*self.0 {
            Shape::Class { raw, .. } => Some(*raw),
            _ => None,
        }
    }

    /// The type arguments of a class descriptor; empty otherwise.
    #[inline]
    pub fn args(&self) -> &[Type] {
        match &*self.0 {
            Shape::Class { args, .. } => args,
            _ => &[],
        }
    }

    #[inline]
    pub fn ops(&self) -> &TypeOps {
        match &*self.0 {
            Shape::Class { ops, .. } => ops,
            _ => &EMPTY_OPS,
        }
    }

    /// The bound of a variable or wildcard.
    #[inline]
    pub fn bound(&self) -> Option<&Bound> {
        match &*self.0 {
            Shape::Var { bound, .. } | Shape::Wildcard(bound) => Some(bound),
            _ => None,
        }
    }

    #[inline]
    pub fn is_any(&self) -> bool {
        self.raw().is_some_and(|raw| raw.kind() == TypeKind::Top)
    }

    #[inline]
    pub fn is_primitive(&self) -> bool {
        self.raw()
            .is_some_and(|raw| raw.kind() == TypeKind::Primitive)
    }

    /// A generic raw type used without its arguments.
    #[inline]
    pub fn is_erased(&self) -> bool {
        self.raw()
            .is_some_and(|raw| raw.is_generic() && self.args().is_empty())
    }

    /// The boxed counterpart of a primitive, or a clone of `self`.
    pub fn boxed(&self) -> Type {
        self.raw()
            .and_then(RawType::boxed)
            .unwrap_or_else(|| self.clone())
    }

    /// Returns `true` if both handles point at the same descriptor.
    #[inline]
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Arc::ptr_eq(&a.0, &b.0)
    }

    /// Replaces the variables named in `params` with the matching `args`.
    pub(crate) fn substitute(&self, params: &[&str], args: &[Type]) -> Type {
        match &*self.0 {
            Shape::Class { raw, args: own, ops } => {
                if own.is_empty() {
                    return self.clone();
                }
                Self::from_shape(Shape::Class {
                    raw: *raw,
                    args: own.iter().map(|t| t.substitute(params, args)).collect(),
                    ops: *ops,
                })
            }
            Shape::Array(component) => Self::array(component.substitute(params, args)),
            Shape::Var { name, .. } => match params.iter().position(|p| p == name) {
                Some(index) => args[index].clone(),
                None => self.clone(),
            },
            Shape::Wildcard(bound) => Self::bounded_wildcard(Bound {
                upper: bound.upper.substitute(params, args),
                lower: bound.lower.as_ref().map(|l| l.substitute(params, args)),
            }),
        }
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        Self::ptr_eq(self, other) || *self.0 == *other.0
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn bound(f: &mut fmt::Formatter<'_>, bound: &Bound) -> fmt::Result {
            if !bound.upper.is_any() {
                write!(f, " extends {}", bound.upper)?;
            }
            if let Some(lower) = &bound.lower {
                write!(f, " super {lower}")?;
            }
            Ok(())
        }

        match &*self.0 {
            Shape::Class { raw, args, .. } => {
                f.write_str(raw.name())?;
                if !args.is_empty() {
                    f.write_str("<")?;
                    for (index, arg) in args.iter().enumerate() {
                        if index > 0 {
                            f.write_str(", ")?;
                        }
                        write!(f, "{arg}")?;
                    }
                    f.write_str(">")?;
                }
                Ok(())
            }
            Shape::Array(component) => write!(f, "{component}[]"),
            Shape::Var { name, bound: b } => {
                f.write_str(name)?;
                bound(f, b)
            }
            Shape::Wildcard(b) => {
                f.write_str("?")?;
                bound(f, b)
            }
        }
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type({self})")
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::info::{Bound, LIST, MAP, NUMBER, Type, TypeOps, Typed};

    #[test]
    fn equality_is_structural() {
        let a = Type::generic(&LIST, [i32::ty()]);
        let b = Type::generic(&LIST, [i32::ty()]);
        assert_eq!(a, b);
        assert!(!Type::ptr_eq(&a, &b));
        assert_ne!(a, Type::generic(&LIST, [i64::ty()]));
        assert_ne!(a, Type::class(&LIST));
    }

    #[test]
    fn ops_do_not_affect_identity() {
        let plain = Type::class(&NUMBER);
        let with_ops = plain.clone().with_ops(TypeOps::of::<i32>());
        assert_eq!(plain, with_ops);
        assert!(with_ops.ops().type_id().is_some());
        assert!(plain.ops().type_id().is_none());
    }

    #[test]
    fn display_names() {
        let map = Type::generic(&MAP, [String::ty(), Type::array(i32::ty())]);
        assert_eq!(map.to_string(), "Map<String, i32[]>");
        let wildcard = Type::bounded_wildcard(Bound::upper(Type::class(&NUMBER)));
        assert_eq!(wildcard.to_string(), "? extends Number");
        assert_eq!(Type::bounded_wildcard(Bound::lower(i32::ty())).to_string(), "? super i32");
    }

    #[test]
    fn substitution_reaches_nested_args() {
        let list_of_t = Type::generic(&LIST, [Type::generic(&LIST, [Type::var("T")])]);
        let replaced = list_of_t.substitute(&["T"], &[String::ty()]);
        assert_eq!(replaced.to_string(), "List<List<String>>");
    }

    #[test]
    fn primitives_box() {
        assert!(i32::ty().is_primitive());
        assert_eq!(i32::ty().boxed(), <Box<i32>>::ty());
        assert_eq!(String::ty().boxed(), String::ty());
        assert!(Type::class(&LIST).is_erased());
    }
}
