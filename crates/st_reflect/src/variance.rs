//! Subtyping between type descriptors.

use std::sync::{Arc, OnceLock};

use st_utils::sync::InsertOnceMap;

use crate::TypeError;
use crate::info::{Bound, RawType, Shape, Type};

// -----------------------------------------------------------------------------
// VarianceChecker

/// Decides whether one descriptor is a supertype of another.
///
/// Rules, for `outer ⊇ inner`:
///
/// - Every descriptor is a supertype of itself, and [`Type::any`] is a
///   supertype of everything.
/// - A primitive and its boxed counterpart are interchangeable.
/// - Class descriptors: `inner` is projected onto the raw type of `outer`
///   through its declared supertypes, substituting its own arguments on the
///   way, and every argument of `outer` must be a supertype of the matching
///   projected argument. Arguments are covariant.
/// - A variable or wildcard on the outer side accepts candidates within its
///   bounds; on the inner side it stands for its upper bound.
/// - Arrays are covariant in their component.
///
/// A generic raw type used without its arguments cannot be checked and
/// yields [`TypeError::RawType`].
///
/// Results are memoized per `(outer, inner)` pair; the first result stored
/// for a pair wins.
///
/// ```
/// use st_reflect::info::{Type, Typed, LIST, NUMBER};
/// use st_reflect::variance::VarianceChecker;
///
/// let checker = VarianceChecker::new();
/// let numbers = Type::generic(&LIST, [Type::class(&NUMBER)]);
///
/// assert_eq!(checker.is_supertype_of(&numbers, &<Vec<i32>>::ty()), Ok(true));
/// assert_eq!(checker.is_supertype_of(&numbers, &<Vec<String>>::ty()), Ok(false));
/// assert!(checker.is_supertype_of(&Type::class(&LIST), &<Vec<i32>>::ty()).is_err());
/// ```
#[derive(Debug, Default)]
pub struct VarianceChecker {
    memo: InsertOnceMap<(Type, Type), Result<bool, TypeError>>,
}

impl VarianceChecker {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide checker.
    pub fn global() -> &'static Arc<VarianceChecker> {
        static GLOBAL: OnceLock<Arc<VarianceChecker>> = OnceLock::new();
        GLOBAL.get_or_init(|| Arc::new(VarianceChecker::new()))
    }

    /// Number of memoized pairs.
    #[inline]
    pub fn len(&self) -> usize {
        self.memo.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.memo.is_empty()
    }

    pub fn clear(&self) {
        self.memo.clear();
    }

    /// Returns `Ok(true)` if a value of `inner` can be used where `outer` is
    /// expected.
    pub fn is_supertype_of(&self, outer: &Type, inner: &Type) -> Result<bool, TypeError> {
        if outer == inner || outer.is_any() {
            return Ok(true);
        }
        let key = (outer.clone(), inner.clone());
        if let Some(result) = self.memo.get(&key) {
            return result;
        }
        let result = self.check(outer, inner);
        self.memo.insert_if_absent(key, result)
    }

    /// Raw relation only: `inner`'s raw type is `raw` or extends it.
    pub fn extends_raw(&self, inner: &Type, raw: &RawType) -> bool {
        inner
            .boxed()
            .raw()
            .is_some_and(|inner| inner.extends(raw))
    }

    fn check(&self, outer: &Type, inner: &Type) -> Result<bool, TypeError> {
        match (outer.shape(), inner.shape()) {
            (Shape::Var { bound, .. } | Shape::Wildcard(bound), _) => self.within(bound, inner),
            (_, Shape::Var { bound, .. } | Shape::Wildcard(bound)) => {
                self.is_supertype_of(outer, &bound.upper)
            }
            (Shape::Array(outer), Shape::Array(inner)) => self.is_supertype_of(outer, inner),
            (Shape::Class { .. }, Shape::Class { .. }) => self.check_class(outer, inner),
            _ => Ok(false),
        }
    }

    fn within(&self, bound: &Bound, candidate: &Type) -> Result<bool, TypeError> {
        let (upper, lower) = match candidate.bound() {
            Some(own) => (&own.upper, own.lower.as_ref()),
            None => (candidate, Some(candidate)),
        };
        if !self.is_supertype_of(&bound.upper, upper)? {
            return Ok(false);
        }
        match (&bound.lower, lower) {
            (None, _) => Ok(true),
            (Some(_), None) => Ok(false),
            (Some(required), Some(lower)) => self.is_supertype_of(lower, required),
        }
    }

    fn check_class(&self, outer: &Type, inner: &Type) -> Result<bool, TypeError> {
        for ty in [outer, inner] {
            if ty.is_erased() {
                return Err(TypeError::RawType { ty: ty.to_string() });
            }
        }
        let outer = outer.boxed();
        let inner = inner.boxed();
        if outer == inner {
            return Ok(true);
        }
        let Some(raw) = outer.raw() else {
            return Ok(false);
        };
        let Some(projected) = project(&inner, raw)? else {
            return Ok(false);
        };
        if outer.args().len() != projected.args().len() {
            return Err(TypeError::ArgCount {
                ty: outer.to_string(),
                expected: projected.args().len(),
                found: outer.args().len(),
            });
        }
        for (outer_arg, inner_arg) in outer.args().iter().zip(projected.args()) {
            if !self.is_supertype_of(outer_arg, inner_arg)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Views `ty` as an instance of `target`, following declared supertypes.
fn project(ty: &Type, target: &RawType) -> Result<Option<Type>, TypeError> {
    let Some(raw) = ty.raw() else {
        return Ok(None);
    };
    if raw == target {
        return Ok(Some(ty.clone()));
    }
    let (params, args) = (raw.params(), ty.args());
    if params.len() != args.len() {
        return Err(TypeError::ArgCount {
            ty: ty.to_string(),
            expected: params.len(),
            found: args.len(),
        });
    }
    for supertype in raw.supertypes() {
        let supertype = supertype.substitute(params, args);
        if let Some(found) = project(&supertype, target)? {
            return Ok(Some(found));
        }
    }
    Ok(None)
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};

    use super::VarianceChecker;
    use crate::TypeError;
    use crate::info::{Bound, COLLECTION, LIST, MAP, NUMBER, Type, Typed};

    fn number() -> Type {
        Type::class(&NUMBER)
    }

    #[test]
    fn reflexive_and_top() {
        let checker = VarianceChecker::new();
        let samples = [
            i32::ty(),
            String::ty(),
            <Vec<Vec<u8>>>::ty(),
            Type::array(f64::ty()),
            Type::wildcard(),
            Type::var("T"),
        ];
        for ty in &samples {
            assert_eq!(checker.is_supertype_of(ty, ty), Ok(true), "{ty}");
            assert_eq!(checker.is_supertype_of(&Type::any(), ty), Ok(true), "{ty}");
        }
        assert_eq!(checker.is_supertype_of(&i32::ty(), &Type::any()), Ok(false));
    }

    #[test]
    fn primitives_and_boxes() {
        let checker = VarianceChecker::new();
        assert_eq!(checker.is_supertype_of(&i32::ty(), &<Box<i32>>::ty()), Ok(true));
        assert_eq!(checker.is_supertype_of(&<Box<i32>>::ty(), &i32::ty()), Ok(true));
        assert_eq!(checker.is_supertype_of(&number(), &i32::ty()), Ok(true));
        assert_eq!(checker.is_supertype_of(&i32::ty(), &number()), Ok(false));
        assert_eq!(checker.is_supertype_of(&number(), &bool::ty()), Ok(false));
        assert_eq!(checker.is_supertype_of(&i64::ty(), &i32::ty()), Ok(false));
    }

    #[test]
    fn arguments_are_covariant() {
        let checker = VarianceChecker::new();
        let list_of_numbers = Type::generic(&LIST, [number()]);
        assert_eq!(checker.is_supertype_of(&list_of_numbers, &<Vec<u16>>::ty()), Ok(true));
        assert_eq!(checker.is_supertype_of(&list_of_numbers, &<Vec<String>>::ty()), Ok(false));

        let any_collection = Type::generic(&COLLECTION, [Type::wildcard()]);
        assert_eq!(checker.is_supertype_of(&any_collection, &<HashSet<u8>>::ty()), Ok(true));
        assert_eq!(checker.is_supertype_of(&any_collection, &<HashMap<u8, u8>>::ty()), Ok(false));

        let numeric_values = Type::generic(
            &MAP,
            [String::ty(), Type::bounded_wildcard(Bound::upper(number()))],
        );
        assert_eq!(
            checker.is_supertype_of(&numeric_values, &<HashMap<String, u64>>::ty()),
            Ok(true)
        );
        assert_eq!(
            checker.is_supertype_of(&numeric_values, &<HashMap<String, String>>::ty()),
            Ok(false)
        );
    }

    #[test]
    fn transitive_chain() {
        let checker = VarianceChecker::new();
        let a = Type::generic(&COLLECTION, [number()]);
        let b = Type::generic(&LIST, [number()]);
        let c = <Vec<i64>>::ty();
        assert_eq!(checker.is_supertype_of(&a, &b), Ok(true));
        assert_eq!(checker.is_supertype_of(&b, &c), Ok(true));
        assert_eq!(checker.is_supertype_of(&a, &c), Ok(true));
    }

    #[test]
    fn erased_generics_are_errors() {
        let checker = VarianceChecker::new();
        let err = checker
            .is_supertype_of(&Type::class(&LIST), &<Vec<i32>>::ty())
            .unwrap_err();
        assert!(matches!(err, TypeError::RawType { .. }));

        let any_list = Type::generic(&LIST, [Type::wildcard()]);
        assert!(checker.is_supertype_of(&any_list, &Type::class(&LIST)).is_err());
    }

    #[test]
    fn arrays_are_covariant() {
        let checker = VarianceChecker::new();
        let numbers = Type::array(number());
        assert_eq!(checker.is_supertype_of(&numbers, &Type::array(u8::ty())), Ok(true));
        assert_eq!(checker.is_supertype_of(&numbers, &Type::array(String::ty())), Ok(false));
        assert_eq!(checker.is_supertype_of(&numbers, &u8::ty()), Ok(false));
    }

    #[test]
    fn bounds() {
        let checker = VarianceChecker::new();
        let super_box = Type::bounded_wildcard(Bound::lower(<Box<i32>>::ty()));
        assert_eq!(checker.is_supertype_of(&super_box, &number()), Ok(true));
        assert_eq!(checker.is_supertype_of(&super_box, &String::ty()), Ok(false));

        // A bounded candidate without a lower bound fails a lower-bound check.
        let extends_number = Type::bounded_wildcard(Bound::upper(number()));
        assert_eq!(checker.is_supertype_of(&super_box, &extends_number), Ok(false));

        // On the inner side a wildcard stands for its upper bound.
        assert_eq!(checker.is_supertype_of(&number(), &extends_number), Ok(true));
        assert_eq!(checker.is_supertype_of(&i32::ty(), &extends_number), Ok(false));
    }

    #[test]
    fn results_are_memoized() {
        let checker = VarianceChecker::new();
        let list = Type::generic(&LIST, [number()]);
        checker.is_supertype_of(&list, &<Vec<i8>>::ty()).unwrap();
        let memoized = checker.len();
        assert!(memoized >= 2);
        checker.is_supertype_of(&list, &<Vec<i8>>::ty()).unwrap();
        assert_eq!(checker.len(), memoized);
        checker.clear();
        assert!(checker.is_empty());
    }
}
