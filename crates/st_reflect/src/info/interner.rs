use std::sync::OnceLock;

use st_utils::sync::InsertOnceMap;

use crate::info::Type;

// -----------------------------------------------------------------------------
// TypeInterner

/// Canonicalizes structurally equal descriptors to one shared handle.
///
/// Interning is keyed by the full structural value of a descriptor, never by
/// its name. Interned handles compare with a pointer check first.
///
/// ```
/// use st_reflect::info::{Type, TypeInterner, LIST, Typed};
///
/// let interner = TypeInterner::new();
/// let a = interner.intern(Type::generic(&LIST, [i32::ty()]));
/// let b = interner.intern(Type::generic(&LIST, [i32::ty()]));
/// assert!(Type::ptr_eq(&a, &b));
/// ```
#[derive(Debug, Default)]
pub struct TypeInterner {
    types: InsertOnceMap<Type, Type>,
}

impl TypeInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide interner.
    pub fn global() -> &'static TypeInterner {
        static GLOBAL: OnceLock<TypeInterner> = OnceLock::new();
        GLOBAL.get_or_init(TypeInterner::new)
    }

    /// Returns the canonical handle for `ty`; the first handle interned wins.
    pub fn intern(&self, ty: Type) -> Type {
        if let Some(canonical) = self.types.get(&ty) {
            return canonical;
        }
        self.types.insert_if_absent(ty.clone(), ty)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    pub fn clear(&self) {
        self.types.clear();
    }
}

// -----------------------------------------------------------------------------
// Tests
