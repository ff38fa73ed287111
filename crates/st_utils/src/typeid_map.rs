use core::any::TypeId;
use core::fmt;

use crate::hash::{HashMap, PassThroughState};

// -----------------------------------------------------------------------------
// TypeIdMap

/// A map from a Rust type to a per-type value, such as a cached descriptor or
/// a codec table entry.
///
/// `TypeId` hashes are already well mixed, so keys skip rehashing. The map
/// has no interior mutability; wrap it in a lock for shared caches.
///
/// ```
/// use core::any::TypeId;
/// use st_utils::TypeIdMap;
///
/// let mut widths = TypeIdMap::new();
/// widths.insert(TypeId::of::<u16>(), 16);
/// *widths.get_or_insert(TypeId::of::<u32>(), || 0) += 32;
///
/// assert_eq!(widths.get_type::<u16>(), Some(&16));
/// assert_eq!(widths.get(&TypeId::of::<u32>()), Some(&32));
/// assert_eq!(widths.get_type::<u64>(), None);
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, PassThroughState>);

impl<V> TypeIdMap<V> {
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(PassThroughState))
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    #[inline]
    pub fn get_type<T: ?Sized + 'static>(&self) -> Option<&V> {
        self.get(&TypeId::of::<T>())
    }

    /// Returns the previous value of `type_id`, if any.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, value: V) -> Option<V> {
        self.0.insert(type_id, value)
    }

    /// Keeps an existing value; `f` only runs for a new key.
    #[inline]
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        self.0.entry(type_id).or_insert_with(f)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests
