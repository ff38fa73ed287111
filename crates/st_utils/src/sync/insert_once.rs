use core::borrow::Borrow;
use core::fmt;
use core::hash::Hash;
use std::sync::{PoisonError, RwLock};

use crate::hash::HashMap;

// -----------------------------------------------------------------------------
// InsertOnceMap

/// A concurrent map with insert-if-absent semantics.
///
/// Values are computed outside of the lock, so the producer may itself consult
/// the same map (recursive memoization). When two callers race on the same key,
/// the first value written wins and every caller observes that value; no update
/// is lost and no entry is ever overwritten.
///
/// ```
/// use st_utils::sync::InsertOnceMap;
///
/// let cache = InsertOnceMap::new();
/// assert_eq!(cache.get_or_insert_with("a", || 1), 1);
/// assert_eq!(cache.get_or_insert_with("a", || 2), 1);
/// ```
pub struct InsertOnceMap<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> InsertOnceMap<K, V> {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(HashMap::default()),
        }
    }

    /// Removes every entry.
    pub fn clear(&self) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<K: Hash + Eq, V: Clone> InsertOnceMap<K, V> {
    /// Returns a clone of the value stored for `key`.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    /// Stores `value` unless `key` already has a value; returns the stored value.
    pub fn insert_if_absent(&self, key: K, value: V) -> V {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(key)
            .or_insert(value)
            .clone()
    }

    /// Drops the value stored for `key`, if any.
    pub fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key)
    }

    /// Returns the value for `key`, computing and storing it on a miss.
    pub fn get_or_insert_with(&self, key: K, f: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(&key) {
            return value;
        }
        let value = f();
        self.insert_if_absent(key, value)
    }

    /// Fallible form of [`get_or_insert_with`](Self::get_or_insert_with).
    ///
    /// Errors are returned to the caller and not cached.
    pub fn try_get_or_insert_with<E>(
        &self,
        key: K,
        f: impl FnOnce() -> Result<V, E>,
    ) -> Result<V, E> {
        if let Some(value) = self.get(&key) {
            return Ok(value);
        }
        let value = f()?;
        Ok(self.insert_if_absent(key, value))
    }
}

impl<K, V> Default for InsertOnceMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> fmt::Debug for InsertOnceMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InsertOnceMap")
            .field("len", &self.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::InsertOnceMap;

    #[test]
    fn first_value_wins() {
        let map = InsertOnceMap::new();
        assert_eq!(map.insert_if_absent(1, "one"), "one");
        assert_eq!(map.insert_if_absent(1, "uno"), "one");
        assert_eq!(map.get(&1), Some("one"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn removed_keys_accept_a_new_value() {
        let map = InsertOnceMap::new();
        map.insert_if_absent("k", 1);
        assert_eq!(map.remove("k"), Some(1));
        assert_eq!(map.remove("k"), None);
        assert_eq!(map.insert_if_absent("k", 2), 2);
    }

    #[test]
    fn errors_are_not_cached() {
        let map: InsertOnceMap<u8, u8> = InsertOnceMap::new();
        let res: Result<u8, &str> = map.try_get_or_insert_with(1, || Err("boom"));
        assert!(res.is_err());
        assert!(map.is_empty());
        assert_eq!(map.try_get_or_insert_with::<()>(1, || Ok(7)), Ok(7));
    }

    #[test]
    fn recursive_producer_does_not_deadlock() {
        let map: InsertOnceMap<u32, u32> = InsertOnceMap::new();
        fn fib(map: &InsertOnceMap<u32, u32>, n: u32) -> u32 {
            if n < 2 {
                return n;
            }
            map.get_or_insert_with(n, || fib(map, n - 1) + fib(map, n - 2))
        }
        assert_eq!(fib(&map, 20), 6765);
    }

    #[test]
    fn concurrent_callers_agree() {
        let map: InsertOnceMap<u32, usize> = InsertOnceMap::new();
        let counter = AtomicUsize::new(0);
        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    for key in 0..64 {
                        let seen = map.get_or_insert_with(key, || {
                            counter.fetch_add(1, Ordering::Relaxed)
                        });
                        assert_eq!(map.get(&key), Some(seen));
                    }
                });
            }
        });
        assert_eq!(map.len(), 64);
    }
}
