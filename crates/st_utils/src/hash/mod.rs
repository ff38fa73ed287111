//! Hash containers backed by *hashbrown*, hashed with a fixed *foldhash* seed.
//!
//! A fixed seed keeps iteration order reproducible between runs, which keeps
//! debug output and test failures stable.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHashState

const FIXED_HASH_STATE: FixedState = FixedState::with_seed(0x5EED_0F57_4A7A_C0DE);

/// Hasher produced by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// A [`BuildHasher`] whose output depends only on the hashed value.
///
/// ```
/// use core::hash::BuildHasher;
/// use st_utils::hash::FixedHashState;
///
/// let a = FixedHashState.hash_one("strata");
/// let b = FixedHashState.hash_one("strata");
/// assert_eq!(a, b);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FIXED_HASH_STATE.build_hasher()
    }
}

// -----------------------------------------------------------------------------
// PassThroughState

/// A pass-through hasher for keys that are already well distributed, such as
/// [`TypeId`](core::any::TypeId).
#[derive(Copy, Clone, Default, Debug)]
pub struct PassThroughHasher {
    hash: u64,
}

impl Hasher for PassThroughHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            self.hash = self.hash.rotate_left(8) ^ u64::from(byte);
        }
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash ^= i;
    }
}

/// [`BuildHasher`] for [`PassThroughHasher`].
#[derive(Copy, Clone, Default, Debug)]
pub struct PassThroughState;

impl BuildHasher for PassThroughState {
    type Hasher = PassThroughHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        PassThroughHasher { hash: 0 }
    }
}

// -----------------------------------------------------------------------------
// Containers

/// A [`hashbrown::HashMap`] using [`FixedHashState`] by default.
pub type HashMap<K, V, S = FixedHashState> = hashbrown::HashMap<K, V, S>;

/// A [`hashbrown::HashSet`] using [`FixedHashState`] by default.
pub type HashSet<T, S = FixedHashState> = hashbrown::HashSet<T, S>;

// -----------------------------------------------------------------------------
// Re-export crates

pub use foldhash;
pub use hashbrown;

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use core::hash::BuildHasher;

    use super::{FixedHashState, HashMap};

    #[test]
    fn fixed_state_is_stable() {
        assert_eq!(
            FixedHashState.hash_one(42_u64),
            FixedHashState.hash_one(42_u64)
        );
        assert_ne!(
            FixedHashState.hash_one(42_u64),
            FixedHashState.hash_one(43_u64)
        );
    }

    #[test]
    fn map_with_default_state() {
        let mut map: HashMap<&str, i32> = HashMap::default();
        map.insert("a", 1);
        map.insert("b", 2);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.len(), 2);
    }
}
