use core::fmt;
use std::sync::{Arc, PoisonError, RwLock};

// -----------------------------------------------------------------------------
// CowVec

/// An append-only list with copy-on-append snapshots.
///
/// [`snapshot`](CowVec::snapshot) hands out an `Arc` of the current contents.
/// A later [`push`](CowVec::push) never disturbs existing snapshots: it mutates
/// in place only while nobody holds one, and copies otherwise.
///
/// ```
/// use st_utils::sync::CowVec;
///
/// let list = CowVec::new();
/// list.push(1);
/// let before = list.snapshot();
/// list.push(2);
/// assert_eq!(&*before, &[1]);
/// assert_eq!(&*list.snapshot(), &[1, 2]);
/// ```
pub struct CowVec<T> {
    inner: RwLock<Arc<Vec<T>>>,
}

impl<T> CowVec<T> {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Returns the current contents. The snapshot never changes.
    pub fn snapshot(&self) -> Arc<Vec<T>> {
        Arc::clone(&self.inner.read().unwrap_or_else(PoisonError::into_inner))
    }

    pub fn len(&self) -> usize {
        self.inner.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone> CowVec<T> {
    /// Appends `value`.
    pub fn push(&self, value: T) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        Arc::make_mut(&mut guard).push(value);
    }
}

impl<T> Default for CowVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for CowVec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.snapshot().iter()).finish()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::CowVec;

    #[test]
    fn snapshot_is_stable_across_push() {
        let list = CowVec::new();
        list.push("a");
        let snap = list.snapshot();
        list.push("b");
        list.push("c");
        assert_eq!(snap.len(), 1);
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn iterate_while_appending() {
        let list = CowVec::new();
        for i in 0..16 {
            list.push(i);
        }
        std::thread::scope(|s| {
            s.spawn(|| {
                for i in 16..256 {
                    list.push(i);
                }
            });
            s.spawn(|| {
                for _ in 0..64 {
                    let snap = list.snapshot();
                    let expected: Vec<i32> = (0..snap.len() as i32).collect();
                    assert_eq!(*snap, expected);
                }
            });
        });
        assert_eq!(list.len(), 256);
    }
}
