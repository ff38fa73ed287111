//! Lock-based containers for read-heavy shared state.
//!
//! - [`InsertOnceMap`]: a cache whose entries, once inserted, are never replaced.
//! - [`CowVec`]: an append-only list whose readers work on stable snapshots.
//!
//! Poisoned locks are recovered: the protected data is always left consistent
//! because no user code runs while a write guard is held.

mod cow_vec;
mod insert_once;

pub use cow_vec::CowVec;
pub use insert_once::InsertOnceMap;
