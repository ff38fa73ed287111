//! [`Typed`](crate::info::Typed) and [`Reflect`](crate::Reflect) for std and
//! well-known types.
//!
//! - Primitives (`bool`, `char`, integers, floats) and their boxed
//!   counterparts `Box<P>`. Boxed numbers extend [`NUMBER`](crate::info::NUMBER).
//! - `String` and `PathBuf`.
//! - `Vec`, `VecDeque`, `LinkedList`, `HashSet`, `BTreeSet`, `HashMap`,
//!   `BTreeMap` and the `st_utils` hash containers.
//! - `Option<T>`, transparent: it describes itself as `T`.
//! - `regex::Regex`, `url::Url` and `uuid::Uuid` behind their features.

mod collections;
mod maps;
mod option;
mod primitives;
mod std_types;

#[cfg(any(feature = "regex", feature = "url", feature = "uuid"))]
mod well_known;
