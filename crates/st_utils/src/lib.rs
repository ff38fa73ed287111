#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod hash;
pub mod sync;

// -----------------------------------------------------------------------------
// Top-level exports

pub use typeid_map::TypeIdMap;
