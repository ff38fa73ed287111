#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// Generated code names this crate `st_reflect`, inside the crate too.
extern crate self as st_reflect;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod reflection;

pub mod impls;
pub mod info;
pub mod mapper;
pub mod ops;
pub mod registry;
pub mod serializers;
pub mod variance;

// -----------------------------------------------------------------------------
// Top-Level exports

#[doc(hidden)]
pub mod __macro_exports;

pub use error::{SerializerError, TypeError};
pub use reflection::Reflect;
pub use st_reflect_derive as derive;
