#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Modules

mod document;
mod error;
mod file;

// -----------------------------------------------------------------------------
// Exports

pub use document::Document;
pub use error::DocumentError;
pub use file::{FileDocument, FileDocumentBuilder, LoadFlags, LoadOutcome, LoadState};
