//! The text format: quoting, reading and writing.
//!
//! ```text
//! #! header line
//!
//! # comment attached to `name`
//! name = "quoted, because of the comma"
//! server {
//!   port = 8080
//!   token = null
//! }
//! tags [
//!   a
//!   b
//! ]
//! ```

mod quote;
mod reader;
mod writer;

pub use quote::{SPECIAL_CHARS, quote, unquote};
pub use reader::TextReader;
pub use writer::TextWriter;
