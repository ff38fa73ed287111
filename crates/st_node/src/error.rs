use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Errors raised by the document tree and the text codec.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum NodeError {
    #[error("path `{path}` is already present in the map")]
    DuplicatePath { path: String },

    #[error("path `{path}` does not lead to a map node")]
    NotMap { path: String },

    #[error("scalar has no value")]
    NullValue,

    #[error("cannot convert `{text}` to {target}: {reason}")]
    Convert {
        text: String,
        target: &'static str,
        reason: String,
    },

    #[error("syntax error on line {line}: {message}")]
    Syntax { line: usize, message: String },

    #[error("unexpected end of input, `{expected}` was never closed")]
    UnexpectedEof { expected: char },

    #[error("options are sealed and cannot be changed")]
    Sealed,

    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),

    #[error("formatting failure")]
    Fmt(#[from] core::fmt::Error),
}

impl NodeError {
    pub(crate) fn syntax(line: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            message: message.into(),
        }
    }
}
