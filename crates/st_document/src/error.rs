use st_node::NodeError;
use st_reflect::SerializerError;
use thiserror::Error;

/// Failure of a document operation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DocumentError {
    /// The file could not be read or written.
    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Node(#[from] NodeError),

    #[error(transparent)]
    Serializer(#[from] SerializerError),
}

impl DocumentError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
