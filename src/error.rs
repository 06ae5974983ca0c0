//! Error taxonomy for editing operations
//!
//! Every structural or history operation reports its failure through
//! [`EditorError`]. All variants except [`EditorError::ResourceExhausted`] are
//! recoverable: the caller drops the edit and reports a status message.

use std::collections::TryReserveError;
use std::path::PathBuf;
use thiserror::Error;

/// Result alias used by the model and app layers
pub type EditorResult<T> = Result<T, EditorError>;

#[derive(Debug, Error)]
pub enum EditorError {
    /// A row index or byte offset outside the valid range
    #[error("index {index} out of bounds (len {len})")]
    OutOfBounds { index: usize, len: usize },

    /// Undo or redo requested with nothing on the respective stack
    #[error("no history to apply")]
    EmptyHistory,

    /// The operation needs at least one row
    #[error("document is empty")]
    EmptyDocument,

    /// Growing row storage failed; the document must not be edited further
    #[error("out of memory: {0}")]
    ResourceExhausted(#[from] TryReserveError),

    /// Reading or writing a file failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The clipboard collaborator refused a copy or paste
    #[error("clipboard error: {0}")]
    Clipboard(String),

    /// Save requested for a document without a path
    #[error("no file name")]
    NoFileName,
}

impl EditorError {
    pub(crate) fn out_of_bounds(index: usize, len: usize) -> Self {
        Self::OutOfBounds { index, len }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error must terminate the editing loop
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ResourceExhausted(_))
    }
}
