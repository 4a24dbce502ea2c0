//! Persistence: the text drawing format and XML export.

pub mod text;
pub mod xml;

mod file;

pub use file::{export_xml, load_drawing, save_drawing};
pub use text::{SkipReason, SkippedLine, TextLoad};

use thiserror::Error;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("File not found: {0}")]
    NotFound(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("IO error: {0}")]
    Io(String),
}

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;
