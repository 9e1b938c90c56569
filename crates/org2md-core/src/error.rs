//! Error types for the conversion pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the conversion driver.
///
/// Malformed markup is never an error: unmatched delimiters and broken link
/// brackets are left as-is by the rewrite rules. Only the filesystem side of
/// a conversion can fail.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// The source path does not exist or could not be resolved to an
    /// absolute location. Raised before any read attempt.
    #[error("cannot access file at '{}'", path.display())]
    PathNotFound { path: PathBuf },

    /// An I/O failure while reading the source or writing the destination.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Conversion result type
pub type ConvertResult<T> = Result<T, ConvertError>;
