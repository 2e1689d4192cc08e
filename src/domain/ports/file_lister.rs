//! FileLister port - abstraction over glob expansion
//!
//! Mappers never walk the filesystem themselves. Glob source specifications
//! are expanded through this trait so the domain stays free of I/O details.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::value_objects::PathLocator;

/// Result type for file listing operations
pub type FsResult<T> = Result<T, FsError>;

/// File listing errors
#[derive(Debug, Error)]
pub enum FsError {
    /// Glob pattern could not be compiled
    #[error("invalid glob pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Directory walk failed
    #[error("failed to list files under {}: {message}", path.display())]
    Walk { path: PathBuf, message: String },

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Abstract glob expansion
///
/// Implementations:
/// - `LocalFileLister` - walks the local disk
/// - `MockFileLister` - in-memory for testing
pub trait FileLister: fmt::Debug + Send + Sync {
    /// List the regular files under `base_dir` whose path relative to
    /// `base_dir` matches `pattern`. Returned locators include `base_dir`.
    fn list(
        &self,
        base_dir: &Path,
        pattern: &str,
        follow_symlinks: bool,
    ) -> FsResult<Vec<PathLocator>>;
}
