//! Error types for filemappers
//!
//! Uses `thiserror` for library errors. The CLI wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::file_lister::FsError;

/// Result type alias for mapper operations
pub type MapperResult<T> = Result<T, MapperError>;

/// Main error type for mapper operations
#[derive(Error, Debug)]
pub enum MapperError {
    /// Statically detectable misconfiguration, raised at construction time
    #[error("invalid {mapper} configuration: {message}")]
    Configuration {
        mapper: &'static str,
        message: String,
    },

    /// Search pattern that the regex engine rejects
    #[error("invalid regular expression '{pattern}': {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// Resolved mapping is empty and the mapper does not tolerate that
    #[error("{mapper} resolved an empty mapping (set allow_empty_map to tolerate it)")]
    EmptyMapping { mapper: &'static str },

    /// A task was requested from a mapper that has no action
    #[error("{mapper} has no action configured")]
    MissingAction { mapper: &'static str },

    /// File listing failed
    #[error(transparent)]
    Fs(#[from] FsError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Task definition file could not be understood
    #[error("invalid task definition in {file}: {message}")]
    InvalidDefinition { file: PathBuf, message: String },
}

impl MapperError {
    pub(crate) fn configuration(mapper: &'static str, message: impl Into<String>) -> Self {
        MapperError::Configuration {
            mapper,
            message: message.into(),
        }
    }

    /// True for errors raised eagerly while constructing a mapper
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            MapperError::Configuration { .. } | MapperError::InvalidRegex { .. }
        )
    }
}
