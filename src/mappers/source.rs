//! Source specifications - where a mapper's inputs come from

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::ports::FileLister;
use crate::domain::value_objects::PathLocator;
use crate::error::MapperResult;

use super::MapperOptions;

/// Glob pattern or explicit path list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceSpec {
    /// Expanded against the mapper's base directory
    Glob(String),
    /// Used as given, in order
    Paths(Vec<PathLocator>),
}

impl SourceSpec {
    pub fn glob(pattern: impl Into<String>) -> Self {
        SourceSpec::Glob(pattern.into())
    }

    pub fn paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        SourceSpec::Paths(paths.into_iter().map(PathLocator::new).collect())
    }

    pub fn as_glob(&self) -> Option<&str> {
        match self {
            SourceSpec::Glob(pattern) => Some(pattern),
            SourceSpec::Paths(_) => None,
        }
    }

    /// Turn the specification into a concrete, ordered list of sources
    pub fn expand(
        &self,
        lister: &dyn FileLister,
        options: &MapperOptions,
    ) -> MapperResult<Vec<PathLocator>> {
        match self {
            SourceSpec::Glob(pattern) => Ok(lister.list(
                &options.base_dir,
                pattern,
                options.follow_symlinks,
            )?),
            SourceSpec::Paths(paths) => Ok(paths.clone()),
        }
    }
}

impl From<&str> for SourceSpec {
    fn from(value: &str) -> Self {
        SourceSpec::glob(value)
    }
}

impl From<String> for SourceSpec {
    fn from(value: String) -> Self {
        SourceSpec::Glob(value)
    }
}

impl From<Vec<PathLocator>> for SourceSpec {
    fn from(value: Vec<PathLocator>) -> Self {
        SourceSpec::Paths(value)
    }
}
