//! File System Implementations
//!
//! Concrete implementations of the FileLister port, plus scoped file handles
//! for mapping callbacks.

mod local;
mod opener;

pub use local::LocalFileLister;
pub use opener::{FileOpener, MergeOpener, OpenMode};

/// In-memory file lister for testing
///
/// Matches patterns against a fixed file list with the same glob semantics
/// as `LocalFileLister`.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MockFileLister {
    pub files: Vec<std::path::PathBuf>,
}

#[cfg(test)]
impl MockFileLister {
    pub fn new<I, P>(files: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<std::path::PathBuf>,
    {
        Self {
            files: files.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
impl crate::domain::ports::FileLister for MockFileLister {
    fn list(
        &self,
        base_dir: &std::path::Path,
        pattern: &str,
        _follow_symlinks: bool,
    ) -> crate::domain::ports::FsResult<Vec<crate::domain::value_objects::PathLocator>> {
        let matcher = globset::GlobBuilder::new(pattern)
            .literal_separator(true)
            .build()
            .map_err(|e| crate::domain::ports::FsError::InvalidPattern {
                pattern: pattern.to_string(),
                message: e.to_string(),
            })?
            .compile_matcher();

        let mut found: Vec<_> = self
            .files
            .iter()
            .filter(|f| matcher.is_match(f))
            .map(|f| crate::domain::value_objects::PathLocator::new(base_dir.join(f)))
            .collect();
        found.sort();
        Ok(found)
    }
}
