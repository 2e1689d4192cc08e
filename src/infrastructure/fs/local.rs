//! Local File Lister Implementation
//!
//! Implements the FileLister port for the local disk. Directory traversal uses
//! the `ignore` crate's walker with every ignore-file filter switched off;
//! matching uses `globset` against paths relative to the base directory.

use std::path::{Component, Path};

use globset::{GlobBuilder, GlobMatcher};
use ignore::WalkBuilder;
use tracing::trace;

use crate::domain::ports::file_lister::{FileLister, FsError, FsResult};
use crate::domain::value_objects::PathLocator;

/// Local file lister
///
/// `*` never crosses a `/`; `**` spans any number of directories.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileLister;

impl LocalFileLister {
    /// Create a new LocalFileLister instance
    pub fn new() -> Self {
        Self
    }
}

impl FileLister for LocalFileLister {
    fn list(
        &self,
        base_dir: &Path,
        pattern: &str,
        follow_symlinks: bool,
    ) -> FsResult<Vec<PathLocator>> {
        let pattern = pattern.trim_start_matches("./");
        let matcher = compile(pattern)?;

        let mut builder = WalkBuilder::new(base_dir);
        builder
            .standard_filters(false)
            .hidden(false)
            .follow_links(follow_symlinks)
            .sort_by_file_name(|a, b| a.cmp(b));
        if let Some(depth) = max_depth(pattern) {
            builder.max_depth(Some(depth));
        }

        let mut files = Vec::new();
        for entry in builder.build() {
            let entry = entry.map_err(|e| FsError::Walk {
                path: base_dir.to_path_buf(),
                message: e.to_string(),
            })?;
            if entry.depth() == 0 {
                continue;
            }
            if !follow_symlinks && entry.path_is_symlink() {
                trace!(path = %entry.path().display(), "skipping symlink");
                continue;
            }
            // `is_file` follows symlinks, so a link to a file counts as a file
            if !entry.path().is_file() {
                continue;
            }

            let relative = entry
                .path()
                .strip_prefix(base_dir)
                .unwrap_or_else(|_| entry.path());
            if matcher.is_match(relative) {
                files.push(PathLocator::new(entry.path()));
            }
        }

        Ok(files)
    }
}

fn compile(pattern: &str) -> FsResult<GlobMatcher> {
    GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map(|glob| glob.compile_matcher())
        .map_err(|e| FsError::InvalidPattern {
            pattern: pattern.to_string(),
            message: e.to_string(),
        })
}

/// Depth limit for patterns without a recursive `**` segment
fn max_depth(pattern: &str) -> Option<usize> {
    if pattern.contains("**") {
        return None;
    }
    let depth = Path::new(pattern)
        .components()
        .filter(|c| matches!(c, Component::Normal(_)))
        .count();
    Some(depth.max(1))
}
