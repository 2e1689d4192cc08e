//! Options shared by every mapper

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Mapper configuration, fixed once the mapper is built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapperOptions {
    /// Base directory glob sources are resolved against
    #[serde(rename = "dir", alias = "in_path")]
    pub base_dir: PathBuf,
    /// List symlinked files when expanding globs
    pub follow_symlinks: bool,
    /// Declare mapping sources as task file dependencies
    pub file_dep: bool,
    /// Build a no-op task instead of failing on an empty mapping
    pub allow_empty_map: bool,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            follow_symlinks: true,
            file_dep: true,
            allow_empty_map: false,
        }
    }
}
