//! Configuration type definitions

use std::path::PathBuf;

use serde::Deserialize;

use crate::mappers::{MapperOptions, SourceSpec};

/// Partial `MapperOptions`, as written in a `[defaults]` table
///
/// Unset fields leave the lower layer untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    #[serde(alias = "in_path")]
    pub dir: Option<PathBuf>,
    pub follow_symlinks: Option<bool>,
    pub file_dep: Option<bool>,
    pub allow_empty_map: Option<bool>,
}

impl DefaultsConfig {
    /// `upper` layered over `self`: fields `upper` sets win
    pub fn overlay(&self, upper: &DefaultsConfig) -> DefaultsConfig {
        DefaultsConfig {
            dir: upper.dir.clone().or_else(|| self.dir.clone()),
            follow_symlinks: upper.follow_symlinks.or(self.follow_symlinks),
            file_dep: upper.file_dep.or(self.file_dep),
            allow_empty_map: upper.allow_empty_map.or(self.allow_empty_map),
        }
    }

    /// Overwrite the options this layer sets
    pub fn apply(&self, options: &mut MapperOptions) {
        if let Some(dir) = &self.dir {
            options.base_dir = dir.clone();
        }
        if let Some(follow) = self.follow_symlinks {
            options.follow_symlinks = follow;
        }
        if let Some(file_dep) = self.file_dep {
            options.file_dep = file_dep;
        }
        if let Some(allow) = self.allow_empty_map {
            options.allow_empty_map = allow;
        }
    }
}

/// User-level config (`<config_dir>/filemappers/config.toml`)
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct UserConfig {
    pub defaults: DefaultsConfig,
}

/// Mapper strategy named in a task definition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MapperType {
    Identity,
    Regex,
    Glob,
    Merge,
    Composite,
    Chained,
}

/// One `[[task]]` entry, or a nested `mappers` / `stages` entry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MapperDef {
    pub name: Option<String>,
    pub doc: Option<String>,
    pub kind: MapperType,
    pub src: Option<SourceSpec>,

    // Per-mapper option overrides
    #[serde(alias = "in_path")]
    pub dir: Option<PathBuf>,
    pub follow_symlinks: Option<bool>,
    pub file_dep: Option<bool>,
    pub allow_empty_map: Option<bool>,

    /// `%(source)s` / `%(target)s` command template
    pub command: Option<String>,

    // Regex / Glob
    pub search: Option<String>,
    pub replace: Option<String>,
    pub ignore_nonmatching: Option<bool>,
    pub pattern: Option<String>,

    // Merge
    pub target: Option<String>,

    #[serde(default)]
    pub mappers: Vec<MapperDef>,
    #[serde(default)]
    pub stages: Vec<MapperDef>,
}

/// A task definition file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TaskFile {
    pub defaults: DefaultsConfig,
    pub task: Vec<MapperDef>,
}

impl TaskFile {
    /// Tasks to run: all of them, or only the one called `name`
    pub fn select<'a>(&'a self, name: Option<&'a str>) -> impl Iterator<Item = &'a MapperDef> + 'a {
        self.task
            .iter()
            .filter(move |def| name.is_none() || def.name.as_deref() == name)
    }
}
