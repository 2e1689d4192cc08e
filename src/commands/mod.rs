//! Command handlers

pub mod map;
pub mod tasks;

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::warn;

use filemappers::config::{self, DefaultsConfig, MapperDef, TaskFile};

/// A loaded task file with its layered default options
pub struct Loaded {
    pub file: TaskFile,
    pub defaults: DefaultsConfig,
}

impl Loaded {
    /// Definitions selected by `--task`, failing when nothing matches
    pub fn selected<'a>(&'a self, name: Option<&'a str>) -> Result<Vec<&'a MapperDef>> {
        let defs: Vec<_> = self.file.select(name).collect();
        if defs.is_empty() {
            match name {
                Some(name) => bail!("no task named '{name}'"),
                None => bail!("no tasks defined"),
            }
        }
        Ok(defs)
    }
}

pub fn load(path: &Path) -> Result<Loaded> {
    let (user, user_warnings) = config::load_user_config();
    let (file, warnings) = config::load_task_file(path)
        .with_context(|| format!("failed to load {}", path.display()))?;

    for warning in user_warnings.iter().chain(&warnings) {
        warn!("{warning}");
    }

    let defaults = config::resolve_options(&user, &file);
    Ok(Loaded { file, defaults })
}

/// Display name for a task definition
pub fn task_label(def: &MapperDef, index: usize) -> String {
    def.name.clone().unwrap_or_else(|| format!("task{}", index + 1))
}
