//! Configuration loading

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::domain::value_objects::ConfigWarning;
use crate::error::{MapperError, MapperResult};
use super::types::{DefaultsConfig, TaskFile, UserConfig};

pub const ENV_DIR: &str = "FILEMAPPERS_DIR";
pub const ENV_FOLLOW_SYMLINKS: &str = "FILEMAPPERS_FOLLOW_SYMLINKS";
pub const ENV_FILE_DEP: &str = "FILEMAPPERS_FILE_DEP";
pub const ENV_ALLOW_EMPTY_MAP: &str = "FILEMAPPERS_ALLOW_EMPTY_MAP";

/// Load a task definition file and collect warnings for unknown keys
pub fn load_task_file(path: &Path) -> MapperResult<(TaskFile, Vec<ConfigWarning>)> {
    load_toml(path)
}

/// Parse TOML from `path`, reporting ignored keys instead of failing
fn load_toml<T: DeserializeOwned>(path: &Path) -> MapperResult<(T, Vec<ConfigWarning>)> {
    let content = fs::read_to_string(path)?;

    let mut unknown_paths: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);

    let value: T = serde_ignored::deserialize(deserializer, |p| {
        unknown_paths.push(p.to_string());
    })
    .map_err(|e| MapperError::InvalidDefinition {
        file: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let warnings = unknown_paths
        .into_iter()
        .map(|path_str| {
            let key = path_str
                .split('.')
                .next_back()
                .unwrap_or(path_str.as_str())
                .to_string();
            ConfigWarning {
                file: path.to_path_buf(),
                line: find_line_number(&content, &key),
                suggestion: suggest_key(&key),
                key,
            }
        })
        .collect();

    Ok((value, warnings))
}

/// Location of the user config file, if a config directory is known
pub fn user_config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join("filemappers").join("config.toml"))
}

/// Read `[defaults]` from the user config
///
/// A missing file yields empty defaults. An unreadable one is reported and
/// skipped rather than failing the run.
pub fn load_user_config() -> (UserConfig, Vec<ConfigWarning>) {
    let Some(path) = user_config_path().filter(|p| p.is_file()) else {
        return (UserConfig::default(), Vec::new());
    };

    debug!(path = %path.display(), "loading user config");
    match load_toml(&path) {
        Ok(loaded) => loaded,
        Err(err) => {
            warn!(path = %path.display(), "ignoring user config: {err}");
            (UserConfig::default(), Vec::new())
        }
    }
}

/// Effective options for a task file
///
/// Layers, lowest first: built-in defaults, user config, the task file's
/// `[defaults]`, then `FILEMAPPERS_*` environment variables.
pub fn resolve_options(user: &UserConfig, task_file: &TaskFile) -> DefaultsConfig {
    with_env_overrides(user.defaults.overlay(&task_file.defaults))
}

/// Apply environment variable overrides (FILEMAPPERS_* prefix)
pub fn with_env_overrides(defaults: DefaultsConfig) -> DefaultsConfig {
    apply_env(defaults, |key| std::env::var(key).ok())
}

pub(crate) fn apply_env<F>(mut defaults: DefaultsConfig, lookup: F) -> DefaultsConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(dir) = lookup(ENV_DIR).filter(|d| !d.is_empty()) {
        defaults.dir = Some(PathBuf::from(dir));
    }
    if let Some(val) = lookup(ENV_FOLLOW_SYMLINKS) {
        defaults.follow_symlinks = Some(parse_flag(&val));
    }
    if let Some(val) = lookup(ENV_FILE_DEP) {
        defaults.file_dep = Some(parse_flag(&val));
    }
    if let Some(val) = lookup(ENV_ALLOW_EMPTY_MAP) {
        defaults.allow_empty_map = Some(parse_flag(&val));
    }
    defaults
}

fn parse_flag(val: &str) -> bool {
    val.to_lowercase() != "false" && val != "0"
}

/// XDG config directory, falling back to the platform default
fn config_dir() -> Option<PathBuf> {
    std::env::var_os("XDG_CONFIG_HOME")
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
        .or_else(dirs::config_dir)
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    content
        .lines()
        .position(|line| line.contains(needle))
        .map(|i| i + 1)
}

pub(super) fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "defaults",
        "task",
        "name",
        "doc",
        "kind",
        "src",
        "dir",
        "in_path",
        "follow_symlinks",
        "file_dep",
        "allow_empty_map",
        "command",
        "search",
        "replace",
        "ignore_nonmatching",
        "pattern",
        "target",
        "mappers",
        "stages",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = usize::from(ac != bc);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}
