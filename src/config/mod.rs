//! Configuration module for filemappers
//!
//! Option precedence, highest first:
//! 1. Per-mapper keys in a task definition
//! 2. Environment variables (FILEMAPPERS_*)
//! 3. Task file `[defaults]`
//! 4. User config (`<config_dir>/filemappers/config.toml`)
//! 5. Built-in defaults

mod builder;
mod loader;
mod types;

pub use crate::domain::value_objects::ConfigWarning;

pub use loader::{
    load_task_file, load_user_config, resolve_options, user_config_path, with_env_overrides,
    ENV_ALLOW_EMPTY_MAP, ENV_DIR, ENV_FILE_DEP, ENV_FOLLOW_SYMLINKS,
};
pub use types::{DefaultsConfig, MapperDef, MapperType, TaskFile, UserConfig};
