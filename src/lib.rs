//! filemappers - source→target file mappings for build task runners
//!
//! A mapper takes a source specification (glob or explicit paths), resolves
//! it into an ordered list of (source, target) pairs, and turns that list
//! into a task descriptor with targets, file dependencies and runnable
//! actions. Scheduling and up-to-date checks are left to the task runner.
//!
//! ```no_run
//! use filemappers::{Mapper, TaskDescriptor};
//!
//! let mut backup = Mapper::glob("*.txt", "*.bak")?
//!     .with_command("cp %(source)s %(target)s");
//! let task = backup.build_task(TaskDescriptor::named("backup"))?;
//! for command in task.commands() {
//!     println!("{command}");
//! }
//! # Ok::<(), filemappers::MapperError>(())
//! ```

pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod logging;
pub mod mappers;

// Re-exports for convenience
pub use domain::entities::{
    ActionOutcome, ActionSpec, Callback, CommandTemplate, RunnableAction, TaskAction,
    TaskDescriptor,
};
pub use domain::ports::{FileLister, FsError, FsResult};
pub use domain::value_objects::{MappingEntry, PathLocator};
pub use error::{MapperError, MapperResult};
pub use infrastructure::{FileOpener, LocalFileLister, MergeOpener, OpenMode};
pub use mappers::{Mapper, MapperKind, MapperOptions, SourceSpec, StageTasks, Tasks};
