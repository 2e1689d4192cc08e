//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod config_warning;
mod mapping_entry;
mod path;

pub use config_warning::ConfigWarning;
pub use mapping_entry::{distinct_targets, MappingEntry};
pub use path::PathLocator;
