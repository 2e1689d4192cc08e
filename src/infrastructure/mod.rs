//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - Local file listing and scoped file handles

pub mod fs;

// Re-export for convenience
pub use fs::{FileOpener, LocalFileLister, MergeOpener, OpenMode};
