//! Domain Ports
//!
//! Interfaces the domain depends on and infrastructure implements.

pub mod file_lister;

pub use file_lister::{FileLister, FsError, FsResult};
