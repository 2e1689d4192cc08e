//! Domain Layer
//!
//! Pure types shared by every mapper, without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Actions and task descriptors handed to the scheduler
//! - `value_objects/` - Immutable value types (PathLocator, MappingEntry)
//! - `ports/` - Interface definitions for infrastructure (FileLister)
//!
//! ## Design Principles
//!
//! 1. **No I/O** - This layer never touches the file system directly
//! 2. **Ports & Adapters** - Glob expansion goes through a trait-defined port

pub mod entities;
pub mod ports;
pub mod value_objects;
