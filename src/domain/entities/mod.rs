//! Domain Entities
//!
//! Core domain objects handed across the scheduler boundary.

mod action;
mod task;

pub use action::{ActionOutcome, ActionSpec, Callback, CommandTemplate, RunnableAction};
pub use task::{TaskAction, TaskDescriptor};
