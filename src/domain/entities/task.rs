//! TaskDescriptor entity - the unit handed to an external task scheduler
//!
//! Mappers fill in `targets`, `file_dep` and `actions`. Every other key a
//! caller puts on the base descriptor is carried through untouched.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;

use super::action::{ActionOutcome, RunnableAction};

/// One runnable unit inside a task descriptor
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskAction {
    /// Callback bound to a resolved mapping
    Run(RunnableAction),
    /// Literal command for the scheduler to execute
    Command(String),
    /// Placeholder for a tolerated empty mapping; always succeeds
    Noop,
}

impl TaskAction {
    /// Run in-process actions. Literal commands belong to the scheduler and
    /// return `None`.
    pub fn run(&self) -> Option<ActionOutcome> {
        match self {
            TaskAction::Run(action) => Some(action.run()),
            TaskAction::Noop => Some(ActionOutcome::default()),
            TaskAction::Command(_) => None,
        }
    }

    pub fn as_command(&self) -> Option<&str> {
        match self {
            TaskAction::Command(command) => Some(command),
            _ => None,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, TaskAction::Noop)
    }
}

/// The {targets, file_dep, actions} triple plus caller-supplied keys
#[derive(Debug, Clone, Default, Serialize)]
pub struct TaskDescriptor {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub targets: BTreeSet<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_dep: Option<Vec<String>>,
    pub actions: Vec<TaskAction>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl TaskDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Attach a caller-owned key that mappers never modify
    pub fn with_extra(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// Literal commands in action order
    pub fn commands(&self) -> Vec<&str> {
        self.actions.iter().filter_map(TaskAction::as_command).collect()
    }
}
