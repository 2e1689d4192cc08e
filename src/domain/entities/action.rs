//! Action entities - what a task runner invokes per mapping entry
//!
//! An action is chosen once, at mapper construction:
//! - `Callback` - a function called with every (source, target) pair
//! - `CommandTemplate` - a string expanded into one literal command per pair

use std::fmt;
use std::sync::Arc;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use tracing::warn;

use crate::domain::value_objects::{MappingEntry, PathLocator};

const SOURCE_PLACEHOLDER: &str = "%(source)s";
const TARGET_PLACEHOLDER: &str = "%(target)s";

type CallbackFn = dyn Fn(&PathLocator, &PathLocator) -> bool + Send + Sync;

/// A shared per-entry callback. Returning `false` marks the entry as failed.
#[derive(Clone)]
pub struct Callback(Arc<CallbackFn>);

impl Callback {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&PathLocator, &PathLocator) -> bool + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    pub fn call(&self, source: &PathLocator, target: &PathLocator) -> bool {
        (self.0)(source, target)
    }
}

impl fmt::Debug for Callback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Callback(..)")
    }
}

/// A command string with `%(source)s` / `%(target)s` placeholders
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate(String);

impl CommandTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self(template.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Expand the placeholders for one mapping entry
    ///
    /// Expansion is single-pass: placeholder text inside a substituted path
    /// is never expanded again.
    pub fn expand(&self, entry: &MappingEntry) -> String {
        let source = entry.source.to_string();
        let target = entry.target.to_string();

        let mut out = String::with_capacity(self.0.len() + source.len() + target.len());
        let mut rest = self.0.as_str();
        while let Some(idx) = rest.find("%(") {
            out.push_str(&rest[..idx]);
            let tail = &rest[idx..];
            if let Some(after) = tail.strip_prefix(SOURCE_PLACEHOLDER) {
                out.push_str(&source);
                rest = after;
            } else if let Some(after) = tail.strip_prefix(TARGET_PLACEHOLDER) {
                out.push_str(&target);
                rest = after;
            } else {
                out.push_str("%(");
                rest = &tail[2..];
            }
        }
        out.push_str(rest);
        out
    }
}

/// The action a mapper attaches to the tasks it builds
#[derive(Debug, Clone)]
pub enum ActionSpec {
    Callback(Callback),
    Command(CommandTemplate),
}

/// Result of running a [`RunnableAction`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Entries the callback was invoked for
    pub attempted: usize,
    /// Entries whose callback reported failure
    pub failed: Vec<MappingEntry>,
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// A callback bound to a resolved mapping
///
/// Running it invokes the callback once per entry, in mapping order. A failing
/// entry never stops the iteration.
#[derive(Debug, Clone)]
pub struct RunnableAction {
    mapping: Arc<[MappingEntry]>,
    callback: Callback,
}

impl RunnableAction {
    pub fn new(mapping: impl Into<Arc<[MappingEntry]>>, callback: Callback) -> Self {
        Self {
            mapping: mapping.into(),
            callback,
        }
    }

    pub fn mapping(&self) -> &[MappingEntry] {
        &self.mapping
    }

    pub fn run(&self) -> ActionOutcome {
        let mut outcome = ActionOutcome::default();
        for entry in self.mapping.iter() {
            outcome.attempted += 1;
            if !self.callback.call(&entry.source, &entry.target) {
                warn!(src = %entry.source, dst = %entry.target, "mapping callback failed");
                outcome.failed.push(entry.clone());
            }
        }
        outcome
    }
}

impl Serialize for RunnableAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RunnableAction", 1)?;
        state.serialize_field("entries", &*self.mapping)?;
        state.end()
    }
}
