//! Mapping entry - one (source, target) pair

use std::fmt;

use serde::{Deserialize, Serialize};

use super::PathLocator;

/// The atomic unit every mapper produces
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MappingEntry {
    pub source: PathLocator,
    pub target: PathLocator,
}

impl MappingEntry {
    pub fn new(source: impl Into<PathLocator>, target: impl Into<PathLocator>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    /// Entry mapping a path onto itself
    pub fn identity(path: PathLocator) -> Self {
        Self {
            target: path.clone(),
            source: path,
        }
    }
}

impl fmt::Display for MappingEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.source, self.target)
    }
}

/// Distinct targets of a mapping, in first-seen order
pub fn distinct_targets(mapping: &[MappingEntry]) -> Vec<PathLocator> {
    let mut seen = std::collections::HashSet::new();
    mapping
        .iter()
        .filter(|entry| seen.insert(&entry.target))
        .map(|entry| entry.target.clone())
        .collect()
}
