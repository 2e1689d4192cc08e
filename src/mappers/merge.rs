//! MergeMapper - every source maps to one fixed target

use crate::domain::value_objects::{MappingEntry, PathLocator};
use crate::error::{MapperError, MapperResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeRule {
    target: PathLocator,
}

impl MergeRule {
    /// Fails eagerly when no target is given; an empty path counts as none
    pub fn new(target: Option<PathLocator>) -> MapperResult<Self> {
        match target {
            Some(target) if !target.is_current_dir() => Ok(Self { target }),
            _ => Err(MapperError::configuration(
                "MergeMapper",
                "Target must be set",
            )),
        }
    }

    pub fn target(&self) -> &PathLocator {
        &self.target
    }

    pub fn resolve(&self, sources: Vec<PathLocator>) -> Vec<MappingEntry> {
        sources
            .into_iter()
            .map(|source| MappingEntry::new(source, self.target.clone()))
            .collect()
    }
}
