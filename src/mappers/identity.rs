//! IdentityMapper - each source maps to itself

use crate::domain::value_objects::{MappingEntry, PathLocator};

pub fn resolve(sources: Vec<PathLocator>) -> Vec<MappingEntry> {
    sources.into_iter().map(MappingEntry::identity).collect()
}
