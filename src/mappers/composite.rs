//! CompositeMapper - union of independently configured sub-mappers

use crate::domain::value_objects::MappingEntry;
use crate::error::MapperResult;

use super::Mapper;

/// Concatenate each sub-mapper's own mapping, in order
pub fn resolve(mappers: &mut [Mapper]) -> MapperResult<Vec<MappingEntry>> {
    let mut mapping = Vec::new();
    for mapper in mappers.iter_mut() {
        mapping.extend_from_slice(mapper.resolve_mapping()?);
    }
    Ok(mapping)
}
