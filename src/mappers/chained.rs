//! ChainedMapper - serial pipeline of sub-mappers
//!
//! Stage *i*'s distinct targets become stage *i+1*'s sources. With a terminal
//! action the chain resolves to one combined mapping from original sources to
//! final targets; without one it yields a task descriptor per stage.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use crate::domain::entities::TaskDescriptor;
use crate::domain::value_objects::{distinct_targets, MappingEntry, PathLocator};
use crate::error::{MapperError, MapperResult};

use super::{Mapper, SourceSpec};

/// Run the pipeline and pair each original source with its final targets
pub fn resolve(
    stages: &mut [Mapper],
    sources: Vec<PathLocator>,
    allow_empty: bool,
) -> MapperResult<Vec<MappingEntry>> {
    let mut lineage: Vec<MappingEntry> = sources
        .iter()
        .cloned()
        .map(MappingEntry::identity)
        .collect();
    let mut current = SourceSpec::Paths(sources);

    for stage in stages.iter_mut() {
        let tolerate = allow_empty || stage.options().allow_empty_map;
        let name = stage.kind_name();

        stage.set_source(current);
        let mapping = stage.resolve_mapping()?;
        if mapping.is_empty() && !tolerate {
            return Err(MapperError::EmptyMapping { mapper: name });
        }

        let mut forward: HashMap<&PathLocator, Vec<&PathLocator>> = HashMap::new();
        for entry in mapping {
            forward.entry(&entry.source).or_default().push(&entry.target);
        }
        lineage = lineage
            .iter()
            .flat_map(|entry| {
                forward
                    .get(&entry.target)
                    .into_iter()
                    .flatten()
                    .map(move |target| MappingEntry::new(entry.source.clone(), (*target).clone()))
            })
            .collect();

        current = SourceSpec::Paths(distinct_targets(mapping));
    }

    let mut seen = HashSet::new();
    lineage.retain(|entry| seen.insert(entry.clone()));
    Ok(lineage)
}

/// Lazy per-stage task descriptors
///
/// Each stage is resolved only when its descriptor is requested, so the
/// next stage always sees the previous stage's targets. Iteration stops after
/// the first error.
#[derive(Debug)]
pub struct StageTasks<'a> {
    stages: std::slice::IterMut<'a, Mapper>,
    source: SourceSpec,
    failure: Option<MapperError>,
    base: TaskDescriptor,
    counters: HashMap<&'static str, usize>,
    finished: bool,
}

impl<'a> StageTasks<'a> {
    pub(super) fn new(
        stages: &'a mut [Mapper],
        sources: MapperResult<Vec<PathLocator>>,
        base: TaskDescriptor,
    ) -> Self {
        let (source, failure) = match sources {
            Ok(paths) => (SourceSpec::Paths(paths), None),
            Err(err) => (SourceSpec::Paths(Vec::new()), Some(err)),
        };
        Self {
            stages: stages.iter_mut(),
            source,
            failure,
            base,
            counters: HashMap::new(),
            finished: false,
        }
    }

    fn build_stage(&mut self, stage: &mut Mapper) -> MapperResult<TaskDescriptor> {
        let count = self.counters.entry(stage.kind_name()).or_insert(0);
        *count += 1;

        let mut base = self.base.clone();
        base.name = Some(format!("{}{}", stage.kind_name(), count));
        debug!(stage = base.name.as_deref(), "building stage task");

        let source = std::mem::replace(&mut self.source, SourceSpec::Paths(Vec::new()));
        stage.set_source(source);
        let task = stage.build_task(base)?;
        self.source = SourceSpec::Paths(distinct_targets(stage.resolve_mapping()?));
        Ok(task)
    }
}

impl Iterator for StageTasks<'_> {
    type Item = MapperResult<TaskDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        if let Some(err) = self.failure.take() {
            self.finished = true;
            return Some(Err(err));
        }

        let stage = self.stages.next()?;
        let result = self.build_stage(stage);
        if result.is_err() {
            self.finished = true;
        }
        Some(result)
    }
}

/// Task descriptors produced by [`Mapper::tasks`]
#[derive(Debug)]
pub enum Tasks<'a> {
    /// Exactly one descriptor from `build_task`
    Single(Option<MapperResult<TaskDescriptor>>),
    /// One descriptor per chained stage
    Stages(StageTasks<'a>),
}

impl Iterator for Tasks<'_> {
    type Item = MapperResult<TaskDescriptor>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Tasks::Single(slot) => slot.take(),
            Tasks::Stages(stages) => stages.next(),
        }
    }
}
