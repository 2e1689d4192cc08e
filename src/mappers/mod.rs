//! Mappers
//!
//! A [`Mapper`] turns a source specification into an ordered source→target
//! mapping, then wires that mapping into a runnable action and a task
//! descriptor for an external scheduler.
//!
//! The strategy set is closed ([`MapperKind`]):
//! - Identity: each source maps to itself
//! - Regex: target derived by regex substitution
//! - Glob: single-wildcard sugar over Regex
//! - Merge: every source maps to one target
//! - Composite: union of sub-mappers
//! - Chained: pipeline of sub-mappers
//!
//! Resolution is lazy and memoized per instance. Replacing the source or
//! any option drops the cached mapping.

mod chained;
mod composite;
mod glob;
mod identity;
mod merge;
mod options;
mod regex;
mod source;


use std::path::PathBuf;
use std::sync::Arc;

use tracing::debug;

use crate::domain::entities::{
    ActionSpec, Callback, CommandTemplate, RunnableAction, TaskAction, TaskDescriptor,
};
use crate::domain::ports::FileLister;
use crate::domain::value_objects::{MappingEntry, PathLocator};
use crate::error::{MapperError, MapperResult};
use crate::infrastructure::fs::LocalFileLister;

pub use chained::{StageTasks, Tasks};
pub use glob::GlobRule;
pub use merge::MergeRule;
pub use options::MapperOptions;
pub use regex::RegexRule;
pub use source::SourceSpec;

/// Resolution strategy of a mapper
#[derive(Debug, Clone)]
pub enum MapperKind {
    Identity,
    Regex(RegexRule),
    Glob(GlobRule),
    Merge(MergeRule),
    /// Sub-mappers resolve against their own sources
    Composite(Vec<Mapper>),
    /// Stages are re-sourced from the previous stage on every resolution
    Chained(Vec<Mapper>),
}

impl MapperKind {
    pub fn name(&self) -> &'static str {
        match self {
            MapperKind::Identity => "IdentityMapper",
            MapperKind::Regex(_) => "RegexMapper",
            MapperKind::Glob(_) => "GlobMapper",
            MapperKind::Merge(_) => "MergeMapper",
            MapperKind::Composite(_) => "CompositeMapper",
            MapperKind::Chained(_) => "ChainedMapper",
        }
    }
}

/// A configured mapper with its memoized mapping
#[derive(Debug, Clone)]
pub struct Mapper {
    kind: MapperKind,
    source: SourceSpec,
    options: MapperOptions,
    action: Option<ActionSpec>,
    lister: Arc<dyn FileLister>,
    cache: Option<Vec<MappingEntry>>,
}

impl Mapper {
    fn new(kind: MapperKind, source: SourceSpec) -> Self {
        Self {
            kind,
            source,
            options: MapperOptions::default(),
            action: None,
            lister: Arc::new(LocalFileLister::new()),
            cache: None,
        }
    }

    // === Constructors ===

    /// Map every source onto itself
    ///
    /// Unlike the other mappers, sources are not declared as file
    /// dependencies unless `with_file_dep(true)` is set.
    pub fn identity(source: impl Into<SourceSpec>) -> Self {
        let mut mapper = Self::new(MapperKind::Identity, source.into());
        mapper.options.file_dep = false;
        mapper
    }

    /// Derive targets by substituting `search` with `replace` (`\1` syntax)
    pub fn regex(source: impl Into<SourceSpec>, search: &str, replace: &str) -> MapperResult<Self> {
        let rule = RegexRule::new(search, replace)?;
        Ok(Self::new(MapperKind::Regex(rule), source.into()))
    }

    /// Glob mapper whose search pattern is the source glob itself
    pub fn glob(source: impl Into<SourceSpec>, replace: &str) -> MapperResult<Self> {
        let source = source.into();
        let Some(pattern) = source.as_glob().map(str::to_owned) else {
            return Err(MapperError::configuration(
                "GlobMapper",
                "a search pattern is required when src is a path list",
            ));
        };
        Self::glob_with_pattern(source, &pattern, replace)
    }

    /// Glob mapper with a search pattern distinct from the source
    pub fn glob_with_pattern(
        source: impl Into<SourceSpec>,
        pattern: &str,
        replace: &str,
    ) -> MapperResult<Self> {
        let rule = GlobRule::new(pattern, replace)?;
        Ok(Self::new(MapperKind::Glob(rule), source.into()))
    }

    /// Map every source onto one target
    pub fn merge(source: impl Into<SourceSpec>, target: impl Into<PathLocator>) -> MapperResult<Self> {
        let rule = MergeRule::new(Some(target.into()))?;
        Ok(Self::new(MapperKind::Merge(rule), source.into()))
    }

    pub fn composite(mappers: Vec<Mapper>) -> Self {
        Self::new(MapperKind::Composite(mappers), SourceSpec::Paths(Vec::new()))
    }

    /// Pipeline `stages`, feeding `source` into the first one
    pub fn chained(source: impl Into<SourceSpec>, stages: Vec<Mapper>) -> MapperResult<Self> {
        if stages.is_empty() {
            return Err(MapperError::configuration(
                "ChainedMapper",
                "at least one stage is required",
            ));
        }
        Ok(Self::new(MapperKind::Chained(stages), source.into()))
    }

    // === Builders ===

    pub fn with_options(mut self, options: MapperOptions) -> Self {
        self.options = options;
        self.cache = None;
        self
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.options.base_dir = dir.into();
        self.cache = None;
        self
    }

    pub fn follow_symlinks(mut self, follow: bool) -> Self {
        self.options.follow_symlinks = follow;
        self.cache = None;
        self
    }

    pub fn with_file_dep(mut self, file_dep: bool) -> Self {
        self.options.file_dep = file_dep;
        self
    }

    pub fn allow_empty_map(mut self, allow: bool) -> Self {
        self.options.allow_empty_map = allow;
        self.cache = None;
        self
    }

    /// Keep (`false`) or drop (`true`) sources the search does not match
    ///
    /// Only Regex and Glob mappers have a search; others ignore this.
    pub fn ignore_nonmatching(mut self, ignore: bool) -> Self {
        match &mut self.kind {
            MapperKind::Regex(rule) => rule.set_ignore_nonmatching(ignore),
            MapperKind::Glob(rule) => rule.regex_rule_mut().set_ignore_nonmatching(ignore),
            _ => {}
        }
        self.cache = None;
        self
    }

    pub fn with_callback<F>(self, f: F) -> Self
    where
        F: Fn(&PathLocator, &PathLocator) -> bool + Send + Sync + 'static,
    {
        self.with_action(ActionSpec::Callback(Callback::new(f)))
    }

    /// Use a `%(source)s` / `%(target)s` command template as the action
    pub fn with_command(self, template: impl Into<String>) -> Self {
        self.with_action(ActionSpec::Command(CommandTemplate::new(template)))
    }

    pub fn with_action(mut self, action: ActionSpec) -> Self {
        self.action = Some(action);
        self
    }

    /// Replace the file lister, for this mapper and all sub-mappers
    pub fn with_lister(mut self, lister: Arc<dyn FileLister>) -> Self {
        if let MapperKind::Composite(children) | MapperKind::Chained(children) = &mut self.kind {
            *children = std::mem::take(children)
                .into_iter()
                .map(|child| child.with_lister(Arc::clone(&lister)))
                .collect();
        }
        self.lister = lister;
        self.cache = None;
        self
    }

    // === Accessors ===

    pub fn kind(&self) -> &MapperKind {
        &self.kind
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn source(&self) -> &SourceSpec {
        &self.source
    }

    pub fn options(&self) -> &MapperOptions {
        &self.options
    }

    pub fn action(&self) -> Option<&ActionSpec> {
        self.action.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.cache.is_some()
    }

    /// Replace the source specification and drop the cached mapping
    pub fn set_source(&mut self, source: impl Into<SourceSpec>) {
        self.source = source.into();
        self.cache = None;
    }

    /// Replace a MergeMapper's target
    ///
    /// Fails immediately when `target` is missing, or when called on any
    /// other kind of mapper.
    pub fn set_merge_target(&mut self, target: Option<PathLocator>) -> MapperResult<()> {
        let name = self.kind_name();
        let MapperKind::Merge(rule) = &mut self.kind else {
            return Err(MapperError::configuration(
                name,
                "only MergeMapper has a fixed target",
            ));
        };
        *rule = MergeRule::new(target)?;
        self.cache = None;
        Ok(())
    }

    // === Contract ===

    /// Resolve the mapping, computing it on first access only
    pub fn resolve_mapping(&mut self) -> MapperResult<&[MappingEntry]> {
        if self.cache.is_none() {
            let mapping = self.compute_mapping()?;
            debug!(
                mapper = self.kind_name(),
                entries = mapping.len(),
                "resolved mapping"
            );
            self.cache = Some(mapping);
        }
        Ok(self.cache.as_deref().unwrap_or_default())
    }

    fn compute_mapping(&mut self) -> MapperResult<Vec<MappingEntry>> {
        let Self {
            kind,
            source,
            options,
            lister,
            ..
        } = self;
        let lister: &dyn FileLister = &**lister;

        match kind {
            MapperKind::Identity => Ok(identity::resolve(source.expand(lister, options)?)),
            MapperKind::Regex(rule) => {
                Ok(rule.resolve(&options.base_dir, source.expand(lister, options)?))
            }
            MapperKind::Glob(rule) => {
                Ok(rule.resolve(&options.base_dir, source.expand(lister, options)?))
            }
            MapperKind::Merge(rule) => Ok(rule.resolve(source.expand(lister, options)?)),
            MapperKind::Composite(mappers) => composite::resolve(mappers),
            MapperKind::Chained(stages) => chained::resolve(
                stages,
                source.expand(lister, options)?,
                options.allow_empty_map,
            ),
        }
    }

    /// Wrap `callback` into an action over the resolved mapping
    pub fn build_action(&mut self, callback: Callback) -> MapperResult<RunnableAction> {
        let mapping = self.resolve_mapping()?.to_vec();
        Ok(RunnableAction::new(mapping, callback))
    }

    /// Fill targets, file dependencies and actions into `base`
    ///
    /// Keys of `base` other than those three are left untouched. An empty
    /// mapping fails unless `allow_empty_map` is set, in which case the
    /// task gets no targets and a single no-op action.
    pub fn build_task(&mut self, mut base: TaskDescriptor) -> MapperResult<TaskDescriptor> {
        let name = self.kind_name();
        let file_dep = self.options.file_dep;
        let allow_empty = self.options.allow_empty_map;
        let mapping = self.resolve_mapping()?.to_vec();

        if mapping.is_empty() {
            if !allow_empty {
                return Err(MapperError::EmptyMapping { mapper: name });
            }
            debug!(mapper = name, "empty mapping tolerated, using no-op action");
            base.targets.clear();
            base.actions = vec![TaskAction::Noop];
            if file_dep {
                base.file_dep = Some(Vec::new());
            }
            return Ok(base);
        }

        let Some(action) = self.action.as_ref() else {
            return Err(MapperError::MissingAction { mapper: name });
        };

        base.targets = mapping.iter().map(|e| e.target.to_string()).collect();
        if file_dep {
            base.file_dep = Some(mapping.iter().map(|e| e.source.to_string()).collect());
        }
        base.actions = match action {
            ActionSpec::Callback(callback) => {
                vec![TaskAction::Run(RunnableAction::new(mapping, callback.clone()))]
            }
            ActionSpec::Command(template) => mapping
                .iter()
                .map(|entry| TaskAction::Command(template.expand(entry)))
                .collect(),
        };
        Ok(base)
    }

    /// Task descriptors for this mapper
    ///
    /// A ChainedMapper without its own action yields one descriptor per
    /// stage, each stage using its own action. Everything else yields the
    /// single `build_task` result.
    pub fn tasks(&mut self, base: TaskDescriptor) -> Tasks<'_> {
        let per_stage = self.action.is_none() && matches!(self.kind, MapperKind::Chained(_));
        if !per_stage {
            return Tasks::Single(Some(self.build_task(base)));
        }

        let sources = self.source.expand(&*self.lister, &self.options);
        let MapperKind::Chained(stages) = &mut self.kind else {
            return Tasks::Single(None);
        };
        Tasks::Stages(StageTasks::new(stages, sources, base))
    }
}
