//! Turn task definitions into configured mappers

use serde_json::Value;

use crate::domain::entities::TaskDescriptor;
use crate::error::{MapperError, MapperResult};
use crate::mappers::{Mapper, MapperOptions, SourceSpec};

use super::types::{DefaultsConfig, MapperDef, MapperType};

impl MapperType {
    fn mapper_name(self) -> &'static str {
        match self {
            MapperType::Identity => "IdentityMapper",
            MapperType::Regex => "RegexMapper",
            MapperType::Glob => "GlobMapper",
            MapperType::Merge => "MergeMapper",
            MapperType::Composite => "CompositeMapper",
            MapperType::Chained => "ChainedMapper",
        }
    }
}

impl MapperDef {
    /// Build the mapper, layering this entry's keys over `defaults`
    ///
    /// Nested `mappers` and `stages` inherit the result.
    pub fn build(&self, defaults: &DefaultsConfig) -> MapperResult<Mapper> {
        let layered = defaults.overlay(&self.own_defaults());
        let defaults = &layered;
        let source = self.src.clone().unwrap_or(SourceSpec::Paths(Vec::new()));

        let mapper = match self.kind {
            MapperType::Identity => Mapper::identity(source),
            MapperType::Regex => Mapper::regex(
                source,
                self.required(self.search.as_deref(), "search")?,
                self.required(self.replace.as_deref(), "replace")?,
            )?,
            MapperType::Glob => {
                let replace = self.required(self.replace.as_deref(), "replace")?;
                match self.pattern.as_deref() {
                    Some(pattern) => Mapper::glob_with_pattern(source, pattern, replace)?,
                    None => Mapper::glob(source, replace)?,
                }
            }
            MapperType::Merge => Mapper::merge(source, self.target.as_deref().unwrap_or_default())?,
            MapperType::Composite => Mapper::composite(Self::build_all(&self.mappers, defaults)?),
            MapperType::Chained => Mapper::chained(source, Self::build_all(&self.stages, defaults)?)?,
        };

        let mut mapper = mapper.with_options(self.options(defaults));
        if let Some(ignore) = self.ignore_nonmatching {
            mapper = mapper.ignore_nonmatching(ignore);
        }
        if let Some(command) = &self.command {
            mapper = mapper.with_command(command.clone());
        }
        Ok(mapper)
    }

    /// Base descriptor carrying `name` and `doc`
    pub fn base_task(&self) -> TaskDescriptor {
        let mut task = TaskDescriptor::new();
        task.name = self.name.clone();
        if let Some(doc) = &self.doc {
            task = task.with_extra("doc", Value::String(doc.clone()));
        }
        task
    }

    /// Identity keeps `file_dep` off unless some layer turns it on
    fn options(&self, defaults: &DefaultsConfig) -> MapperOptions {
        let mut options = MapperOptions::default();
        if self.kind == MapperType::Identity {
            options.file_dep = false;
        }
        defaults.apply(&mut options);
        options
    }

    fn own_defaults(&self) -> DefaultsConfig {
        DefaultsConfig {
            dir: self.dir.clone(),
            follow_symlinks: self.follow_symlinks,
            file_dep: self.file_dep,
            allow_empty_map: self.allow_empty_map,
        }
    }

    fn required<'a>(&self, value: Option<&'a str>, key: &str) -> MapperResult<&'a str> {
        value.ok_or_else(|| {
            MapperError::configuration(self.kind.mapper_name(), format!("missing '{key}'"))
        })
    }

    fn build_all(defs: &[MapperDef], defaults: &DefaultsConfig) -> MapperResult<Vec<Mapper>> {
        defs.iter().map(|def| def.build(defaults)).collect()
    }
}
