//! GlobMapper - single-wildcard sugar over RegexMapper
//!
//! `src/*.txt` -> `build/*.bak` compiles to the anchored search
//! `^src/(.+)\.txt$` with replacement `build/${1}.bak`.

use std::path::Path;

use crate::domain::value_objects::{MappingEntry, PathLocator};
use crate::error::{MapperError, MapperResult};

use super::regex::RegexRule;

const MAPPER: &str = "GlobMapper";

/// A glob search/replace pair and its compiled regex form
#[derive(Debug, Clone)]
pub struct GlobRule {
    pattern: String,
    replace: String,
    rule: RegexRule,
}

impl GlobRule {
    pub fn new(pattern: &str, replace: &str) -> MapperResult<Self> {
        let asterisks = pattern.matches('*').count();
        if asterisks != 1 {
            return Err(MapperError::configuration(
                MAPPER,
                format!(
                    "search pattern '{pattern}' must contain exactly one asterisk, found {asterisks}"
                ),
            ));
        }

        let (prefix, suffix) = pattern.split_once('*').unwrap_or((pattern, ""));
        let search = format!(
            "^{}(.+){}$",
            regex::escape(prefix),
            regex::escape(suffix)
        );
        let replacement = replace.replace('$', "$$").replace('*', "${1}");

        Ok(Self {
            pattern: pattern.to_string(),
            replace: replace.to_string(),
            rule: RegexRule::from_engine_syntax(&search, replacement)?,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn replace(&self) -> &str {
        &self.replace
    }

    pub(crate) fn regex_rule_mut(&mut self) -> &mut RegexRule {
        &mut self.rule
    }

    /// Map `sources`, matching paths under `base_dir` relative to it
    pub fn resolve(&self, base_dir: &Path, sources: Vec<PathLocator>) -> Vec<MappingEntry> {
        self.rule.resolve(base_dir, sources)
    }
}
