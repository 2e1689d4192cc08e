//! RegexMapper - derive targets by regex substitution on the source path
//!
//! Replacement templates use backreference syntax (`\1`, `\g<name>`), which
//! is translated once into the regex engine's `${1}` form.
//!
//! Sources under the mapper's base directory are matched on their path
//! relative to it, and the base directory is put back in front of the target.

use std::path::Path;

use regex::Regex;
use tracing::trace;

use crate::domain::value_objects::{MappingEntry, PathLocator};
use crate::error::{MapperError, MapperResult};

/// Compiled search pattern plus replacement template
#[derive(Debug, Clone)]
pub struct RegexRule {
    search: Regex,
    replace: String,
    ignore_nonmatching: bool,
}

impl RegexRule {
    /// Build from a search pattern and a backreference-style template
    pub fn new(search: &str, replace: &str) -> MapperResult<Self> {
        Self::from_engine_syntax(search, translate_replacement(replace))
    }

    /// Build from a replacement already in `${n}` syntax
    pub(crate) fn from_engine_syntax(search: &str, replace: String) -> MapperResult<Self> {
        let search = Regex::new(search).map_err(|source| MapperError::InvalidRegex {
            pattern: search.to_string(),
            source,
        })?;
        Ok(Self {
            search,
            replace,
            ignore_nonmatching: true,
        })
    }

    pub fn search(&self) -> &str {
        self.search.as_str()
    }

    pub fn ignore_nonmatching(&self) -> bool {
        self.ignore_nonmatching
    }

    pub(crate) fn set_ignore_nonmatching(&mut self, ignore: bool) {
        self.ignore_nonmatching = ignore;
    }

    /// Substitute every match in the source path
    ///
    /// A source with no match comes back unchanged.
    pub fn substitute(&self, source: &PathLocator) -> PathLocator {
        let text = source.to_string();
        let target = self.search.replace_all(&text, self.replace.as_str());
        PathLocator::new(&*target)
    }

    pub fn resolve(&self, base_dir: &Path, sources: Vec<PathLocator>) -> Vec<MappingEntry> {
        let base = PathLocator::new(base_dir);
        sources
            .into_iter()
            .filter_map(|source| {
                let (root, relative) = split_base(&base, &source);
                if self.ignore_nonmatching && !self.search.is_match(&relative.to_string()) {
                    trace!(src = %source, pattern = self.search.as_str(), "dropping non-matching source");
                    return None;
                }
                let target = self.substitute(&relative);
                let target = match root {
                    Some(root) => PathLocator::new(root.as_path().join(target.as_path())),
                    None => target,
                };
                Some(MappingEntry::new(source, target))
            })
            .collect()
    }
}

/// The base directory and the path below it, or the whole path when `source`
/// is not under `base`
fn split_base<'a>(
    base: &'a PathLocator,
    source: &PathLocator,
) -> (Option<&'a PathLocator>, PathLocator) {
    if base.is_current_dir() {
        return (None, source.clone());
    }
    match source.as_path().strip_prefix(base.as_path()) {
        Ok(relative) if !relative.as_os_str().is_empty() => {
            (Some(base), PathLocator::new(relative))
        }
        _ => (None, source.clone()),
    }
}

/// Translate `\1`, `\g<1>`, `\g<name>` and `\\` into engine syntax, escaping `$`
///
/// `\0` is not a group reference and stays a literal `\0`; the whole match
/// is spelled `\g<0>`.
pub(crate) fn translate_replacement(template: &str) -> String {
    let mut out = String::with_capacity(template.len() + 8);
    let mut rest = template;

    while let Some(c) = rest.chars().next() {
        match c {
            '$' => {
                out.push_str("$$");
                rest = &rest[1..];
            }
            '\\' => rest = translate_escape(&rest[1..], &mut out),
            _ => {
                out.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    out
}

/// Handle the text following a backslash, returning what is left
fn translate_escape<'a>(rest: &'a str, out: &mut String) -> &'a str {
    let digits = rest
        .bytes()
        .take(2)
        .take_while(u8::is_ascii_digit)
        .count();
    if digits > 0 && !rest.starts_with('0') {
        out.push_str("${");
        out.push_str(&rest[..digits]);
        out.push('}');
        return &rest[digits..];
    }

    if let Some(group) = rest.strip_prefix("g<") {
        if let Some(end) = group.find('>') {
            out.push_str("${");
            out.push_str(&group[..end]);
            out.push('}');
            return &group[end + 1..];
        }
    }

    if let Some(after) = rest.strip_prefix('\\') {
        out.push('\\');
        return after;
    }

    out.push('\\');
    rest
}
