//! Configuration warning value object

use std::fmt;
use std::path::PathBuf;

/// Non-fatal problem found while reading a task or user config file
///
/// Unknown keys are reported this way instead of failing the load.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    /// The unrecognized key (last path segment)
    pub key: String,
    /// File the key was found in
    pub file: PathBuf,
    /// 1-indexed line of the first occurrence, when it can be located
    pub line: Option<usize>,
    /// Closest known key, if one is near enough
    pub suggestion: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())?;
        if let Some(line) = self.line {
            write!(f, ":{line}")?;
        }
        if let Some(suggestion) = &self.suggestion {
            write!(f, " (did you mean '{suggestion}'?)")?;
        }
        Ok(())
    }
}
