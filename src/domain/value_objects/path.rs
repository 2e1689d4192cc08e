//! Path Locator Value Object
//!
//! An opaque, comparable handle to a filesystem location:
//! - Absolute or relative
//! - Normalized at construction (no `.` components, no redundant separators)
//! - Two locators are equal iff their normalized forms are equal

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A normalized path handle used as mapping source or target
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PathLocator(PathBuf);

impl PathLocator {
    /// Create a locator, normalizing the path
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self(normalize(path.as_ref()))
    }

    /// Get the inner path
    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Convert to PathBuf
    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    /// Get the file name
    pub fn file_name(&self) -> Option<&std::ffi::OsStr> {
        self.0.file_name()
    }

    /// Check whether the locator is the current directory placeholder
    pub fn is_current_dir(&self) -> bool {
        self.0 == Path::new(".")
    }
}

fn normalize(path: &Path) -> PathBuf {
    let normalized: PathBuf = path
        .components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect();

    if normalized.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        normalized
    }
}

impl fmt::Display for PathLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.display())
    }
}

impl AsRef<Path> for PathLocator {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl From<PathBuf> for PathLocator {
    fn from(value: PathBuf) -> Self {
        Self::new(value)
    }
}

impl From<&Path> for PathLocator {
    fn from(value: &Path) -> Self {
        Self::new(value)
    }
}

impl From<&str> for PathLocator {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for PathLocator {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl Serialize for PathLocator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for PathLocator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::new)
    }
}
