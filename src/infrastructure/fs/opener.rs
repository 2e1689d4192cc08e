//! Scoped file handles for mapping callbacks
//!
//! `FileOpener` opens a source and a target, hands both to a closure and
//! releases them when the closure returns, whether it succeeded or not.
//! `MergeOpener` does the same for many-to-one mappings: the first write to a
//! target truncates it, later writes append.

use std::collections::HashMap;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, warn};

use crate::domain::entities::Callback;
use crate::domain::value_objects::PathLocator;

/// How a handle is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OpenMode {
    #[default]
    Read,
    /// Create or truncate
    Write,
    /// Create or append
    Append,
}

impl OpenMode {
    pub fn open(self, path: &Path) -> io::Result<File> {
        let mut options = OpenOptions::new();
        match self {
            OpenMode::Read => {
                options.read(true);
            }
            OpenMode::Write => {
                create_parent(path)?;
                options.write(true).create(true).truncate(true);
            }
            OpenMode::Append => {
                create_parent(path)?;
                options.append(true).create(true);
            }
        }
        options.open(path)
    }
}

fn create_parent(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => fs::create_dir_all(parent),
        _ => Ok(()),
    }
}

/// Opens source and target with fixed modes around a closure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileOpener {
    input: OpenMode,
    output: OpenMode,
}

impl Default for FileOpener {
    fn default() -> Self {
        Self::new(OpenMode::Read, OpenMode::Write)
    }
}

impl FileOpener {
    pub fn new(input: OpenMode, output: OpenMode) -> Self {
        Self { input, output }
    }

    pub fn with_files<T, F>(&self, source: &Path, target: &Path, f: F) -> io::Result<T>
    where
        F: FnOnce(&mut File, &mut File) -> io::Result<T>,
    {
        let mut input = self.input.open(source)?;
        let mut output = self.output.open(target)?;
        f(&mut input, &mut output)
    }

    /// Adapt into a mapper callback. I/O errors are logged and reported as a
    /// failed entry.
    pub fn into_callback<F>(self, f: F) -> Callback
    where
        F: Fn(&mut File, &mut File) -> io::Result<()> + Send + Sync + 'static,
    {
        Callback::new(move |source, target| {
            report(source, target, self.with_files(source.as_path(), target.as_path(), &f))
        })
    }
}

/// Opens targets for writing the first time they are seen, appending after
///
/// Open counts are keyed by the target's string form and live as long as this
/// instance.
#[derive(Debug, Default)]
pub struct MergeOpener {
    input: OpenMode,
    opened: Mutex<HashMap<String, usize>>,
}

impl MergeOpener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_input_mode(mut self, input: OpenMode) -> Self {
        self.input = input;
        self
    }

    pub fn with_files<T, F>(&self, source: &Path, target: &Path, f: F) -> io::Result<T>
    where
        F: FnOnce(&mut File, &mut File) -> io::Result<T>,
    {
        let output_mode = self.next_output_mode(target);
        debug!(path = %target.display(), mode = ?output_mode, "opening merge target");
        FileOpener::new(self.input, output_mode).with_files(source, target, f)
    }

    /// Number of times `target` has been opened through this instance
    pub fn open_count(&self, target: &Path) -> usize {
        let opened = self.opened.lock().unwrap_or_else(PoisonError::into_inner);
        opened.get(&key(target)).copied().unwrap_or(0)
    }

    pub fn into_callback<F>(self, f: F) -> Callback
    where
        F: Fn(&mut File, &mut File) -> io::Result<()> + Send + Sync + 'static,
    {
        let opener = Arc::new(self);
        Callback::new(move |source, target| {
            report(source, target, opener.with_files(source.as_path(), target.as_path(), &f))
        })
    }

    fn next_output_mode(&self, target: &Path) -> OpenMode {
        let mut opened = self.opened.lock().unwrap_or_else(PoisonError::into_inner);
        let count = opened.entry(key(target)).or_insert(0);
        *count += 1;
        if *count == 1 {
            OpenMode::Write
        } else {
            OpenMode::Append
        }
    }
}

fn key(target: &Path) -> String {
    PathLocator::new(target).to_string()
}

fn report(source: &PathLocator, target: &PathLocator, result: io::Result<()>) -> bool {
    match result {
        Ok(()) => true,
        Err(err) => {
            warn!(src = %source, dst = %target, error = %err, "file callback failed");
            false
        }
    }
}
