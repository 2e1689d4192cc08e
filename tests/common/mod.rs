//! Common test utilities for filemappers contract and scenario tests.
//!
//! This module provides:
//! - `TestEnv`: isolated temp project plus config home, with CLI helpers
//! - Fixtures: reusable task file snippets
//! - Recording callbacks for asserting what an action was asked to do

#![allow(dead_code)]


pub use env::*;
pub use fixtures::*;

use std::sync::{Arc, Mutex};

use filemappers::Callback;

/// Callback that records every `(source, target)` it sees and returns
/// `result(source)`.
pub fn recording_callback<F>(result: F) -> (Callback, Arc<Mutex<Vec<(String, String)>>>)
where
    F: Fn(&str) -> bool + Send + Sync + 'static,
{
    let calls = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&calls);
    let callback = Callback::new(move |source, target| {
        let source = source.to_string();
        let ok = result(&source);
        sink.lock().unwrap().push((source, target.to_string()));
        ok
    });
    (callback, calls)
}

/// Collect string items into a sorted, owned set
pub fn string_set<'a>(items: impl IntoIterator<Item = &'a str>) -> std::collections::BTreeSet<String> {
    items.into_iter().map(str::to_string).collect()
}
