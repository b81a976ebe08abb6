use std::collections::HashMap;

use crate::Result;

pub mod cookie;

/// Single-string-value store keyed by flat strings, mirroring the
/// `localStorage` surface (`getItem`/`setItem`/`removeItem`).
///
/// The native web store and the cookie fallback both implement this, so the
/// namespace layer never knows which one it is writing through.
pub trait StorageBackend {
    /// Returns the stored string for `key`, or `None` when there is no entry.
    fn get(&self, key: &str) -> Option<String>;

    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Purely in-process backend. The default stand-in on non-browser hosts and
/// the double used by the test suites.
#[derive(Debug, Default)]
pub struct MemBackend {
    entries: HashMap<String, String>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl StorageBackend for MemBackend {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}
