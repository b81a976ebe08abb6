use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::backend::StorageBackend;
use crate::Result;

/// The process-wide backend, shared by every namespace. The mutex makes each
/// read-modify-write of a namespace blob a critical section; on a
/// single-threaded browser main thread it is uncontended.
pub type SharedBackend = Arc<Mutex<Box<dyn StorageBackend>>>;

/// One logical storage bucket. All durable data lives in the backend under a
/// single entry keyed by the namespace string, as a JSON object mapping
/// sub-keys to values.
///
/// Usually obtained via [`StoreContext::resolve`](crate::StoreContext::resolve),
/// which memoizes one instance per namespace.
pub struct NamespaceStore {
    namespace: String,
    backend: SharedBackend,
}

impl NamespaceStore {
    pub fn new(namespace: impl Into<String>, backend: SharedBackend) -> Self {
        Self {
            namespace: namespace.into(),
            backend,
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    fn lock(&self) -> MutexGuard<'_, Box<dyn StorageBackend>> {
        // Read paths must not fail, so a poisoned lock is recovered rather
        // than propagated.
        self.backend.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads the namespace blob through an already-held lock. Missing,
    /// unparseable, and non-object blobs all normalize to an empty map.
    fn load(&self, backend: &dyn StorageBackend) -> Map<String, Value> {
        let Some(raw) = backend.get(&self.namespace) else {
            return Map::new();
        };

        match serde_json::from_str::<Value>(&raw) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                debug!(
                    namespace = %self.namespace,
                    found = value_kind(&other),
                    "stored blob is not a JSON object; treating namespace as empty"
                );
                Map::new()
            }
            Err(err) => {
                debug!(
                    namespace = %self.namespace,
                    %err,
                    "stored blob failed to parse; treating namespace as empty"
                );
                Map::new()
            }
        }
    }

    /// Returns the full sub-key mapping for this namespace. Never errors:
    /// malformed persisted state reads as an empty mapping.
    pub fn get_all(&self) -> Map<String, Value> {
        let backend = self.lock();
        self.load(&**backend)
    }

    /// Returns the value stored under `sub_key`, or `None` when absent. A
    /// stored JSON `null` comes back as `Some(Value::Null)`, distinct from
    /// an absent key.
    pub fn get(&self, sub_key: &str) -> Option<Value> {
        self.get_all().remove(sub_key)
    }

    /// Stores `value` under `sub_key`, leaving the namespace's other entries
    /// intact. The whole blob is re-read, updated, and written back as one
    /// backend write under the lock. Last write wins.
    pub fn set<T: Serialize>(&self, sub_key: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value)?;

        let mut backend = self.lock();
        let mut entries = self.load(&**backend);
        entries.insert(sub_key.to_string(), value);
        let blob = serde_json::to_string(&entries)?;
        backend.set(&self.namespace, &blob)
    }

    /// Removes `sub_key` from the namespace, keeping the other entries. A
    /// no-op write when the key was already absent.
    pub fn clear(&self, sub_key: &str) -> Result<()> {
        let mut backend = self.lock();
        let mut entries = self.load(&**backend);
        entries.remove(sub_key);
        let blob = serde_json::to_string(&entries)?;
        backend.set(&self.namespace, &blob)
    }

    /// Drops the namespace's entire backend entry in one operation.
    pub fn clear_all(&self) -> Result<()> {
        let mut backend = self.lock();
        backend.remove(&self.namespace)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
