use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use crate::backend::StorageBackend;
use crate::store::{NamespaceStore, SharedBackend};

/// Owns the selected backend and memoizes one [`NamespaceStore`] per
/// namespace string. An explicit object rather than a process-wide global;
/// embedders hold one context per page or process.
pub struct StoreContext {
    backend: SharedBackend,
    stores: Mutex<HashMap<String, Arc<NamespaceStore>>>,
}

impl StoreContext {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self {
            backend: Arc::new(Mutex::new(backend)),
            stores: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the store for `namespace`, creating it on first request. Two
    /// calls with the same namespace return the identical instance; entries
    /// live as long as the context.
    pub fn resolve(&self, namespace: &str) -> Arc<NamespaceStore> {
        let mut stores = self.stores.lock().unwrap_or_else(PoisonError::into_inner);
        stores
            .entry(namespace.to_string())
            .or_insert_with(|| {
                Arc::new(NamespaceStore::new(namespace, Arc::clone(&self.backend)))
            })
            .clone()
    }
}

impl std::fmt::Debug for StoreContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreContext").finish_non_exhaustive()
    }
}
