use nskv::{
    select_backend, CookieBackend, CookieJar, ProbeResult, Result, StorageBackend, StorageError,
    StoreContext, SystemClock,
};
use tracing::debug;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlDocument, Storage};

fn js_write_err(op: &str, err: JsValue) -> StorageError {
    StorageError::Write(format!("{op}: {err:?}"))
}

/// The browser's origin-scoped persistent store, as a [`StorageBackend`].
pub struct LocalStorageBackend {
    storage: Storage,
}

impl LocalStorageBackend {
    pub fn new(storage: Storage) -> Self {
        Self { storage }
    }
}

impl StorageBackend for LocalStorageBackend {
    fn get(&self, key: &str) -> Option<String> {
        // getItem only throws in degenerate embeddings; the read path is
        // fail-soft either way.
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        // Quota errors surface here and propagate to the caller.
        self.storage
            .set_item(key, value)
            .map_err(|err| js_write_err("localStorage.setItem", err))
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.storage
            .remove_item(key)
            .map_err(|err| js_write_err("localStorage.removeItem", err))
    }
}

/// `document.cookie` as a [`CookieJar`].
pub struct DomCookieJar {
    document: HtmlDocument,
}

impl DomCookieJar {
    pub fn new(document: HtmlDocument) -> Self {
        Self { document }
    }

    /// Returns `None` outside a window/document context (e.g. in a worker).
    pub fn from_window() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::new(document.dyn_into::<HtmlDocument>().ok()?))
    }
}

impl CookieJar for DomCookieJar {
    fn read(&self) -> String {
        self.document.cookie().unwrap_or_default()
    }

    fn write(&mut self, cookie: &str) {
        if let Err(err) = self.document.set_cookie(cookie) {
            debug!(?err, "document.cookie write failed");
        }
    }
}

/// Guarded capability probe for `window.localStorage`.
///
/// On some legacy platforms the mere property access throws (e.g. Firefox
/// with cookies disabled); `web-sys` surfaces that as the `Err` arm here, so
/// no exception escapes the probe. `Ok(None)` means the store is simply not
/// present. Either way [`select_backend`] falls back to cookies.
pub fn probe_local_storage() -> ProbeResult {
    let Some(window) = web_sys::window() else {
        return Ok(None);
    };

    match window.local_storage() {
        Ok(Some(storage)) => Ok(Some(Box::new(LocalStorageBackend::new(storage)))),
        Ok(None) => Ok(None),
        Err(err) => Err(StorageError::Probe(format!("{err:?}"))),
    }
}

/// Probes the platform once, selects the backend, and returns the context
/// that hands out namespace stores. Returns `None` when there is no
/// window/document to bind to.
///
/// Call this once per page and keep the context; per-namespace memoization
/// lives inside it.
pub fn client_storage() -> Option<StoreContext> {
    let jar = DomCookieJar::from_window()?;
    let backend = select_backend(probe_local_storage, move || {
        Box::new(CookieBackend::new(jar, SystemClock))
    });
    Some(StoreContext::new(backend))
}
