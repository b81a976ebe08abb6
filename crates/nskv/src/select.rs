use tracing::debug;

use crate::backend::StorageBackend;
use crate::Result;

/// Outcome of probing the platform for a usable native store.
///
/// `Ok(Some(_))` is a working native backend. `Ok(None)` means the store is
/// simply not present; `Err(_)` means the probe itself blew up (some legacy
/// platforms throw on the mere feature check). Both of the latter select the
/// fallback.
pub type ProbeResult = Result<Option<Box<dyn StorageBackend>>>;

/// Runs the capability probe once and returns the backend every namespace
/// will share: the native store when the probe produced one, otherwise the
/// fallback. Probe failures are logged and consumed here, never surfaced.
pub fn select_backend(
    probe: impl FnOnce() -> ProbeResult,
    fallback: impl FnOnce() -> Box<dyn StorageBackend>,
) -> Box<dyn StorageBackend> {
    match probe() {
        Ok(Some(native)) => native,
        Ok(None) => {
            debug!("native key-value store not present; using fallback backend");
            fallback()
        }
        Err(err) => {
            debug!(%err, "native store probe failed; using fallback backend");
            fallback()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemBackend;
    use crate::StorageError;

    fn tagged(tag: &str) -> Box<dyn StorageBackend> {
        let mut backend = MemBackend::new();
        backend.set("tag", tag).unwrap();
        Box::new(backend)
    }

    #[test]
    fn probe_success_selects_native() {
        let backend = select_backend(|| Ok(Some(tagged("native"))), || tagged("fallback"));
        assert_eq!(backend.get("tag").as_deref(), Some("native"));
    }

    #[test]
    fn probe_absent_selects_fallback() {
        let backend = select_backend(|| Ok(None), || tagged("fallback"));
        assert_eq!(backend.get("tag").as_deref(), Some("fallback"));
    }

    #[test]
    fn probe_error_selects_fallback() {
        let backend = select_backend(
            || Err(StorageError::Probe("cookies disabled".into())),
            || tagged("fallback"),
        );
        assert_eq!(backend.get("tag").as_deref(), Some("fallback"));
    }
}
