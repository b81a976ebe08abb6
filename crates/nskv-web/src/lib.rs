//! Browser bindings for `nskv`.
//!
//! Provides the `web-sys`-backed implementations of the core crate's
//! collaborator traits — `localStorage` as the native [`StorageBackend`] and
//! `document.cookie` as the [`CookieJar`] — plus [`client_storage`], the
//! one-call entry point that probes the platform, picks a backend, and
//! returns a ready [`StoreContext`].
//!
//! Everything here is `wasm32`-only; on other targets this crate compiles to
//! an empty library (the core crate's `MemBackend` covers native hosts).
//!
//! [`StorageBackend`]: nskv::StorageBackend
//! [`CookieJar`]: nskv::CookieJar
//! [`StoreContext`]: nskv::StoreContext

#[cfg(target_arch = "wasm32")]
mod platform;

#[cfg(target_arch = "wasm32")]
pub use platform::{client_storage, probe_local_storage, DomCookieJar, LocalStorageBackend};
