//! Namespaced key-value storage for browser clients.
//!
//! Application code gets a uniform get/set/clear interface per namespace,
//! regardless of what the platform actually offers: a durable key-value
//! store (`localStorage` on the web) when one is usable, otherwise a
//! fallback backend built on top of the document's cookie header. Each
//! namespace owns a single backend entry holding a JSON object that maps
//! sub-keys to arbitrary JSON values.
//!
//! The crate is platform-neutral: every browser collaborator (the native
//! store, the cookie header, the wall clock) is a trait, so the whole stack
//! runs against in-memory doubles on any host. `nskv-web` provides the
//! `web-sys`-backed implementations for wasm targets.

mod backend;
mod clock;
mod context;
mod error;
mod select;
mod store;

pub use crate::backend::cookie::{CookieBackend, CookieJar};
pub use crate::backend::{MemBackend, StorageBackend};
pub use crate::clock::{Clock, FakeClock, SystemClock};
pub use crate::context::StoreContext;
pub use crate::error::{Result, StorageError};
pub use crate::select::{select_backend, ProbeResult};
pub use crate::store::{NamespaceStore, SharedBackend};
