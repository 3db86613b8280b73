//! Credential store abstraction.
//!
//! The bearer token lives in durable browser-profile-like storage: one value
//! process-wide, surviving restarts, destroyed on logout or on any request
//! that comes back authentication-rejected. The store is injected into the
//! request gateway rather than read as an ambient global so tests can swap
//! in fakes.

use std::sync::Mutex;

/// Durable storage for the session bearer token.
///
/// Contract: `get`/`set`/`clear`, no validation of token contents. Absence
/// implies the user must re-authenticate before any protected operation.
///
/// Not concurrency-safe across multiple processes by design: concurrent
/// writers are last-writer-wins, a documented limitation of the underlying
/// storage, not a bug to fix here.
pub trait TokenStore: Send + Sync {
    /// Returns the stored token, if any.
    fn get(&self) -> Option<String>;

    /// Stores a token, replacing any previous value.
    fn set(&self, token: &str);

    /// Removes the stored token. A no-op when nothing is stored.
    fn clear(&self);
}

/// In-memory token store for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn get(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    fn set(&self, token: &str) {
        *self.token.lock().unwrap() = Some(token.to_string());
    }

    fn clear(&self) {
        *self.token.lock().unwrap() = None;
    }
}
