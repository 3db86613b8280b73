//! Draft cache abstraction.
//!
//! Holds at most one pending-edit buffer per document id, persisted in
//! durable local storage independent of network connectivity. Presence of an
//! entry means unflushed local work exists. Entries never expire: a draft
//! outlives restarts until a successful flush or an explicit clear. That is
//! a deliberate data-loss-avoidance bias toward stale-but-present local
//! data over silently discarded work.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Mutex;

/// Per-document pending-edit buffer.
///
/// Reads are infallible: a missing or unreadable entry is simply absent (the
/// implementation logs the details). Writes are full-content overwrites, so
/// no partial-write corruption is possible.
pub trait DraftStore: Send + Sync {
    /// Returns the buffered content for `doc_id`, if any.
    fn read(&self, doc_id: &str) -> Option<String>;

    /// Overwrites the buffer for `doc_id` with `content`.
    fn write(&self, doc_id: &str, content: &str);

    /// Removes the buffer for `doc_id`. A no-op when absent.
    fn clear(&self, doc_id: &str);
}

/// On-disk shape of one buffered draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DraftRecord {
    /// The raw document id, kept for inspection alongside the derived file name.
    pub doc_id: String,
    pub notes: String,
    pub updated_at: DateTime<Utc>,
}

/// In-memory draft store for tests.
#[derive(Default)]
pub struct MemoryDraftStore {
    drafts: Mutex<HashMap<String, String>>,
}

impl MemoryDraftStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DraftStore for MemoryDraftStore {
    fn read(&self, doc_id: &str) -> Option<String> {
        self.drafts.lock().unwrap().get(doc_id).cloned()
    }

    fn write(&self, doc_id: &str, content: &str) {
        self.drafts
            .lock()
            .unwrap()
            .insert(doc_id.to_string(), content.to_string());
    }

    fn clear(&self, doc_id: &str) {
        self.drafts.lock().unwrap().remove(doc_id);
    }
}
