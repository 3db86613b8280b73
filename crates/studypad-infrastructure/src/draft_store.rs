//! File-backed draft cache.
//!
//! One JSON record per document under the drafts directory. File names are
//! derived deterministically from the document id with a v5 UUID, so
//! distinct ids never collide and reloading the same id recovers the same
//! buffer. Drafts have no expiry; they are removed only by a successful
//! flush or an explicit clear.

use crate::atomic_file::write_atomic;
use crate::paths::StudypadPaths;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use studypad_core::StudypadError;
use studypad_core::draft::{DraftRecord, DraftStore};
use uuid::Uuid;

/// Draft store keeping one file per document id.
pub struct FileDraftStore {
    dir: PathBuf,
}

impl FileDraftStore {
    /// Creates a store at the default drafts directory.
    pub fn new() -> Result<Self, StudypadError> {
        let paths = StudypadPaths::new()?;
        Ok(Self {
            dir: paths.drafts_dir(),
        })
    }

    /// Creates a store rooted at a custom directory (for testing).
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Deterministic file path for a document id.
    fn draft_path(&self, doc_id: &str) -> PathBuf {
        let name = Uuid::new_v5(&Uuid::NAMESPACE_OID, doc_id.as_bytes());
        self.dir.join(format!("{name}.json"))
    }
}

impl DraftStore for FileDraftStore {
    fn read(&self, doc_id: &str) -> Option<String> {
        let path = self.draft_path(doc_id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(doc_id, error = %e, "failed to read draft file");
                return None;
            }
        };

        match serde_json::from_str::<DraftRecord>(&content) {
            Ok(record) => Some(record.notes),
            Err(e) => {
                tracing::warn!(doc_id, error = %e, "draft file is corrupt, treating as absent");
                None
            }
        }
    }

    fn write(&self, doc_id: &str, content: &str) {
        let record = DraftRecord {
            doc_id: doc_id.to_string(),
            notes: content.to_string(),
            updated_at: Utc::now(),
        };
        let json = match serde_json::to_vec_pretty(&record) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(doc_id, error = %e, "failed to serialize draft record");
                return;
            }
        };
        if let Err(e) = write_atomic(&self.draft_path(doc_id), &json) {
            tracing::warn!(doc_id, error = %e, "failed to persist draft");
        }
    }

    fn clear(&self, doc_id: &str) {
        match fs::remove_file(self.draft_path(doc_id)) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(doc_id, error = %e, "failed to remove draft file");
            }
        }
    }
}
