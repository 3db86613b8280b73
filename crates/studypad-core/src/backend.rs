//! Remote backend abstraction for the editing core.

use crate::error::StudypadError;
use crate::model::{DocumentSnapshot, UploadedImage};
use async_trait::async_trait;

/// The three remote operations the editing session needs.
///
/// Implemented by the HTTP client; tests substitute fakes so the
/// reconciliation logic can be exercised without a network.
#[async_trait]
pub trait NotesBackend: Send + Sync {
    /// Fetches the authoritative snapshot (title + content) for a document.
    async fn fetch_document(&self, doc_id: &str) -> Result<DocumentSnapshot, StudypadError>;

    /// Updates the content field of a document. The title is never mutated
    /// by this flow.
    async fn update_notes(&self, doc_id: &str, notes: &str) -> Result<(), StudypadError>;

    /// Uploads an image and returns its locator.
    async fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedImage, StudypadError>;
}
