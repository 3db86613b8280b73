//! [`NotesBackend`] implementation over the HTTP client.

use crate::gateway::ApiClient;
use async_trait::async_trait;
use studypad_core::StudypadError;
use studypad_core::backend::NotesBackend;
use studypad_core::model::{DocumentSnapshot, UploadedImage};

#[async_trait]
impl NotesBackend for ApiClient {
    async fn fetch_document(&self, doc_id: &str) -> Result<DocumentSnapshot, StudypadError> {
        let subtopic = self.subtopic_detail(doc_id).await?;
        Ok(DocumentSnapshot::from(subtopic))
    }

    async fn update_notes(&self, doc_id: &str, notes: &str) -> Result<(), StudypadError> {
        self.update_subtopic_notes(doc_id, notes).await
    }

    async fn upload_image(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<UploadedImage, StudypadError> {
        ApiClient::upload_image(self, file_name, bytes).await
    }
}
