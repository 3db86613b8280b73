//! Library use case: units, subtopics, and attachments.
//!
//! The dashboard-facing operations. The API returns flat collections;
//! grouping into the unit → subtopic → pdf hierarchy happens client-side.

use std::sync::Arc;
use studypad_client::ApiClient;
use studypad_core::StudypadError;
use studypad_core::model::{PdfDocument, Subtopic, Unit};

/// One unit with its subtopics, each carrying its attachments.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitOverview {
    pub unit: Unit,
    pub subtopics: Vec<SubtopicOverview>,
}

/// One subtopic with its attachments.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtopicOverview {
    pub subtopic: Subtopic,
    pub pdfs: Vec<PdfDocument>,
}

pub struct LibraryUseCase {
    client: Arc<ApiClient>,
}

impl LibraryUseCase {
    pub fn new(client: Arc<ApiClient>) -> Self {
        Self { client }
    }

    /// Fetches units, subtopics, and attachments and groups them into the
    /// display hierarchy.
    pub async fn overview(&self) -> Result<Vec<UnitOverview>, StudypadError> {
        let units = self.client.units().await?;
        let subtopics = self.client.subtopics().await?;
        let pdfs = self.client.pdfs().await?;
        Ok(group_overview(units, subtopics, pdfs))
    }

    pub async fn create_unit(&self, name: &str) -> Result<Unit, StudypadError> {
        self.client.create_unit(name).await
    }

    pub async fn rename_unit(&self, id: u64, name: &str) -> Result<Unit, StudypadError> {
        self.client.rename_unit(id, name).await
    }

    /// Deletes a unit and, server-side, everything under it.
    pub async fn delete_unit(&self, id: u64) -> Result<(), StudypadError> {
        self.client.delete_unit(id).await
    }

    /// Creates a subtopic with empty notes; content comes later through the
    /// editor flow.
    pub async fn create_subtopic(&self, unit: u64, title: &str) -> Result<Subtopic, StudypadError> {
        self.client.create_subtopic(unit, title, "").await
    }

    pub async fn delete_subtopic(&self, id: &str) -> Result<(), StudypadError> {
        self.client.delete_subtopic(id).await
    }

    pub async fn upload_pdf(
        &self,
        subtopic: u64,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<PdfDocument, StudypadError> {
        self.client.upload_pdf(subtopic, file_name, bytes).await
    }

    pub async fn rename_pdf(&self, id: u64, title: &str) -> Result<PdfDocument, StudypadError> {
        self.client.rename_pdf(id, title).await
    }

    pub async fn delete_pdf(&self, id: u64) -> Result<(), StudypadError> {
        self.client.delete_pdf(id).await
    }
}

/// Groups flat collections into the unit → subtopic → pdf hierarchy.
///
/// Orphaned subtopics or attachments (parent deleted between fetches) are
/// dropped rather than surfaced; the next refresh reconciles.
pub fn group_overview(
    units: Vec<Unit>,
    subtopics: Vec<Subtopic>,
    pdfs: Vec<PdfDocument>,
) -> Vec<UnitOverview> {
    units
        .into_iter()
        .map(|unit| {
            let subtopics = subtopics
                .iter()
                .filter(|s| s.unit == unit.id)
                .map(|subtopic| SubtopicOverview {
                    subtopic: subtopic.clone(),
                    pdfs: pdfs
                        .iter()
                        .filter(|p| p.subtopic == subtopic.id)
                        .cloned()
                        .collect(),
                })
                .collect();
            UnitOverview { unit, subtopics }
        })
        .collect()
}
