//! Wire models for the notes-vault REST API.
//!
//! Field names follow the remote API exactly; these structs are serialized
//! straight from/to the JSON bodies the service exchanges.

use serde::{Deserialize, Serialize};

/// A top-level container ("unit") grouping subtopics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: u64,
    pub name: String,
}

/// A subtopic inside a unit, carrying the rich-text notes document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtopic {
    pub id: u64,
    /// Owning unit id.
    pub unit: u64,
    pub title: String,
    /// Rich-document markup. The API may return null for never-edited notes.
    #[serde(default)]
    pub notes: String,
}

/// A binary attachment ("PDF") uploaded against a subtopic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PdfDocument {
    pub id: u64,
    /// Owning subtopic id.
    pub subtopic: u64,
    pub title: String,
    /// Download locator for the stored file.
    pub file: String,
}

/// The authoritative server copy of one notes document.
///
/// Read-only from the editing core's perspective; content is only ever
/// changed through an explicit update call, and the title is never mutated
/// by the editing flow at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub title: String,
    #[serde(default)]
    pub notes: String,
}

impl From<Subtopic> for DocumentSnapshot {
    fn from(sub: Subtopic) -> Self {
        Self {
            title: sub.title,
            notes: sub.notes,
        }
    }
}

/// Locator returned by the image upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub url: String,
}
