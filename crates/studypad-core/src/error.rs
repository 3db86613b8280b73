//! Error types for the studypad client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire studypad client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Nothing here is fatal to the
/// process: every variant degrades to a visible status message and leaves the
/// user able to retry the same action.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum StudypadError {
    /// The remote rejected our credentials (HTTP 401).
    ///
    /// Global by design: the stored token has already been cleared and the
    /// user must authenticate again before any protected operation.
    #[error("Authentication rejected, please log in again")]
    AuthRejected,

    /// The remote rejected the request payload (4xx with a field message).
    ///
    /// Local to the form or action that produced it; the user corrects the
    /// input and retries.
    #[error("{0}")]
    Validation(String),

    /// The request never produced a response (DNS, connect, abort).
    ///
    /// Retryable manually; never retried automatically.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The initial document fetch failed.
    ///
    /// Non-fatal: editing continues on whatever content is already present.
    #[error("Failed to load document: {0}")]
    LoadFailed(String),

    /// Unexpected remote status without a field-specific message.
    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    /// An editing session was started without a document id.
    #[error("Missing document id")]
    MissingDocumentId,

    /// IO error (local file operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl StudypadError {
    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an Api error
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Serialization error
    pub fn serialization(format: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Serialization {
            format: format.into(),
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is an AuthRejected error
    pub fn is_auth_rejected(&self) -> bool {
        matches!(self, Self::AuthRejected)
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a Transport error
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Check if this is a LoadFailed error
    pub fn is_load_failed(&self) -> bool {
        matches!(self, Self::LoadFailed(_))
    }
}

impl From<std::io::Error> for StudypadError {
    fn from(e: std::io::Error) -> Self {
        StudypadError::io(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructor_helpers_produce_matching_variants() {
        assert!(StudypadError::validation("bad username").is_validation());
        assert!(StudypadError::transport("connection refused").is_transport());
        assert!(StudypadError::AuthRejected.is_auth_rejected());
        assert!(StudypadError::LoadFailed("500".into()).is_load_failed());
    }

    #[test]
    fn validation_displays_message_verbatim() {
        let err = StudypadError::validation("A user with that username already exists.");
        assert_eq!(
            err.to_string(),
            "A user with that username already exists."
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: StudypadError = io.into();
        assert!(matches!(err, StudypadError::Io { .. }));
    }
}
