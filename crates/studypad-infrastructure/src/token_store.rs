//! File-backed bearer token storage.
//!
//! Persists the token as a small JSON file under the config directory so it
//! survives restarts within the same profile, mirroring browser local
//! storage. The `TokenStore` contract is infallible; storage failures are
//! logged and reported as token-absent.

use crate::atomic_file::write_atomic;
use crate::paths::StudypadPaths;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use studypad_core::StudypadError;
use studypad_core::token::TokenStore;

/// On-disk shape of the stored credential.
#[derive(Debug, Serialize, Deserialize)]
struct TokenRecord {
    access_token: String,
}

/// Token store backed by `token.json` under the config directory.
///
/// Does NOT:
/// - Validate token contents
/// - Guard against concurrent writers from other processes (last writer
///   wins, a documented limitation)
pub struct FileTokenStore {
    path: PathBuf,
}

impl FileTokenStore {
    /// Creates a store at the default location.
    pub fn new() -> Result<Self, StudypadError> {
        let paths = StudypadPaths::new()?;
        Ok(Self {
            path: paths.token_file(),
        })
    }

    /// Creates a store at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for FileTokenStore {
    fn get(&self) -> Option<String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read token file");
                return None;
            }
        };

        match serde_json::from_str::<TokenRecord>(&content) {
            Ok(record) => Some(record.access_token),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "token file is corrupt, treating as absent");
                None
            }
        }
    }

    fn set(&self, token: &str) {
        let record = TokenRecord {
            access_token: token.to_string(),
        };
        let json = match serde_json::to_vec_pretty(&record) {
            Ok(json) => json,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize token record");
                return;
            }
        };
        if let Err(e) = write_atomic(&self.path, &json) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to persist token");
        }
    }

    fn clear(&self) {
        match fs::remove_file(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to remove token file");
            }
        }
    }
}
