//! Unified path management for studypad local state.
//!
//! All durable client state (config, token, draft buffers) is resolved
//! through this module so every storage component agrees on where files
//! live across platforms.

use std::path::{Path, PathBuf};
use studypad_core::StudypadError;

/// Unified path management for studypad.
///
/// # Directory Structure
///
/// ```text
/// ~/.config/studypad/          # Config directory
/// ├── config.toml              # Client configuration (API base url)
/// └── token.json               # Bearer token
///
/// ~/.local/share/studypad/     # Data directory
/// └── drafts/                  # Per-document pending-edit buffers
/// ```
#[derive(Debug, Clone)]
pub struct StudypadPaths {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl StudypadPaths {
    /// Resolves the platform config and data directories.
    ///
    /// # Returns
    ///
    /// - `Ok(StudypadPaths)`: directories resolved
    /// - `Err(StudypadError::Config)`: home directory could not be determined
    pub fn new() -> Result<Self, StudypadError> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| StudypadError::config("Cannot find config directory"))?
            .join("studypad");
        let data_dir = dirs::data_dir()
            .ok_or_else(|| StudypadError::config("Cannot find data directory"))?
            .join("studypad");
        Ok(Self {
            config_dir,
            data_dir,
        })
    }

    /// Roots both directories under `base` (for testing).
    pub fn with_base(base: &Path) -> Self {
        Self {
            config_dir: base.join("config"),
            data_dir: base.join("data"),
        }
    }

    /// Path to the client configuration file.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Path to the stored bearer token.
    pub fn token_file(&self) -> PathBuf {
        self.config_dir.join("token.json")
    }

    /// Directory holding per-document draft buffers.
    pub fn drafts_dir(&self) -> PathBuf {
        self.data_dir.join("drafts")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_base_keeps_config_and_data_apart() {
        let paths = StudypadPaths::with_base(Path::new("/tmp/studypad-test"));
        assert_eq!(
            paths.config_file(),
            PathBuf::from("/tmp/studypad-test/config/config.toml")
        );
        assert_eq!(
            paths.token_file(),
            PathBuf::from("/tmp/studypad-test/config/token.json")
        );
        assert_eq!(
            paths.drafts_dir(),
            PathBuf::from("/tmp/studypad-test/data/drafts")
        );
    }
}
