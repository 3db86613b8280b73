//! Client configuration file storage.
//!
//! Loads `config.toml` from the config directory, creating it with defaults
//! on first use so the file is discoverable and editable.

use crate::atomic_file::write_atomic;
use crate::paths::StudypadPaths;
use std::fs;
use std::path::PathBuf;
use studypad_core::StudypadError;
use studypad_core::config::ClientConfig;

/// TOML-backed storage for [`ClientConfig`].
pub struct ConfigStorage {
    path: PathBuf,
}

impl ConfigStorage {
    /// Creates storage at the default config file location.
    pub fn new() -> Result<Self, StudypadError> {
        let paths = StudypadPaths::new()?;
        Ok(Self {
            path: paths.config_file(),
        })
    }

    /// Creates storage at a custom path (for testing).
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the configuration, writing the default file first if none
    /// exists yet.
    pub fn load_or_init(&self) -> Result<ClientConfig, StudypadError> {
        match fs::read_to_string(&self.path) {
            Ok(content) => toml::from_str(&content)
                .map_err(|e| StudypadError::serialization("TOML", e.to_string())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let config = ClientConfig::default();
                self.save(&config)?;
                Ok(config)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Persists the configuration atomically.
    pub fn save(&self, config: &ClientConfig) -> Result<(), StudypadError> {
        let content = toml::to_string_pretty(config)
            .map_err(|e| StudypadError::serialization("TOML", e.to_string()))?;
        write_atomic(&self.path, content.as_bytes())?;
        Ok(())
    }
}
