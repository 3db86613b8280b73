//! Durable local storage for studypad.
//!
//! File-backed implementations of the core storage traits plus path and
//! configuration management. All writes go through an atomic
//! tmp-file-and-rename helper so a crash can never leave a half-written
//! token, draft, or config file behind.

pub mod atomic_file;
pub mod config_storage;
pub mod draft_store;
pub mod paths;
pub mod token_store;

pub use crate::config_storage::ConfigStorage;
pub use crate::draft_store::FileDraftStore;
pub use crate::paths::StudypadPaths;
pub use crate::token_store::FileTokenStore;
