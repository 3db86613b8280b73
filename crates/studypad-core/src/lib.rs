pub mod backend;
pub mod config;
pub mod draft;
pub mod editor;
pub mod error;
pub mod model;
pub mod token;

// Re-export common error type
pub use error::StudypadError;
