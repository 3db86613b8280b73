//! Application layer for studypad.
//!
//! Use cases coordinating the HTTP client, the local stores, and the
//! presentation capability traits. The centerpiece is [`EditorSession`],
//! the per-document editing state machine that reconciles local drafts
//! with the server copy.

pub mod auth_usecase;
pub mod editor_session;
pub mod library_usecase;

pub use auth_usecase::AuthUseCase;
pub use editor_session::{EditorSession, SessionState};
pub use library_usecase::{LibraryUseCase, SubtopicOverview, UnitOverview};
