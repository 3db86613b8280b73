//! HTTP client for the notes-vault REST API.
//!
//! [`ApiClient`] is the single request gateway: it attaches the bearer
//! token from an injected [`TokenStore`](studypad_core::token::TokenStore),
//! normalizes every response into a uniform `(status, body)` pair, and
//! handles authentication rejection globally. Typed endpoint wrappers map
//! that pair onto domain models and [`StudypadError`](studypad_core::StudypadError)
//! variants.

pub mod backend_impl;
pub mod endpoints;
pub mod gateway;

pub use crate::gateway::{ApiClient, ApiResponse, RequestPayload};
