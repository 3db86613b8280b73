//! The request gateway.
//!
//! Every outbound call to the remote API goes through [`ApiClient::call`],
//! which attaches the bearer token, serializes the payload, and normalizes
//! the response into a uniform `(status, body)` pair. A 401 anywhere clears
//! the credential store and notifies the auth observer; that is a
//! full-session invalidation side effect, not a retryable error.

use reqwest::{Client, Method, StatusCode, multipart::Form};
use serde_json::Value;
use std::sync::Arc;
use studypad_core::StudypadError;
use studypad_core::config::ClientConfig;
use studypad_core::editor::AuthEvents;
use studypad_core::token::TokenStore;

/// Body fields scanned for a human-readable error message, in priority
/// order. The first field present wins.
const ERROR_FIELDS: [&str; 4] = ["username", "email", "detail", "error"];

/// Outbound request payload.
pub enum RequestPayload {
    /// No body.
    Empty,
    /// JSON body; sets the JSON content type.
    Json(Value),
    /// Multipart form for binary uploads; the transport infers the
    /// boundary, so no explicit content type is set.
    Multipart(Form),
}

/// A normalized API response: the status code plus the parsed JSON body.
///
/// A body that is missing or fails to parse is `None`; success responses in
/// this API are always structured, so the distinction is not needed.
#[derive(Debug)]
pub struct ApiResponse {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Extracts the domain error text from the body, falling back to
    /// `fallback` when no known field is present.
    pub fn error_message(&self, fallback: &str) -> String {
        extract_error_text(self.body.as_ref()).unwrap_or_else(|| fallback.to_string())
    }

    /// Maps a non-success response onto the shared error type.
    pub fn into_error(self, fallback: &str) -> StudypadError {
        if self.status == StatusCode::UNAUTHORIZED {
            return StudypadError::AuthRejected;
        }
        let message = self.error_message(fallback);
        if self.status.is_client_error() {
            StudypadError::validation(message)
        } else {
            StudypadError::api(self.status.as_u16(), message)
        }
    }
}

/// Scans the known error fields and renders the first present value.
pub fn extract_error_text(body: Option<&Value>) -> Option<String> {
    let body = body?;
    for field in ERROR_FIELDS {
        if let Some(value) = body.get(field) {
            if let Some(text) = value_to_text(value) {
                return Some(text);
            }
        }
    }
    None
}

/// The API returns error fields either as strings or as lists of strings.
fn value_to_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => items.iter().find_map(value_to_text),
        _ => None,
    }
}

/// HTTP gateway to the notes-vault API.
///
/// Never retries automatically and imposes no timeout: the remote service
/// may cold-start after an idle period, and the caller handles that with a
/// pending-state indicator rather than a failed call.
pub struct ApiClient {
    http: Client,
    base_url: String,
    tokens: Arc<dyn TokenStore>,
    auth_events: Arc<dyn AuthEvents>,
}

impl ApiClient {
    pub fn new(
        config: &ClientConfig,
        tokens: Arc<dyn TokenStore>,
        auth_events: Arc<dyn AuthEvents>,
    ) -> Self {
        Self {
            http: Client::new(),
            base_url: config.base_url.clone(),
            tokens,
            auth_events,
        }
    }

    /// Performs one API call and normalizes the result.
    ///
    /// The bearer token is attached when present and omitted otherwise.
    /// Transport failures (no response at all) surface as
    /// [`StudypadError::Transport`]; any received response is returned
    /// as-is, after the global 401 handling has run.
    pub async fn call(
        &self,
        endpoint: &str,
        method: Method,
        payload: RequestPayload,
    ) -> Result<ApiResponse, StudypadError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let mut request = self.http.request(method, &url);

        if let Some(token) = self.tokens.get() {
            request = request.bearer_auth(token);
        }

        request = match payload {
            RequestPayload::Empty => request,
            RequestPayload::Json(body) => request.json(&body),
            RequestPayload::Multipart(form) => request.multipart(form),
        };

        let response = request.send().await.map_err(|e| {
            tracing::warn!(endpoint, error = %e, "request failed without a response");
            StudypadError::transport(e.to_string())
        })?;

        let status = response.status();
        // Malformed bodies degrade to None rather than failing the call.
        let body = response.json::<Value>().await.ok();

        if status == StatusCode::UNAUTHORIZED {
            tracing::info!(endpoint, "authentication rejected, clearing stored credentials");
            self.tokens.clear();
            self.auth_events.session_expired();
        }

        Ok(ApiResponse { status, body })
    }
}
