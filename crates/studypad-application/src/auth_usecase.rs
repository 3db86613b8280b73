//! Authentication use case.
//!
//! Thin orchestration over the auth endpoints and the credential store:
//! login persists the access token, logout destroys it. Validation failures
//! carry the server's field message and stay local to the form.

use std::sync::Arc;
use studypad_client::ApiClient;
use studypad_core::StudypadError;
use studypad_core::token::TokenStore;

pub struct AuthUseCase {
    client: Arc<ApiClient>,
    tokens: Arc<dyn TokenStore>,
}

impl AuthUseCase {
    pub fn new(client: Arc<ApiClient>, tokens: Arc<dyn TokenStore>) -> Self {
        Self { client, tokens }
    }

    /// Creates a new account. Does not log the user in.
    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<(), StudypadError> {
        self.client.register(username, email, password).await
    }

    /// Authenticates and stores the returned access token, replacing any
    /// previous value.
    pub async fn login(&self, username: &str, password: &str) -> Result<(), StudypadError> {
        let access = self.client.login(username, password).await?;
        self.tokens.set(&access);
        tracing::info!(username, "logged in");
        Ok(())
    }

    /// Destroys the stored token. Purely local; the server keeps no session.
    pub fn logout(&self) {
        self.tokens.clear();
    }

    /// Whether a token is currently stored. Says nothing about its validity;
    /// a stale token surfaces as authentication-rejected on first use.
    pub fn is_logged_in(&self) -> bool {
        self.tokens.get().is_some()
    }
}
