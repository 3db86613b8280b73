//! Service wiring for the CLI.

use crate::terminal::CliAuthEvents;
use std::sync::Arc;
use studypad_application::{AuthUseCase, LibraryUseCase};
use studypad_client::ApiClient;
use studypad_core::StudypadError;
use studypad_core::draft::DraftStore;
use studypad_core::token::TokenStore;
use studypad_infrastructure::{ConfigStorage, FileDraftStore, FileTokenStore};

/// All wired-up services for one CLI invocation.
pub struct AppContext {
    pub client: Arc<ApiClient>,
    pub drafts: Arc<dyn DraftStore>,
    pub auth: AuthUseCase,
    pub library: LibraryUseCase,
}

impl AppContext {
    pub fn new() -> Result<Self, StudypadError> {
        let config = ConfigStorage::new()?.load_or_init()?;
        let tokens: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new()?);
        let drafts: Arc<dyn DraftStore> = Arc::new(FileDraftStore::new()?);

        let client = Arc::new(ApiClient::new(
            &config,
            tokens.clone(),
            Arc::new(CliAuthEvents),
        ));
        let auth = AuthUseCase::new(client.clone(), tokens);
        let library = LibraryUseCase::new(client.clone());

        Ok(Self {
            client,
            drafts,
            auth,
            library,
        })
    }
}
