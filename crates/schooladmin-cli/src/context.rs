//! Wiring shared by every command: transport, credentials, client, gate.

use std::sync::Arc;

use tracing::debug;

use schooladmin_client::{ApiClient, AuthGate, FileCredentialStore, HttpTransport};
use schooladmin_core::config::AppConfig;
use schooladmin_core::result::AppResult;
use schooladmin_core::traits::{CredentialProvider, Resource, Transport};
use schooladmin_controller::{ListResourceController, ResourceConfig};

use crate::confirm::PromptConfirm;

/// Everything a command needs to talk to the backend.
#[derive(Debug, Clone)]
pub struct AppContext {
    /// Loaded configuration.
    pub config: AppConfig,
    /// Authenticated REST client.
    pub client: ApiClient,
    /// Login gate sharing the client's credential store.
    pub auth: AuthGate,
    /// Confirmation prompts.
    pub confirm: PromptConfirm,
}

impl AppContext {
    /// Build the context from configuration. `assume_yes` answers every
    /// confirmation prompt with yes.
    pub fn build(config: AppConfig, assume_yes: bool) -> AppResult<Self> {
        let transport: Arc<dyn Transport> = Arc::new(HttpTransport::from_config(&config.api)?);
        let credentials: Arc<dyn CredentialProvider> =
            Arc::new(FileCredentialStore::open(&config.auth.credential_file)?);
        debug!(
            base_url = %config.api.base_url,
            credential_file = %config.auth.credential_file,
            "CLI context built"
        );

        let client = ApiClient::new(Arc::clone(&transport), Arc::clone(&credentials));
        let auth = AuthGate::from_config(transport, credentials, &config.api, &config.auth);

        Ok(Self {
            config,
            client,
            auth,
            confirm: PromptConfirm::new(assume_yes),
        })
    }

    /// Resource configuration seeded from the `[controller]` section.
    pub fn resource<T: Resource>(&self) -> ResourceConfig<T> {
        ResourceConfig::from_settings(&self.config.controller)
    }

    /// A controller over `config`.
    pub fn controller<T: Resource>(&self, config: ResourceConfig<T>) -> ListResourceController<T> {
        ListResourceController::new(self.client.clone(), Arc::new(self.confirm), config)
    }
}
