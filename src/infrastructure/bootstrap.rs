//! Composition root.
//!
//! Builds the single credential store and hands clones of it to every
//! component that needs the credential, so they all observe the same value.

use std::sync::Arc;

use tracing::{debug, info};

use super::config::settings::{Config, ENV_TOKEN};
use crate::adapter::outbound::api::ApiClient;
use crate::adapter::outbound::storage::FileCredentialStorage;
use crate::adapter::outbound::websocket::WebSocketConnector;
use crate::application::channel::ChannelSupervisor;
use crate::application::credential::CredentialStore;
use crate::application::navigation::NavigationGuard;
use crate::application::session::Session;
use crate::domain::{Credential, RouteTable};
use crate::error::Result;
use crate::port::{ChannelConnector, CredentialStorage};

/// Fully wired gateway components sharing one credential store.
#[derive(Debug, Clone)]
pub struct Gateway {
    pub store: CredentialStore,
    pub api: ApiClient,
    pub session: Session,
    pub channels: ChannelSupervisor,
    pub guard: NavigationGuard,
}

impl Gateway {
    /// Wire the production adapters from configuration.
    ///
    /// Reads the persisted credential from `[storage] path`. A non-empty
    /// `BOTGATE_TOKEN` replaces it for this process only.
    ///
    /// # Errors
    ///
    /// Returns an error if the storage file is corrupt or unreadable, or an
    /// endpoint URL is invalid.
    #[allow(clippy::result_large_err)]
    pub fn build(config: &Config) -> Result<Self> {
        let storage = FileCredentialStorage::new(config.storage.path());
        debug!(path = %storage.path().display(), "Using credential storage");

        let token = std::env::var(ENV_TOKEN)
            .ok()
            .filter(|token| !token.is_empty())
            .map(Credential::new);
        Self::with_parts(config, storage, Arc::new(WebSocketConnector), token)
    }

    /// Wire with explicit storage and streaming connector.
    #[allow(clippy::result_large_err)]
    pub fn with_parts<S>(
        config: &Config,
        storage: S,
        connector: Arc<dyn ChannelConnector>,
        token_override: Option<Credential>,
    ) -> Result<Self>
    where
        S: CredentialStorage + 'static,
    {
        let store = CredentialStore::load(storage)?;
        if let Some(token) = token_override {
            info!("Using credential from {ENV_TOKEN}");
            store.set_transient(token);
        }

        let api = ApiClient::from_config(&config.api, store.clone())?;
        let channels = ChannelSupervisor::new(config.api.ws_url()?, store.clone(), connector);
        let guard = NavigationGuard::new(
            store.clone(),
            RouteTable::default(),
            config.navigation.clone(),
        );

        Ok(Self {
            session: Session::new(Arc::new(api.clone()), store.clone()),
            store,
            api,
            channels,
            guard,
        })
    }
}
