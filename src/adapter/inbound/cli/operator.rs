//! Capability surface handed to CLI handlers.
//!
//! Handlers reach the request gateway, session, channel supervisor and
//! navigation guard only through [`Operator`]; `main` assembles it from the
//! wired gateway.

use std::path::{Path, PathBuf};

use crate::adapter::outbound::api::ApiClient;
use crate::application::channel::ChannelSupervisor;
use crate::application::navigation::NavigationGuard;
use crate::application::session::Session;

/// Components a CLI command may use.
#[derive(Debug, Clone)]
pub struct Operator {
    api: ApiClient,
    session: Session,
    channels: ChannelSupervisor,
    guard: NavigationGuard,
    storage_path: PathBuf,
}

impl Operator {
    #[must_use]
    pub fn new(
        api: ApiClient,
        session: Session,
        channels: ChannelSupervisor,
        guard: NavigationGuard,
        storage_path: PathBuf,
    ) -> Self {
        Self {
            api,
            session,
            channels,
            guard,
            storage_path,
        }
    }

    /// Request gateway.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    #[must_use]
    pub fn session(&self) -> &Session {
        &self.session
    }

    #[must_use]
    pub fn channels(&self) -> &ChannelSupervisor {
        &self.channels
    }

    #[must_use]
    pub fn guard(&self) -> &NavigationGuard {
        &self.guard
    }

    /// Where the credential is persisted, for display.
    #[must_use]
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }
}
