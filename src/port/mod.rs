//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (durable storage, streaming transports).
//!
//! # Available Ports
//!
//! - [`AuthApi`] - Remote sign-in and sign-up
//! - [`CredentialStorage`] - Durable credential persistence
//! - [`ChannelConnector`], [`ChannelTransport`] - Streaming transport
//! - [`ChannelObserver`] - Event sink for a live channel session

pub mod outbound;

pub use outbound::auth::AuthApi;
pub use outbound::channel::{ChannelConnector, ChannelObserver, ChannelTransport, InboundFrame};
pub use outbound::storage::{CredentialStorage, CREDENTIAL_KEY};
