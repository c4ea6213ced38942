//! Botgate - session and real-time command gateway for a remote trading-bot
//! management service.
//!
//! # Architecture
//!
//! Four components share one process-wide credential:
//!
//! - **Credential store** ([`application::credential`]) - holds the bearer
//!   token, persists it, and is read by every other component at call time.
//! - **Request gateway** ([`adapter::outbound::api`]) - one typed async
//!   method per remote REST operation.
//! - **Channel supervisor** ([`application::channel`]) - opens and supervises
//!   one streaming session per bot terminal view.
//! - **Navigation guard** ([`application::navigation`]) - decides whether a
//!   view may be entered given the credential's presence.
//!
//! # Modules
//!
//! - [`domain`] - Transport-agnostic value types
//! - [`port`] - Traits at the storage and streaming seams
//! - [`application`] - Services owning session state
//! - [`adapter`] - REST, storage, WebSocket, and CLI adapters
//! - [`infrastructure`] - Configuration and wiring
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use botgate::infrastructure::bootstrap::Gateway;
//! use botgate::infrastructure::config::settings::Config;
//!
//! # async fn run() -> botgate::error::Result<()> {
//! let gateway = Gateway::build(&Config::default())?;
//! gateway.session.login("me@example.com", "secret").await?;
//! let bots = gateway.api.get_bots().await?;
//! println!("{bots}");
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
