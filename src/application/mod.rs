//! Application services (use cases).
//!
//! These services own the session state and coordinate the outbound
//! adapters through their ports.
//!
//! - [`credential`] - Process-wide credential store
//! - [`channel`] - Live channel supervisor
//! - [`navigation`] - Route guard
//! - [`session`] - Login / logout lifecycle

pub mod channel;
pub mod credential;
pub mod navigation;
pub mod session;
