//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`auth`]: Stub auth endpoints answering from scripted queues.
//! - [`storage`]: In-memory [`CredentialStorage`](crate::port::CredentialStorage).
//! - [`transport`]: Scripted channel transport and connector.
//! - [`observer`]: Channel observer that records every event.

pub mod auth;
pub mod observer;
pub mod storage;
pub mod transport;
