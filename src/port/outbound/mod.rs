//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe infrastructure dependencies: the auth endpoints,
//! durable credential storage, and the streaming transport.

pub mod auth;
pub mod channel;
pub mod storage;
