//! Outbound adapters (driven side).
//!
//! - [`api`] - REST request gateway
//! - [`storage`] - Durable credential storage
//! - [`websocket`] - Streaming transport for channel sessions

pub mod api;
pub mod storage;
pub mod websocket;
