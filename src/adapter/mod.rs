//! Implementations of ports (hexagonal adapters).
//!
//! - [`inbound`] - Driving adapters (command-line front end)
//! - [`outbound`] - Driven adapters (REST gateway, storage, streaming transport)

pub mod inbound;
pub mod outbound;
