//! WebSocket adapter for live channel sessions.

mod transport;

pub use transport::{WebSocketConnector, WebSocketTransport};
