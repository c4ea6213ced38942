//! Streaming channel ports.
//!
//! The supervisor talks to the network only through [`ChannelConnector`] and
//! [`ChannelTransport`], so tests can inject a scripted transport and assert
//! the emitted events deterministically.

use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use crate::domain::CloseInfo;
use crate::error::{ChannelError, Result};

/// A frame read from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InboundFrame {
    /// Text payload, expected to hold a JSON document.
    Text(String),
    /// The remote closed the connection. `None` when no close frame payload
    /// was provided.
    Close(Option<CloseInfo>),
}

/// An open duplex connection.
#[async_trait]
pub trait ChannelTransport: Send {
    /// Next inbound frame.
    ///
    /// Returns `None` when the stream ended without a close frame, and
    /// `Some(Err(_))` on a transport failure.
    async fn next_frame(&mut self) -> Option<Result<InboundFrame>>;

    /// Send a text frame.
    async fn send_text(&mut self, text: String) -> Result<()>;

    /// Close the connection from this side.
    async fn close(&mut self) -> Result<()>;
}

/// Opens transports.
#[async_trait]
pub trait ChannelConnector: Send + Sync {
    async fn connect(&self, url: &Url) -> Result<Box<dyn ChannelTransport>>;
}

/// Receives the events of one channel session.
///
/// Callbacks run on the session's task. They must not block, and must not
/// await the session's own handle.
pub trait ChannelObserver: Send + 'static {
    /// A parsed inbound JSON frame.
    fn on_message(&mut self, message: Value);

    /// A non-fatal channel error, e.g. a malformed frame.
    fn on_error(&mut self, error: ChannelError);

    /// The session terminated. Called exactly once.
    fn on_close(&mut self, info: CloseInfo);
}
