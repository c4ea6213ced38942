//! WebSocket transport for live channel sessions.
//!
//! Implements the channel ports over `tokio-tungstenite`. Pings are answered
//! here; text and close frames are passed up to the supervisor untouched.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::tungstenite::error::Error as WsError;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, trace};
use url::Url;

use crate::domain::CloseInfo;
use crate::error::Result;
use crate::port::{ChannelConnector, ChannelTransport, InboundFrame};

/// Opens WebSocket connections with `tokio-tungstenite`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketConnector;

#[async_trait]
impl ChannelConnector for WebSocketConnector {
    async fn connect(&self, url: &Url) -> Result<Box<dyn ChannelTransport>> {
        // The path carries the credential; log the host only.
        info!(host = ?url.host_str(), "Connecting to WebSocket");

        let (ws, response) = connect_async(url.as_str()).await?;

        info!(status = %response.status(), "WebSocket connected");
        Ok(Box::new(WebSocketTransport { ws }))
    }
}

/// An open WebSocket connection.
pub struct WebSocketTransport {
    ws: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

#[async_trait]
impl ChannelTransport for WebSocketTransport {
    async fn next_frame(&mut self) -> Option<Result<InboundFrame>> {
        loop {
            match self.ws.next().await? {
                Ok(Message::Text(text)) => {
                    trace!(bytes = text.len(), "Received WebSocket text frame");
                    return Some(Ok(InboundFrame::Text(text)));
                }
                // The WebSocket protocol requires pong responses to carry the
                // same application data as the ping frame.
                Ok(Message::Ping(data)) => {
                    trace!("Received WebSocket ping");
                    if let Err(e) = self.ws.send(Message::Pong(data)).await {
                        return Some(Err(e.into()));
                    }
                }
                Ok(Message::Close(frame)) => {
                    debug!(frame = ?frame, "WebSocket closed by server");
                    return Some(Ok(InboundFrame::Close(frame.map(|f| {
                        CloseInfo::new(u16::from(f.code), f.reason.into_owned())
                    }))));
                }
                Ok(Message::Binary(data)) => {
                    debug!(bytes = data.len(), "Ignoring binary frame");
                }
                Ok(_) => {}
                Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => return None,
                Err(e) => return Some(Err(e.into())),
            }
        }
    }

    async fn send_text(&mut self, text: String) -> Result<()> {
        self.ws.send(Message::Text(text)).await?;
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        match self.ws.close(None).await {
            Ok(()) | Err(WsError::ConnectionClosed | WsError::AlreadyClosed) => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
