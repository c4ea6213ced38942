//! Scripted channel transport for deterministic session tests.
//!
//! A [`ScriptedTransport`] replays a fixed queue of inbound frames, then
//! either ends the stream or stays open until the session closes it. It can
//! also hold every frame back until the test releases it.
//! Outbound frames are captured for assertions.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::watch;
use url::Url;

use crate::domain::CloseInfo;
use crate::error::{Error, Result};
use crate::port::{ChannelConnector, ChannelTransport, InboundFrame};

/// What the session sent through the transport.
#[derive(Debug, Default)]
pub struct Sent {
    pub frames: Vec<String>,
    pub closed: bool,
}

enum Scripted {
    Frame(InboundFrame),
    Error(String),
}

// ---------------------------------------------------------------------------
// ScriptedTransport
// ---------------------------------------------------------------------------

/// A transport that replays scripted inbound frames.
pub struct ScriptedTransport {
    script: VecDeque<Scripted>,
    hold_open: bool,
    held: Option<watch::Receiver<bool>>,
    sent: Arc<Mutex<Sent>>,
}

impl ScriptedTransport {
    pub fn new() -> Self {
        Self {
            script: VecDeque::new(),
            hold_open: false,
            held: None,
            sent: Arc::new(Mutex::new(Sent::default())),
        }
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.script
            .push_back(Scripted::Frame(InboundFrame::Text(text.into())));
        self
    }

    pub fn with_close(mut self, code: u16, reason: &str) -> Self {
        self.script
            .push_back(Scripted::Frame(InboundFrame::Close(Some(CloseInfo::new(
                code, reason,
            )))));
        self
    }

    /// Close frame with no status payload.
    pub fn with_bare_close(mut self) -> Self {
        self.script
            .push_back(Scripted::Frame(InboundFrame::Close(None)));
        self
    }

    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.script.push_back(Scripted::Error(message.into()));
        self
    }

    /// Stay open once the script is exhausted instead of ending the stream.
    pub fn hold_open(mut self) -> Self {
        self.hold_open = true;
        self
    }

    /// Deliver nothing until `held` turns `true`.
    pub fn held_until(mut self, held: watch::Receiver<bool>) -> Self {
        self.held = Some(held);
        self
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Sent>> {
        Arc::clone(&self.sent)
    }
}

impl Default for ScriptedTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChannelTransport for ScriptedTransport {
    async fn next_frame(&mut self) -> Option<Result<InboundFrame>> {
        if let Some(held) = self.held.as_mut() {
            let released = held.wait_for(|released| *released).await.is_ok();
            if !released {
                return None;
            }
        }
        match self.script.pop_front() {
            Some(Scripted::Frame(frame)) => Some(Ok(frame)),
            Some(Scripted::Error(message)) => Some(Err(Error::Connection(message))),
            None if self.hold_open => std::future::pending().await,
            None => None,
        }
    }

    async fn send_text(&mut self, text: String) -> Result<()> {
        let mut sent = self.sent.lock();
        if sent.closed {
            return Err(Error::Connection("transport closed".into()));
        }
        sent.frames.push(text);
        Ok(())
    }

    async fn close(&mut self) -> Result<()> {
        self.sent.lock().closed = true;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ScriptedConnector
// ---------------------------------------------------------------------------

/// A connector handing out one scripted transport.
///
/// Records every URL it is asked to connect to. Without a transport, or
/// once it has been handed out, connecting fails.
#[derive(Default)]
pub struct ScriptedConnector {
    transport: Mutex<Option<ScriptedTransport>>,
    urls: Arc<Mutex<Vec<String>>>,
}

impl ScriptedConnector {
    pub fn with(transport: ScriptedTransport) -> Self {
        Self {
            transport: Mutex::new(Some(transport)),
            urls: Arc::default(),
        }
    }

    /// A connector that refuses every connection.
    pub fn refusing() -> Self {
        Self::default()
    }

    pub fn urls(&self) -> Arc<Mutex<Vec<String>>> {
        Arc::clone(&self.urls)
    }
}

#[async_trait]
impl ChannelConnector for ScriptedConnector {
    async fn connect(&self, url: &Url) -> Result<Box<dyn ChannelTransport>> {
        self.urls.lock().push(url.to_string());
        match self.transport.lock().take() {
            Some(transport) => Ok(Box::new(transport)),
            None => Err(Error::Connection("connection refused".into())),
        }
    }
}
