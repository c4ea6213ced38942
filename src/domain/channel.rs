//! Events produced by a live channel session.

use serde_json::Value;

use crate::error::ChannelError;

/// Normal closure.
pub const CLOSE_NORMAL: u16 = 1000;
/// Connection dropped without a close frame.
pub const CLOSE_ABNORMAL: u16 = 1006;

/// Closure code and reason, passed through verbatim from the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloseInfo {
    pub code: u16,
    pub reason: String,
}

impl CloseInfo {
    pub fn new(code: u16, reason: impl Into<String>) -> Self {
        Self {
            code,
            reason: reason.into(),
        }
    }

    /// Closure initiated by this client.
    #[must_use]
    pub fn client() -> Self {
        Self::new(CLOSE_NORMAL, "closed by client")
    }

    /// Transport ended without a close handshake.
    pub fn abnormal(reason: impl Into<String>) -> Self {
        Self::new(CLOSE_ABNORMAL, reason)
    }

    #[must_use]
    pub const fn is_normal(&self) -> bool {
        self.code == CLOSE_NORMAL
    }
}

/// One event delivered to a channel observer.
#[derive(Debug, Clone)]
pub enum ChannelEvent {
    Message(Value),
    Error(ChannelError),
    Closed(CloseInfo),
}

/// Typed view over the push frames the service is known to emit.
///
/// The raw JSON is kept in every variant so nothing is hidden from the
/// caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ChannelMessage {
    /// Connection acknowledgement sent right after the socket opens.
    Connected { bot_id: Option<String>, raw: Value },
    /// Periodic bot status snapshot.
    BotUpdate { data: Value, raw: Value },
    /// Log line(s) pushed from the bot.
    Logs {
        lines: String,
        level: Option<String>,
        raw: Value,
    },
    /// Any other frame, including terminal output.
    Other { kind: Option<String>, raw: Value },
}

impl ChannelMessage {
    #[must_use]
    pub fn classify(raw: Value) -> Self {
        let kind = raw.get("type").and_then(Value::as_str).map(str::to_owned);
        match kind.as_deref() {
            Some("bot_connection" | "connection") => Self::Connected {
                bot_id: raw
                    .get("bot_id")
                    .and_then(Value::as_str)
                    .map(str::to_owned),
                raw,
            },
            Some("bot_update" | "bot_status_update") => Self::BotUpdate {
                data: raw.get("data").cloned().unwrap_or(Value::Null),
                raw,
            },
            Some("logs_update") => {
                let data = raw.get("data");
                let lines = data
                    .and_then(|d| d.get("logs"))
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_owned();
                let level = data
                    .and_then(|d| d.get("log_level"))
                    .and_then(Value::as_str)
                    .map(str::to_owned);
                Self::Logs { lines, level, raw }
            }
            _ => Self::Other { kind, raw },
        }
    }

    #[must_use]
    pub fn raw(&self) -> &Value {
        match self {
            Self::Connected { raw, .. }
            | Self::BotUpdate { raw, .. }
            | Self::Logs { raw, .. }
            | Self::Other { raw, .. } => raw,
        }
    }
}
