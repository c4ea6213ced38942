//! Managed bot operations: CRUD, control, and telemetry reads.

use serde::Serialize;
use serde_json::Value;

use super::client::ApiClient;
use crate::domain::BotId;
use crate::error::Result;

/// Log lines requested when the caller gives no tail length.
pub const DEFAULT_LOG_TAIL: u32 = 100;
/// Trades requested when the caller gives no limit.
pub const DEFAULT_TRADE_LIMIT: u32 = 50;

/// Control actions accepted by `POST /bots/{id}/<action>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotAction {
    Start,
    Stop,
    Restart,
}

impl BotAction {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Restart => "restart",
        }
    }
}

impl ApiClient {
    /// `GET /bots`
    pub async fn get_bots(&self) -> Result<Value> {
        self.get(&["bots"]).await
    }

    /// `POST /bots` with the bot configuration as JSON.
    pub async fn create_bot<C>(&self, config: &C) -> Result<Value>
    where
        C: Serialize + ?Sized,
    {
        self.post_json(&["bots"], config).await
    }

    /// `GET /bots/{id}`
    pub async fn get_bot(&self, bot_id: &BotId) -> Result<Value> {
        self.get(&["bots", bot_id.as_str()]).await
    }

    /// `DELETE /bots/{id}`
    pub async fn delete_bot(&self, bot_id: &BotId) -> Result<Value> {
        self.delete(&["bots", bot_id.as_str()]).await
    }

    /// `POST /bots/{id}/{start|stop|restart}`
    pub async fn control_bot(&self, bot_id: &BotId, action: BotAction) -> Result<Value> {
        self.post(&["bots", bot_id.as_str(), action.as_str()]).await
    }

    pub async fn start_bot(&self, bot_id: &BotId) -> Result<Value> {
        self.control_bot(bot_id, BotAction::Start).await
    }

    pub async fn stop_bot(&self, bot_id: &BotId) -> Result<Value> {
        self.control_bot(bot_id, BotAction::Stop).await
    }

    pub async fn restart_bot(&self, bot_id: &BotId) -> Result<Value> {
        self.control_bot(bot_id, BotAction::Restart).await
    }

    /// `GET /bots/{id}/logs?tail=` (tail defaults to [`DEFAULT_LOG_TAIL`]).
    pub async fn get_bot_logs(&self, bot_id: &BotId, tail: Option<u32>) -> Result<Value> {
        let tail = tail.unwrap_or(DEFAULT_LOG_TAIL);
        self.get_query(&["bots", bot_id.as_str(), "logs"], &[("tail", tail)])
            .await
    }

    /// `GET /bots/{id}/performance`
    pub async fn get_bot_performance(&self, bot_id: &BotId) -> Result<Value> {
        self.get(&["bots", bot_id.as_str(), "performance"]).await
    }

    /// `GET /bots/{id}/trades?limit=` (limit defaults to [`DEFAULT_TRADE_LIMIT`]).
    pub async fn get_bot_trades(&self, bot_id: &BotId, limit: Option<u32>) -> Result<Value> {
        let limit = limit.unwrap_or(DEFAULT_TRADE_LIMIT);
        self.get_query(&["bots", bot_id.as_str(), "trades"], &[("limit", limit)])
            .await
    }

    /// `PUT /bots/{id}/config`
    pub async fn update_bot_config<C>(&self, bot_id: &BotId, config: &C) -> Result<Value>
    where
        C: Serialize + ?Sized,
    {
        self.put_json(&["bots", bot_id.as_str(), "config"], config)
            .await
    }
}
