//! External bot operations: connection lifecycle, control, telemetry, and
//! terminal commands relayed to a remotely hosted bot.

use serde_json::Value;

use super::bots::{DEFAULT_LOG_TAIL, DEFAULT_TRADE_LIMIT};
use super::client::ApiClient;
use crate::domain::{BotId, ConnectionTest, ExternalBotConnect, TerminalCommand};
use crate::error::Result;

const EXTERNAL: &str = "external-bots";

/// Read-only telemetry endpoints under `/external-bots/{id}/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotQuery {
    Status,
    Balance,
    Positions,
    Config,
    Profit,
    Ping,
    Version,
    Performance,
}

impl BotQuery {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Balance => "balance",
            Self::Positions => "positions",
            Self::Config => "config",
            Self::Profit => "profit",
            Self::Ping => "ping",
            Self::Version => "version",
            Self::Performance => "performance",
        }
    }
}

impl ApiClient {
    /// `GET /external-bots`
    pub async fn get_external_bots(&self) -> Result<Value> {
        self.get(&[EXTERNAL]).await
    }

    /// `POST /external-bots/test-connection`
    pub async fn test_bot_connection(&self, connection: &ConnectionTest) -> Result<Value> {
        self.post_json(&[EXTERNAL, "test-connection"], connection)
            .await
    }

    /// `POST /external-bots/connect`
    pub async fn connect_external_bot(&self, bot: &ExternalBotConnect) -> Result<Value> {
        self.post_json(&[EXTERNAL, "connect"], bot).await
    }

    /// `GET /external-bots/{id}/<query>`
    pub async fn query_external_bot(&self, bot_id: &BotId, query: BotQuery) -> Result<Value> {
        self.get(&[EXTERNAL, bot_id.as_str(), query.as_str()]).await
    }

    pub async fn get_external_bot_status(&self, bot_id: &BotId) -> Result<Value> {
        self.query_external_bot(bot_id, BotQuery::Status).await
    }

    /// `POST /external-bots/{id}/start`
    pub async fn start_external_bot(&self, bot_id: &BotId) -> Result<Value> {
        self.post(&[EXTERNAL, bot_id.as_str(), "start"]).await
    }

    /// `POST /external-bots/{id}/stop`
    pub async fn stop_external_bot(&self, bot_id: &BotId) -> Result<Value> {
        self.post(&[EXTERNAL, bot_id.as_str(), "stop"]).await
    }

    pub async fn get_external_bot_performance(&self, bot_id: &BotId) -> Result<Value> {
        self.query_external_bot(bot_id, BotQuery::Performance).await
    }

    /// `GET /external-bots/{id}/trades?limit=` (defaults to 50).
    pub async fn get_external_bot_trades(
        &self,
        bot_id: &BotId,
        limit: Option<u32>,
    ) -> Result<Value> {
        let limit = limit.unwrap_or(DEFAULT_TRADE_LIMIT);
        self.get_query(&[EXTERNAL, bot_id.as_str(), "trades"], &[("limit", limit)])
            .await
    }

    /// `GET /external-bots/{id}/logs?tail=` (defaults to 100).
    pub async fn get_external_bot_logs(&self, bot_id: &BotId, tail: Option<u32>) -> Result<Value> {
        let tail = tail.unwrap_or(DEFAULT_LOG_TAIL);
        self.get_query(&[EXTERNAL, bot_id.as_str(), "logs"], &[("tail", tail)])
            .await
    }

    /// `DELETE /external-bots/{id}`
    pub async fn disconnect_external_bot(&self, bot_id: &BotId) -> Result<Value> {
        self.delete(&[EXTERNAL, bot_id.as_str()]).await
    }

    /// Same endpoint as [`Self::disconnect_external_bot`].
    pub async fn delete_external_bot(&self, bot_id: &BotId) -> Result<Value> {
        self.disconnect_external_bot(bot_id).await
    }

    pub async fn get_bot_status(&self, bot_id: &BotId) -> Result<Value> {
        self.query_external_bot(bot_id, BotQuery::Status).await
    }

    pub async fn get_bot_balance(&self, bot_id: &BotId) -> Result<Value> {
        self.query_external_bot(bot_id, BotQuery::Balance).await
    }

    pub async fn get_bot_positions(&self, bot_id: &BotId) -> Result<Value> {
        self.query_external_bot(bot_id, BotQuery::Positions).await
    }

    pub async fn get_bot_config(&self, bot_id: &BotId) -> Result<Value> {
        self.query_external_bot(bot_id, BotQuery::Config).await
    }

    pub async fn get_bot_profit(&self, bot_id: &BotId) -> Result<Value> {
        self.query_external_bot(bot_id, BotQuery::Profit).await
    }

    pub async fn ping_bot(&self, bot_id: &BotId) -> Result<Value> {
        self.query_external_bot(bot_id, BotQuery::Ping).await
    }

    pub async fn get_bot_version(&self, bot_id: &BotId) -> Result<Value> {
        self.query_external_bot(bot_id, BotQuery::Version).await
    }

    /// `POST /external-bots/{id}/reload`
    pub async fn reload_bot_config(&self, bot_id: &BotId) -> Result<Value> {
        self.post(&[EXTERNAL, bot_id.as_str(), "reload"]).await
    }

    /// `POST /external-bots/{id}/terminal/command` with `{command, args}`.
    pub async fn execute_terminal_command(
        &self,
        bot_id: &BotId,
        command: &TerminalCommand,
    ) -> Result<Value> {
        self.post_json(&[EXTERNAL, bot_id.as_str(), "terminal", "command"], command)
            .await
    }
}
