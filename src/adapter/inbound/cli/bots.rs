//! Handlers for `botgate bots`.

use serde_json::Value;
use tabled::{Table, Tabled};

use super::command::{BotsCommand, JsonBody};
use super::{output, route};
use super::operator::Operator;
use crate::domain::BotId;
use crate::error::{ConfigError, Result};

#[derive(Tabled)]
struct BotRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Status")]
    status: String,
}

fn text(bot: &Value, key: &str) -> String {
    match bot.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => "-".to_string(),
        Some(other) => other.to_string(),
    }
}

impl BotRow {
    fn from_value(bot: &Value) -> Self {
        let id = match bot.get("bot_id") {
            Some(Value::String(id)) => id.clone(),
            _ => text(bot, "id"),
        };
        Self {
            id,
            name: text(bot, "name"),
            kind: text(bot, "bot_type"),
            status: text(bot, "status"),
        }
    }
}

/// Print a list of bots as a table, or the raw body in JSON mode.
pub(super) fn bot_table(command: &str, body: &Value) {
    match body.as_array() {
        Some(bots) if !output::is_json() => {
            if output::is_quiet() {
                return;
            }
            if bots.is_empty() {
                output::note("No bots");
                return;
            }
            let rows: Vec<BotRow> = bots.iter().map(BotRow::from_value).collect();
            println!("{}", Table::new(rows));
        }
        _ => output::response(command, body),
    }
}

/// Read a JSON document from `--data` or `--file`.
pub(super) fn read_body(body: JsonBody) -> Result<Value> {
    let raw = match (body.data, body.file) {
        (Some(data), _) => data,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Err(ConfigError::MissingField { field: "data" }.into()),
    };
    Ok(serde_json::from_str(&raw)?)
}

/// Execute a `botgate bots` subcommand.
pub async fn execute(operator: &Operator, command: BotsCommand) -> Result<()> {
    let api = operator.api();
    match command {
        BotsCommand::List => {
            route::enter(operator.guard(), "bots")?;
            bot_table("bots.list", &api.get_bots().await?);
        }
        BotsCommand::Create(body) => {
            route::enter(operator.guard(), "create-bot")?;
            let config = read_body(body)?;
            output::response("bots.create", &api.create_bot(&config).await?);
        }
        BotsCommand::Get(bot) => {
            route::enter(operator.guard(), "bot")?;
            output::response("bots.get", &api.get_bot(&BotId::new(bot.id)).await?);
        }
        BotsCommand::Delete(bot) => {
            route::enter(operator.guard(), "bot")?;
            output::response("bots.delete", &api.delete_bot(&BotId::new(bot.id)).await?);
        }
        BotsCommand::Start(bot) => {
            route::enter(operator.guard(), "bot")?;
            output::response("bots.start", &api.start_bot(&BotId::new(bot.id)).await?);
        }
        BotsCommand::Stop(bot) => {
            route::enter(operator.guard(), "bot")?;
            output::response("bots.stop", &api.stop_bot(&BotId::new(bot.id)).await?);
        }
        BotsCommand::Restart(bot) => {
            route::enter(operator.guard(), "bot")?;
            output::response("bots.restart", &api.restart_bot(&BotId::new(bot.id)).await?);
        }
        BotsCommand::Logs { id, tail } => {
            route::enter(operator.guard(), "bot")?;
            output::response("bots.logs", &api.get_bot_logs(&BotId::new(id), tail).await?);
        }
        BotsCommand::Performance(bot) => {
            route::enter(operator.guard(), "bot")?;
            let body = api.get_bot_performance(&BotId::new(bot.id)).await?;
            output::response("bots.performance", &body);
        }
        BotsCommand::Trades { id, limit } => {
            route::enter(operator.guard(), "bot")?;
            output::response("bots.trades", &api.get_bot_trades(&BotId::new(id), limit).await?);
        }
        BotsCommand::Config { id, body } => {
            route::enter(operator.guard(), "bot")?;
            let config = read_body(body)?;
            let body = api.update_bot_config(&BotId::new(id), &config).await?;
            output::response("bots.config", &body);
        }
    }
    Ok(())
}
