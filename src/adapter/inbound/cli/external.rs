//! Handlers for `botgate external`.

use super::bots::bot_table;
use super::command::{ConnectionArgs, ExternalCommand};
use super::{output, route};
use super::operator::Operator;
use crate::domain::{BotId, ConnectionTest, ExternalBotConnect};
use crate::error::Result;

impl From<ConnectionArgs> for ConnectionTest {
    fn from(args: ConnectionArgs) -> Self {
        Self {
            api_url: args.api_url,
            auth_method: args.auth_method.into(),
            api_token: args.api_token,
            username: args.username,
            password: args.password,
        }
    }
}

/// Execute a `botgate external` subcommand.
pub async fn execute(operator: &Operator, command: ExternalCommand) -> Result<()> {
    route::enter(operator.guard(), "bots")?;
    let api = operator.api();

    let (name, body) = match command {
        ExternalCommand::List => {
            bot_table("external.list", &api.get_external_bots().await?);
            return Ok(());
        }
        ExternalCommand::Test(connection) => (
            "external.test",
            api.test_bot_connection(&connection.into()).await?,
        ),
        ExternalCommand::Connect {
            name,
            description,
            connection,
        } => {
            let bot = ExternalBotConnect {
                name,
                description,
                connection: connection.into(),
            };
            ("external.connect", api.connect_external_bot(&bot).await?)
        }
        ExternalCommand::Status(bot) => (
            "external.status",
            api.get_external_bot_status(&BotId::new(bot.id)).await?,
        ),
        ExternalCommand::Start(bot) => (
            "external.start",
            api.start_external_bot(&BotId::new(bot.id)).await?,
        ),
        ExternalCommand::Stop(bot) => (
            "external.stop",
            api.stop_external_bot(&BotId::new(bot.id)).await?,
        ),
        ExternalCommand::Performance(bot) => (
            "external.performance",
            api.get_external_bot_performance(&BotId::new(bot.id)).await?,
        ),
        ExternalCommand::Trades { id, limit } => (
            "external.trades",
            api.get_external_bot_trades(&BotId::new(id), limit).await?,
        ),
        ExternalCommand::Logs { id, tail } => (
            "external.logs",
            api.get_external_bot_logs(&BotId::new(id), tail).await?,
        ),
        ExternalCommand::Delete(bot) => (
            "external.delete",
            api.delete_external_bot(&BotId::new(bot.id)).await?,
        ),
        ExternalCommand::Balance(bot) => (
            "external.balance",
            api.get_bot_balance(&BotId::new(bot.id)).await?,
        ),
        ExternalCommand::Positions(bot) => (
            "external.positions",
            api.get_bot_positions(&BotId::new(bot.id)).await?,
        ),
        ExternalCommand::Config(bot) => (
            "external.config",
            api.get_bot_config(&BotId::new(bot.id)).await?,
        ),
        ExternalCommand::Profit(bot) => (
            "external.profit",
            api.get_bot_profit(&BotId::new(bot.id)).await?,
        ),
        ExternalCommand::Ping(bot) => ("external.ping", api.ping_bot(&BotId::new(bot.id)).await?),
        ExternalCommand::Version(bot) => (
            "external.version",
            api.get_bot_version(&BotId::new(bot.id)).await?,
        ),
        ExternalCommand::Reload(bot) => (
            "external.reload",
            api.reload_bot_config(&BotId::new(bot.id)).await?,
        ),
    };

    output::response(name, &body);
    Ok(())
}
