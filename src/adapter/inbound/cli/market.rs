//! Handlers for `botgate market`.

use super::bots::bot_table;
use super::command::MarketCommand;
use super::{output, route};
use super::operator::Operator;
use crate::domain::{BotId, SubscriptionRequest};
use crate::error::Result;

/// Execute a `botgate market` subcommand.
pub async fn execute(operator: &Operator, command: MarketCommand) -> Result<()> {
    route::enter(operator.guard(), "marketplace")?;
    let api = operator.api();

    match command {
        MarketCommand::List => {
            bot_table("market.list", &api.get_shared_bots_marketplace().await?);
        }
        MarketCommand::Subscribe { id, amount } => {
            let request = SubscriptionRequest {
                shared_bot_id: id,
                allocation_amount: amount,
            };
            let body = api.subscribe_to_shared_bot(&request).await?;
            output::response("market.subscribe", &body);
        }
        MarketCommand::Unsubscribe(bot) => {
            let body = api.unsubscribe_from_shared_bot(&BotId::new(bot.id)).await?;
            output::response("market.unsubscribe", &body);
        }
        MarketCommand::Mine => {
            let body = api.get_my_shared_bot_subscriptions().await?;
            output::response("market.mine", &body);
        }
        MarketCommand::Performance(bot) => {
            let body = api.get_shared_bot_performance(&BotId::new(bot.id)).await?;
            output::response("market.performance", &body);
        }
    }
    Ok(())
}
