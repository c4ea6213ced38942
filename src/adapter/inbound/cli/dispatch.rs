//! Routes a parsed command to its handler.

use super::command::Commands;
use super::operator::Operator;
use super::{auth, bots, external, market, route, terminal};
use crate::error::Result;

/// Run one parsed command.
pub async fn dispatch(command: Commands, operator: &Operator) -> Result<()> {
    match command {
        Commands::Login(args) => auth::login(operator, args).await,
        Commands::Register(args) => auth::register(operator, args).await,
        Commands::Logout => {
            auth::logout(operator);
            Ok(())
        }
        Commands::Whoami => {
            auth::whoami(operator);
            Ok(())
        }
        Commands::Bots(command) => bots::execute(operator, command).await,
        Commands::External(command) => external::execute(operator, command).await,
        Commands::Market(command) => market::execute(operator, command).await,
        Commands::Terminal(action) => terminal::execute(operator, action).await,
        Commands::Route(args) => route::execute(operator.guard(), &args),
    }
}
