//! CLI module graph.

pub mod auth;
pub mod bots;
pub mod command;
pub mod diagnostic;
pub mod dispatch;
pub mod external;
pub mod market;
pub mod operator;
pub mod output;
pub mod route;
pub mod terminal;
