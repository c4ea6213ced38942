//! REST gateway for the bot management service.
//!
//! [`ApiClient`] exposes one async method per remote operation. Every
//! method except [`ApiClient::login`] and [`ApiClient::register`] attaches
//! the current credential as `Authorization: Bearer <token>`.

mod auth;
mod bots;
mod client;
mod external;
mod marketplace;

pub use bots::{BotAction, DEFAULT_LOG_TAIL, DEFAULT_TRADE_LIMIT};
pub use client::{ApiClient, API_PREFIX};
pub use external::BotQuery;
