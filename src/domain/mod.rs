//! Transport-agnostic domain types.

mod channel;
mod command;
mod credential;
mod id;
mod payload;
mod route;

pub use channel::{ChannelEvent, ChannelMessage, CloseInfo, CLOSE_ABNORMAL, CLOSE_NORMAL};
pub use command::TerminalCommand;
pub use credential::{AuthState, Credential};
pub use id::BotId;
pub use payload::{
    BotAuthMethod, ConnectionTest, ExternalBotConnect, LoginForm, RegisterRequest,
    SubscriptionRequest, TokenResponse,
};
pub use route::{RouteDescriptor, RouteTable};
