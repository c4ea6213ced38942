//! Command-line interface definitions.
//!
//! Defines the CLI structure using `clap`. Each subcommand corresponds to a
//! view of the bot management service and passes through the navigation
//! guard before issuing any request.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::domain::BotAuthMethod;

/// Session and live command gateway for a remote trading-bot service
#[derive(Parser, Debug)]
#[command(name = "botgate")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file [default: ~/.botgate/config.toml]
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the issued token
    Login(LoginArgs),

    /// Create an account, then sign in
    Register(RegisterArgs),

    /// Forget the stored token
    Logout,

    /// Show whether a token is stored
    Whoami,

    /// Manage hosted bots
    #[command(subcommand)]
    Bots(BotsCommand),

    /// Manage externally hosted bots
    #[command(subcommand)]
    External(ExternalCommand),

    /// Browse and subscribe to shared bots
    #[command(subcommand)]
    Market(MarketCommand),

    /// Run terminal commands against a bot
    #[command(subcommand)]
    Terminal(TerminalAction),

    /// Check where navigating to a path would lead
    Route(RouteArgs),
}

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,
}

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Account email
    #[arg(short, long)]
    pub email: String,

    /// Password (prompted when omitted)
    #[arg(short, long)]
    pub password: Option<String>,

    /// Display name
    #[arg(long)]
    pub full_name: Option<String>,
}

/// A bot identifier argument.
#[derive(Args, Debug)]
pub struct BotArg {
    /// Bot identifier
    pub id: String,
}

/// A JSON document given inline or as a file.
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct JsonBody {
    /// Inline JSON document
    #[arg(long)]
    pub data: Option<String>,

    /// File holding a JSON document
    #[arg(long)]
    pub file: Option<PathBuf>,
}

/// Subcommands for `botgate bots`.
#[derive(Subcommand, Debug)]
pub enum BotsCommand {
    /// List your bots
    List,
    /// Show one bot
    Get(BotArg),
    /// Create a bot from a JSON configuration
    Create(JsonBody),
    /// Delete a bot
    Delete(BotArg),
    /// Start a bot
    Start(BotArg),
    /// Stop a bot
    Stop(BotArg),
    /// Restart a bot
    Restart(BotArg),
    /// Show recent log lines
    Logs {
        id: String,
        /// Number of lines from the end
        #[arg(long)]
        tail: Option<u32>,
    },
    /// Show performance figures
    Performance(BotArg),
    /// Show recent trades
    Trades {
        id: String,
        /// Maximum number of trades
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Replace a bot's configuration
    Config {
        id: String,
        #[command(flatten)]
        body: JsonBody,
    },
}

/// Authentication method accepted by an external bot.
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum AuthMethodArg {
    #[default]
    Token,
    Basic,
}

impl From<AuthMethodArg> for BotAuthMethod {
    fn from(arg: AuthMethodArg) -> Self {
        match arg {
            AuthMethodArg::Token => Self::Token,
            AuthMethodArg::Basic => Self::Basic,
        }
    }
}

/// Connection details of an external bot's API.
#[derive(Args, Debug)]
pub struct ConnectionArgs {
    /// Base URL of the bot's REST API
    #[arg(long)]
    pub api_url: String,

    /// How to authenticate against the bot
    #[arg(long, value_enum, default_value_t = AuthMethodArg::Token)]
    pub auth_method: AuthMethodArg,

    /// API token (token auth)
    #[arg(long)]
    pub api_token: Option<String>,

    /// Username (basic auth)
    #[arg(long)]
    pub username: Option<String>,

    /// Password (basic auth)
    #[arg(long)]
    pub password: Option<String>,
}

/// Subcommands for `botgate external`.
#[derive(Subcommand, Debug)]
pub enum ExternalCommand {
    /// List connected external bots
    List,
    /// Check that an external bot is reachable
    Test(ConnectionArgs),
    /// Connect an external bot
    Connect {
        /// Display name
        #[arg(long)]
        name: String,
        /// Free-form description
        #[arg(long)]
        description: Option<String>,
        #[command(flatten)]
        connection: ConnectionArgs,
    },
    /// Show bot status
    Status(BotArg),
    /// Start trading
    Start(BotArg),
    /// Stop trading
    Stop(BotArg),
    /// Show performance figures
    Performance(BotArg),
    /// Show recent trades
    Trades {
        id: String,
        #[arg(long)]
        limit: Option<u32>,
    },
    /// Show recent log lines
    Logs {
        id: String,
        #[arg(long)]
        tail: Option<u32>,
    },
    /// Disconnect and forget the bot
    Delete(BotArg),
    /// Show balances
    Balance(BotArg),
    /// Show open positions
    Positions(BotArg),
    /// Show the bot's configuration
    Config(BotArg),
    /// Show profit summary
    Profit(BotArg),
    /// Ping the bot
    Ping(BotArg),
    /// Show the bot's software version
    Version(BotArg),
    /// Reload the bot's configuration
    Reload(BotArg),
}

/// Subcommands for `botgate market`.
#[derive(Subcommand, Debug)]
pub enum MarketCommand {
    /// List shared bots
    List,
    /// Subscribe to a shared bot
    Subscribe {
        /// Shared bot identifier
        id: String,
        /// Amount to allocate
        #[arg(long)]
        amount: f64,
    },
    /// Cancel a subscription
    Unsubscribe(BotArg),
    /// List your subscriptions
    Mine,
    /// Show a shared bot's performance
    Performance(BotArg),
}

/// Subcommands for `botgate terminal`.
#[derive(Subcommand, Debug)]
pub enum TerminalAction {
    /// Run one command and print the response
    Exec {
        /// Bot identifier
        bot: String,
        /// Command name
        command: String,
        /// Command arguments
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Stream live frames; each stdin line is sent as a command
    Attach {
        /// Bot identifier
        bot: String,
    },
}

#[derive(Args, Debug)]
pub struct RouteArgs {
    /// Path such as `/bots/42`
    pub path: String,
}
