use std::process::ExitCode;

use botgate::adapter::inbound::cli::command::{Cli, ColorChoice};
use botgate::adapter::inbound::cli::dispatch::dispatch;
use botgate::adapter::inbound::cli::operator::Operator;
use botgate::adapter::inbound::cli::{diagnostic, output};
use botgate::infrastructure::bootstrap::Gateway;
use botgate::infrastructure::config::paths;
use botgate::infrastructure::config::settings::Config;
use clap::Parser;
use tracing::debug;

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    // Both reqwest and tokio-tungstenite pull in rustls; pick the provider once.
    let _ = rustls::crypto::ring::default_provider().install_default();

    let cli = Cli::parse();
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {}
    }
    output::configure(output::OutputConfig::new(cli.json, cli.quiet, cli.verbose));

    let config_path = cli.config.clone().unwrap_or_else(paths::default_config);
    let result: botgate::error::Result<()> = async {
        let config = Config::load_or_default(&config_path)?.with_env_overrides()?;
        config
            .logging
            .clone()
            .with_verbosity(output::verbosity())
            .init();
        debug!(config = %config_path.display(), "Configuration loaded");

        let gateway = Gateway::build(&config)?;
        let operator = Operator::new(
            gateway.api,
            gateway.session,
            gateway.channels,
            gateway.guard,
            config.storage.path(),
        );
        dispatch(cli.command, &operator).await
    }
    .await;

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{:?}", diagnostic::report(err, &config_path));
            ExitCode::FAILURE
        }
    }
}
