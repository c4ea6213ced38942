//! Handlers for `botgate terminal`.
//!
//! `exec` goes through the request gateway and prints the response. `attach`
//! opens a live channel session, prints pushed frames as they arrive, and
//! relays each stdin line as a terminal command.

use serde_json::json;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use super::command::TerminalAction;
use super::{output, route};
use super::operator::Operator;
use crate::domain::{BotId, ChannelEvent, ChannelMessage, CloseInfo, TerminalCommand};
use crate::error::Result;

/// Execute a `botgate terminal` subcommand.
pub async fn execute(operator: &Operator, action: TerminalAction) -> Result<()> {
    route::enter(operator.guard(), "terminal")?;
    match action {
        TerminalAction::Exec { bot, command, args } => {
            let command = TerminalCommand::new(command).with_args(args);
            let body = operator
                .api()
                .execute_terminal_command(&BotId::new(bot), &command)
                .await?;
            output::response("terminal.exec", &body);
            Ok(())
        }
        TerminalAction::Attach { bot } => attach(operator, BotId::new(bot)).await,
    }
}

async fn attach(operator: &Operator, bot_id: BotId) -> Result<()> {
    let (handle, mut events) = operator.channels().open_stream(bot_id.clone()).await?;
    output::success(&format!("Attached to {}", output::highlight(&bot_id)));
    output::hint("each line is sent as a command; Ctrl-C detaches");

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(ChannelEvent::Message(raw)) => print_message(ChannelMessage::classify(raw)),
                Some(ChannelEvent::Error(err)) => output::warning(&err.to_string()),
                Some(ChannelEvent::Closed(info)) => {
                    print_close(&info);
                    return Ok(());
                }
                None => return Ok(()),
            },
            line = stdin.next_line(), if stdin_open => match line? {
                Some(line) => {
                    if let Some(command) = TerminalCommand::parse_line(&line) {
                        debug!(command = %command.command, "Relaying terminal command");
                        handle.send(&command)?;
                    }
                }
                // Keep streaming after stdin ends; Ctrl-C detaches.
                None => stdin_open = false,
            },
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    handle.close().await?;
    while let Some(event) = events.recv().await {
        if let ChannelEvent::Closed(info) = event {
            print_close(&info);
        }
    }
    Ok(())
}

fn print_message(message: ChannelMessage) {
    if output::is_json() {
        output::json_output(json!({ "type": "frame", "payload": message.raw() }));
        return;
    }
    match message {
        ChannelMessage::Connected { bot_id, .. } => {
            output::success(&format!(
                "Connected to {}",
                bot_id.as_deref().unwrap_or("bot")
            ));
        }
        ChannelMessage::BotUpdate { data, .. } => {
            output::frame("update", &data.to_string());
        }
        ChannelMessage::Logs { lines, level, .. } => {
            let label = level.map_or_else(|| "log".to_string(), |l| l.to_ascii_lowercase());
            for line in lines.lines().filter(|l| !l.trim().is_empty()) {
                output::frame(&label, line);
            }
        }
        ChannelMessage::Other { kind, raw } => {
            output::frame(kind.as_deref().unwrap_or("frame"), &raw.to_string());
        }
    }
}

fn print_close(info: &CloseInfo) {
    let message = if info.reason.is_empty() {
        format!("Channel closed ({})", info.code)
    } else {
        format!("Channel closed ({}): {}", info.code, info.reason)
    };
    if info.is_normal() {
        output::note(&message);
    } else {
        output::warning(&message);
    }
}
