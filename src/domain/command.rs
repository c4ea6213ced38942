//! Interactive terminal commands relayed to a bot.

use serde::{Deserialize, Serialize};

/// A terminal command: a name plus ordered string arguments.
///
/// The serialized form is the body of the REST terminal endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminalCommand {
    pub command: String,
    #[serde(default)]
    pub args: Vec<String>,
}

impl TerminalCommand {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Parse a whitespace-separated line such as `forcesell 3 all`.
    ///
    /// Returns `None` for a blank line.
    #[must_use]
    pub fn parse_line(line: &str) -> Option<Self> {
        let mut parts = line.split_whitespace();
        let command = parts.next()?;
        Some(Self::new(command).with_args(parts))
    }

    /// Frame sent over a live channel session.
    #[must_use]
    pub fn to_channel_frame(&self) -> serde_json::Value {
        serde_json::json!({
            "type": "terminal_command",
            "command": self.command,
            "args": self.args,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rest_body_carries_command_and_args() {
        let cmd = TerminalCommand::new("forcesell").with_args(["3"]);
        let json = serde_json::to_value(&cmd).unwrap();
        assert_eq!(json, serde_json::json!({"command": "forcesell", "args": ["3"]}));
    }

    #[test]
    fn command_without_args_serializes_empty_list() {
        let json = serde_json::to_value(TerminalCommand::new("status")).unwrap();
        assert_eq!(json["args"], serde_json::json!([]));
    }

    #[test]
    fn parse_line_splits_on_whitespace() {
        let cmd = TerminalCommand::parse_line("  balance   USDT  ").unwrap();
        assert_eq!(cmd.command, "balance");
        assert_eq!(cmd.args, vec!["USDT".to_string()]);
    }

    #[test]
    fn parse_line_rejects_blank() {
        assert!(TerminalCommand::parse_line("   ").is_none());
    }

    #[test]
    fn channel_frame_is_tagged() {
        let frame = TerminalCommand::new("ping").to_channel_frame();
        assert_eq!(frame["type"], "terminal_command");
        assert_eq!(frame["command"], "ping");
    }
}
