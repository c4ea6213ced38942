//! CLI output formatting.
//!
//! Human-readable output uses colored symbols and indented fields. JSON mode
//! emits one JSON document per line on stdout for scripting; logs always go
//! to stderr so the two never mix.

use std::fmt::Display;
use std::sync::OnceLock;

use owo_colors::OwoColorize;
use parking_lot::RwLock;
use serde_json::{json, Value};

/// Runtime output configuration shared by CLI handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutputConfig {
    /// Emit machine-readable JSON output instead of human-readable text.
    pub json: bool,
    /// Suppress non-essential output.
    pub quiet: bool,
    /// Verbosity level (0 = normal, 1+ = increasingly verbose).
    pub verbose: u8,
}

impl OutputConfig {
    /// Create an output configuration from the global CLI flags.
    #[must_use]
    pub const fn new(json: bool, quiet: bool, verbose: u8) -> Self {
        Self {
            json,
            quiet,
            verbose,
        }
    }
}

static OUTPUT_CONFIG: OnceLock<RwLock<OutputConfig>> = OnceLock::new();

fn config_cell() -> &'static RwLock<OutputConfig> {
    OUTPUT_CONFIG.get_or_init(|| RwLock::new(OutputConfig::default()))
}

/// Snapshot of the current output configuration.
fn read_config() -> OutputConfig {
    *config_cell().read()
}

/// Check if regular (non-JSON) output should be suppressed.
fn regular_output_suppressed(config: OutputConfig) -> bool {
    !config.json && config.quiet
}

/// Emit a JSON line with type and payload structure.
fn emit_json_line(kind: &str, payload: Value) {
    println!(
        "{}",
        json!({
            "type": kind,
            "payload": payload,
        })
    );
}

/// Apply output settings from global CLI flags.
pub fn configure(config: OutputConfig) {
    *config_cell().write() = config;
}

/// Whether output is emitted as JSON lines.
#[must_use]
pub fn is_json() -> bool {
    read_config().json
}

/// Whether non-essential output is suppressed.
#[must_use]
pub fn is_quiet() -> bool {
    read_config().quiet
}

/// Return the global verbosity level from `-v` flags.
#[must_use]
pub fn verbosity() -> u8 {
    read_config().verbose
}

/// Print a labeled value.
pub fn field(label: &str, value: impl Display) {
    let config = read_config();
    let value = value.to_string();

    if config.json {
        emit_json_line("field", json!({ "label": label, "value": value }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {:<12} {}", label.dimmed(), value);
}

/// Print a success line.
pub fn success(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("success", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {} {}", "✓".green(), message);
}

/// Print a warning line.
pub fn warning(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("warning", json!({ "message": message }));
        return;
    }

    println!("  {} {}", "⚠".yellow(), message);
}

/// Print one streamed channel line, tagged with its frame kind.
pub fn frame(label: &str, message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("frame", json!({ "label": label, "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {} {}", label.cyan(), message);
}

/// Format a highlighted value in cyan.
pub fn highlight(value: impl Display) -> String {
    let value = value.to_string();
    if is_json() {
        return value;
    }
    format!("{}", value.cyan())
}

/// Print a note.
pub fn note(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("note", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {}", message.dimmed());
}

/// Print a hint with "hint:" prefix.
pub fn hint(message: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("hint", json!({ "message": message }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    println!("  {}: {}", "hint".cyan().dimmed(), message.dimmed());
}

/// Print multiple lines of content, each indented.
pub fn lines(content: &str) {
    let config = read_config();

    if config.json {
        emit_json_line("lines", json!({ "content": content }));
        return;
    }
    if regular_output_suppressed(config) {
        return;
    }

    for line in content.lines() {
        println!("  {line}");
    }
}

/// Emit a JSON value directly (for commands that need custom JSON output).
pub fn json_output(value: Value) {
    println!("{value}");
}

/// Print a response body from the remote service.
///
/// JSON mode wraps it as `{"command": .., "result": ..}`; human mode
/// pretty-prints it, or prints a success line for an empty body.
pub fn response(command: &str, body: &Value) {
    if is_json() {
        json_output(json!({ "command": command, "result": body }));
        return;
    }
    match body {
        Value::Null => success(&format!("{command} done")),
        Value::String(text) => lines(text),
        other => lines(&serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string())),
    }
}
