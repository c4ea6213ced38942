//! Inbound adapters (driving side).
//!
//! - [`cli`] - Command-line front end

pub mod cli;
