//! Command-line interface
//!
//! One subcommand per endpoint family, executed by [`Runner`] against the
//! library client. Global flags select credentials, endpoints, and output
//! format; a JSON config file can carry the same settings.

mod commands;
mod runner;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::Runner;
