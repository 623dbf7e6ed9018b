//! Command-line interface for corridormap
//!
//! - Argument parsing (`args`)
//! - Runtime setup (`setup`)

pub mod args;
pub mod setup;

pub use args::{AggregateArgs, Cli, Commands, ModeArg, OutputFormat, PresetArg, ScoreArgs};
pub use setup::{configure_thread_pool, init_logging, log_level};

/// Parse CLI arguments using Clap
pub fn parse_args() -> Cli {
    use clap::Parser;
    Cli::parse()
}
