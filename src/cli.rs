//! Command line flags
//!
//! The only accepted arguments are `--quiet` and `--silent`. Help and version
//! flags are switched off so anything else is rejected.

use clap::Parser;
use tracing::level_filters::LevelFilter;

#[derive(Debug, Parser)]
#[command(
    name = "g600-controller",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true
)]
pub struct Cli {
    /// Only log startup and errors
    #[arg(long)]
    pub quiet: bool,

    /// Log nothing at all
    #[arg(long)]
    pub silent: bool,
}

/// Output verbosity, most verbose last
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Silent,
    Quiet,
    Full,
}

impl LogLevel {
    pub fn level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Silent => LevelFilter::OFF,
            LogLevel::Quiet => LevelFilter::INFO,
            LogLevel::Full => LevelFilter::DEBUG,
        }
    }
}

impl Cli {
    pub fn log_level(&self) -> LogLevel {
        if self.silent {
            LogLevel::Silent
        } else if self.quiet {
            LogLevel::Quiet
        } else {
            LogLevel::Full
        }
    }
}
