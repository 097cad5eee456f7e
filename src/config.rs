//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

/// Longest accepted session (24 hours)
pub const MAX_SESSION_MINUTES: u64 = 24 * 60;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-server")]
#[command(about = "A pomodoro countdown timer and task list served over HTTP")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Session length in minutes
    #[arg(short, long, default_value = "25", value_parser = clap::value_parser!(u64).range(1..=MAX_SESSION_MINUTES))]
    pub session: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    /// Session length as a duration
    pub fn session_length(&self) -> Duration {
        self.session
            .checked_mul(60)
            .map(Duration::from_secs)
            .unwrap_or(Duration::MAX)
    }
}
