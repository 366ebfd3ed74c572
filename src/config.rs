//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::Durations;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "match-whistle")]
#[command(about = "A referee match timer with whistle cues and a local control surface")]
#[command(version)]
pub struct Config {
    /// Port to bind the control surface to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Half duration in minutes (1-180)
    #[arg(long = "half", default_value = "10")]
    pub half_minutes: u32,

    /// Break duration in minutes (1-60)
    #[arg(long = "break-minutes", default_value = "5")]
    pub break_minutes: u32,

    /// Overtime duration in minutes (1-60)
    #[arg(long = "overtime", default_value = "5")]
    pub overtime_minutes: u32,

    /// Play overtime when the second half ends
    #[arg(long)]
    pub overtime_enabled: bool,

    /// Ring the terminal bell for whistles instead of only logging them
    #[arg(long)]
    pub bell: bool,

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

    /// Initial durations; out-of-range minutes are clamped
    pub fn durations(&self) -> Durations {
        Durations::from_minutes(
            self.half_minutes,
            self.break_minutes,
            self.overtime_minutes,
            self.overtime_enabled,
        )
    }
}
