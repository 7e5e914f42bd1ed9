//! Configuration and CLI argument handling

use clap::Parser;

use crate::state::{DurationBounds, SessionController, BREAK_BOUNDS, FOCUS_BOUNDS};

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "pomodoro-server")]
#[command(about = "A state-managed HTTP server driving a Pomodoro focus/break timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initial focus duration in minutes (5-60, multiple of 5)
    #[arg(short, long, default_value_t = FOCUS_BOUNDS.default)]
    pub focus: u32,

    /// Initial break duration in minutes (1-15)
    #[arg(short, long = "break", default_value_t = BREAK_BOUNDS.default)]
    pub break_minutes: u32,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

fn check(name: &str, value: u32, bounds: DurationBounds) -> Result<u32, String> {
    if bounds.accepts(value) {
        Ok(value)
    } else {
        Err(format!(
            "{} duration must be between {} and {} minutes in steps of {}, got {}",
            name, bounds.min, bounds.max, bounds.step, value
        ))
    }
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

    /// Build the initial controller, rejecting out-of-range durations
    pub fn controller(&self) -> Result<SessionController, String> {
        let focus = check("Focus", self.focus, FOCUS_BOUNDS)?;
        let brk = check("Break", self.break_minutes, BREAK_BOUNDS)?;
        Ok(SessionController::with_durations(focus, brk))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Config {
        Config::try_parse_from(std::iter::once("pomodoro-server").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn defaults() {
        let config = parse(&[]);
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.controller().unwrap(), SessionController::new());
    }

    #[test]
    fn custom_durations() {
        let config = parse(&["--focus", "50", "--break", "10", "-v"]);
        let controller = config.controller().unwrap();
        assert_eq!((controller.focus_minutes, controller.break_minutes), (50, 10));
        assert_eq!(config.log_level(), "debug");
    }

    #[test]
    fn rejects_off_grid_durations() {
        assert!(parse(&["--focus", "27"]).controller().is_err());
        assert!(parse(&["--focus", "65"]).controller().is_err());
        assert!(parse(&["--break", "0"]).controller().is_err());
        assert!(parse(&["--break", "16"]).controller().is_err());
    }
}
