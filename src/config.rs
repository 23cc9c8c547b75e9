//! Configuration and CLI argument handling

use clap::Parser;

use crate::services::AlertSound;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "pomodoro-server")]
#[command(about = "A state-managed HTTP server driving a single Pomodoro timer")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20525")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Shell command played on every phase change (terminal bell if unset)
    #[arg(short, long)]
    pub alert_command: Option<String>,

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

    /// How phase changes are announced
    pub fn alert_sound(&self) -> AlertSound {
        AlertSound::from_command(self.alert_command.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::try_parse_from(["pomodoro-server"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20525");
        assert_eq!(config.log_level(), "info");
        assert_eq!(config.alert_sound(), AlertSound::Bell);
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "pomodoro-server",
            "-p",
            "8080",
            "--host",
            "0.0.0.0",
            "--alert-command",
            "paplay bell.oga",
            "-v",
        ])
        .unwrap();
        assert_eq!(config.address(), "0.0.0.0:8080");
        assert_eq!(config.log_level(), "debug");
        assert_eq!(config.alert_sound(), AlertSound::Command("paplay bell.oga".to_string()));
    }
}
