//! Alert sound playback on phase changes

use std::io::Write;
use tokio::process::Command;
use tracing::{debug, info};

/// How a phase change is announced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AlertSound {
    /// Write a terminal bell to stdout
    #[default]
    Bell,
    /// Run a shell command, e.g. `paplay /usr/share/sounds/freedesktop/stereo/complete.oga`
    Command(String),
}

impl AlertSound {
    /// Use the configured command if there is one, otherwise the terminal bell
    pub fn from_command(command: Option<String>) -> Self {
        match command {
            Some(command) if !command.trim().is_empty() => AlertSound::Command(command),
            _ => AlertSound::Bell,
        }
    }
}

/// Play the alert once
pub async fn play_alert(sound: &AlertSound) -> Result<(), String> {
    match sound {
        AlertSound::Bell => ring_terminal_bell(),
        AlertSound::Command(command) => run_alert_command(command).await,
    }
}

fn ring_terminal_bell() -> Result<(), String> {
    let mut stdout = std::io::stdout();
    stdout
        .write_all(b"\x07")
        .and_then(|()| stdout.flush())
        .map_err(|e| format!("Failed to ring terminal bell: {}", e))?;

    debug!("Terminal bell rung");
    Ok(())
}

/// Run an alert command through `sh -c`
pub async fn run_alert_command(command: &str) -> Result<(), String> {
    debug!("Running alert command: {}", command);

    let output = Command::new("sh")
        .args(["-c", command])
        .output()
        .await
        .map_err(|e| format!("Failed to execute alert command: {}", e))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(format!("Alert command failed ({}): {}", output.status, stderr.trim()));
    }

    info!("Alert command completed");
    Ok(())
}
