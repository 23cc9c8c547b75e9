//! Phase-change alert background task

use tokio::sync::broadcast::{self, error::RecvError};
use tracing::{info, warn};

use crate::{
    services::{play_alert, AlertSound},
    state::PhaseTransition,
};

/// Background task that plays the alert sound for every phase transition.
///
/// Each alert runs on its own task so a slow or failing player never holds
/// up the next transition.
pub async fn alert_task(mut transition_rx: broadcast::Receiver<PhaseTransition>, sound: AlertSound) {
    info!("Starting alert task ({:?})", sound);

    loop {
        match transition_rx.recv().await {
            Ok(transition) => {
                info!("Playing alert for {} -> {}", transition.from, transition.to);
                let sound = sound.clone();
                tokio::spawn(async move {
                    if let Err(e) = play_alert(&sound).await {
                        warn!("Alert playback failed: {}", e);
                    }
                });
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Alert task lagged, {} alerts skipped", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Transition channel closed, alert task stopped");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use crate::state::Phase;

    #[tokio::test]
    async fn test_alert_runs_command_for_each_transition() {
        let marker = std::env::temp_dir().join(format!("pomodoro-alert-{}", std::process::id()));
        let _ = std::fs::remove_file(&marker);

        let (tx, rx) = broadcast::channel(4);
        let sound = AlertSound::Command(format!("echo alert >> '{}'", marker.display()));
        let handle = tokio::spawn(alert_task(rx, sound));

        for (from, to) in [(Phase::Focusing, Phase::OnBreak), (Phase::OnBreak, Phase::Focusing)] {
            tx.send(PhaseTransition { from, to, time_remaining_seconds: 60 }).unwrap();
        }

        let mut lines = 0;
        for _ in 0..50 {
            tokio::time::sleep(Duration::from_millis(100)).await;
            lines = std::fs::read_to_string(&marker)
                .map(|contents| contents.lines().count())
                .unwrap_or(0);
            if lines == 2 {
                break;
            }
        }
        assert_eq!(lines, 2);

        drop(tx);
        handle.await.unwrap();
        let _ = std::fs::remove_file(&marker);
    }

    #[tokio::test]
    async fn test_failed_alert_does_not_stop_task() {
        let (tx, rx) = broadcast::channel(4);
        let handle = tokio::spawn(alert_task(rx, AlertSound::Command("exit 1".to_string())));

        tx.send(PhaseTransition {
            from: Phase::Focusing,
            to: Phase::OnBreak,
            time_remaining_seconds: 300,
        })
        .unwrap();
        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(!handle.is_finished());

        drop(tx);
        handle.await.unwrap();
    }
}
