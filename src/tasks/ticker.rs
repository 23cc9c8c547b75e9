//! Periodic ticker background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::state::AppState;

/// Countdown cadence
pub const TICK_INTERVAL: Duration = Duration::from_secs(1);

/// Background task that ticks the timer once per second while it is running.
///
/// The interval only exists while the run flag is set; pausing or resetting
/// drops it, and resuming starts a fresh one a full period later, even when
/// the stop and restart land between two polls. Late ticks
/// are delayed rather than bunched up, so lost time is never caught up.
pub async fn ticker_task(state: Arc<AppState>) {
    info!("Starting ticker task");

    let mut running_rx = state.running_tx.subscribe();

    'idle: loop {
        if !*running_rx.borrow_and_update() {
            // Wait for the timer to start
            if running_rx.changed().await.is_err() {
                break 'idle;
            }
            continue;
        }

        debug!("Ticker active");
        let mut interval = interval_at(Instant::now() + TICK_INTERVAL, TICK_INTERVAL);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = interval.tick() => {
                    if let Err(e) = state.tick() {
                        error!("Failed to tick timer: {}", e);
                    }
                }

                changed = running_rx.changed() => {
                    if changed.is_err() {
                        break 'idle;
                    }
                    if !*running_rx.borrow_and_update() {
                        debug!("Ticker suspended");
                        break;
                    }
                    // Stopped and restarted between polls; the new run gets a fresh interval
                    debug!("Ticker restarted");
                    continue 'idle;
                }
            }
        }
    }

    info!("Run state channel closed, ticker task stopped");
}
