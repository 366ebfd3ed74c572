//! Countdown background task

use std::{sync::Arc, time::Duration};
use tokio::time::sleep;
use tracing::{debug, error, info};

use crate::state::AppState;

/// Polling interval of the countdown loop
pub const TICK_INTERVAL: Duration = Duration::from_millis(50);

/// Background task that runs a countdown loop whenever the timer is running.
///
/// A loop instance exits as soon as it observes the timer stopped; the next
/// start spawns a fresh one. Returns when the snapshot channel closes or the
/// timer can no longer be locked.
pub async fn countdown_task(state: Arc<AppState>) {
    info!("Starting countdown task");

    let mut snapshot_rx = state.subscribe();

    loop {
        let running = snapshot_rx.borrow_and_update().running;
        if running {
            if let Err(e) = run_countdown(&state).await {
                error!("Countdown tick failed, stopping countdown task: {}", e);
                return;
            }
            // state changes made by the loop itself are already handled
            snapshot_rx.borrow_and_update();
            continue;
        }

        if snapshot_rx.changed().await.is_err() {
            debug!("Snapshot channel closed, stopping countdown task");
            return;
        }
    }
}

/// One countdown loop instance: tick every [`TICK_INTERVAL`] until stopped
async fn run_countdown(state: &AppState) -> Result<(), String> {
    debug!("Countdown loop started");

    loop {
        let snapshot = state.tick().await?;
        if !snapshot.running {
            debug!(
                "Countdown loop stopped in {:?} with {} ms left",
                snapshot.phase, snapshot.remaining_ms
            );
            return Ok(());
        }

        sleep(TICK_INTERVAL).await;
    }
}
