//! Countdown tick background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, Instant};
use tracing::{debug, error, info};

use crate::state::AppState;

const TICK_PERIOD: Duration = Duration::from_secs(1);

/// Background task that owns the one-second tick registration.
///
/// A registration (an interval) exists only while the session is running and
/// is dropped as soon as the published run changes, so there is never more
/// than one live interval and no tick outlives the run that created it.
pub async fn countdown_task(state: Arc<AppState>) {
    info!("Starting countdown task");

    let mut run_rx = state.subscribe_runs();

    loop {
        let current = *run_rx.borrow_and_update();

        let Some(run) = current else {
            // Idle: wait for the next start
            if run_rx.changed().await.is_err() {
                break;
            }
            continue;
        };

        debug!("Registering ticks for run {}", run);
        let mut ticks = interval_at(Instant::now() + TICK_PERIOD, TICK_PERIOD);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    match state.tick(run) {
                        Ok(Some(_)) => debug!("Run {} completed", run),
                        Ok(None) => {}
                        Err(e) => error!("Failed to apply tick: {}", e),
                    }
                }

                // Pause, reset, selection, completion or a new start
                changed = run_rx.changed() => {
                    if changed.is_err() {
                        info!("Run channel closed, stopping countdown task");
                        return;
                    }
                    debug!("Tearing down tick registration for run {}", run);
                    break;
                }
            }
        }
    }

    info!("Countdown task stopped");
}
