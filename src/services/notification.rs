//! Desktop notifications for finished timers

use notify_rust::Notification;
use tracing::{debug, info};

use crate::state::CompletionEvent;

const APP_NAME: &str = "pomodoro-timer";
const SUMMARY: &str = "Timer finished!";

/// Body text shown for a completion, e.g. `Pomodoro: Focus`
pub fn notification_body(event: &CompletionEvent) -> String {
    format!("{}: {}", event.timer_name, event.activity)
}

/// Post a desktop notification for a finished timer
pub async fn show_completion_notification(event: &CompletionEvent) -> Result<(), String> {
    let body = notification_body(event);
    debug!("Posting desktop notification: {}", body);

    // notify-rust blocks on the platform notification service
    tokio::task::spawn_blocking(move || {
        Notification::new()
            .appname(APP_NAME)
            .summary(SUMMARY)
            .body(&body)
            .icon("alarm-clock")
            .show()
            .map(|_| ())
            .map_err(|e| format!("Failed to show notification: {}", e))
    })
    .await
    .map_err(|e| format!("Notification task panicked: {}", e))??;

    info!("Desktop notification posted");
    Ok(())
}
