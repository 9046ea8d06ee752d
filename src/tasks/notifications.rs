//! Completion notification background task

use std::{path::PathBuf, sync::Arc};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, info, warn};

use crate::{
    services::{play_completion_sound, show_completion_notification},
    state::{AppState, CompletionEvent},
};

/// Which side effects to run for a completion
#[derive(Debug, Clone, Default)]
pub struct NotificationSettings {
    pub desktop_notifications: bool,
    pub sound_file: Option<PathBuf>,
}

/// Background task turning completion events into notifications and sound.
///
/// Failures are logged and dropped here; the session never sees them.
pub async fn notification_task(state: Arc<AppState>, settings: NotificationSettings) {
    info!("Starting notification task");

    let mut completions = state.subscribe_completions();

    loop {
        match completions.recv().await {
            Ok(event) => {
                let effects = notify(&state, &settings, &event).await;
                debug!("Completion of timer {} handled: {:?}", event.timer_id, effects);
            }
            Err(RecvError::Lagged(skipped)) => {
                warn!("Notification task lagged, {} completions skipped", skipped);
            }
            Err(RecvError::Closed) => {
                info!("Completion channel closed, stopping notification task");
                break;
            }
        }
    }
}

/// Side effects a completion went on to attempt
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionEffects {
    pub desktop_attempted: bool,
    pub sound_attempted: bool,
}

async fn notify(
    state: &AppState,
    settings: &NotificationSettings,
    event: &CompletionEvent,
) -> CompletionEffects {
    let mut effects = CompletionEffects::default();

    if settings.desktop_notifications {
        effects.desktop_attempted = true;
        if let Err(e) = show_completion_notification(event).await {
            warn!("{}", e);
        }
    } else {
        debug!("Desktop notifications disabled");
    }

    // Sound is read at completion time so a mute just before the end applies
    match state.sound_enabled() {
        Ok(true) => {
            effects.sound_attempted = true;
            if let Err(e) = play_completion_sound(settings.sound_file.as_deref()).await {
                warn!("Failed to play completion sound: {}", e);
            }
        }
        Ok(false) => debug!("Sound muted, skipping completion sound"),
        Err(e) => warn!("Failed to read sound preference: {}", e),
    }

    effects
}
