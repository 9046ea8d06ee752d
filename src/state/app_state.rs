//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

use super::{
    engine::RunId,
    registry::DeleteOutcome,
    session::{CompletionEvent, Session, SessionSnapshot},
    theme::{ColorRole, ThemeMode},
    timer::{Timer, TimerField, TimerId},
};

/// Shared application state: the session plus change notification channels
#[derive(Debug)]
pub struct AppState {
    /// The timer session (registry, countdown, themes, sound)
    pub session: Arc<Mutex<Session>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Snapshot published after every state change
    pub state_change_tx: broadcast::Sender<SessionSnapshot>,
    /// Completion events, one per countdown reaching zero
    pub completion_tx: broadcast::Sender<CompletionEvent>,
    /// Run id of the tick registration that should exist, `None` while idle
    pub run_tx: watch::Sender<Option<RunId>>,
    /// Keep the receiver alive to prevent channel closure
    pub _run_rx: watch::Receiver<Option<RunId>>,
}

impl AppState {
    /// Create a new AppState around a fresh session
    pub fn new(port: u16, host: String, session: Session) -> Self {
        let (state_change_tx, _) = broadcast::channel(100);
        let (completion_tx, _) = broadcast::channel(16);
        let (run_tx, run_rx) = watch::channel(session.running_run());

        Self {
            session: Arc::new(Mutex::new(session)),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            state_change_tx,
            completion_tx,
            run_tx,
            _run_rx: run_rx,
        }
    }

    /// Apply an update to the session and notify listeners.
    ///
    /// The action is recorded and a snapshot broadcast only when the session
    /// actually changed; rejected operations leave no trace.
    pub fn update_session<F, T>(&self, action: &str, updater: F) -> Result<T, String>
    where
        F: FnOnce(&mut Session) -> T,
    {
        let mut session = self.session.lock()
            .map_err(|e| format!("Failed to lock session: {}", e))?;

        let before = (session.snapshot(), session.running_run());
        let result = updater(&mut *session);
        let after = (session.snapshot(), session.running_run());
        let changed = after != before;

        // Publish under the guard so concurrent publishers cannot reorder
        if changed {
            self.publish(after.0, after.1);
        }
        drop(session);

        if changed {
            if let Ok(mut last_action) = self.last_action.lock() {
                *last_action = Some(action.to_string());
            }
            if let Ok(mut last_time) = self.last_action_time.lock() {
                *last_time = Some(Utc::now());
            }
        } else {
            debug!("Action '{}' left the session unchanged", action);
        }

        Ok(result)
    }

    /// Notify snapshot subscribers and move the tick registration if needed.
    /// Must be called with the session lock held; neither send blocks.
    fn publish(&self, snapshot: SessionSnapshot, running: Option<RunId>) {
        // No receivers is normal when nothing is subscribed yet
        let _ = self.state_change_tx.send(snapshot);

        // Only a real change of run may tear down or create a tick registration
        self.run_tx.send_if_modified(|current| {
            if *current != running {
                debug!("Tick registration moving from {:?} to {:?}", current, running);
                *current = running;
                true
            } else {
                false
            }
        });
    }

    pub fn subscribe_runs(&self) -> watch::Receiver<Option<RunId>> {
        self.run_tx.subscribe()
    }

    pub fn subscribe_completions(&self) -> broadcast::Receiver<CompletionEvent> {
        self.completion_tx.subscribe()
    }

    pub fn subscribe_changes(&self) -> broadcast::Receiver<SessionSnapshot> {
        self.state_change_tx.subscribe()
    }

    // Countdown operations

    pub fn start(&self) -> Result<bool, String> {
        let started = self.update_session("start", |s| s.start())?;
        if started {
            info!("Countdown started");
        } else {
            debug!("Start rejected: already running or nothing left to count");
        }
        Ok(started)
    }

    pub fn pause(&self) -> Result<bool, String> {
        let paused = self.update_session("pause", |s| s.pause())?;
        if paused {
            info!("Countdown paused");
        }
        Ok(paused)
    }

    pub fn reset(&self) -> Result<(), String> {
        info!("Countdown reset");
        self.update_session("reset", |s| s.reset())
    }

    /// Deliver a tick from the countdown task
    pub fn tick(&self, run: RunId) -> Result<Option<CompletionEvent>, String> {
        let mut session = self.session.lock()
            .map_err(|e| format!("Failed to lock session: {}", e))?;

        let before = session.countdown();
        let completion = session.tick(run);
        if session.countdown() != before {
            self.publish(session.snapshot(), session.running_run());
        }

        if let Some(event) = &completion {
            info!("Timer '{}' finished ({})", event.timer_name, event.activity);
            if let Err(e) = self.completion_tx.send(event.clone()) {
                warn!("No listeners for completion event: {}", e);
            }
        }
        drop(session);

        Ok(completion)
    }

    /// Run id the session expects a tick registration for
    pub fn running_run(&self) -> Result<Option<RunId>, String> {
        self.session.lock()
            .map(|session| session.running_run())
            .map_err(|e| format!("Failed to lock session: {}", e))
    }

    // Registry operations

    pub fn add_timer(&self) -> Result<Timer, String> {
        let timer = self.update_session("add-timer", |s| s.add_timer())?;
        info!("Added timer {} ({})", timer.id, timer.name);
        Ok(timer)
    }

    pub fn update_timer(&self, id: TimerId, fields: Vec<TimerField>) -> Result<bool, String> {
        self.update_session("update-timer", |s| {
            if !s.registry().contains(id) {
                return false;
            }
            for field in fields {
                s.update_timer(id, field);
            }
            true
        })
    }

    pub fn delete_timer(&self, id: TimerId) -> Result<DeleteOutcome, String> {
        let outcome = self.update_session("delete-timer", |s| s.delete_timer(id))?;
        match outcome {
            DeleteOutcome::Deleted => info!("Deleted timer {}", id),
            DeleteOutcome::LastTimer => warn!("Refusing to delete timer {}: it is the last one", id),
            DeleteOutcome::NotFound => debug!("Delete of unknown timer {} ignored", id),
        }
        Ok(outcome)
    }

    pub fn select_timer(&self, id: TimerId) -> Result<bool, String> {
        let selected = self.update_session("select-timer", |s| s.select_timer(id))?;
        if selected {
            info!("Selected timer {}", id);
        }
        Ok(selected)
    }

    // Theme and sound

    pub fn set_mode(&self, mode: ThemeMode) -> Result<(), String> {
        self.update_session("set-mode", |s| s.set_mode(mode))
    }

    pub fn toggle_dark_mode(&self) -> Result<ThemeMode, String> {
        self.update_session("toggle-theme", |s| s.toggle_dark_mode())
    }

    pub fn set_color(&self, mode: ThemeMode, role: ColorRole, value: String) -> Result<(), String> {
        self.update_session("set-color", |s| s.set_color(mode, role, value))
    }

    pub fn reset_theme(&self) -> Result<(), String> {
        self.update_session("reset-theme", |s| s.reset_theme())
    }

    pub fn toggle_sound(&self) -> Result<bool, String> {
        let enabled = self.update_session("toggle-sound", |s| s.toggle_sound())?;
        info!("Sound {}", if enabled { "enabled" } else { "muted" });
        Ok(enabled)
    }

    // Queries

    pub fn snapshot(&self) -> Result<SessionSnapshot, String> {
        self.session.lock()
            .map(|session| session.snapshot())
            .map_err(|e| format!("Failed to lock session: {}", e))
    }

    pub fn sound_enabled(&self) -> Result<bool, String> {
        self.session.lock()
            .map(|session| session.sound_enabled())
            .map_err(|e| format!("Failed to lock session: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
