//! Session state: registry, countdown engine, themes and sound preference
//!
//! All mutation of a running timer session goes through `Session`. Every
//! operation is total: unknown ids and rejected transitions are reported
//! through the return value and leave the session untouched.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    engine::{reduce, Countdown, CountdownInput, RunId, Transition},
    registry::{DeleteOutcome, TimerRegistry},
    theme::{ColorRole, Theme, ThemeMode, ThemeStore},
    timer::{format_clock, Timer, TimerField, TimerId},
};

/// One-shot signal raised when a countdown reaches zero
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionEvent {
    pub timer_id: TimerId,
    pub timer_name: String,
    pub activity: String,
    pub finished_at: DateTime<Utc>,
}

/// Timer entry as shown in pickers and settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerView {
    #[serde(flatten)]
    pub timer: Timer,
    pub label: String,
}

/// Render-ready view of the whole session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub timers: Vec<TimerView>,
    pub current_timer: Timer,
    pub remaining_seconds: u64,
    pub display_time: String,
    pub is_running: bool,
    pub is_dark_mode: bool,
    pub theme_mode: ThemeMode,
    pub sound_enabled: bool,
    pub theme: Theme,
    pub light_theme: Theme,
    pub dark_theme: Theme,
}

#[derive(Debug, Clone)]
pub struct Session {
    registry: TimerRegistry,
    current: TimerId,
    countdown: Countdown,
    themes: ThemeStore,
    sound_enabled: bool,
    last_run: RunId,
}

impl Session {
    /// Create a session on the default timers with the first one selected
    pub fn new(mode: ThemeMode, sound_enabled: bool) -> Self {
        Self::with_registry(TimerRegistry::new(), mode, sound_enabled)
    }

    pub fn with_registry(registry: TimerRegistry, mode: ThemeMode, sound_enabled: bool) -> Self {
        let first = registry.first();
        let current = first.id;
        let countdown = Countdown::idle(first.duration_seconds());
        Self {
            registry,
            current,
            countdown,
            themes: ThemeStore::new(mode),
            sound_enabled,
            last_run: 0,
        }
    }

    // Queries

    pub fn registry(&self) -> &TimerRegistry {
        &self.registry
    }

    pub fn current_timer(&self) -> &Timer {
        // `current` always names a live timer
        self.registry
            .get(self.current)
            .unwrap_or_else(|| self.registry.first())
    }

    pub fn countdown(&self) -> Countdown {
        self.countdown
    }

    pub fn remaining_seconds(&self) -> u64 {
        self.countdown.remaining_seconds
    }

    pub fn is_running(&self) -> bool {
        self.countdown.is_running()
    }

    /// Run id of the tick registration that should currently exist
    pub fn running_run(&self) -> Option<RunId> {
        self.countdown.run()
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound_enabled
    }

    pub fn themes(&self) -> &ThemeStore {
        &self.themes
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            timers: self
                .registry
                .iter()
                .map(|timer| TimerView {
                    label: timer.label(),
                    timer: timer.clone(),
                })
                .collect(),
            current_timer: self.current_timer().clone(),
            remaining_seconds: self.countdown.remaining_seconds,
            display_time: format_clock(self.countdown.remaining_seconds),
            is_running: self.countdown.is_running(),
            is_dark_mode: self.themes.is_dark(),
            theme_mode: self.themes.mode(),
            sound_enabled: self.sound_enabled,
            theme: self.themes.active().clone(),
            light_theme: self.themes.theme(ThemeMode::Light).clone(),
            dark_theme: self.themes.theme(ThemeMode::Dark).clone(),
        }
    }

    // Registry

    /// Append a new timer. Selection and running state are untouched.
    pub fn add_timer(&mut self) -> Timer {
        self.registry.add_timer()
    }

    pub fn update_timer(&mut self, id: TimerId, field: TimerField) -> bool {
        self.registry.update_timer(id, field)
    }

    /// Delete a timer; deleting the current one falls back to the first timer
    pub fn delete_timer(&mut self, id: TimerId) -> DeleteOutcome {
        let outcome = self.registry.delete_timer(id);
        if outcome == DeleteOutcome::Deleted && id == self.current {
            let fallback = self.registry.first().id;
            self.switch_to(fallback);
        }
        outcome
    }

    /// Make a timer current and reset the countdown to its full duration
    pub fn select_timer(&mut self, id: TimerId) -> bool {
        if !self.registry.contains(id) {
            return false;
        }
        self.switch_to(id);
        true
    }

    fn switch_to(&mut self, id: TimerId) {
        self.current = id;
        self.reset();
    }

    // Countdown

    pub fn start(&mut self) -> bool {
        let run = self.last_run + 1;
        let transition = self.apply(CountdownInput::Start { run });
        if transition.changed {
            self.last_run = run;
        }
        transition.changed
    }

    pub fn pause(&mut self) -> bool {
        self.apply(CountdownInput::Pause).changed
    }

    /// Stop and restore the current timer's full duration
    pub fn reset(&mut self) {
        let seconds = self.current_timer().duration_seconds();
        self.apply(CountdownInput::Reset { seconds });
    }

    /// Deliver one tick from registration `run`
    pub fn tick(&mut self, run: RunId) -> Option<CompletionEvent> {
        let transition = self.apply(CountdownInput::Tick { run });
        if !transition.completed {
            return None;
        }
        let timer = self.current_timer();
        Some(CompletionEvent {
            timer_id: timer.id,
            timer_name: timer.name.clone(),
            activity: timer.activity.clone(),
            finished_at: Utc::now(),
        })
    }

    fn apply(&mut self, input: CountdownInput) -> Transition {
        let transition = reduce(self.countdown, input);
        self.countdown = transition.countdown;
        transition
    }

    // Preferences

    pub fn set_sound(&mut self, enabled: bool) {
        self.sound_enabled = enabled;
    }

    pub fn toggle_sound(&mut self) -> bool {
        self.sound_enabled = !self.sound_enabled;
        self.sound_enabled
    }

    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.themes.set_mode(mode);
    }

    pub fn toggle_dark_mode(&mut self) -> ThemeMode {
        self.themes.toggle_mode()
    }

    pub fn set_color(&mut self, mode: ThemeMode, role: ColorRole, value: String) {
        self.themes.set_color(mode, role, value);
    }

    pub fn reset_theme(&mut self) {
        self.themes.reset_to_defaults();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(ThemeMode::Light, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_to_completion(session: &mut Session) -> Vec<CompletionEvent> {
        let run = session.running_run().expect("session should be running");
        let mut events = Vec::new();
        let ticks = session.remaining_seconds();
        for _ in 0..ticks {
            events.extend(session.tick(run));
        }
        events
    }

    #[test]
    fn starts_on_first_timer_idle() {
        let session = Session::default();
        assert_eq!(session.current_timer().id, 1);
        assert_eq!(session.remaining_seconds(), 1500);
        assert!(!session.is_running());
        assert!(session.sound_enabled());
    }

    #[test]
    fn select_resets_and_stops_from_any_state() {
        let mut session = Session::default();
        assert!(session.start());
        let run = session.running_run().unwrap();
        session.tick(run);
        session.tick(run);
        assert!(session.select_timer(1));
        assert_eq!(session.remaining_seconds(), 1500);
        assert!(!session.is_running());

        assert!(session.select_timer(3));
        assert_eq!(session.remaining_seconds(), 900);
        assert_eq!(session.current_timer().id, 3);
    }

    #[test]
    fn select_unknown_id_is_a_no_op() {
        let mut session = Session::default();
        session.start();
        assert!(!session.select_timer(99));
        assert!(session.is_running());
        assert_eq!(session.current_timer().id, 1);
    }

    #[test]
    fn short_break_runs_down_and_completes_once() {
        let mut session = Session::default();
        session.select_timer(2);
        assert_eq!(session.remaining_seconds(), 300);
        session.start();
        let events = run_to_completion(&mut session);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].timer_id, 2);
        assert_eq!(events[0].timer_name, "Short Break");
        assert_eq!(events[0].activity, "Rest");
        assert_eq!(session.remaining_seconds(), 0);
        assert!(!session.is_running());
        assert!(session.running_run().is_none());
    }

    #[test]
    fn stale_ticks_after_pause_and_restart_are_ignored() {
        let mut session = Session::default();
        session.start();
        let first = session.running_run().unwrap();
        session.tick(first);
        session.pause();
        session.start();
        let second = session.running_run().unwrap();
        assert_ne!(first, second);
        session.tick(first);
        assert_eq!(session.remaining_seconds(), 1499);
        session.tick(second);
        assert_eq!(session.remaining_seconds(), 1498);
    }

    #[test]
    fn reset_after_ticks_restores_duration() {
        let mut session = Session::default();
        session.start();
        let run = session.running_run().unwrap();
        for _ in 0..10 {
            session.tick(run);
        }
        session.reset();
        assert_eq!(session.remaining_seconds(), 1500);
        assert!(!session.is_running());
    }

    #[test]
    fn start_after_completion_is_rejected_until_reset() {
        let mut session = Session::default();
        session.select_timer(2);
        session.start();
        run_to_completion(&mut session);
        assert!(!session.start());
        session.reset();
        assert!(session.start());
    }

    #[test]
    fn deleting_current_falls_back_to_first_remaining() {
        let mut session = Session::default();
        session.delete_timer(3);
        session.select_timer(1);
        session.start();
        assert_eq!(session.delete_timer(1), DeleteOutcome::Deleted);
        assert_eq!(session.current_timer().id, 2);
        assert_eq!(session.remaining_seconds(), 300);
        assert!(!session.is_running());
    }

    #[test]
    fn deleting_another_timer_keeps_countdown() {
        let mut session = Session::default();
        session.start();
        let run = session.running_run().unwrap();
        session.tick(run);
        assert_eq!(session.delete_timer(2), DeleteOutcome::Deleted);
        assert!(session.is_running());
        assert_eq!(session.remaining_seconds(), 1499);
    }

    #[test]
    fn deleting_last_timer_is_rejected() {
        let mut session = Session::default();
        session.delete_timer(2);
        session.delete_timer(3);
        assert_eq!(session.delete_timer(1), DeleteOutcome::LastTimer);
        assert_eq!(session.registry().len(), 1);
        assert_eq!(session.current_timer().id, 1);
    }

    #[test]
    fn add_timer_keeps_selection_and_running_state() {
        let mut session = Session::default();
        session.start();
        let added = session.add_timer();
        assert_eq!(added.id, 4);
        assert_eq!(session.current_timer().id, 1);
        assert!(session.is_running());
    }

    #[test]
    fn editing_minutes_applies_on_next_reset() {
        let mut session = Session::default();
        assert!(session.update_timer(1, TimerField::Minutes(50)));
        assert_eq!(session.remaining_seconds(), 1500);
        session.reset();
        assert_eq!(session.remaining_seconds(), 3000);
    }

    #[test]
    fn snapshot_reflects_theme_and_labels() {
        let mut session = Session::new(ThemeMode::Light, false);
        session.toggle_dark_mode();
        session.set_color(ThemeMode::Dark, ColorRole::Primary, "#000000".to_string());
        let snapshot = session.snapshot();
        assert!(snapshot.is_dark_mode);
        assert_eq!(snapshot.theme_mode, ThemeMode::Dark);
        assert!(!snapshot.sound_enabled);
        assert_eq!(snapshot.theme.primary, "#000000");
        assert_eq!(snapshot.light_theme.primary, "#F9B5D0");
        assert_eq!(snapshot.display_time, "25:00");
        assert_eq!(snapshot.timers[1].label, "Short Break (5min)");

        session.reset_theme();
        assert_eq!(session.snapshot().theme.primary, "#2D3436");
    }

    #[test]
    fn sound_toggle_flips() {
        let mut session = Session::default();
        assert!(!session.toggle_sound());
        assert!(session.toggle_sound());
        session.set_sound(false);
        assert!(!session.sound_enabled());
    }
}
