//! Timer presets and their built-in defaults

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Identifier of a timer preset, unique among live timers
pub type TimerId = u32;

/// A named countdown preset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timer {
    pub id: TimerId,
    pub name: String,
    /// Duration in minutes, at least 1 once it has passed API validation
    pub minutes: u32,
    /// Free-text label shown while the timer runs
    pub activity: String,
    /// Accent color as `#rrggbb`
    pub color: String,
}

/// A single field edit applied through `TimerRegistry::update_timer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimerField {
    Name(String),
    Minutes(u32),
    Activity(String),
    Color(String),
}

const DEFAULT_TIMERS: [(TimerId, &str, u32, &str, &str); 3] = [
    (1, "Pomodoro", 25, "Focus", "#F9B5D0"),
    (2, "Short Break", 5, "Rest", "#A8E6CF"),
    (3, "Long Break", 15, "Long Rest", "#FFDFD3"),
];

const NEW_TIMER_NAME: &str = "New Timer";
const NEW_TIMER_MINUTES: u32 = 25;
const NEW_TIMER_ACTIVITY: &str = "New Activity";

impl Timer {
    /// Create a fresh timer with the "new timer" defaults and a random color
    pub fn new_with_id(id: TimerId) -> Self {
        Self {
            id,
            name: NEW_TIMER_NAME.to_string(),
            minutes: NEW_TIMER_MINUTES,
            activity: NEW_TIMER_ACTIVITY.to_string(),
            color: random_color(),
        }
    }

    /// Full duration of this preset in seconds
    pub fn duration_seconds(&self) -> u64 {
        u64::from(self.minutes) * 60
    }

    /// Label used by timer pickers, e.g. `Pomodoro (25min)`
    pub fn label(&self) -> String {
        format!("{} ({}min)", self.name, self.minutes)
    }

    /// Replace one field in place
    pub fn apply(&mut self, field: TimerField) {
        match field {
            TimerField::Name(name) => self.name = name,
            TimerField::Minutes(minutes) => self.minutes = minutes,
            TimerField::Activity(activity) => self.activity = activity,
            TimerField::Color(color) => self.color = color,
        }
    }
}

/// The timers every session starts with
pub fn default_timers() -> Vec<Timer> {
    DEFAULT_TIMERS
        .iter()
        .map(|&(id, name, minutes, activity, color)| Timer {
            id,
            name: name.to_string(),
            minutes,
            activity: activity.to_string(),
            color: color.to_string(),
        })
        .collect()
}

/// Random `#rrggbb` color over the whole 24-bit range
pub fn random_color() -> String {
    let value: u32 = rand::thread_rng().gen_range(0..=0xFF_FFFF);
    format!("#{:06x}", value)
}

/// Check that a string is a `#rrggbb` color
pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7
        && value.starts_with('#')
        && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Render seconds as a zero-padded `MM:SS` clock
pub fn format_clock(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
