//! State management module
//!
//! This module contains the timer registry, the countdown engine, the theme
//! store, and the shared application state wrapping them.

pub mod app_state;
pub mod engine;
pub mod registry;
pub mod session;
pub mod theme;
pub mod timer;

// Re-export main types
pub use app_state::AppState;
pub use engine::{Countdown, RunId, RunStatus};
pub use registry::{DeleteOutcome, TimerRegistry};
pub use session::{CompletionEvent, Session, SessionSnapshot};
pub use theme::{ColorRole, Theme, ThemeMode, ThemeStore};
pub use timer::{Timer, TimerField, TimerId};
