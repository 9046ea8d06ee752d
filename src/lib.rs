//! Pomodoro Timer - a local countdown timer service
//!
//! This library provides the timer registry, the countdown engine with its
//! one-second tick task, the light/dark theme store, completion notifications,
//! and the HTTP control API a front end drives them through.

pub mod api;
pub mod config;
pub mod services;
pub mod state;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use api::create_router;
pub use config::Config;
pub use state::{AppState, Session};
pub use utils::signals::shutdown_signal;
