//! Completion side effects
//!
//! Desktop notifications and sound playback. Every function here reports
//! failure through its `Result` and never touches session state.

pub mod notification;
pub mod sound;

// Re-export main functions
pub use notification::*;
pub use sound::*;
