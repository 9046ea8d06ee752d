//! Configuration and CLI argument handling

use std::path::PathBuf;

use clap::Parser;

use crate::{state::ThemeMode, tasks::NotificationSettings};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "pomodoro-timer")]
#[command(about = "A local Pomodoro timer service with configurable timers and themes")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the control API to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Start in dark mode
    #[arg(long)]
    pub dark: bool,

    /// Start with the completion sound muted
    #[arg(short, long)]
    pub mute: bool,

    /// Do not post desktop notifications when a timer finishes
    #[arg(long)]
    pub no_notifications: bool,

    /// Sound file to play when a timer finishes
    #[arg(long, value_name = "PATH")]
    pub sound_file: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn theme_mode(&self) -> ThemeMode {
        if self.dark { ThemeMode::Dark } else { ThemeMode::Light }
    }

    pub fn sound_enabled(&self) -> bool {
        !self.mute
    }

    pub fn notification_settings(&self) -> NotificationSettings {
        NotificationSettings {
            desktop_notifications: !self.no_notifications,
            sound_file: self.sound_file.clone(),
        }
    }
}
