//! Light/dark theme store

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorRole {
    Primary,
    Secondary,
    Background,
    Text,
    Card,
    Border,
}

impl ColorRole {
    pub const ALL: [ColorRole; 6] = [
        ColorRole::Primary,
        ColorRole::Secondary,
        ColorRole::Background,
        ColorRole::Text,
        ColorRole::Card,
        ColorRole::Border,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "primary" => Some(ColorRole::Primary),
            "secondary" => Some(ColorRole::Secondary),
            "background" => Some(ColorRole::Background),
            "text" => Some(ColorRole::Text),
            "card" => Some(ColorRole::Card),
            "border" => Some(ColorRole::Border),
            _ => None,
        }
    }
}

/// A full set of color roles for one mode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub primary: String,
    pub secondary: String,
    pub background: String,
    pub text: String,
    pub card: String,
    pub border: String,
}

/// Built-in palettes, in `ColorRole::ALL` order
const LIGHT_DEFAULTS: [&str; 6] = ["#F9B5D0", "#A8E6CF", "#FFDFD3", "#4A4458", "#FFE2E2", "#D4D4D8"];
const DARK_DEFAULTS: [&str; 6] = ["#2D3436", "#434C5E", "#1F2937", "#F3F4F6", "#374151", "#4B5563"];

impl Theme {
    /// The built-in theme for a mode
    pub fn default_for(mode: ThemeMode) -> Self {
        let [primary, secondary, background, text, card, border] = match mode {
            ThemeMode::Light => LIGHT_DEFAULTS,
            ThemeMode::Dark => DARK_DEFAULTS,
        };
        Self {
            primary: primary.to_string(),
            secondary: secondary.to_string(),
            background: background.to_string(),
            text: text.to_string(),
            card: card.to_string(),
            border: border.to_string(),
        }
    }

    pub fn color(&self, role: ColorRole) -> &str {
        match role {
            ColorRole::Primary => &self.primary,
            ColorRole::Secondary => &self.secondary,
            ColorRole::Background => &self.background,
            ColorRole::Text => &self.text,
            ColorRole::Card => &self.card,
            ColorRole::Border => &self.border,
        }
    }

    fn color_mut(&mut self, role: ColorRole) -> &mut String {
        match role {
            ColorRole::Primary => &mut self.primary,
            ColorRole::Secondary => &mut self.secondary,
            ColorRole::Background => &mut self.background,
            ColorRole::Text => &mut self.text,
            ColorRole::Card => &mut self.card,
            ColorRole::Border => &mut self.border,
        }
    }
}

/// Exactly two themes plus the mode selecting between them
#[derive(Debug, Clone)]
pub struct ThemeStore {
    mode: ThemeMode,
    light: Theme,
    dark: Theme,
}

impl ThemeStore {
    pub fn new(mode: ThemeMode) -> Self {
        Self {
            mode,
            light: Theme::default_for(ThemeMode::Light),
            dark: Theme::default_for(ThemeMode::Dark),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    /// Select the displayed mode. Colors are untouched.
    pub fn set_mode(&mut self, mode: ThemeMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> ThemeMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    pub fn theme(&self, mode: ThemeMode) -> &Theme {
        match mode {
            ThemeMode::Light => &self.light,
            ThemeMode::Dark => &self.dark,
        }
    }

    /// Theme for the current mode
    pub fn active(&self) -> &Theme {
        self.theme(self.mode)
    }

    pub fn set_color(&mut self, mode: ThemeMode, role: ColorRole, value: String) {
        let theme = match mode {
            ThemeMode::Light => &mut self.light,
            ThemeMode::Dark => &mut self.dark,
        };
        *theme.color_mut(role) = value;
    }

    /// Discard every color edit in both modes. The mode itself is kept.
    pub fn reset_to_defaults(&mut self) {
        self.light = Theme::default_for(ThemeMode::Light);
        self.dark = Theme::default_for(ThemeMode::Dark);
    }
}

impl Default for ThemeStore {
    fn default() -> Self {
        Self::new(ThemeMode::Light)
    }
}
