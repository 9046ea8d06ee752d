//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::{SessionSnapshot, ThemeMode, Timer};

/// Response for state-changing endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub session: SessionSnapshot,
}

impl ApiResponse {
    pub fn new(status: &str, message: impl Into<String>, session: SessionSnapshot) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
            timestamp: Utc::now(),
            session,
        }
    }

    pub fn running(message: impl Into<String>, session: SessionSnapshot) -> Self {
        Self::new("running", message, session)
    }

    pub fn idle(message: impl Into<String>, session: SessionSnapshot) -> Self {
        Self::new("idle", message, session)
    }

    /// Status follows the session: `running` or `idle`
    pub fn ok(message: impl Into<String>, session: SessionSnapshot) -> Self {
        if session.is_running {
            Self::running(message, session)
        } else {
            Self::idle(message, session)
        }
    }
}

/// Response for endpoints that create or return a single timer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub timer: Timer,
    pub session: SessionSnapshot,
}

/// Error body returned with 4xx/5xx status codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

/// Status response with server metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub session: SessionSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Body of `PATCH /timers/:id`; any subset of fields
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TimerUpdateRequest {
    pub name: Option<String>,
    pub minutes: Option<u32>,
    pub activity: Option<String>,
    pub color: Option<String>,
}

/// Body of `POST /theme/mode`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModeRequest {
    pub mode: ThemeMode,
}

/// Body of `PUT /theme/:mode/:role`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorRequest {
    pub value: String,
}
