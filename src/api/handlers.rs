//! HTTP endpoint handlers

use std::{convert::Infallible, sync::Arc};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{self, Stream};
use tokio::sync::broadcast::error::RecvError;
use tracing::{debug, error, info, warn};

use crate::state::{
    session::TimerView, timer::is_hex_color, AppState, ColorRole, DeleteOutcome, ThemeMode,
    TimerField, TimerId,
};
use super::responses::{
    ApiResponse, ColorRequest, ErrorResponse, HealthResponse, ModeRequest, StatusResponse,
    TimerResponse, TimerUpdateRequest,
};

/// Error half of every handler result
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(code: StatusCode, message: impl Into<String>) -> ApiError {
    (code, Json(ErrorResponse::new(message)))
}

fn internal_error(e: String) -> ApiError {
    error!("{}", e);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "Internal state error")
}

fn ok_response(state: &AppState, message: &str) -> Result<Json<ApiResponse>, ApiError> {
    let snapshot = state.snapshot().map_err(internal_error)?;
    Ok(Json(ApiResponse::ok(message, snapshot)))
}

/// Validate an update body and turn it into field edits
pub fn validate_update(request: TimerUpdateRequest) -> Result<Vec<TimerField>, String> {
    let mut fields = Vec::new();

    if let Some(name) = request.name {
        if name.trim().is_empty() {
            return Err("Timer name must not be empty".to_string());
        }
        fields.push(TimerField::Name(name));
    }
    if let Some(minutes) = request.minutes {
        if minutes < 1 {
            return Err("Timer duration must be at least 1 minute".to_string());
        }
        fields.push(TimerField::Minutes(minutes));
    }
    if let Some(activity) = request.activity {
        fields.push(TimerField::Activity(activity));
    }
    if let Some(color) = request.color {
        if !is_hex_color(&color) {
            return Err(format!("Invalid color '{}', expected #rrggbb", color));
        }
        fields.push(TimerField::Color(color));
    }

    if fields.is_empty() {
        return Err("No timer fields to update".to_string());
    }
    Ok(fields)
}

// Countdown

/// Handle POST /timer/start
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    if state.start().map_err(internal_error)? {
        ok_response(&state, "Countdown started")
    } else {
        Err(api_error(
            StatusCode::CONFLICT,
            "Countdown is already running or has reached zero; reset it first",
        ))
    }
}

/// Handle POST /timer/pause
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    if state.pause().map_err(internal_error)? {
        ok_response(&state, "Countdown paused")
    } else {
        Err(api_error(StatusCode::CONFLICT, "Countdown is not running"))
    }
}

/// Handle POST /timer/reset
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    state.reset().map_err(internal_error)?;
    ok_response(&state, "Countdown reset")
}

// Timer registry

/// Handle GET /timers
pub async fn list_timers_handler(State(state): State<Arc<AppState>>) -> Result<Json<Vec<TimerView>>, ApiError> {
    let snapshot = state.snapshot().map_err(internal_error)?;
    Ok(Json(snapshot.timers))
}

/// Handle POST /timers
pub async fn add_timer_handler(
    State(state): State<Arc<AppState>>,
) -> Result<(StatusCode, Json<TimerResponse>), ApiError> {
    let timer = state.add_timer().map_err(internal_error)?;
    let session = state.snapshot().map_err(internal_error)?;
    Ok((StatusCode::CREATED, Json(TimerResponse { timer, session })))
}

/// Handle PATCH /timers/:id
pub async fn update_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
    Json(request): Json<TimerUpdateRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    let fields = validate_update(request).map_err(|e| {
        debug!("Rejected update for timer {}: {}", id, e);
        api_error(StatusCode::UNPROCESSABLE_ENTITY, e)
    })?;

    if state.update_timer(id, fields).map_err(internal_error)? {
        ok_response(&state, &format!("Timer {} updated", id))
    } else {
        Err(api_error(StatusCode::NOT_FOUND, format!("Timer {} not found", id)))
    }
}

/// Handle DELETE /timers/:id
pub async fn delete_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Result<Json<ApiResponse>, ApiError> {
    match state.delete_timer(id).map_err(internal_error)? {
        DeleteOutcome::Deleted => ok_response(&state, &format!("Timer {} deleted", id)),
        DeleteOutcome::LastTimer => Err(api_error(
            StatusCode::CONFLICT,
            "The last remaining timer cannot be deleted",
        )),
        DeleteOutcome::NotFound => {
            Err(api_error(StatusCode::NOT_FOUND, format!("Timer {} not found", id)))
        }
    }
}

/// Handle POST /timers/:id/select
pub async fn select_timer_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TimerId>,
) -> Result<Json<ApiResponse>, ApiError> {
    if state.select_timer(id).map_err(internal_error)? {
        ok_response(&state, &format!("Timer {} selected", id))
    } else {
        Err(api_error(StatusCode::NOT_FOUND, format!("Timer {} not found", id)))
    }
}

// Theme and sound

/// Handle POST /theme/mode
pub async fn set_mode_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ModeRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    state.set_mode(request.mode).map_err(internal_error)?;
    ok_response(&state, "Theme mode set")
}

/// Handle POST /theme/toggle
pub async fn toggle_theme_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let mode = state.toggle_dark_mode().map_err(internal_error)?;
    info!("Theme switched to {:?}", mode);
    ok_response(&state, "Theme mode toggled")
}

/// Handle PUT /theme/:mode/:role
pub async fn set_color_handler(
    State(state): State<Arc<AppState>>,
    Path((mode, role)): Path<(String, String)>,
    Json(request): Json<ColorRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    let mode = ThemeMode::from_name(&mode)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Unknown theme mode '{}'", mode)))?;
    let role = ColorRole::from_name(&role)
        .ok_or_else(|| api_error(StatusCode::NOT_FOUND, format!("Unknown color role '{}'", role)))?;
    if !is_hex_color(&request.value) {
        return Err(api_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            format!("Invalid color '{}', expected #rrggbb", request.value),
        ));
    }

    state.set_color(mode, role, request.value).map_err(internal_error)?;
    ok_response(&state, "Theme color updated")
}

/// Handle POST /theme/reset
pub async fn reset_theme_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    state.reset_theme().map_err(internal_error)?;
    ok_response(&state, "Theme colors restored to defaults")
}

/// Handle POST /sound/toggle
pub async fn toggle_sound_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, ApiError> {
    let enabled = state.toggle_sound().map_err(internal_error)?;
    ok_response(&state, if enabled { "Sound enabled" } else { "Sound muted" })
}

// Observation

/// Handle GET /status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, ApiError> {
    let session = state.snapshot().map_err(internal_error)?;
    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        session,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

/// Handle GET /events - server-sent `state` and `completed` events
pub async fn events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let receivers = (state.subscribe_changes(), state.subscribe_completions());

    let events = stream::unfold(receivers, |(mut changes, mut completions)| async move {
        loop {
            let event = tokio::select! {
                change = changes.recv() => match change {
                    Ok(snapshot) => Event::default().event("state").json_data(&snapshot),
                    Err(RecvError::Lagged(skipped)) => {
                        debug!("Event stream lagged, {} snapshots skipped", skipped);
                        continue;
                    }
                    Err(RecvError::Closed) => return None,
                },
                completion = completions.recv() => match completion {
                    Ok(event) => Event::default().event("completed").json_data(&event),
                    Err(RecvError::Lagged(_)) => continue,
                    Err(RecvError::Closed) => return None,
                },
            };

            match event {
                Ok(event) => return Some((Ok::<_, Infallible>(event), (changes, completions))),
                Err(e) => warn!("Failed to encode event: {}", e),
            }
        }
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
