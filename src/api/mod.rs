//! HTTP API module
//!
//! The control surface a front end uses to drive the session: countdown
//! controls, timer editing, theme and sound settings, plus status and a
//! server-sent event stream to re-render from.

pub mod handlers;
pub mod responses;

use std::sync::Arc;
use axum::{
    routing::{get, patch, post, put},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;
use handlers::*;

/// Create the HTTP router with all endpoints
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/timer/start", post(start_handler))
        .route("/timer/pause", post(pause_handler))
        .route("/timer/reset", post(reset_handler))
        .route("/timers", get(list_timers_handler).post(add_timer_handler))
        .route("/timers/:id", patch(update_timer_handler).delete(delete_timer_handler))
        .route("/timers/:id/select", post(select_timer_handler))
        .route("/theme/mode", post(set_mode_handler))
        .route("/theme/toggle", post(toggle_theme_handler))
        .route("/theme/reset", post(reset_theme_handler))
        .route("/theme/:mode/:role", put(set_color_handler))
        .route("/sound/toggle", post(toggle_sound_handler))
        .route("/status", get(status_handler))
        .route("/events", get(events_handler))
        .route("/health", get(health_handler))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
