//! Pomodoro Timer - a local countdown timer service
//!
//! This is the main entry point for the pomodoro-timer application.

use std::{future::IntoFuture, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use pomodoro_timer::{
    api::create_router,
    config::Config,
    state::{AppState, Session},
    tasks::{countdown_task, notification_task},
    utils::shutdown_signal,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // Initialize tracing with appropriate log level
    tracing_subscriber::fmt()
        .with_env_filter(format!("pomodoro_timer={},tower_http=info", config.log_level()))
        .init();

    info!("Starting pomodoro-timer v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: host={}, port={}, theme={:?}, sound={}",
          config.host, config.port, config.theme_mode(), config.sound_enabled());

    // Create application state
    let session = Session::new(config.theme_mode(), config.sound_enabled());
    let state = Arc::new(AppState::new(config.port, config.host.clone(), session));

    // Start the tick and notification background tasks
    let countdown_state = Arc::clone(&state);
    tokio::spawn(async move {
        countdown_task(countdown_state).await;
    });

    let notification_state = Arc::clone(&state);
    let notification_settings = config.notification_settings();
    tokio::spawn(async move {
        notification_task(notification_state, notification_settings).await;
    });

    // Create HTTP router with all endpoints
    let app = create_router(state);

    let addr = config.address();
    let listener = TcpListener::bind(&addr).await?;

    info!("Server running on http://{}", addr);
    info!("Endpoints:");
    info!("  POST   /timer/start|pause|reset  - Countdown controls");
    info!("  GET    /timers, POST /timers     - List or add timers");
    info!("  PATCH  /timers/:id               - Edit a timer");
    info!("  DELETE /timers/:id               - Delete a timer");
    info!("  POST   /timers/:id/select        - Select a timer");
    info!("  POST   /theme/mode|toggle|reset  - Theme mode and defaults");
    info!("  PUT    /theme/:mode/:role        - Edit a theme color");
    info!("  POST   /sound/toggle             - Mute or unmute");
    info!("  GET    /status, /events, /health - Observe the session");

    // Setup graceful shutdown; open event streams are dropped with the server
    let server = axum::serve(listener, app).into_future();

    tokio::select! {
        result = server => {
            if let Err(e) = result {
                tracing::error!("Server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
