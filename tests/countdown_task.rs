//! Countdown task driven by tokio's paused clock

use std::{sync::Arc, time::Duration};
use tokio::{
    sync::broadcast::error::TryRecvError,
    time::{sleep, timeout},
};

use pomodoro_timer::{state::AppState, tasks::countdown_task, Session};

fn spawn_state() -> Arc<AppState> {
    let state = Arc::new(AppState::new(0, "127.0.0.1".to_string(), Session::default()));
    tokio::spawn(countdown_task(Arc::clone(&state)));
    state
}

#[tokio::test(start_paused = true)]
async fn short_break_completes_once_after_300_seconds() {
    let state = spawn_state();
    let mut completions = state.subscribe_completions();

    assert!(state.select_timer(2).unwrap());
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 300);
    assert!(state.start().unwrap());

    let event = timeout(Duration::from_secs(301), completions.recv())
        .await
        .expect("countdown should finish within 300s")
        .expect("completion channel open");
    assert_eq!(event.timer_id, 2);
    assert_eq!(event.activity, "Rest");

    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.remaining_seconds, 0);
    assert!(!snapshot.is_running);

    // Stuck at zero: no further completions
    sleep(Duration::from_secs(10)).await;
    assert!(matches!(completions.try_recv(), Err(TryRecvError::Empty)));
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 0);
}

#[tokio::test(start_paused = true)]
async fn pause_freezes_and_restart_resumes() {
    let state = spawn_state();
    state.start().unwrap();

    sleep(Duration::from_millis(10_500)).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 1490);

    assert!(state.pause().unwrap());
    sleep(Duration::from_secs(30)).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 1490);

    assert!(state.start().unwrap());
    sleep(Duration::from_millis(2_500)).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 1488);
}

#[tokio::test(start_paused = true)]
async fn selecting_while_running_stops_the_ticks() {
    let state = spawn_state();
    state.start().unwrap();
    sleep(Duration::from_millis(5_500)).await;
    assert_eq!(state.snapshot().unwrap().remaining_seconds, 1495);

    assert!(state.select_timer(3).unwrap());
    sleep(Duration::from_secs(5)).await;
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.remaining_seconds, 900);
    assert!(!snapshot.is_running);
}

#[tokio::test(start_paused = true)]
async fn reset_while_running_restores_full_duration() {
    let state = spawn_state();
    state.start().unwrap();
    sleep(Duration::from_millis(3_500)).await;

    state.reset().unwrap();
    sleep(Duration::from_secs(3)).await;
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.remaining_seconds, 1500);
    assert!(!snapshot.is_running);
}

#[tokio::test(start_paused = true)]
async fn deleting_the_running_timer_stops_and_falls_back() {
    let state = spawn_state();
    state.start().unwrap();
    sleep(Duration::from_millis(2_500)).await;

    state.delete_timer(1).unwrap();
    sleep(Duration::from_secs(3)).await;
    let snapshot = state.snapshot().unwrap();
    assert_eq!(snapshot.current_timer.id, 2);
    assert_eq!(snapshot.remaining_seconds, 300);
    assert!(!snapshot.is_running);
}
