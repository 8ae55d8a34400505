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
use futures::stream::{self, Stream, StreamExt};
use tracing::{debug, warn};

use crate::{
    controls::panel::{RESET, START, STOP},
    state::AppState,
};
use super::responses::{ApiResponse, HealthResponse, StatusResponse};

fn activate(state: &AppState, label: &str) -> Result<Json<ApiResponse>, StatusCode> {
    match state.activate(label) {
        Some(timer) => Ok(Json(ApiResponse::activated(label, timer))),
        None => {
            warn!("No control labelled {:?}", label);
            Err(StatusCode::NOT_FOUND)
        }
    }
}

/// Handle POST /start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    activate(&state, START)
}

/// Handle POST /stop - Stop the countdown, keeping the remaining time
pub async fn stop_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    activate(&state, STOP)
}

/// Handle POST /reset - Stop the countdown and restore 25:00
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    activate(&state, RESET)
}

/// Handle POST /controls/:label - Activate any control by its label
pub async fn control_handler(
    State(state): State<Arc<AppState>>,
    Path(label): Path<String>,
) -> Result<Json<ApiResponse>, StatusCode> {
    activate(&state, &label)
}

/// Handle GET /status - Return current timer status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Json<StatusResponse> {
    let (last_action, last_action_time) = state.get_last_action();

    Json(StatusResponse {
        timer: state.get_timer_state(),
        controls: state.controls.labels(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    })
}

/// Handle GET / - Plain-text rendering of the timer widget
pub async fn widget_handler(State(state): State<Arc<AppState>>) -> String {
    state.render()
}

/// Handle GET /display/stream - Server-sent display updates
pub async fn display_stream_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.subscribe();
    let current = rx.borrow_and_update().display.clone();
    debug!("Display stream subscribed at {}", current);

    let updates = stream::unfold(rx, |mut rx| async move {
        rx.changed().await.ok()?;
        let display = rx.borrow_and_update().display.clone();
        Some((display, rx))
    });

    let events = stream::once(async move { current })
        .chain(updates)
        .map(|display| Ok(Event::default().event("display").data(display)));

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
