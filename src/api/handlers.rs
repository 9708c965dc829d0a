//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use tracing::{error, warn};

use crate::state::{AppState, TimerMode, TimerRunState, TimerSettings};
use super::responses::{ApiResponse, HealthResponse, SessionsResponse, StatusResponse};

type HandlerResult<T> = Result<Json<T>, StatusCode>;

fn internal_error(context: &str, e: String) -> StatusCode {
    error!("Failed to {}: {}", context, e);
    StatusCode::INTERNAL_SERVER_ERROR
}

/// Handle POST /timer/start - Start or resume the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    let timer = state
        .apply("start", |controller| {
            controller.start_timer();
            controller.state().clone()
        })
        .map_err(|e| internal_error("start timer", e))?;

    Ok(Json(ApiResponse::for_timer(
        format!("{} timer started", timer.mode),
        timer,
    )))
}

/// Handle POST /timer/pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    let timer = state
        .apply("pause", |controller| {
            controller.pause_timer();
            controller.state().clone()
        })
        .map_err(|e| internal_error("pause timer", e))?;

    Ok(Json(ApiResponse::for_timer(
        format!("{} timer paused", timer.mode),
        timer,
    )))
}

/// Handle POST /timer/reset - Restore the full duration of the current mode
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> HandlerResult<ApiResponse> {
    let timer = state
        .apply("reset", |controller| {
            controller.reset_timer();
            controller.state().clone()
        })
        .map_err(|e| internal_error("reset timer", e))?;

    Ok(Json(ApiResponse::for_timer(
        format!("{} timer reset", timer.mode),
        timer,
    )))
}

/// Handle POST /timer/mode/:mode - Switch to work, break or long-break
pub async fn switch_mode_handler(
    State(state): State<Arc<AppState>>,
    Path(mode_name): Path<String>,
) -> HandlerResult<ApiResponse> {
    let Some(mode) = TimerMode::from_name(&mode_name) else {
        warn!("Unknown timer mode requested: {}", mode_name);
        return Err(StatusCode::NOT_FOUND);
    };

    let timer = state
        .apply(mode.as_str(), |controller| {
            controller.switch_mode(mode);
            controller.state().clone()
        })
        .map_err(|e| internal_error("switch mode", e))?;

    Ok(Json(ApiResponse::for_timer(
        format!("Switched to {}", mode),
        timer,
    )))
}

/// Handle GET /settings - Return current settings
pub async fn get_settings_handler(State(state): State<Arc<AppState>>) -> HandlerResult<TimerSettings> {
    state
        .inspect(|controller| controller.settings().clone())
        .map(Json)
        .map_err(|e| internal_error("read settings", e))
}

/// Handle PUT /settings - Replace settings
pub async fn update_settings_handler(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<TimerSettings>,
) -> Result<Json<ApiResponse>, (StatusCode, Json<ApiResponse>)> {
    let outcome = state
        .apply("settings", |controller| {
            let result = controller.update_settings(settings);
            (result, controller.state().clone())
        })
        .map_err(|e| {
            error!("Failed to update settings: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiResponse::error(e, TimerRunState::new(0))),
            )
        })?;

    match outcome {
        (Ok(()), timer) => Ok(Json(ApiResponse::for_timer(
            "Settings updated".to_string(),
            timer,
        ))),
        (Err(e), timer) => {
            warn!("Rejected settings update: {}", e);
            Err((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ApiResponse::error(e.to_string(), timer)),
            ))
        }
    }
}

/// Handle GET /status - Return timer status and server metadata
pub async fn status_handler(State(state): State<Arc<AppState>>) -> HandlerResult<StatusResponse> {
    let (timer, settings, title) = state
        .inspect(|controller| {
            (
                controller.state().clone(),
                controller.settings().clone(),
                controller.title(),
            )
        })
        .map_err(|e| internal_error("read timer state", e))?;

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        settings,
        title,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /sessions - Return the recorded session log
pub async fn sessions_handler(State(state): State<Arc<AppState>>) -> HandlerResult<SessionsResponse> {
    let sessions = state
        .inspect(|controller| controller.sessions().to_vec())
        .map_err(|e| internal_error("read sessions", e))?;

    Ok(Json(SessionsResponse {
        count: sessions.len(),
        sessions,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
