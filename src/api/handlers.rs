//! HTTP endpoint handlers

use std::sync::Arc;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{
        sse::{Event, KeepAlive, Sse},
        Json,
    },
};
use futures::stream::{Stream, StreamExt};
use tracing::{info, warn};

use crate::state::AppState;
use super::responses::{
    ErrorResponse, HealthResponse, NewTaskRequest, StatusResponse, TasksResponse, TimerResponse,
    TimerView,
};

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, message: String) -> ApiError {
    (status, Json(ErrorResponse::new(message)))
}

/// Handle GET /timer - Return the current timer snapshot
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Json<TimerResponse> {
    Json(TimerResponse::new("current", state.timer.current_state()))
}

/// Handle GET /timer/events - Stream timer snapshots as server-sent events
pub async fn timer_events_handler(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    info!("Timer observer connected");
    let events = state
        .timer
        .observe()
        .map(|snapshot| Event::default().event("timer").json_data(TimerView::from(snapshot)));

    Sse::new(events).keep_alive(KeepAlive::default())
}

/// Handle POST /timer/start - Start the countdown
pub async fn timer_start_handler(State(state): State<Arc<AppState>>) -> Json<TimerResponse> {
    state.timer.start().await;
    state.record_action("timer-start");
    Json(TimerResponse::new("start", state.timer.current_state()))
}

/// Handle POST /timer/pause - Pause the countdown
pub async fn timer_pause_handler(State(state): State<Arc<AppState>>) -> Json<TimerResponse> {
    state.timer.pause().await;
    state.record_action("timer-pause");
    Json(TimerResponse::new("pause", state.timer.current_state()))
}

/// Handle POST /timer/resume - Resume a paused countdown
pub async fn timer_resume_handler(State(state): State<Arc<AppState>>) -> Json<TimerResponse> {
    state.timer.resume().await;
    state.record_action("timer-resume");
    Json(TimerResponse::new("resume", state.timer.current_state()))
}

/// Handle POST /timer/toggle - Pause if running, otherwise start
pub async fn timer_toggle_handler(State(state): State<Arc<AppState>>) -> Json<TimerResponse> {
    state.timer.toggle().await;
    state.record_action("timer-toggle");
    Json(TimerResponse::new("toggle", state.timer.current_state()))
}

/// Handle POST /timer/reset - Return to a full idle session
pub async fn timer_reset_handler(State(state): State<Arc<AppState>>) -> Json<TimerResponse> {
    state.timer.reset().await;
    state.record_action("timer-reset");
    Json(TimerResponse::new("reset", state.timer.current_state()))
}

/// Handle GET /tasks - List tasks
pub async fn tasks_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TasksResponse>, ApiError> {
    state
        .get_tasks()
        .map(|tasks| Json(TasksResponse::new(tasks)))
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))
}

/// Handle POST /tasks - Add a task
pub async fn add_task_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewTaskRequest>,
) -> Result<(StatusCode, Json<TasksResponse>), ApiError> {
    state
        .update_tasks("add-task", |list| list.add(&request.title))
        .map(|tasks| (StatusCode::CREATED, Json(TasksResponse::new(tasks))))
        .map_err(|e| {
            warn!("Rejected new task: {}", e);
            api_error(StatusCode::BAD_REQUEST, e)
        })
}

/// Handle DELETE /tasks/:id - Remove a task
pub async fn remove_task_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<TasksResponse>, ApiError> {
    state
        .update_tasks("remove-task", |list| list.remove(id))
        .map(|tasks| Json(TasksResponse::new(tasks)))
        .map_err(|e| api_error(StatusCode::NOT_FOUND, e))
}

/// Handle POST /tasks/:id/complete - Toggle a task's completed flag
pub async fn toggle_complete_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<TasksResponse>, ApiError> {
    state
        .update_tasks("toggle-complete", |list| list.toggle_complete(id))
        .map(|tasks| Json(TasksResponse::new(tasks)))
        .map_err(|e| api_error(StatusCode::NOT_FOUND, e))
}

/// Handle POST /tasks/:id/expand - Toggle a task's expanded flag
pub async fn toggle_expanded_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<u64>,
) -> Result<Json<TasksResponse>, ApiError> {
    state
        .update_tasks("toggle-expanded", |list| list.toggle_expanded(id))
        .map(|tasks| Json(TasksResponse::new(tasks)))
        .map_err(|e| api_error(StatusCode::NOT_FOUND, e))
}

/// Handle GET /status - Return current server status
pub async fn status_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, ApiError> {
    let tasks = state
        .get_tasks()
        .map_err(|e| api_error(StatusCode::INTERNAL_SERVER_ERROR, e))?;

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer: state.timer.current_state().into(),
        session_length_ms: state.timer.session_length().as_millis() as u64,
        task_count: tasks.len(),
        completed_tasks: tasks.iter().filter(|task| task.completed).count(),
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
