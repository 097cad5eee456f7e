//! API response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    state::{Task, TimerPhase, TimerState},
    utils::format_remaining,
};

/// Timer snapshot as exposed over HTTP
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerView {
    pub remaining_ms: u64,
    pub running: bool,
    pub phase: TimerPhase,
    /// Remaining time as `MM:SS`
    pub display: String,
}

impl From<TimerState> for TimerView {
    fn from(state: TimerState) -> Self {
        Self {
            remaining_ms: state.remaining_ms,
            running: state.running,
            phase: state.phase(),
            display: format_remaining(state.remaining_ms),
        }
    }
}

/// Response for timer control endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimerResponse {
    pub action: String,
    pub timestamp: DateTime<Utc>,
    pub timer: TimerView,
}

impl TimerResponse {
    pub fn new(action: &str, state: TimerState) -> Self {
        Self {
            action: action.to_string(),
            timestamp: Utc::now(),
            timer: state.into(),
        }
    }
}

/// Response for task list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TasksResponse {
    pub timestamp: DateTime<Utc>,
    pub tasks: Vec<Task>,
}

impl TasksResponse {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self {
            timestamp: Utc::now(),
            tasks,
        }
    }
}

/// Body of POST /tasks
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTaskRequest {
    pub title: String,
}

/// Error body returned alongside non-2xx status codes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    pub fn new(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message,
            timestamp: Utc::now(),
        }
    }
}

/// Overall server status
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub timer: TimerView,
    pub session_length_ms: u64,
    pub task_count: usize,
    pub completed_tasks: usize,
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
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
