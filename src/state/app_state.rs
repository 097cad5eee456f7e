//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::{Duration, Instant},
};
use chrono::{DateTime, Utc};
use tracing::info;

use super::{Task, TaskList, TimerEngine};

/// Main application state shared by all HTTP handlers
#[derive(Debug)]
pub struct AppState {
    /// Countdown timer
    pub timer: TimerEngine,
    /// To-do list, independent of the timer
    pub task_list: Arc<Mutex<TaskList>>,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
}

impl AppState {
    /// Create a new AppState with an idle timer and an empty task list
    pub fn new(port: u16, host: String, session_length: Duration) -> Self {
        Self {
            timer: TimerEngine::new(session_length),
            task_list: Arc::new(Mutex::new(TaskList::new())),
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
        }
    }

    /// Record the most recent user action
    pub fn record_action(&self, action: &str) {
        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }
    }

    /// Apply an update to the task list and return the resulting tasks
    pub fn update_tasks<F>(&self, action: &str, updater: F) -> Result<Vec<Task>, String>
    where
        F: FnOnce(&mut TaskList) -> Result<Vec<Task>, String>,
    {
        let mut task_list = self.task_list.lock()
            .map_err(|e| format!("Failed to lock task list: {}", e))?;

        let tasks = updater(&mut *task_list)?;
        drop(task_list); // Release the lock early

        info!("Task list updated by {}", action);
        self.record_action(action);
        Ok(tasks)
    }

    /// Get current tasks
    pub fn get_tasks(&self) -> Result<Vec<Task>, String> {
        self.task_list.lock()
            .map(|list| list.tasks().to_vec())
            .map_err(|e| format!("Failed to lock task list: {}", e))
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}
