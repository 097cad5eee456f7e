//! Pomodoro Server - A countdown timer and task list served over HTTP
//!
//! The core is [`state::TimerEngine`], a countdown that runs at most one
//! background decrement task and publishes every snapshot to its observers.

pub mod config;
pub mod state;
pub mod api;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, TimerEngine, TimerState};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
