//! State management module
//!
//! This module contains the timer snapshot, the engine that drives it, the
//! task list and the shared application state.

pub mod app_state;
pub mod task_list;
pub mod timer_channel;
pub mod timer_engine;
pub mod timer_state;

// Re-export main types
pub use app_state::AppState;
pub use task_list::{Task, TaskList};
pub use timer_channel::TimerChannel;
pub use timer_engine::TimerEngine;
pub use timer_state::{TimerPhase, TimerState};
