//! Background tasks module
//!
//! This module contains background tasks spawned by the timer engine.

pub mod countdown;

// Re-export main functions
pub use countdown::countdown_task;
