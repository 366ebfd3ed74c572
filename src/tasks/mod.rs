//! Background tasks module
//!
//! This module contains the countdown loop that runs alongside the control surface.

pub mod countdown;

// Re-export main functions
pub use countdown::countdown_task;
