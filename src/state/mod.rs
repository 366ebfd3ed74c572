//! State management module
//!
//! This module contains the match timer state machine, its configuration
//! and the shared application state wrapped around it.

pub mod phase;
pub mod durations;
pub mod timer_state;
pub mod match_timer;
pub mod app_state;

// Re-export main types
pub use phase::Phase;
pub use durations::{DurationChoice, DurationEdit, DurationKind, Durations};
pub use timer_state::{format_mmss, TimerSnapshot, TimerState};
pub use match_timer::MatchTimer;
pub use app_state::{AppState, Dispatched, Intent};
