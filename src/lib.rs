//! Match Whistle - A referee match timer
//!
//! Counts down through first half, break, second half and optional
//! overtime, blowing whistle cues at the one-minute mark and at every
//! phase change.

pub mod config;
pub mod state;
pub mod api;
pub mod services;
pub mod tasks;
pub mod utils;

// Re-export commonly used types
pub use config::Config;
pub use state::{AppState, MatchTimer};
pub use api::create_router;
pub use utils::signals::shutdown_signal;
