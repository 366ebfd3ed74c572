//! Countdown state and its observable snapshot

use serde::{Deserialize, Serialize};
use tokio::time::Instant;

use super::{Durations, Phase};

/// Mutable countdown state for the current phase
#[derive(Debug, Clone)]
pub struct TimerState {
    pub phase: Phase,
    pub remaining_ms: u64,
    pub running: bool,
    /// Whether the one-minute warning already fired for this phase instance
    pub warned_this_phase: bool,
    pub last_tick: Option<Instant>,
}

impl TimerState {
    /// Create an idle timer holding the given half duration
    pub fn new(half_ms: u64) -> Self {
        Self {
            phase: Phase::Idle,
            remaining_ms: half_ms,
            running: false,
            warned_this_phase: false,
            last_tick: None,
        }
    }

    /// Durations may only change while stopped at a boundary phase
    pub fn can_edit_durations(&self) -> bool {
        !self.running && self.phase.is_boundary()
    }
}

/// Read-only view published to the presentation layer after every change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimerSnapshot {
    pub phase: Phase,
    pub label: String,
    pub remaining_ms: u64,
    pub remaining_text: String,
    pub running: bool,
    pub warned_this_phase: bool,
    pub can_edit_durations: bool,
    pub can_add_time: bool,
    pub durations: Durations,
}

impl TimerSnapshot {
    pub fn capture(state: &TimerState, durations: &Durations) -> Self {
        Self {
            phase: state.phase,
            label: state.phase.label().to_string(),
            remaining_ms: state.remaining_ms,
            remaining_text: format_mmss(state.remaining_ms),
            running: state.running,
            warned_this_phase: state.warned_this_phase,
            can_edit_durations: state.can_edit_durations(),
            can_add_time: !state.phase.is_boundary(),
            durations: *durations,
        }
    }
}

/// Format milliseconds as `MM:SS`, truncating partial seconds
pub fn format_mmss(ms: u64) -> String {
    let total_secs = ms / 1000;
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_minutes_and_seconds() {
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(999), "00:00");
        assert_eq!(format_mmss(60_000), "01:00");
        assert_eq!(format_mmss(600_000), "10:00");
        assert_eq!(format_mmss(59_999), "00:59");
        assert_eq!(format_mmss(180 * 60_000), "180:00");
    }

    #[test]
    fn new_state_is_idle_and_editable() {
        let state = TimerState::new(600_000);
        assert_eq!(state.phase, Phase::Idle);
        assert_eq!(state.remaining_ms, 600_000);
        assert!(state.can_edit_durations());
    }

    #[test]
    fn snapshot_gates_controls() {
        let durations = Durations::default();
        let mut state = TimerState::new(durations.half_ms());
        let snap = TimerSnapshot::capture(&state, &durations);
        assert!(snap.can_edit_durations);
        assert!(!snap.can_add_time);
        assert_eq!(snap.label, "READY");

        state.phase = Phase::Break;
        let snap = TimerSnapshot::capture(&state, &durations);
        assert!(!snap.can_edit_durations);
        assert!(snap.can_add_time);
    }
}
