//! Phase/timer state machine
//!
//! `MatchTimer` is synchronous and clock-agnostic: every operation that
//! needs the current time takes it as an argument, and every operation
//! that should be heard returns the cues to emit. Playing them is the
//! caller's job.

use std::time::Duration;
use tokio::time::Instant;
use tracing::{debug, info};

use super::{DurationEdit, Durations, Phase, TimerSnapshot, TimerState};
use crate::services::Cue;

/// Remaining time at or below which the one-minute warning fires
pub const WARNING_THRESHOLD_MS: u64 = 60_000;
/// Time added by the +10s control
pub const ADD_TIME_MS: u64 = 10_000;

#[derive(Debug, Clone)]
pub struct MatchTimer {
    state: TimerState,
    durations: Durations,
}

impl MatchTimer {
    pub fn new(durations: Durations) -> Self {
        Self {
            state: TimerState::new(durations.half_ms()),
            durations,
        }
    }

    pub fn state(&self) -> &TimerState {
        &self.state
    }

    pub fn durations(&self) -> &Durations {
        &self.durations
    }

    pub fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::capture(&self.state, &self.durations)
    }

    /// Enter a phase with a fresh countdown and a cleared warning flag
    pub fn set_phase(&mut self, phase: Phase) {
        debug!("Entering phase {:?}", phase);
        self.state.phase = phase;
        self.state.warned_this_phase = false;
        self.state.remaining_ms = self.durations.duration_for(phase);
    }

    fn start_running(&mut self, now: Instant) {
        self.state.running = true;
        self.state.last_tick = Some(now);
    }

    /// Advance the countdown to `now`.
    ///
    /// Does nothing while stopped. A tick that drains the phase runs the
    /// phase-advance policy in the same call.
    pub fn tick(&mut self, now: Instant) -> Vec<Cue> {
        if !self.state.running {
            return Vec::new();
        }

        let last = self.state.last_tick.unwrap_or(now);
        // saturating: a clock sample older than the last one counts as zero
        let delta = now.saturating_duration_since(last).as_millis() as u64;
        // only whole milliseconds are consumed, the remainder carries into the next tick
        self.state.last_tick = Some(last + Duration::from_millis(delta));
        self.state.remaining_ms = self.state.remaining_ms.saturating_sub(delta);

        let mut cues = Vec::new();

        if !self.state.warned_this_phase
            && self.state.phase.warns_at_one_minute()
            && (1..=WARNING_THRESHOLD_MS).contains(&self.state.remaining_ms)
        {
            self.state.warned_this_phase = true;
            info!("One minute left in {}", self.state.phase.label());
            cues.push(Cue::ShortWhistle);
        }

        if self.state.remaining_ms == 0 {
            self.state.running = false;
            cues.extend(self.advance_phase(now));
        }

        cues
    }

    /// Move to the next phase after the current one ran out
    fn advance_phase(&mut self, now: Instant) -> Option<Cue> {
        let (cue, next) = match self.state.phase {
            Phase::FirstHalf => (Cue::LongWhistle, Phase::Break),
            Phase::Break => (Cue::ShortWhistle, Phase::SecondHalf),
            Phase::SecondHalf if self.durations.overtime_enabled => {
                (Cue::LongWhistle, Phase::Overtime)
            }
            Phase::SecondHalf | Phase::Overtime => (Cue::DoubleWhistle, Phase::Done),
            Phase::Idle | Phase::Done => {
                self.state.running = false;
                return None;
            }
        };

        info!("{} finished, moving to {}", self.state.phase.label(), next.label());
        // The phase changes now; the caller plays the returned cue afterwards, so
        // observers see Done while the double whistle is still sounding.
        self.set_phase(next);
        if next != Phase::Done {
            self.start_running(now);
        }
        Some(cue)
    }

    /// Pause when running; otherwise start, kicking off a new match from a boundary phase
    pub fn toggle_start_pause(&mut self, now: Instant) {
        if self.state.running {
            info!("Paused with {} ms left", self.state.remaining_ms);
            self.state.running = false;
            return;
        }

        if self.state.phase.is_boundary() {
            self.set_phase(Phase::FirstHalf);
        }
        info!("Running {}", self.state.phase.label());
        self.start_running(now);
    }

    /// Add ten seconds to the current countdown. Returns false at a boundary phase.
    ///
    /// The configured phase duration is left alone, so repeated use can push
    /// the countdown past it.
    pub fn add_ten_seconds(&mut self) -> bool {
        if self.state.phase.is_boundary() {
            return false;
        }
        self.state.remaining_ms += ADD_TIME_MS;
        true
    }

    pub fn reset(&mut self) {
        info!("Timer reset");
        self.state.running = false;
        self.state.phase = Phase::Idle;
        self.state.warned_this_phase = false;
        self.state.remaining_ms = self.durations.half_ms();
    }

    pub fn manual_whistle(&self) -> Cue {
        Cue::LongWhistle
    }

    /// Apply a duration edit. Returns false, leaving everything untouched,
    /// unless the timer is stopped at a boundary phase.
    pub fn edit_durations(&mut self, edit: DurationEdit) -> bool {
        if !self.state.can_edit_durations() {
            debug!("Ignoring duration edit {:?} while {:?}", edit, self.state.phase);
            return false;
        }
        if !self.durations.apply(edit) {
            return false;
        }
        self.state.remaining_ms = self.durations.duration_for(self.state.phase);
        true
    }
}

impl Default for MatchTimer {
    fn default() -> Self {
        Self::new(Durations::default())
    }
}
