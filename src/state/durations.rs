//! Configured phase durations and their editing rules

use serde::{Deserialize, Serialize};

use super::Phase;

/// Shortest countdown any phase may be configured with
pub const MIN_DURATION_MS: u64 = 10_000;

pub const HALF_PRESETS: &[u32] = &[7, 10, 12, 15, 20, 25, 30, 40, 45, 60, 90];
pub const BREAK_PRESETS: &[u32] = &[1, 2, 3, 5, 10, 15];
pub const OVERTIME_PRESETS: &[u32] = &[1, 2, 3, 5, 10, 15];

/// Which configured duration an edit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationKind {
    Half,
    Break,
    Overtime,
}

impl DurationKind {
    /// Inclusive bounds for custom minute values
    pub fn custom_bounds(&self) -> (u32, u32) {
        match self {
            DurationKind::Half => (1, 180),
            DurationKind::Break => (1, 60),
            DurationKind::Overtime => (1, 60),
        }
    }

    pub fn presets(&self) -> &'static [u32] {
        match self {
            DurationKind::Half => HALF_PRESETS,
            DurationKind::Break => BREAK_PRESETS,
            DurationKind::Overtime => OVERTIME_PRESETS,
        }
    }

    pub fn clamp_minutes(&self, minutes: i64) -> u32 {
        let (lo, hi) = self.custom_bounds();
        minutes.clamp(lo as i64, hi as i64) as u32
    }
}

/// Preset or custom minute selection for one duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationChoice {
    pub preset_minutes: u32,
    pub custom_minutes: u32,
    pub use_custom: bool,
}

impl DurationChoice {
    pub fn new(minutes: u32) -> Self {
        Self {
            preset_minutes: minutes,
            custom_minutes: minutes,
            use_custom: false,
        }
    }

    pub fn minutes(&self) -> u32 {
        if self.use_custom {
            self.custom_minutes
        } else {
            self.preset_minutes
        }
    }

    /// Effective countdown length, never below [`MIN_DURATION_MS`]
    pub fn total_ms(&self) -> u64 {
        (self.minutes() as u64 * 60_000).max(MIN_DURATION_MS)
    }
}

/// A single edit request coming from the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum DurationEdit {
    PickPreset { kind: DurationKind, minutes: u32 },
    StepCustom { kind: DurationKind, delta: i32 },
    SetCustom { kind: DurationKind, minutes: u32 },
    UseCustom { kind: DurationKind },
    ToggleOvertime,
}

/// All configured durations plus the overtime switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Durations {
    pub half: DurationChoice,
    pub break_time: DurationChoice,
    pub overtime: DurationChoice,
    pub overtime_enabled: bool,
}

impl Durations {
    /// Build durations from minute values, clamped into their custom bounds
    pub fn from_minutes(half: u32, break_time: u32, overtime: u32, overtime_enabled: bool) -> Self {
        Self {
            half: DurationChoice::new(DurationKind::Half.clamp_minutes(half as i64)),
            break_time: DurationChoice::new(DurationKind::Break.clamp_minutes(break_time as i64)),
            overtime: DurationChoice::new(DurationKind::Overtime.clamp_minutes(overtime as i64)),
            overtime_enabled,
        }
    }

    pub fn half_ms(&self) -> u64 {
        self.half.total_ms()
    }

    pub fn break_ms(&self) -> u64 {
        self.break_time.total_ms()
    }

    pub fn overtime_ms(&self) -> u64 {
        self.overtime.total_ms()
    }

    /// Nominal countdown for a phase; the two halves share the half duration
    pub fn duration_for(&self, phase: Phase) -> u64 {
        match phase {
            Phase::Break => self.break_ms(),
            Phase::Overtime => self.overtime_ms(),
            Phase::Idle | Phase::FirstHalf | Phase::SecondHalf => self.half_ms(),
            Phase::Done => 0,
        }
    }

    fn choice_mut(&mut self, kind: DurationKind) -> &mut DurationChoice {
        match kind {
            DurationKind::Half => &mut self.half,
            DurationKind::Break => &mut self.break_time,
            DurationKind::Overtime => &mut self.overtime,
        }
    }

    /// Apply an edit. Returns false when the edit was not applicable.
    ///
    /// Presets must come from the kind's preset list. Overtime edits other
    /// than the toggle itself only apply while overtime is enabled.
    pub fn apply(&mut self, edit: DurationEdit) -> bool {
        match edit {
            DurationEdit::ToggleOvertime => {
                self.overtime_enabled = !self.overtime_enabled;
                true
            }
            DurationEdit::PickPreset { kind, .. }
            | DurationEdit::StepCustom { kind, .. }
            | DurationEdit::SetCustom { kind, .. }
            | DurationEdit::UseCustom { kind }
                if kind == DurationKind::Overtime && !self.overtime_enabled =>
            {
                false
            }
            DurationEdit::PickPreset { kind, minutes } => {
                if !kind.presets().contains(&minutes) {
                    return false;
                }
                let choice = self.choice_mut(kind);
                choice.use_custom = false;
                choice.preset_minutes = minutes;
                true
            }
            DurationEdit::StepCustom { kind, delta } => {
                let choice = self.choice_mut(kind);
                choice.use_custom = true;
                let stepped = choice.custom_minutes as i64 + delta as i64;
                choice.custom_minutes = kind.clamp_minutes(stepped);
                true
            }
            DurationEdit::SetCustom { kind, minutes } => {
                let choice = self.choice_mut(kind);
                choice.use_custom = true;
                choice.custom_minutes = kind.clamp_minutes(minutes as i64);
                true
            }
            DurationEdit::UseCustom { kind } => {
                self.choice_mut(kind).use_custom = true;
                true
            }
        }
    }
}

impl Default for Durations {
    fn default() -> Self {
        Self::from_minutes(10, 5, 5, false)
    }
}
