//! Match phase enumeration

use serde::{Deserialize, Serialize};

/// One stage of the match timeline
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Idle,
    FirstHalf,
    Break,
    SecondHalf,
    Overtime,
    Done,
}

impl Phase {
    /// Label shown above the countdown
    pub fn label(&self) -> &'static str {
        match self {
            Phase::Idle => "READY",
            Phase::FirstHalf => "1ST HALF",
            Phase::Break => "BREAK",
            Phase::SecondHalf => "2ND HALF",
            Phase::Overtime => "OVERTIME",
            Phase::Done => "FULL TIME",
        }
    }

    /// Idle and Done are the only phases where durations may be edited
    pub fn is_boundary(&self) -> bool {
        matches!(self, Phase::Idle | Phase::Done)
    }

    pub fn warns_at_one_minute(&self) -> bool {
        matches!(self, Phase::FirstHalf | Phase::SecondHalf)
    }
}
