//! Device output module
//!
//! This module contains the audio and haptic cue sinks the timer plays
//! its whistles through.

pub mod cues;

// Re-export main types
pub use cues::{AudioCue, BellAudio, Cue, CuePlayer, HapticCue, HapticPattern, LogAudio, LogHaptic};
