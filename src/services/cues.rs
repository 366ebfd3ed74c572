//! Whistle and vibration cue dispatch

use std::{
    io::Write,
    sync::Arc,
    time::Duration,
};
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, info, warn};

/// Gap between the long and short whistle of the final signal
pub const DOUBLE_WHISTLE_GAP: Duration = Duration::from_millis(650);

/// A combined audio + haptic signal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cue {
    ShortWhistle,
    LongWhistle,
    /// Long then short ("piii... pi"), used at full time
    DoubleWhistle,
}

/// Vibration waveform: alternating pause/hold segments in milliseconds,
/// starting with a pause, played once
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HapticPattern {
    pub timings_ms: &'static [u64],
}

impl HapticPattern {
    pub const SHORT: HapticPattern = HapticPattern { timings_ms: &[0, 120] };
    pub const LONG: HapticPattern = HapticPattern { timings_ms: &[0, 220, 120, 220, 120, 320] };

    pub fn total(&self) -> Duration {
        Duration::from_millis(self.timings_ms.iter().sum())
    }
}

/// Sound output; implementations must not block on playback
pub trait AudioCue: Send + Sync {
    fn play_short(&self);
    fn play_long(&self);
}

/// Vibration output; implementations must not block on playback
pub trait HapticCue: Send + Sync {
    fn short(&self);
    fn long(&self);
}

/// Audio sink that only logs
#[derive(Debug, Default, Clone, Copy)]
pub struct LogAudio;

impl AudioCue for LogAudio {
    fn play_short(&self) {
        info!("Whistle: short");
    }

    fn play_long(&self) {
        info!("Whistle: long");
    }
}

/// Audio sink that rings the terminal bell, once for short and twice for long
#[derive(Debug, Default, Clone, Copy)]
pub struct BellAudio;

impl BellAudio {
    fn ring(&self, times: usize) {
        let mut out = std::io::stdout().lock();
        if let Err(e) = out.write_all("\x07".repeat(times).as_bytes()).and_then(|_| out.flush()) {
            warn!("Failed to ring terminal bell: {}", e);
        }
    }
}

impl AudioCue for BellAudio {
    fn play_short(&self) {
        self.ring(1);
    }

    fn play_long(&self) {
        self.ring(2);
    }
}

/// Haptic sink that logs the waveform it would play
#[derive(Debug, Default, Clone, Copy)]
pub struct LogHaptic;

impl HapticCue for LogHaptic {
    fn short(&self) {
        let pattern = HapticPattern::SHORT;
        debug!("Vibrate {:?} ({:?})", pattern.timings_ms, pattern.total());
    }

    fn long(&self) {
        let pattern = HapticPattern::LONG;
        debug!("Vibrate {:?} ({:?})", pattern.timings_ms, pattern.total());
    }
}

/// Plays cues on an audio and a haptic sink together
#[derive(Clone)]
pub struct CuePlayer {
    audio: Arc<dyn AudioCue>,
    haptic: Arc<dyn HapticCue>,
}

impl CuePlayer {
    pub fn new(audio: Arc<dyn AudioCue>, haptic: Arc<dyn HapticCue>) -> Self {
        Self { audio, haptic }
    }

    /// Log-only player, used when no device output is wanted
    pub fn logging() -> Self {
        Self::new(Arc::new(LogAudio), Arc::new(LogHaptic))
    }

    fn short(&self) {
        self.audio.play_short();
        self.haptic.short();
    }

    fn long(&self) {
        self.audio.play_long();
        self.haptic.long();
    }

    /// Play a cue. Only the double whistle waits, for the gap between its two parts.
    pub async fn play(&self, cue: Cue) {
        match cue {
            Cue::ShortWhistle => self.short(),
            Cue::LongWhistle => self.long(),
            Cue::DoubleWhistle => {
                self.long();
                sleep(DOUBLE_WHISTLE_GAP).await;
                self.short();
            }
        }
    }

    pub async fn play_all(&self, cues: &[Cue]) {
        for cue in cues {
            self.play(*cue).await;
        }
    }
}

impl std::fmt::Debug for CuePlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CuePlayer").finish_non_exhaustive()
    }
}


#[cfg(test)]
mod tests {
    use super::recording::{player, Played};
    use super::*;

    #[test]
    fn haptic_patterns() {
        assert_eq!(HapticPattern::SHORT.total(), Duration::from_millis(120));
        assert_eq!(HapticPattern::LONG.total(), Duration::from_millis(1000));
    }

    #[tokio::test(start_paused = true)]
    async fn single_cues_pair_audio_with_haptics() {
        let (player, recorder) = player();
        player.play(Cue::ShortWhistle).await;
        player.play(Cue::LongWhistle).await;
        assert_eq!(
            recorder.played(),
            vec![Played::AudioShort, Played::HapticShort, Played::AudioLong, Played::HapticLong]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn double_whistle_is_long_gap_short() {
        let (player, recorder) = player();
        player.play(Cue::DoubleWhistle).await;

        let audio = recorder.audio();
        assert_eq!(audio.len(), 2);
        assert_eq!(audio[0].0, Played::AudioLong);
        assert_eq!(audio[1].0, Played::AudioShort);
        let gap = audio[1].1 - audio[0].1;
        assert!(gap >= DOUBLE_WHISTLE_GAP);
        assert!(gap < DOUBLE_WHISTLE_GAP + Duration::from_millis(5));
    }
}
