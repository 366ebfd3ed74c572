//! Main application state management

use std::{
    sync::{Arc, Mutex},
    time::Instant as StdInstant,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::{sync::watch, time::Instant};
use tracing::{debug, info};

use super::{DurationEdit, Durations, MatchTimer, TimerSnapshot};
use crate::services::{Cue, CuePlayer};

/// A user intent forwarded by the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "intent", rename_all = "snake_case")]
pub enum Intent {
    StartPause,
    AddTenSeconds,
    Reset,
    ManualWhistle,
    EditDurations { edit: DurationEdit },
}

impl Intent {
    pub fn name(&self) -> &'static str {
        match self {
            Intent::StartPause => "start-pause",
            Intent::AddTenSeconds => "add-ten",
            Intent::Reset => "reset",
            Intent::ManualWhistle => "whistle",
            Intent::EditDurations { .. } => "durations",
        }
    }
}

/// Result of dispatching an intent
#[derive(Debug, Clone)]
pub struct Dispatched {
    /// False when the intent was ignored in the current state
    pub applied: bool,
    pub snapshot: TimerSnapshot,
}

/// Application state shared by the countdown task and the control surface
#[derive(Debug)]
pub struct AppState {
    /// The single match timer
    pub timer: Arc<Mutex<MatchTimer>>,
    /// Whistle/vibration output
    pub cues: CuePlayer,
    /// Server metadata
    pub start_time: StdInstant,
    pub port: u16,
    pub host: String,
    /// Last intent tracking
    pub last_intent: Arc<Mutex<Option<String>>>,
    pub last_intent_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    /// Snapshot published after every change
    pub snapshot_tx: watch::Sender<TimerSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<TimerSnapshot>,
}

impl AppState {
    /// Create a new AppState with an idle timer
    pub fn new(port: u16, host: String, durations: Durations, cues: CuePlayer) -> Self {
        let timer = MatchTimer::new(durations);
        let (snapshot_tx, snapshot_rx) = watch::channel(timer.snapshot());

        Self {
            timer: Arc::new(Mutex::new(timer)),
            cues,
            start_time: StdInstant::now(),
            port,
            host,
            last_intent: Arc::new(Mutex::new(None)),
            last_intent_time: Arc::new(Mutex::new(None)),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
        }
    }

    /// Apply a change to the timer and publish the new snapshot.
    ///
    /// The lock is released before returning so cues can be played
    /// without holding it.
    pub fn update_timer<F, R>(&self, updater: F) -> Result<(R, TimerSnapshot), String>
    where
        F: FnOnce(&mut MatchTimer) -> R,
    {
        let mut timer = self.timer.lock()
            .map_err(|e| format!("Failed to lock match timer: {}", e))?;

        let result = updater(&mut *timer);
        let snapshot = timer.snapshot();
        drop(timer);

        // send_replace never fails, even without subscribers
        self.snapshot_tx.send_replace(snapshot.clone());

        Ok((result, snapshot))
    }

    /// Advance the countdown to now and play whatever cues it produced
    pub async fn tick(&self) -> Result<TimerSnapshot, String> {
        let (cues, snapshot) = self.update_timer(|timer| timer.tick(Instant::now()))?;
        self.cues.play_all(&cues).await;
        Ok(snapshot)
    }

    /// Execute a user intent against the timer
    pub async fn dispatch(&self, intent: Intent) -> Result<Dispatched, String> {
        info!("Intent: {}", intent.name());

        let ((applied, cues), snapshot) = self.update_timer(|timer| match intent {
            Intent::StartPause => {
                timer.toggle_start_pause(Instant::now());
                (true, Vec::new())
            }
            Intent::AddTenSeconds => (timer.add_ten_seconds(), Vec::new()),
            Intent::Reset => {
                timer.reset();
                (true, Vec::new())
            }
            Intent::ManualWhistle => (true, vec![timer.manual_whistle()]),
            Intent::EditDurations { edit } => (timer.edit_durations(edit), Vec::<Cue>::new()),
        })?;

        if !applied {
            debug!("Intent {} ignored in phase {:?}", intent.name(), snapshot.phase);
        }

        if let Ok(mut last_intent) = self.last_intent.lock() {
            *last_intent = Some(intent.name().to_string());
        }
        if let Ok(mut last_time) = self.last_intent_time.lock() {
            *last_time = Some(Utc::now());
        }

        self.cues.play_all(&cues).await;

        Ok(Dispatched { applied, snapshot })
    }

    /// Get the current snapshot
    pub fn snapshot(&self) -> Result<TimerSnapshot, String> {
        self.timer.lock()
            .map(|timer| timer.snapshot())
            .map_err(|e| format!("Failed to lock match timer: {}", e))
    }

    /// Subscribe to snapshot updates
    pub fn subscribe(&self) -> watch::Receiver<TimerSnapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last intent information
    pub fn get_last_intent(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_intent = self.last_intent.lock().ok().and_then(|a| a.clone());
        let last_intent_time = self.last_intent_time.lock().ok().and_then(|t| *t);
        (last_intent, last_intent_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::cues::recording::{player, Played},
        state::{DurationKind, Phase},
    };

    fn app() -> (AppState, Arc<crate::services::cues::recording::Recorder>) {
        let (cues, recorder) = player();
        (AppState::new(0, "127.0.0.1".to_string(), Durations::default(), cues), recorder)
    }

    #[tokio::test(start_paused = true)]
    async fn start_publishes_running_snapshot() {
        let (state, _) = app();
        let mut rx = state.subscribe();

        let result = state.dispatch(Intent::StartPause).await.unwrap();
        assert!(result.applied);
        assert!(result.snapshot.running);
        assert_eq!(result.snapshot.phase, Phase::FirstHalf);

        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), result.snapshot);
        assert_eq!(state.get_last_intent().0.as_deref(), Some("start-pause"));
    }

    #[tokio::test(start_paused = true)]
    async fn manual_whistle_plays_long_in_any_state() {
        let (state, recorder) = app();
        state.dispatch(Intent::ManualWhistle).await.unwrap();
        assert_eq!(recorder.played(), vec![Played::AudioLong, Played::HapticLong]);
        assert_eq!(state.snapshot().unwrap().phase, Phase::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn add_ten_ignored_when_idle() {
        let (state, _) = app();
        let result = state.dispatch(Intent::AddTenSeconds).await.unwrap();
        assert!(!result.applied);
        assert_eq!(result.snapshot.remaining_ms, 600_000);
    }

    #[tokio::test(start_paused = true)]
    async fn edit_rejected_while_running() {
        let (state, _) = app();
        state.dispatch(Intent::StartPause).await.unwrap();
        let before = state.snapshot().unwrap();

        let edit = DurationEdit::PickPreset { kind: DurationKind::Half, minutes: 45 };
        let result = state.dispatch(Intent::EditDurations { edit }).await.unwrap();
        assert!(!result.applied);
        assert_eq!(result.snapshot.durations, before.durations);
    }

    #[tokio::test(start_paused = true)]
    async fn tick_tracks_elapsed_time() {
        let (state, _) = app();
        state.dispatch(Intent::StartPause).await.unwrap();
        tokio::time::advance(std::time::Duration::from_millis(1_500)).await;
        let snap = state.tick().await.unwrap();
        assert_eq!(snap.remaining_ms, 598_500);
        assert_eq!(snap.remaining_text, "09:58");
    }

    #[test]
    fn intent_json_shape() {
        let intent: Intent = serde_json::from_str(
            r#"{"intent":"edit_durations","edit":{"action":"toggle_overtime"}}"#,
        )
        .unwrap();
        assert_eq!(intent, Intent::EditDurations { edit: DurationEdit::ToggleOvertime });
    }
}
