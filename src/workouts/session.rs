//! Session wiring: listener callbacks and the tick-driven session wrapper.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossbeam::channel::{unbounded, Receiver, Sender};

use crate::audio::cues::CuePlayer;
use crate::workouts::player::WorkoutPlayer;
use crate::workouts::timer::{Clock, Ticker};
use crate::workouts::types::{SessionSummary, WorkoutDefinition, WorkoutError};

/// Receives the outcome of a session.
pub trait SessionListener {
    /// Called exactly once when the final set is completed.
    fn on_complete(&mut self, summary: SessionSummary);

    /// Called when the user abandons the session.
    fn on_exit(&mut self);
}

/// Session outcome event.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The workout was completed
    Completed(SessionSummary),
    /// The workout was abandoned
    Exited,
}

/// Listener that forwards outcomes over a crossbeam channel.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    tx: Sender<SessionEvent>,
}

impl ChannelListener {
    /// Create a listener and the receiver its events arrive on.
    pub fn new() -> (Self, Receiver<SessionEvent>) {
        let (tx, rx) = unbounded();
        (Self { tx }, rx)
    }
}

impl SessionListener for ChannelListener {
    fn on_complete(&mut self, summary: SessionSummary) {
        if self.tx.send(SessionEvent::Completed(summary)).is_err() {
            tracing::warn!("Session summary dropped: receiver gone");
        }
    }

    fn on_exit(&mut self) {
        if self.tx.send(SessionEvent::Exited).is_err() {
            tracing::warn!("Session exit dropped: receiver gone");
        }
    }
}

/// A player paired with its tick source.
///
/// The owner calls [`ActiveSession::pump`] regularly (every UI frame); the
/// session keeps the ticker armed for exactly the countdown that needs ticks
/// and delivers due ticks to the player.
pub struct ActiveSession {
    player: WorkoutPlayer,
    ticker: Ticker,
    clock: Arc<dyn Clock>,
}

impl ActiveSession {
    /// Create a session for a workout.
    pub fn start(
        workout: WorkoutDefinition,
        clock: Arc<dyn Clock>,
        cue: Box<dyn CuePlayer>,
        listener: Box<dyn SessionListener>,
    ) -> Result<Self, WorkoutError> {
        let player = WorkoutPlayer::new(workout, Arc::clone(&clock), cue, listener)?;
        Ok(Self {
            player,
            ticker: Ticker::new(),
            clock,
        })
    }

    /// Read access to the player.
    pub fn player(&self) -> &WorkoutPlayer {
        &self.player
    }

    /// Apply a user action, then resynchronize the tick source.
    pub fn apply(&mut self, action: impl FnOnce(&mut WorkoutPlayer)) {
        action(&mut self.player);
        self.sync_ticker();
    }

    /// Deliver a due tick, if any. Returns whether a tick was delivered.
    pub fn pump(&mut self) -> bool {
        self.sync_ticker();

        let now = self.clock.instant();
        let delivered = match self.ticker.poll(now) {
            Some(generation) => {
                self.player.handle_tick(generation);
                true
            }
            None => false,
        };

        if delivered {
            self.sync_ticker();
        }
        delivered
    }

    /// Time until the next tick is due, for repaint scheduling.
    pub fn time_until_tick(&self) -> Option<Duration> {
        self.ticker.time_until_due(self.clock.instant())
    }

    /// Abandon the session, cancelling the tick source first.
    pub fn exit(mut self) {
        self.ticker.cancel();
        self.player.exit();
    }

    /// Arm the ticker for the countdown that needs ticks, or cancel it.
    fn sync_ticker(&mut self) {
        let wanted = self.player.ticking_generation();
        if wanted == self.ticker.generation() {
            return;
        }

        match wanted {
            Some(generation) => self.ticker.arm(generation, self.now_instant()),
            None => self.ticker.cancel(),
        }
    }

    fn now_instant(&self) -> Instant {
        self.clock.instant()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::cues::SilentCuePlayer;
    use crate::workouts::timer::ManualClock;
    use crate::workouts::types::{Exercise, SessionPhase};

    fn rest_workout() -> WorkoutDefinition {
        WorkoutDefinition::new(
            "w",
            "W",
            vec![Exercise::reps("a", "A", 2, 10).with_rest(3)],
        )
    }

    fn session(clock: Arc<ManualClock>) -> (ActiveSession, Receiver<SessionEvent>) {
        let (listener, rx) = ChannelListener::new();
        let session = ActiveSession::start(
            rest_workout(),
            clock,
            Box::new(SilentCuePlayer),
            Box::new(listener),
        )
        .unwrap();
        (session, rx)
    }

    #[test]
    fn test_pump_delivers_one_tick_per_second() {
        let clock = Arc::new(ManualClock::default());
        let (mut session, _rx) = session(Arc::clone(&clock));

        session.apply(|p| p.complete_set());
        assert_eq!(session.player().countdown(), Some(3));

        assert!(!session.pump());
        clock.advance_secs(1);
        assert!(session.pump());
        assert!(!session.pump());
        assert_eq!(session.player().countdown(), Some(2));
    }

    #[test]
    fn test_pump_after_stall_decrements_once() {
        let clock = Arc::new(ManualClock::default());
        let (mut session, _rx) = session(Arc::clone(&clock));

        session.apply(|p| p.complete_set());
        clock.advance_secs(30);
        session.pump();
        session.pump();

        assert_eq!(session.player().countdown(), Some(2));
        assert_eq!(session.player().phase(), SessionPhase::Resting);
    }

    #[test]
    fn test_pause_disarms_ticker() {
        let clock = Arc::new(ManualClock::default());
        let (mut session, _rx) = session(Arc::clone(&clock));

        session.apply(|p| p.complete_set());
        session.apply(|p| p.toggle_pause());
        assert!(session.time_until_tick().is_none());

        clock.advance_secs(5);
        assert!(!session.pump());
        assert_eq!(session.player().countdown(), Some(3));

        session.apply(|p| p.toggle_pause());
        clock.advance_secs(1);
        assert!(session.pump());
        assert_eq!(session.player().countdown(), Some(2));
    }

    #[test]
    fn test_channel_listener_tolerates_closed_receiver() {
        let (mut listener, rx) = ChannelListener::new();
        drop(rx);

        listener.on_exit();
        listener.on_complete(SessionSummary {
            workout_id: "w".to_string(),
            workout_name: "W".to_string(),
            duration_minutes: 1,
            completed_exercises: 1,
            completed_sets: 1,
            estimated_calories: 0,
            completed_at: chrono::Utc::now(),
        });
    }

    #[test]
    fn test_exit_sends_event() {
        let clock = Arc::new(ManualClock::default());
        let (session, rx) = session(clock);

        session.exit();
        assert_eq!(rx.try_recv().ok(), Some(SessionEvent::Exited));
    }
}
