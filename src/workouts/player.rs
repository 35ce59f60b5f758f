//! Workout session player.
//!
//! Drives one run through a [`WorkoutDefinition`]: set and exercise
//! progression, rest and hold countdowns, pause, and the single
//! [`SessionSummary`] emitted when the last set is done.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::audio::cues::CuePlayer;
use crate::workouts::session::SessionListener;
use crate::workouts::timer::Clock;
use crate::workouts::types::{
    ActivePhase, CountdownKind, Exercise, SessionPhase, SessionSummary, WorkoutDefinition,
    WorkoutError,
};

/// A running countdown.
#[derive(Debug, Clone, Copy)]
struct Countdown {
    kind: CountdownKind,
    remaining: u32,
    generation: u64,
}

/// Session state machine for a single workout run.
///
/// Every transition is total: inputs that make no sense in the current
/// state are ignored. Once complete, the player ignores all further input.
pub struct WorkoutPlayer {
    workout: WorkoutDefinition,
    clock: Arc<dyn Clock>,
    cue: Box<dyn CuePlayer>,
    listener: Box<dyn SessionListener>,
    exercise_index: usize,
    current_set: u32,
    activity: ActivePhase,
    paused: bool,
    complete: bool,
    countdown: Option<Countdown>,
    /// Bumped each time a countdown starts; identifies its ticks
    countdown_generation: u64,
    tallies: HashMap<String, u32>,
    started_at: DateTime<Utc>,
    auto_start_holds: bool,
}

impl WorkoutPlayer {
    /// Create a player positioned at set 1 of the first exercise.
    pub fn new(
        workout: WorkoutDefinition,
        clock: Arc<dyn Clock>,
        cue: Box<dyn CuePlayer>,
        listener: Box<dyn SessionListener>,
    ) -> Result<Self, WorkoutError> {
        workout.validate()?;

        let started_at = clock.now();
        tracing::info!(
            "Workout session started: {} ({} exercises, {} sets)",
            workout.name,
            workout.exercise_count(),
            workout.total_sets()
        );

        Ok(Self {
            workout,
            clock,
            cue,
            listener,
            exercise_index: 0,
            current_set: 1,
            activity: ActivePhase::Exercising,
            paused: false,
            complete: false,
            countdown: None,
            countdown_generation: 0,
            tallies: HashMap::new(),
            started_at,
            auto_start_holds: false,
        })
    }

    /// Start timed holds as soon as a hold set becomes current.
    ///
    /// Off by default: holds normally wait for [`WorkoutPlayer::start_hold`].
    pub fn set_auto_start_holds(&mut self, enabled: bool) {
        self.auto_start_holds = enabled;
        if enabled {
            self.begin_hold();
        }
    }

    /// Mark the current set as done and progress.
    pub fn complete_set(&mut self) {
        if self.complete {
            return;
        }

        let exercise = &self.workout.exercises[self.exercise_index];
        let sets = exercise.sets;
        let rest_seconds = exercise.rest_seconds;
        *self.tallies.entry(exercise.id.clone()).or_insert(0) += 1;
        tracing::debug!(
            "Completed set {}/{} of {}",
            self.current_set,
            sets,
            exercise.name
        );

        // A running hold or an unfinished rest ends with the set.
        self.countdown = None;

        if self.current_set < sets {
            self.current_set += 1;
            if rest_seconds > 0 {
                self.activity = ActivePhase::Resting;
                self.start_countdown(CountdownKind::Rest, rest_seconds);
                tracing::debug!("Resting for {}s", rest_seconds);
            } else {
                self.enter_exercising();
            }
        } else if self.exercise_index + 1 < self.workout.exercises.len() {
            self.move_to_exercise(self.exercise_index + 1);
        } else {
            self.finish();
        }
    }

    /// Skip forward one exercise. No-op on the last exercise.
    pub fn advance_exercise(&mut self) {
        if self.complete || self.exercise_index + 1 >= self.workout.exercises.len() {
            return;
        }
        self.move_to_exercise(self.exercise_index + 1);
    }

    /// Go back one exercise. No-op on the first exercise.
    pub fn retreat_exercise(&mut self) {
        if self.complete || self.exercise_index == 0 {
            return;
        }
        self.move_to_exercise(self.exercise_index - 1);
    }

    /// Freeze or unfreeze the countdown.
    pub fn toggle_pause(&mut self) {
        if self.complete {
            return;
        }
        self.paused = !self.paused;
        tracing::debug!("Session {}", if self.paused { "paused" } else { "resumed" });
    }

    /// Start the hold countdown for the current timed-hold set.
    ///
    /// Ignored while resting, for repetition exercises, for zero-length
    /// holds, or when a hold is already running. Starting a hold by hand
    /// also lifts a pause.
    pub fn start_hold(&mut self) {
        if self.begin_hold() && self.paused {
            self.paused = false;
            tracing::debug!("Session resumed by hold start");
        }
    }

    /// Apply one elapsed second to the running countdown.
    pub fn tick(&mut self) {
        if let Some(generation) = self.ticking_generation() {
            self.handle_tick(generation);
        }
    }

    /// Apply a tick issued for `generation`. Ticks for a cancelled or
    /// replaced countdown, or received while paused, are ignored.
    pub fn handle_tick(&mut self, generation: u64) {
        if self.complete || self.paused {
            return;
        }

        let countdown = match self.countdown.as_mut() {
            Some(c) if c.generation == generation => c,
            _ => return,
        };

        countdown.remaining = countdown.remaining.saturating_sub(1);
        if countdown.remaining > 0 {
            return;
        }

        let kind = countdown.kind;
        self.countdown = None;

        match kind {
            CountdownKind::Rest => {
                tracing::debug!("Rest finished, set {} ready", self.current_set);
                self.cue.play_cue();
                self.enter_exercising();
            }
            CountdownKind::Hold => {
                tracing::debug!("Hold finished for set {}", self.current_set);
            }
        }
    }

    /// Abandon the session. Notifies the listener unless already complete.
    pub fn exit(mut self) {
        self.countdown = None;
        if !self.complete {
            tracing::info!(
                "Workout session exited: {} at exercise {} set {}",
                self.workout.name,
                self.exercise_index + 1,
                self.current_set
            );
            self.listener.on_exit();
        }
    }

    fn move_to_exercise(&mut self, index: usize) {
        self.countdown = None;
        self.exercise_index = index;
        self.current_set = 1;
        self.enter_exercising();
        tracing::debug!(
            "Moved to exercise {}: {}",
            index + 1,
            self.workout.exercises[index].name
        );
    }

    fn enter_exercising(&mut self) {
        self.activity = ActivePhase::Exercising;
        if self.auto_start_holds {
            self.begin_hold();
        }
    }

    /// Arm the hold countdown if the current set is a hold. Leaves the
    /// pause flag alone, so an auto-started hold stays frozen while paused.
    fn begin_hold(&mut self) -> bool {
        if self.complete
            || self.activity != ActivePhase::Exercising
            || self.countdown.is_some()
        {
            return false;
        }

        let seconds = match self.current_exercise().target.hold_seconds() {
            Some(seconds) if seconds > 0 => seconds,
            _ => return false,
        };

        self.start_countdown(CountdownKind::Hold, seconds);
        tracing::debug!("Hold started for {}s", seconds);
        true
    }

    fn start_countdown(&mut self, kind: CountdownKind, seconds: u32) {
        self.countdown_generation += 1;
        self.countdown = Some(Countdown {
            kind,
            remaining: seconds,
            generation: self.countdown_generation,
        });
    }

    fn finish(&mut self) {
        self.complete = true;
        self.countdown = None;
        self.activity = ActivePhase::Exercising;

        let completed_at = self.clock.now();
        let elapsed_secs = (completed_at - self.started_at).num_seconds().max(0);
        let summary = SessionSummary {
            workout_id: self.workout.id.clone(),
            workout_name: self.workout.name.clone(),
            duration_minutes: (elapsed_secs as f64 / 60.0).round() as u32,
            completed_exercises: self.workout.exercises.len() as u32,
            completed_sets: self.total_completed_sets(),
            estimated_calories: self.workout.estimated_calories,
            completed_at,
        };

        tracing::info!(
            "Workout complete: {} in {} min, {} sets",
            summary.workout_name,
            summary.duration_minutes,
            summary.completed_sets
        );
        self.listener.on_complete(summary);
    }

    /// The workout being played.
    pub fn workout(&self) -> &WorkoutDefinition {
        &self.workout
    }

    /// Current phase, with pause layered over the interrupted phase.
    pub fn phase(&self) -> SessionPhase {
        if self.complete {
            SessionPhase::Complete
        } else if self.paused {
            SessionPhase::Paused(self.activity)
        } else {
            match self.activity {
                ActivePhase::Exercising => SessionPhase::Exercising,
                ActivePhase::Resting => SessionPhase::Resting,
            }
        }
    }

    /// Whether the rest interval is active (paused or not).
    pub fn is_resting(&self) -> bool {
        !self.complete && self.activity == ActivePhase::Resting
    }

    /// Whether the countdown is frozen.
    pub fn is_paused(&self) -> bool {
        !self.complete && self.paused
    }

    /// Whether the session has completed.
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    /// Zero-based index of the current exercise.
    pub fn current_exercise_index(&self) -> usize {
        self.exercise_index
    }

    /// The current exercise.
    pub fn current_exercise(&self) -> &Exercise {
        &self.workout.exercises[self.exercise_index]
    }

    /// The exercise after the current one.
    pub fn next_exercise(&self) -> Option<&Exercise> {
        self.workout.exercises.get(self.exercise_index + 1)
    }

    /// One-based set number within the current exercise.
    pub fn current_set(&self) -> u32 {
        self.current_set
    }

    /// Remaining seconds of the running countdown.
    pub fn countdown(&self) -> Option<u32> {
        self.countdown.map(|c| c.remaining)
    }

    /// What the running countdown measures.
    pub fn countdown_kind(&self) -> Option<CountdownKind> {
        self.countdown.map(|c| c.kind)
    }

    /// Generation of the countdown that currently needs ticks.
    ///
    /// `None` when there is no countdown, while paused, and once complete.
    pub fn ticking_generation(&self) -> Option<u64> {
        if self.complete || self.paused {
            return None;
        }
        self.countdown.map(|c| c.generation)
    }

    /// Sets completed so far for an exercise.
    pub fn completed_sets_for(&self, exercise_id: &str) -> u32 {
        self.tallies.get(exercise_id).copied().unwrap_or(0)
    }

    /// Per-exercise completed-set tally.
    pub fn tallies(&self) -> &HashMap<String, u32> {
        &self.tallies
    }

    /// Sum of all tallies.
    pub fn total_completed_sets(&self) -> u32 {
        self.tallies.values().sum()
    }

    /// Completed sets as a percentage of all sets (0-100).
    pub fn progress_percent(&self) -> f32 {
        let total = self.workout.total_sets();
        if total == 0 {
            return 0.0;
        }
        (self.total_completed_sets() as f32 / total as f32 * 100.0).min(100.0)
    }

    /// When the session started.
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }
}

impl std::fmt::Debug for WorkoutPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkoutPlayer")
            .field("workout", &self.workout.id)
            .field("exercise_index", &self.exercise_index)
            .field("current_set", &self.current_set)
            .field("phase", &self.phase())
            .field("countdown", &self.countdown())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::cues::SilentCuePlayer;
    use crate::workouts::session::{ChannelListener, SessionEvent};
    use crate::workouts::timer::ManualClock;
    use crossbeam::channel::Receiver;

    fn player_for(workout: WorkoutDefinition) -> (WorkoutPlayer, Receiver<SessionEvent>) {
        let (listener, rx) = ChannelListener::new();
        let player = WorkoutPlayer::new(
            workout,
            Arc::new(ManualClock::default()),
            Box::new(SilentCuePlayer),
            Box::new(listener),
        )
        .unwrap();
        (player, rx)
    }

    #[test]
    fn test_initial_state() {
        let (player, _rx) = player_for(WorkoutDefinition::new(
            "w",
            "W",
            vec![Exercise::reps("a", "A", 2, 10).with_rest(10)],
        ));

        assert_eq!(player.phase(), SessionPhase::Exercising);
        assert_eq!(player.current_exercise_index(), 0);
        assert_eq!(player.current_set(), 1);
        assert_eq!(player.countdown(), None);
    }

    #[test]
    fn test_rejects_empty_workout() {
        let (listener, _rx) = ChannelListener::new();
        let result = WorkoutPlayer::new(
            WorkoutDefinition::new("w", "W", vec![]),
            Arc::new(ManualClock::default()),
            Box::new(SilentCuePlayer),
            Box::new(listener),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_rest_stays_exercising() {
        let (mut player, _rx) = player_for(WorkoutDefinition::new(
            "w",
            "W",
            vec![Exercise::reps("a", "A", 3, 10)],
        ));

        player.complete_set();
        assert_eq!(player.phase(), SessionPhase::Exercising);
        assert_eq!(player.current_set(), 2);
        assert_eq!(player.countdown(), None);
    }

    #[test]
    fn test_stale_generation_is_ignored() {
        let (mut player, _rx) = player_for(WorkoutDefinition::new(
            "w",
            "W",
            vec![
                Exercise::reps("a", "A", 2, 10).with_rest(5),
                Exercise::reps("b", "B", 2, 10).with_rest(5),
            ],
        ));

        player.complete_set();
        let first = player.ticking_generation().unwrap();
        player.advance_exercise();
        player.complete_set();
        let second = player.ticking_generation().unwrap();
        assert_ne!(first, second);

        player.handle_tick(first);
        assert_eq!(player.countdown(), Some(5));
        player.handle_tick(second);
        assert_eq!(player.countdown(), Some(4));
    }

    #[test]
    fn test_start_hold_ignored_for_reps() {
        let (mut player, _rx) = player_for(WorkoutDefinition::new(
            "w",
            "W",
            vec![Exercise::reps("a", "A", 1, 10)],
        ));

        player.start_hold();
        assert_eq!(player.countdown(), None);
    }

    #[test]
    fn test_hold_countdown_ends_without_phase_change() {
        let (mut player, _rx) = player_for(WorkoutDefinition::new(
            "w",
            "W",
            vec![Exercise::hold("plank", "Plank", 2, 3).with_rest(10)],
        ));

        player.tick();
        assert_eq!(player.countdown(), None, "holds never start on their own");

        player.start_hold();
        assert_eq!(player.countdown_kind(), Some(CountdownKind::Hold));
        player.tick();
        player.tick();
        player.tick();

        assert_eq!(player.countdown(), None);
        assert_eq!(player.phase(), SessionPhase::Exercising);
        assert_eq!(player.current_set(), 1);
    }

    #[test]
    fn test_auto_start_holds() {
        let (mut player, _rx) = player_for(WorkoutDefinition::new(
            "w",
            "W",
            vec![
                Exercise::reps("a", "A", 1, 10),
                Exercise::hold("plank", "Plank", 2, 20),
            ],
        ));

        player.set_auto_start_holds(true);
        assert_eq!(player.countdown(), None);

        player.complete_set();
        assert_eq!(player.countdown(), Some(20));
        assert_eq!(player.countdown_kind(), Some(CountdownKind::Hold));
    }

    #[test]
    fn test_manual_hold_start_lifts_pause() {
        let (mut player, _rx) = player_for(WorkoutDefinition::new(
            "w",
            "W",
            vec![Exercise::hold("plank", "Plank", 1, 5)],
        ));

        player.toggle_pause();
        player.start_hold();
        assert!(!player.is_paused());
        player.tick();
        assert_eq!(player.countdown(), Some(4));
    }

    #[test]
    fn test_enabling_auto_start_while_paused_keeps_pause() {
        let (mut player, _rx) = player_for(WorkoutDefinition::new(
            "w",
            "W",
            vec![Exercise::hold("plank", "Plank", 1, 5)],
        ));

        player.toggle_pause();
        player.set_auto_start_holds(true);
        assert!(player.is_paused());
        assert_eq!(player.countdown(), Some(5));
        player.tick();
        assert_eq!(player.countdown(), Some(5));
    }

    #[test]
    fn test_pause_toggle_has_no_effect_when_complete() {
        let (mut player, rx) = player_for(WorkoutDefinition::new(
            "w",
            "W",
            vec![Exercise::reps("a", "A", 1, 10)],
        ));

        player.complete_set();
        assert!(player.is_complete());
        player.toggle_pause();
        assert_eq!(player.phase(), SessionPhase::Complete);
        assert!(!player.is_paused());
        assert_eq!(rx.try_iter().count(), 1);
    }

    #[test]
    fn test_exit_notifies_listener() {
        let (player, rx) = player_for(WorkoutDefinition::new(
            "w",
            "W",
            vec![Exercise::reps("a", "A", 2, 10)],
        ));

        player.exit();
        assert!(matches!(rx.try_recv(), Ok(SessionEvent::Exited)));
    }

    #[test]
    fn test_progress_percent() {
        let (mut player, _rx) = player_for(WorkoutDefinition::new(
            "w",
            "W",
            vec![Exercise::reps("a", "A", 4, 10)],
        ));

        player.complete_set();
        assert!((player.progress_percent() - 25.0).abs() < f32::EPSILON);
    }
}
