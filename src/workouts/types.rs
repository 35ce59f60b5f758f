//! Workout definition and session types.
//!
//! Definitions are immutable plans handed to the player; summaries are the
//! single record a completed session produces.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// What the user has to do in each set of an exercise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExerciseTarget {
    /// Perform a number of repetitions
    Reps(u32),
    /// Hold a position for a number of seconds
    Hold { seconds: u32 },
}

impl ExerciseTarget {
    /// Hold duration in seconds, if this is a timed hold.
    pub fn hold_seconds(&self) -> Option<u32> {
        match self {
            ExerciseTarget::Hold { seconds } => Some(*seconds),
            ExerciseTarget::Reps(_) => None,
        }
    }

    /// Whether this target is a timed hold.
    pub fn is_hold(&self) -> bool {
        matches!(self, ExerciseTarget::Hold { .. })
    }
}

impl std::fmt::Display for ExerciseTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExerciseTarget::Reps(reps) => write!(f, "{} reps", reps),
            ExerciseTarget::Hold { seconds } => write!(f, "{}s", seconds),
        }
    }
}

/// A single exercise within a workout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawExercise", into = "RawExercise")]
pub struct Exercise {
    /// Identifier, unique within its workout
    pub id: String,
    /// Display name
    pub name: String,
    /// Number of sets (at least one)
    pub sets: u32,
    /// Repetition target or hold duration
    pub target: ExerciseTarget,
    /// Rest between sets in seconds (0 disables the rest interval)
    pub rest_seconds: u32,
    /// How to perform the exercise
    pub instructions: String,
    /// Optional coaching tip
    pub tip: Option<String>,
}

impl Exercise {
    /// Create a repetition-based exercise.
    pub fn reps(id: impl Into<String>, name: impl Into<String>, sets: u32, reps: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sets,
            target: ExerciseTarget::Reps(reps),
            rest_seconds: 0,
            instructions: String::new(),
            tip: None,
        }
    }

    /// Create a timed-hold exercise.
    pub fn hold(id: impl Into<String>, name: impl Into<String>, sets: u32, seconds: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sets,
            target: ExerciseTarget::Hold { seconds },
            rest_seconds: 0,
            instructions: String::new(),
            tip: None,
        }
    }

    /// Set the rest interval between sets.
    pub fn with_rest(mut self, seconds: u32) -> Self {
        self.rest_seconds = seconds;
        self
    }

    /// Set the instructional text.
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.instructions = instructions.into();
        self
    }

    /// Set the coaching tip.
    pub fn with_tip(mut self, tip: impl Into<String>) -> Self {
        self.tip = Some(tip.into());
        self
    }

    /// Short prescription such as "3 sets × 12 reps".
    pub fn prescription(&self) -> String {
        format!("{} sets × {}", self.sets, self.target)
    }

    /// Rest label such as "60s rest".
    pub fn rest_label(&self) -> String {
        if self.rest_seconds == 0 {
            "No rest".to_string()
        } else {
            format!("{}s rest", self.rest_seconds)
        }
    }
}

/// On-disk shape of an exercise: `reps` and `duration` are separate optional keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawExercise {
    id: String,
    name: String,
    sets: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    duration: Option<u32>,
    #[serde(default)]
    rest_time: u32,
    #[serde(default)]
    instructions: String,
    #[serde(default, alias = "tips", skip_serializing_if = "Option::is_none")]
    tip: Option<String>,
}

impl TryFrom<RawExercise> for Exercise {
    type Error = WorkoutError;

    fn try_from(raw: RawExercise) -> Result<Self, Self::Error> {
        let target = match (raw.reps, raw.duration) {
            (Some(reps), None) => ExerciseTarget::Reps(reps),
            (None, Some(seconds)) => ExerciseTarget::Hold { seconds },
            (Some(_), Some(_)) => {
                return Err(WorkoutError::InvalidExercise {
                    id: raw.id,
                    reason: "both reps and duration are set".to_string(),
                })
            }
            (None, None) => {
                return Err(WorkoutError::InvalidExercise {
                    id: raw.id,
                    reason: "neither reps nor duration is set".to_string(),
                })
            }
        };

        Ok(Self {
            id: raw.id,
            name: raw.name,
            sets: raw.sets,
            target,
            rest_seconds: raw.rest_time,
            instructions: raw.instructions,
            tip: raw.tip.filter(|t| !t.is_empty()),
        })
    }
}

impl From<Exercise> for RawExercise {
    fn from(exercise: Exercise) -> Self {
        let (reps, duration) = match exercise.target {
            ExerciseTarget::Reps(reps) => (Some(reps), None),
            ExerciseTarget::Hold { seconds } => (None, Some(seconds)),
        };

        Self {
            id: exercise.id,
            name: exercise.name,
            sets: exercise.sets,
            reps,
            duration,
            rest_time: exercise.rest_seconds,
            instructions: exercise.instructions,
            tip: exercise.tip,
        }
    }
}

/// An immutable, ordered exercise plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutDefinition {
    /// Unique identifier
    pub id: String,
    /// Workout name
    pub name: String,
    /// Optional description
    #[serde(default)]
    pub description: String,
    /// Estimated total duration in minutes
    #[serde(rename = "duration")]
    pub estimated_minutes: u32,
    /// Estimated calorie burn
    #[serde(rename = "calories")]
    pub estimated_calories: u32,
    /// Difficulty rank (1-5)
    pub difficulty: u8,
    /// Required equipment
    #[serde(default)]
    pub equipment: Vec<String>,
    /// Ordered exercises
    pub exercises: Vec<Exercise>,
}

impl WorkoutDefinition {
    /// Create a new definition with the given exercises.
    pub fn new(id: impl Into<String>, name: impl Into<String>, exercises: Vec<Exercise>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            estimated_minutes: 0,
            estimated_calories: 0,
            difficulty: 1,
            equipment: Vec::new(),
            exercises,
        }
    }

    /// Set the calorie estimate.
    pub fn with_calories(mut self, calories: u32) -> Self {
        self.estimated_calories = calories;
        self
    }

    /// Check structural invariants: non-empty, positive set counts, unique ids.
    pub fn validate(&self) -> Result<(), WorkoutError> {
        if self.exercises.is_empty() {
            return Err(WorkoutError::InvalidWorkout(format!(
                "workout '{}' has no exercises",
                self.id
            )));
        }

        let mut seen = HashSet::new();
        for exercise in &self.exercises {
            if exercise.sets == 0 {
                return Err(WorkoutError::InvalidExercise {
                    id: exercise.id.clone(),
                    reason: "set count must be positive".to_string(),
                });
            }
            if !seen.insert(exercise.id.as_str()) {
                return Err(WorkoutError::InvalidExercise {
                    id: exercise.id.clone(),
                    reason: "duplicate exercise id".to_string(),
                });
            }
        }

        Ok(())
    }

    /// Total number of sets across all exercises.
    pub fn total_sets(&self) -> u32 {
        self.exercises.iter().map(|e| e.sets).sum()
    }

    /// Number of exercises.
    pub fn exercise_count(&self) -> usize {
        self.exercises.len()
    }
}

/// Terminal record of a completed session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub workout_id: String,
    pub workout_name: String,
    /// Wall-clock duration rounded to whole minutes
    pub duration_minutes: u32,
    pub completed_exercises: u32,
    pub completed_sets: u32,
    /// Copied from the definition, not measured
    pub estimated_calories: u32,
    pub completed_at: DateTime<Utc>,
}

/// Observable phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Performing the current set
    Exercising,
    /// Resting before the current set
    Resting,
    /// Countdown frozen; remembers the phase it interrupted
    Paused(ActivePhase),
    /// All sets done, summary emitted
    Complete,
}

/// The phase a pause can interrupt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePhase {
    Exercising,
    Resting,
}

impl std::fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionPhase::Exercising => write!(f, "Exercising"),
            SessionPhase::Resting => write!(f, "Resting"),
            SessionPhase::Paused(_) => write!(f, "Paused"),
            SessionPhase::Complete => write!(f, "Complete"),
        }
    }
}

/// What a running countdown is measuring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownKind {
    Rest,
    Hold,
}

/// Errors related to workout definitions.
#[derive(Debug, Error)]
pub enum WorkoutError {
    /// Workout not found in the catalog
    #[error("Workout not found: {0}")]
    NotFound(String),

    /// Workout file could not be read
    #[error("Failed to read workout file: {0}")]
    FileReadError(String),

    /// Workout file is not valid JSON for a definition
    #[error("Failed to parse workout: {0}")]
    ParseError(String),

    /// Invalid workout structure
    #[error("Invalid workout: {0}")]
    InvalidWorkout(String),

    /// Invalid exercise inside a workout
    #[error("Invalid exercise '{id}': {reason}")]
    InvalidExercise { id: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_from_json_reps() {
        let json = r#"{"id":"pushups","name":"Push-ups","sets":3,"reps":12,"restTime":45,
            "instructions":"Lower and push.","tips":"Keep your core tight."}"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();

        assert_eq!(exercise.target, ExerciseTarget::Reps(12));
        assert_eq!(exercise.rest_seconds, 45);
        assert_eq!(exercise.tip.as_deref(), Some("Keep your core tight."));
    }

    #[test]
    fn test_exercise_from_json_hold() {
        let json = r#"{"id":"plank","name":"Plank","sets":3,"duration":30,"restTime":30}"#;
        let exercise: Exercise = serde_json::from_str(json).unwrap();

        assert_eq!(exercise.target.hold_seconds(), Some(30));
        assert!(exercise.tip.is_none());
    }

    #[test]
    fn test_exercise_rejects_both_targets() {
        let json = r#"{"id":"x","name":"X","sets":1,"reps":5,"duration":10}"#;
        assert!(serde_json::from_str::<Exercise>(json).is_err());
    }

    #[test]
    fn test_exercise_rejects_missing_target() {
        let json = r#"{"id":"x","name":"X","sets":1}"#;
        assert!(serde_json::from_str::<Exercise>(json).is_err());
    }

    #[test]
    fn test_validate_empty_workout() {
        let workout = WorkoutDefinition::new("empty", "Empty", vec![]);
        assert!(matches!(
            workout.validate(),
            Err(WorkoutError::InvalidWorkout(_))
        ));
    }

    #[test]
    fn test_validate_zero_sets_and_duplicates() {
        let zero = WorkoutDefinition::new("w", "W", vec![Exercise::reps("a", "A", 0, 10)]);
        assert!(zero.validate().is_err());

        let dup = WorkoutDefinition::new(
            "w",
            "W",
            vec![Exercise::reps("a", "A", 1, 10), Exercise::reps("a", "A2", 2, 5)],
        );
        assert!(matches!(
            dup.validate(),
            Err(WorkoutError::InvalidExercise { .. })
        ));
    }

    #[test]
    fn test_prescription_and_totals() {
        let workout = WorkoutDefinition::new(
            "w",
            "W",
            vec![
                Exercise::reps("a", "A", 3, 12),
                Exercise::hold("b", "B", 2, 30).with_rest(45),
            ],
        );

        assert_eq!(workout.total_sets(), 5);
        assert_eq!(workout.exercises[0].rest_label(), "No rest");
        assert_eq!(workout.exercises[1].rest_label(), "45s rest");
        assert_eq!(workout.exercises[0].prescription(), "3 sets × 12 reps");
        assert_eq!(workout.exercises[1].prescription(), "2 sets × 30s");
    }
}
