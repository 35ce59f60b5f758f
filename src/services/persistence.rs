//! Persistence contract for profiles, goals and saved sessions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::goals::types::{FitnessGoal, GoalError};
use crate::storage::config::UserProfile;
use crate::storage::database::DatabaseError;
use crate::workouts::types::SessionSummary;

/// Number of sessions returned by history queries when no limit is given.
pub const DEFAULT_SESSION_LIMIT: usize = 10;

/// A completed workout session as stored for a user. Append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkoutSessionRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub workout_id: String,
    pub workout_name: String,
    pub duration_minutes: u32,
    pub completed_exercises: u32,
    pub completed_sets: u32,
    pub calories: u32,
    pub completed_at: DateTime<Utc>,
}

impl WorkoutSessionRecord {
    /// Build a record for `user_id` from a player summary.
    pub fn from_summary(user_id: Uuid, summary: &SessionSummary) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            workout_id: summary.workout_id.clone(),
            workout_name: summary.workout_name.clone(),
            duration_minutes: summary.duration_minutes,
            completed_exercises: summary.completed_exercises,
            completed_sets: summary.completed_sets,
            calories: summary.estimated_calories,
            completed_at: summary.completed_at,
        }
    }
}

/// Storage operations the application needs.
///
/// A missing profile is `Ok(None)`, not an error.
pub trait PersistenceService {
    fn get_profile(&self, user_id: &Uuid) -> Result<Option<UserProfile>, PersistenceError>;
    fn create_profile(&self, profile: &UserProfile) -> Result<(), PersistenceError>;
    fn update_profile(&self, profile: &UserProfile) -> Result<(), PersistenceError>;

    /// Goals for a user, newest first.
    fn list_goals(&self, user_id: &Uuid) -> Result<Vec<FitnessGoal>, PersistenceError>;
    fn create_goal(&self, goal: &FitnessGoal) -> Result<(), PersistenceError>;
    fn update_goal(&self, goal: &FitnessGoal) -> Result<(), PersistenceError>;
    fn delete_goal(&self, goal_id: &Uuid) -> Result<(), PersistenceError>;

    fn save_session(&self, record: &WorkoutSessionRecord) -> Result<(), PersistenceError>;
    /// Most recent sessions first, at most `limit`.
    fn list_sessions(
        &self,
        user_id: &Uuid,
        limit: usize,
    ) -> Result<Vec<WorkoutSessionRecord>, PersistenceError>;

    /// Sessions with the default limit.
    fn recent_sessions(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<WorkoutSessionRecord>, PersistenceError> {
        self.list_sessions(user_id, DEFAULT_SESSION_LIMIT)
    }
}

/// Persistence errors.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("Storage error: {0}")]
    Storage(#[from] DatabaseError),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<GoalError> for PersistenceError {
    fn from(err: GoalError) -> Self {
        match err {
            GoalError::ValidationError(msg) => PersistenceError::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_summary() {
        let summary = SessionSummary {
            workout_id: "push-day-blast".to_string(),
            workout_name: "Push Day Blast".to_string(),
            duration_minutes: 28,
            completed_exercises: 6,
            completed_sets: 18,
            estimated_calories: 250,
            completed_at: Utc::now(),
        };
        let user = Uuid::new_v4();

        let record = WorkoutSessionRecord::from_summary(user, &summary);

        assert_eq!(record.user_id, user);
        assert_eq!(record.workout_id, "push-day-blast");
        assert_eq!(record.completed_sets, 18);
        assert_eq!(record.calories, 250);
        assert_eq!(record.completed_at, summary.completed_at);
    }

    #[test]
    fn test_goal_error_maps_to_validation() {
        let err: PersistenceError = GoalError::ValidationError("title".to_string()).into();
        assert!(matches!(err, PersistenceError::Validation(_)));
    }
}
