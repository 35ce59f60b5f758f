//! FitSession - Guided Strength Workout Sessions
//!
//! Plays structured strength workouts set by set: rest countdowns with an
//! audible cue, timed holds, pause, exercise navigation and a single
//! session summary at the end. Profiles, goals and completed sessions are
//! kept in a local SQLite database.

pub mod audio;
pub mod goals;
pub mod services;
pub mod storage;
pub mod ui;
pub mod workouts;

// Re-export commonly used types
pub use services::{IdentityProvider, PersistenceService, WorkoutSessionRecord};
pub use storage::config::{AppConfig, UserProfile};
pub use storage::Database;
pub use workouts::{ActiveSession, WorkoutCatalog, WorkoutDefinition, WorkoutPlayer};
