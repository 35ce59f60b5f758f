//! UI screens for the application.

pub mod active_workout;
pub mod session_history;
pub mod workout_complete;
pub mod workout_library;

pub use active_workout::{format_countdown, ActiveWorkoutScreen, PlayerAction};
pub use session_history::SessionHistoryScreen;
pub use workout_complete::{SaveStatus, WorkoutCompleteScreen};
pub use workout_library::{LibraryAction, WorkoutLibraryScreen};

/// Screen navigation state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    /// Workout list and overview
    #[default]
    WorkoutLibrary,
    /// Running session
    ActiveWorkout,
    /// Summary after the last set
    WorkoutComplete,
    /// Recently saved sessions
    SessionHistory,
}
