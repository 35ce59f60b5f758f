//! Workout module for guided strength sessions.

pub mod catalog;
pub mod player;
pub mod session;
pub mod timer;
pub mod types;

pub use catalog::{load_workout_file, parse_workout, WorkoutCatalog};
pub use player::WorkoutPlayer;
pub use session::{ActiveSession, ChannelListener, SessionEvent, SessionListener};
pub use timer::{Clock, ManualClock, SystemClock, Ticker};
pub use types::{
    ActivePhase, CountdownKind, Exercise, ExerciseTarget, SessionPhase, SessionSummary,
    WorkoutDefinition, WorkoutError,
};
