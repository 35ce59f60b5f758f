//! Fitness goals module.
//!
//! Goal records, their templates and validation. Storage lives behind the
//! persistence service.

pub mod types;

pub use types::{
    FitnessGoal, GoalError, GoalStatus, GoalTimeline, GoalType, GoalTypeTemplate, QuickGoal,
    QUICK_GOALS,
};
