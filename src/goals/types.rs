//! Fitness goal type definitions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A fitness goal set by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitnessGoal {
    /// Unique identifier
    pub id: Uuid,
    /// User who owns this goal
    pub user_id: Uuid,
    /// Type of goal
    pub goal_type: GoalType,
    /// Display title
    pub title: String,
    /// Detailed description
    pub description: String,
    /// Where the user is now, free-form ("180", "2")
    pub current_value: String,
    /// Where the user wants to be
    pub target_value: String,
    /// Unit of the values ("lbs", "reps", "times/week")
    pub unit: String,
    /// Time frame for the goal
    pub timeline: GoalTimeline,
    /// Current status
    pub status: GoalStatus,
    /// Progress percentage (0-100)
    pub progress: u8,
    /// When the goal was created
    pub created_at: DateTime<Utc>,
    /// When the goal was last updated
    pub updated_at: DateTime<Utc>,
}

impl FitnessGoal {
    /// Create a new active goal with no progress.
    pub fn new(
        user_id: Uuid,
        goal_type: GoalType,
        title: impl Into<String>,
        target_value: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        let template = goal_type.template();
        Self {
            id: Uuid::new_v4(),
            user_id,
            goal_type,
            title: title.into(),
            description: template.description.to_string(),
            current_value: "0".to_string(),
            target_value: target_value.into(),
            unit: template.unit.to_string(),
            timeline: GoalTimeline::default(),
            status: GoalStatus::Active,
            progress: 0,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a goal from a quick-start template.
    pub fn from_template(user_id: Uuid, template: &QuickGoal) -> Self {
        let mut goal = Self::new(user_id, template.goal_type, template.title, template.target_value);
        goal.current_value = template.current_value.to_string();
        goal.unit = template.unit.to_string();
        goal.timeline = template.timeline;
        goal
    }

    /// Check that the goal can be saved.
    pub fn validate(&self) -> Result<(), GoalError> {
        if self.title.trim().is_empty() {
            return Err(GoalError::ValidationError("Goal title is required".to_string()));
        }
        if self.target_value.trim().is_empty() {
            return Err(GoalError::ValidationError(
                "Goal target value is required".to_string(),
            ));
        }
        if self.progress > 100 {
            return Err(GoalError::ValidationError(format!(
                "Progress must be 0-100, got {}",
                self.progress
            )));
        }
        Ok(())
    }

    /// Set progress, clamped to 0-100. Reaching 100 completes the goal.
    pub fn set_progress(&mut self, progress: u8) {
        self.progress = progress.min(100);
        if self.progress == 100 {
            self.status = GoalStatus::Completed;
        }
        self.updated_at = Utc::now();
    }

    /// Check if the goal is being worked on.
    pub fn is_active(&self) -> bool {
        self.status == GoalStatus::Active
    }
}

/// Type of fitness goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalType {
    Weight,
    Strength,
    Endurance,
    Habit,
    Custom,
}

/// Default title, unit and description for a goal type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoalTypeTemplate {
    pub title: &'static str,
    pub unit: &'static str,
    pub description: &'static str,
}

impl GoalType {
    /// All goal types in display order.
    pub const ALL: [GoalType; 5] = [
        GoalType::Weight,
        GoalType::Strength,
        GoalType::Endurance,
        GoalType::Habit,
        GoalType::Custom,
    ];

    /// Get display name for the goal type.
    pub fn display_name(&self) -> &'static str {
        match self {
            GoalType::Weight => "Weight Goal",
            GoalType::Strength => "Strength Goal",
            GoalType::Endurance => "Endurance Goal",
            GoalType::Habit => "Habit Goal",
            GoalType::Custom => "Custom Goal",
        }
    }

    /// Default field values for a new goal of this type.
    pub fn template(&self) -> GoalTypeTemplate {
        match self {
            GoalType::Weight => GoalTypeTemplate {
                title: "Weight Loss",
                unit: "lbs",
                description: "Reach your target weight",
            },
            GoalType::Strength => GoalTypeTemplate {
                title: "Strength Training",
                unit: "reps",
                description: "Build muscle and strength",
            },
            GoalType::Endurance => GoalTypeTemplate {
                title: "Cardio Endurance",
                unit: "minutes",
                description: "Improve cardiovascular fitness",
            },
            GoalType::Habit => GoalTypeTemplate {
                title: "Workout Frequency",
                unit: "times/week",
                description: "Build consistent habits",
            },
            GoalType::Custom => GoalTypeTemplate {
                title: "Custom Goal",
                unit: "",
                description: "Create your own goal",
            },
        }
    }

    /// Stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Weight => "weight",
            GoalType::Strength => "strength",
            GoalType::Endurance => "endurance",
            GoalType::Habit => "habit",
            GoalType::Custom => "custom",
        }
    }
}

impl std::str::FromStr for GoalType {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GoalType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GoalError::ValidationError(format!("Unknown goal type: {}", s)))
    }
}

impl std::fmt::Display for GoalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Time frame for achieving a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GoalTimeline {
    #[serde(rename = "1-month")]
    OneMonth,
    #[default]
    #[serde(rename = "3-months")]
    ThreeMonths,
    #[serde(rename = "6-months")]
    SixMonths,
    #[serde(rename = "1-year")]
    OneYear,
    #[serde(rename = "ongoing")]
    Ongoing,
}

impl GoalTimeline {
    pub const ALL: [GoalTimeline; 5] = [
        GoalTimeline::OneMonth,
        GoalTimeline::ThreeMonths,
        GoalTimeline::SixMonths,
        GoalTimeline::OneYear,
        GoalTimeline::Ongoing,
    ];

    /// Stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalTimeline::OneMonth => "1-month",
            GoalTimeline::ThreeMonths => "3-months",
            GoalTimeline::SixMonths => "6-months",
            GoalTimeline::OneYear => "1-year",
            GoalTimeline::Ongoing => "ongoing",
        }
    }

    /// Display label.
    pub fn label(&self) -> &'static str {
        match self {
            GoalTimeline::OneMonth => "1 Month",
            GoalTimeline::ThreeMonths => "3 Months",
            GoalTimeline::SixMonths => "6 Months",
            GoalTimeline::OneYear => "1 Year",
            GoalTimeline::Ongoing => "Ongoing",
        }
    }
}

impl std::str::FromStr for GoalTimeline {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GoalTimeline::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| GoalError::ValidationError(format!("Unknown timeline: {}", s)))
    }
}

/// Status of a goal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalStatus {
    #[default]
    Active,
    Paused,
    Completed,
}

impl GoalStatus {
    /// Stored string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            GoalStatus::Active => "active",
            GoalStatus::Paused => "paused",
            GoalStatus::Completed => "completed",
        }
    }
}

impl std::str::FromStr for GoalStatus {
    type Err = GoalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(GoalStatus::Active),
            "paused" => Ok(GoalStatus::Paused),
            "completed" => Ok(GoalStatus::Completed),
            other => Err(GoalError::ValidationError(format!(
                "Unknown goal status: {}",
                other
            ))),
        }
    }
}

/// A ready-made goal the user can pick instead of filling in the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuickGoal {
    pub goal_type: GoalType,
    pub title: &'static str,
    pub current_value: &'static str,
    pub target_value: &'static str,
    pub unit: &'static str,
    pub timeline: GoalTimeline,
}

/// Quick-start goal templates.
pub const QUICK_GOALS: [QuickGoal; 4] = [
    QuickGoal {
        goal_type: GoalType::Weight,
        title: "Lose 10 lbs",
        current_value: "180",
        target_value: "170",
        unit: "lbs",
        timeline: GoalTimeline::ThreeMonths,
    },
    QuickGoal {
        goal_type: GoalType::Strength,
        title: "Do 25 Push-ups",
        current_value: "10",
        target_value: "25",
        unit: "reps",
        timeline: GoalTimeline::SixMonths,
    },
    QuickGoal {
        goal_type: GoalType::Endurance,
        title: "Run 5K",
        current_value: "1",
        target_value: "3.1",
        unit: "miles",
        timeline: GoalTimeline::ThreeMonths,
    },
    QuickGoal {
        goal_type: GoalType::Habit,
        title: "Workout 4x/week",
        current_value: "2",
        target_value: "4",
        unit: "times/week",
        timeline: GoalTimeline::Ongoing,
    },
];

/// Goal errors.
#[derive(Debug, Error)]
pub enum GoalError {
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_goal_uses_type_template() {
        let goal = FitnessGoal::new(Uuid::new_v4(), GoalType::Habit, "Train more", "4");
        assert_eq!(goal.unit, "times/week");
        assert_eq!(goal.description, "Build consistent habits");
        assert_eq!(goal.status, GoalStatus::Active);
        assert_eq!(goal.timeline, GoalTimeline::ThreeMonths);
        assert_eq!(goal.progress, 0);
    }

    #[test]
    fn test_from_quick_goal() {
        let goal = FitnessGoal::from_template(Uuid::new_v4(), &QUICK_GOALS[1]);
        assert_eq!(goal.goal_type, GoalType::Strength);
        assert_eq!(goal.current_value, "10");
        assert_eq!(goal.target_value, "25");
        assert_eq!(goal.timeline, GoalTimeline::SixMonths);
        assert!(goal.validate().is_ok());
    }

    #[test]
    fn test_validation_requires_title_and_target() {
        let mut goal = FitnessGoal::new(Uuid::new_v4(), GoalType::Custom, " ", "5");
        assert!(goal.validate().is_err());

        goal.title = "Something".to_string();
        goal.target_value = String::new();
        assert!(goal.validate().is_err());
    }

    #[test]
    fn test_progress_clamps_and_completes() {
        let mut goal = FitnessGoal::new(Uuid::new_v4(), GoalType::Weight, "Lose", "170");
        goal.set_progress(40);
        assert!(goal.is_active());

        goal.set_progress(150);
        assert_eq!(goal.progress, 100);
        assert_eq!(goal.status, GoalStatus::Completed);
    }

    #[test]
    fn test_string_forms() {
        assert_eq!("endurance".parse::<GoalType>().unwrap(), GoalType::Endurance);
        assert_eq!(
            "1-year".parse::<GoalTimeline>().unwrap(),
            GoalTimeline::OneYear
        );
        assert_eq!("paused".parse::<GoalStatus>().unwrap(), GoalStatus::Paused);
        assert!("sideways".parse::<GoalStatus>().is_err());
        assert_eq!(
            serde_json::to_string(&GoalTimeline::SixMonths).unwrap(),
            "\"6-months\""
        );
    }
}
