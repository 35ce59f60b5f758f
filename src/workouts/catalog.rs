//! Workout catalog: built-in definitions and JSON loading.

use std::path::Path;

use crate::workouts::types::{Exercise, WorkoutDefinition, WorkoutError};

/// Identifier of the built-in push workout.
pub const PUSH_DAY_BLAST: &str = "push-day-blast";

/// Collection of workouts available to start.
#[derive(Debug, Clone, Default)]
pub struct WorkoutCatalog {
    workouts: Vec<WorkoutDefinition>,
}

impl WorkoutCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog containing the built-in workouts.
    pub fn builtin() -> Self {
        Self {
            workouts: vec![push_day_blast()],
        }
    }

    /// Add a workout after validating it. Replaces a workout with the same id.
    pub fn add(&mut self, workout: WorkoutDefinition) -> Result<(), WorkoutError> {
        workout.validate()?;
        self.workouts.retain(|w| w.id != workout.id);
        self.workouts.push(workout);
        Ok(())
    }

    /// Load every `*.json` definition in a directory. Invalid files are
    /// skipped with a warning; returns the number loaded.
    pub fn load_dir(&mut self, dir: &Path) -> Result<usize, WorkoutError> {
        let entries =
            std::fs::read_dir(dir).map_err(|e| WorkoutError::FileReadError(e.to_string()))?;

        let mut loaded = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            match load_workout_file(&path).and_then(|w| self.add(w)) {
                Ok(()) => loaded += 1,
                Err(e) => tracing::warn!("Skipping workout {}: {}", path.display(), e),
            }
        }

        tracing::info!("Loaded {} workouts from {}", loaded, dir.display());
        Ok(loaded)
    }

    /// Look up a workout by id.
    pub fn get(&self, id: &str) -> Result<&WorkoutDefinition, WorkoutError> {
        self.workouts
            .iter()
            .find(|w| w.id == id)
            .ok_or_else(|| WorkoutError::NotFound(id.to_string()))
    }

    /// All workouts in insertion order.
    pub fn workouts(&self) -> &[WorkoutDefinition] {
        &self.workouts
    }

    pub fn len(&self) -> usize {
        self.workouts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workouts.is_empty()
    }
}

/// Parse and validate a workout definition from JSON text.
pub fn parse_workout(json: &str) -> Result<WorkoutDefinition, WorkoutError> {
    let workout: WorkoutDefinition =
        serde_json::from_str(json).map_err(|e| WorkoutError::ParseError(e.to_string()))?;
    workout.validate()?;
    Ok(workout)
}

/// Read and validate a workout definition file.
pub fn load_workout_file(path: &Path) -> Result<WorkoutDefinition, WorkoutError> {
    let content =
        std::fs::read_to_string(path).map_err(|e| WorkoutError::FileReadError(e.to_string()))?;
    parse_workout(&content)
}

/// The built-in upper body push workout.
pub fn push_day_blast() -> WorkoutDefinition {
    WorkoutDefinition {
        id: PUSH_DAY_BLAST.to_string(),
        name: "Push Day Blast".to_string(),
        description: "Build upper body strength with this comprehensive push workout \
                      targeting chest, shoulders, and triceps."
            .to_string(),
        estimated_minutes: 30,
        estimated_calories: 250,
        difficulty: 3,
        equipment: vec!["Bodyweight".to_string(), "Dumbbells".to_string()],
        exercises: vec![
            Exercise::reps("pushups", "Push-ups", 3, 12)
                .with_rest(45)
                .with_instructions(
                    "Start in a plank position with hands slightly wider than shoulders. \
                     Lower your body until chest nearly touches the floor, then push back up.",
                )
                .with_tip("Keep your core tight and maintain a straight line from head to heels."),
            Exercise::reps("pike-pushups", "Pike Push-ups", 3, 8)
                .with_rest(45)
                .with_instructions(
                    "Start in downward dog position. Lower your head toward the ground by \
                     bending your elbows, then push back up.",
                )
                .with_tip(
                    "Focus on your shoulders doing the work. Keep your legs as straight as possible.",
                ),
            Exercise::reps("tricep-dips", "Tricep Dips", 3, 10)
                .with_rest(45)
                .with_instructions(
                    "Sit on edge of chair/bench, hands beside hips. Lower body by bending \
                     elbows, then push back up.",
                )
                .with_tip("Keep your back close to the chair and focus on using your triceps."),
            Exercise::hold("plank", "Plank Hold", 3, 30)
                .with_rest(30)
                .with_instructions(
                    "Hold a plank position with forearms on the ground, body in a straight line.",
                )
                .with_tip(
                    "Engage your core and breathe steadily. Don't let your hips sag or pike up.",
                ),
            Exercise::reps("mountain-climbers", "Mountain Climbers", 3, 20)
                .with_rest(45)
                .with_instructions(
                    "Start in plank position. Alternate bringing knees to chest in a running motion.",
                )
                .with_tip("Keep your core engaged and maintain a steady rhythm."),
            Exercise::reps("burpees", "Burpees", 3, 8)
                .with_rest(60)
                .with_instructions(
                    "Squat down, jump back to plank, do a push-up, jump feet to hands, \
                     then jump up with arms overhead.",
                )
                .with_tip("Take your time with form. It's better to do fewer with good technique."),
        ],
    }
}
