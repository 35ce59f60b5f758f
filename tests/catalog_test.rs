//! Integration tests for loading workout definitions from disk.

use fitsession::workouts::catalog::PUSH_DAY_BLAST;
use fitsession::workouts::{load_workout_file, ExerciseTarget, WorkoutCatalog, WorkoutError};

const LEG_DAY: &str = r#"{
  "id": "leg-day",
  "name": "Leg Day",
  "description": "Quads, hamstrings and glutes",
  "duration": 35,
  "calories": 300,
  "difficulty": 4,
  "equipment": ["Bodyweight"],
  "exercises": [
    { "id": "squats", "name": "Squats", "sets": 4, "reps": 15, "restTime": 60,
      "instructions": "Feet shoulder-width apart.", "tips": "Drive through your heels." },
    { "id": "wall-sit", "name": "Wall Sit", "sets": 2, "duration": 45, "restTime": 30 }
  ]
}"#;

#[test]
fn test_load_dir_adds_valid_files_and_skips_bad_ones() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("leg-day.json"), LEG_DAY).unwrap();
    std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
    std::fs::write(
        dir.path().join("empty.json"),
        r#"{"id":"e","name":"E","duration":1,"calories":1,"difficulty":1,"exercises":[]}"#,
    )
    .unwrap();
    std::fs::write(dir.path().join("notes.txt"), "ignored").unwrap();

    let mut catalog = WorkoutCatalog::builtin();
    let loaded = catalog.load_dir(dir.path()).unwrap();

    assert_eq!(loaded, 1);
    assert_eq!(catalog.len(), 2);
    assert!(catalog.get(PUSH_DAY_BLAST).is_ok());

    let legs = catalog.get("leg-day").unwrap();
    assert_eq!(legs.total_sets(), 6);
    assert_eq!(legs.exercises[0].tip.as_deref(), Some("Drive through your heels."));
    assert_eq!(legs.exercises[1].target, ExerciseTarget::Hold { seconds: 45 });
    assert_eq!(legs.exercises[1].rest_seconds, 30);
}

#[test]
fn test_missing_dir_and_workout() {
    let catalog = WorkoutCatalog::builtin();
    assert!(matches!(
        catalog.get("nope"),
        Err(WorkoutError::NotFound(_))
    ));

    let mut empty = WorkoutCatalog::new();
    assert!(matches!(
        empty.load_dir(std::path::Path::new("/definitely/not/here")),
        Err(WorkoutError::FileReadError(_))
    ));
    assert!(empty.is_empty());
}

#[test]
fn test_load_single_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("leg-day.json");
    std::fs::write(&path, LEG_DAY).unwrap();

    let workout = load_workout_file(&path).unwrap();
    assert_eq!(workout.estimated_minutes, 35);
    assert_eq!(workout.estimated_calories, 300);
    assert_eq!(workout.exercises[0].prescription(), "4 sets × 15 reps");
}
