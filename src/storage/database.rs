//! Database operations using rusqlite.

use crate::goals::types::{FitnessGoal, GoalStatus, GoalTimeline, GoalType};
use crate::services::persistence::{PersistenceError, PersistenceService, WorkoutSessionRecord};
use crate::storage::config::{HeightUnit, UserProfile, WeightUnit};
use crate::storage::schema::{CURRENT_VERSION, SCHEMA, SCHEMA_VERSION_TABLE};
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result as SqliteResult};
use std::path::Path;
use thiserror::Error;
use uuid::Uuid;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    fn initialize(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        let current_version = self.schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    pub fn schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        if from_version < 1 {
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            self.conn
                .execute(
                    "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                    [CURRENT_VERSION],
                )
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

            tracing::info!("Database migrated to version {}", CURRENT_VERSION);
        }

        Ok(())
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // ========== Profiles ==========

    fn profile_exists(&self, id: &Uuid) -> Result<bool, DatabaseError> {
        self.exists("SELECT 1 FROM user_profiles WHERE id = ?1", id)
    }

    fn write_profile(&self, sql: &str, profile: &UserProfile) -> Result<usize, DatabaseError> {
        let equipment_json = serde_json::to_string(&profile.equipment)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;
        let activities_json = serde_json::to_string(&profile.favorite_activities)
            .map_err(|e| DatabaseError::SerializationError(e.to_string()))?;

        self.conn
            .execute(
                sql,
                params![
                    profile.id.to_string(),
                    profile.first_name,
                    profile.last_name,
                    profile
                        .date_of_birth
                        .map(|d| d.format(DATE_FORMAT).to_string()),
                    profile.gender,
                    profile.weight,
                    profile.weight_unit.as_str(),
                    profile.height,
                    profile.height_unit.as_str(),
                    profile.height_feet,
                    profile.height_inches,
                    profile.activity_level,
                    profile.primary_goal,
                    profile.target_weight,
                    profile.timeline,
                    profile.workout_frequency,
                    profile.session_duration,
                    equipment_json,
                    activities_json,
                    timestamp(&profile.created_at),
                    timestamp(&profile.updated_at),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    // ========== Goals ==========

    fn write_goal(&self, sql: &str, goal: &FitnessGoal) -> Result<usize, DatabaseError> {
        self.conn
            .execute(
                sql,
                params![
                    goal.id.to_string(),
                    goal.user_id.to_string(),
                    goal.goal_type.as_str(),
                    goal.title,
                    goal.description,
                    goal.current_value,
                    goal.target_value,
                    goal.unit,
                    goal.timeline.as_str(),
                    goal.status.as_str(),
                    goal.progress,
                    timestamp(&goal.created_at),
                    timestamp(&goal.updated_at),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }

    fn exists(&self, sql: &str, id: &Uuid) -> Result<bool, DatabaseError> {
        self.conn
            .query_row(sql, params![id.to_string()], |_| Ok(()))
            .optional()
            .map(|row| row.is_some())
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))
    }
}

const PROFILE_COLUMNS: &str = "id, first_name, last_name, date_of_birth, gender, weight,
    weight_unit, height, height_unit, height_feet, height_inches, activity_level,
    primary_goal, target_weight, timeline, workout_frequency, session_duration,
    equipment_json, favorite_activities_json, created_at, updated_at";

const GOAL_COLUMNS: &str = "id, user_id, goal_type, title, description, current_value,
    target_value, unit, timeline, status, progress, created_at, updated_at";

const SESSION_COLUMNS: &str = "id, user_id, workout_id, workout_name, duration_minutes,
    completed_exercises, completed_sets, calories, completed_at";

impl PersistenceService for Database {
    fn get_profile(&self, user_id: &Uuid) -> Result<Option<UserProfile>, PersistenceError> {
        let sql = format!("SELECT {} FROM user_profiles WHERE id = ?1", PROFILE_COLUMNS);
        let row = self
            .conn
            .query_row(&sql, params![user_id.to_string()], UserProfileRow::from_row)
            .optional()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        Ok(row.map(UserProfileRow::into_user_profile).transpose()?)
    }

    fn create_profile(&self, profile: &UserProfile) -> Result<(), PersistenceError> {
        if self.profile_exists(&profile.id)? {
            return Err(DatabaseError::ConstraintViolation(format!(
                "profile {} already exists",
                profile.id
            ))
            .into());
        }

        let sql = format!(
            "INSERT INTO user_profiles ({}) VALUES
             (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18, ?19, ?20, ?21)",
            PROFILE_COLUMNS
        );
        self.write_profile(&sql, profile)?;

        tracing::debug!("Created profile {}", profile.id);
        Ok(())
    }

    fn update_profile(&self, profile: &UserProfile) -> Result<(), PersistenceError> {
        let updated = self.write_profile(
            "UPDATE user_profiles SET first_name = ?2, last_name = ?3, date_of_birth = ?4,
             gender = ?5, weight = ?6, weight_unit = ?7, height = ?8, height_unit = ?9,
             height_feet = ?10, height_inches = ?11, activity_level = ?12, primary_goal = ?13,
             target_weight = ?14, timeline = ?15, workout_frequency = ?16, session_duration = ?17,
             equipment_json = ?18, favorite_activities_json = ?19, created_at = ?20,
             updated_at = ?21
             WHERE id = ?1",
            profile,
        )?;

        if updated == 0 {
            return Err(PersistenceError::NotFound(format!("profile {}", profile.id)));
        }
        Ok(())
    }

    fn list_goals(&self, user_id: &Uuid) -> Result<Vec<FitnessGoal>, PersistenceError> {
        let sql = format!(
            "SELECT {} FROM fitness_goals WHERE user_id = ?1
             ORDER BY created_at DESC, rowid DESC",
            GOAL_COLUMNS
        );
        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id.to_string()], GoalRow::from_row)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
            .collect::<SqliteResult<Vec<_>>>()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let goals = rows
            .into_iter()
            .map(GoalRow::into_goal)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(goals)
    }

    fn create_goal(&self, goal: &FitnessGoal) -> Result<(), PersistenceError> {
        goal.validate()?;

        let sql = format!(
            "INSERT INTO fitness_goals ({}) VALUES
             (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            GOAL_COLUMNS
        );
        self.write_goal(&sql, goal)?;

        tracing::debug!("Created goal {} ({})", goal.id, goal.title);
        Ok(())
    }

    fn update_goal(&self, goal: &FitnessGoal) -> Result<(), PersistenceError> {
        goal.validate()?;

        let updated = self.write_goal(
            "UPDATE fitness_goals SET user_id = ?2, goal_type = ?3, title = ?4,
             description = ?5, current_value = ?6, target_value = ?7, unit = ?8,
             timeline = ?9, status = ?10, progress = ?11, created_at = ?12, updated_at = ?13
             WHERE id = ?1",
            goal,
        )?;

        if updated == 0 {
            return Err(PersistenceError::NotFound(format!("goal {}", goal.id)));
        }
        Ok(())
    }

    fn delete_goal(&self, goal_id: &Uuid) -> Result<(), PersistenceError> {
        let deleted = self
            .conn
            .execute(
                "DELETE FROM fitness_goals WHERE id = ?1",
                params![goal_id.to_string()],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        if deleted == 0 {
            return Err(PersistenceError::NotFound(format!("goal {}", goal_id)));
        }
        Ok(())
    }

    fn save_session(&self, record: &WorkoutSessionRecord) -> Result<(), PersistenceError> {
        let sql = format!(
            "INSERT INTO workout_sessions ({}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            SESSION_COLUMNS
        );
        self.conn
            .execute(
                &sql,
                params![
                    record.id.to_string(),
                    record.user_id.to_string(),
                    record.workout_id,
                    record.workout_name,
                    record.duration_minutes,
                    record.completed_exercises,
                    record.completed_sets,
                    record.calories,
                    timestamp(&record.completed_at),
                ],
            )
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        tracing::info!(
            "Saved session {} for workout {}",
            record.id,
            record.workout_id
        );
        Ok(())
    }

    fn list_sessions(
        &self,
        user_id: &Uuid,
        limit: usize,
    ) -> Result<Vec<WorkoutSessionRecord>, PersistenceError> {
        let sql = format!(
            "SELECT {} FROM workout_sessions WHERE user_id = ?1
             ORDER BY completed_at DESC, rowid DESC LIMIT ?2",
            SESSION_COLUMNS
        );
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = self
            .conn
            .prepare(&sql)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let rows = stmt
            .query_map(params![user_id.to_string(), limit], SessionRow::from_row)
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?
            .collect::<SqliteResult<Vec<_>>>()
            .map_err(|e| DatabaseError::QueryFailed(e.to_string()))?;

        let sessions = rows
            .into_iter()
            .map(SessionRow::into_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(sessions)
    }
}

/// Fixed-width RFC 3339 so stored timestamps sort as text.
fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn parse_timestamp(value: &str, field: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DatabaseError::DeserializationError(format!("Invalid {}: {}", field, e)))
}

fn parse_uuid(value: &str) -> Result<Uuid, DatabaseError> {
    Uuid::parse_str(value)
        .map_err(|e| DatabaseError::DeserializationError(format!("Invalid UUID: {}", e)))
}

fn parse_list(json: &str, field: &str) -> Result<Vec<String>, DatabaseError> {
    serde_json::from_str(json).map_err(|e| {
        DatabaseError::DeserializationError(format!("Invalid {} JSON: {}", field, e))
    })
}

/// Intermediate struct for reading user profile rows from database.
struct UserProfileRow {
    id: String,
    first_name: String,
    last_name: String,
    date_of_birth: Option<String>,
    gender: Option<String>,
    weight: Option<f32>,
    weight_unit: String,
    height: Option<f32>,
    height_unit: String,
    height_feet: Option<u8>,
    height_inches: Option<u8>,
    activity_level: Option<String>,
    primary_goal: Option<String>,
    target_weight: Option<f32>,
    timeline: Option<String>,
    workout_frequency: u8,
    session_duration: Option<String>,
    equipment_json: String,
    favorite_activities_json: String,
    created_at: String,
    updated_at: String,
}

impl UserProfileRow {
    fn from_row(row: &rusqlite::Row<'_>) -> SqliteResult<Self> {
        Ok(Self {
            id: row.get(0)?,
            first_name: row.get(1)?,
            last_name: row.get(2)?,
            date_of_birth: row.get(3)?,
            gender: row.get(4)?,
            weight: row.get(5)?,
            weight_unit: row.get(6)?,
            height: row.get(7)?,
            height_unit: row.get(8)?,
            height_feet: row.get(9)?,
            height_inches: row.get(10)?,
            activity_level: row.get(11)?,
            primary_goal: row.get(12)?,
            target_weight: row.get(13)?,
            timeline: row.get(14)?,
            workout_frequency: row.get(15)?,
            session_duration: row.get(16)?,
            equipment_json: row.get(17)?,
            favorite_activities_json: row.get(18)?,
            created_at: row.get(19)?,
            updated_at: row.get(20)?,
        })
    }

    fn into_user_profile(self) -> Result<UserProfile, DatabaseError> {
        let date_of_birth = self
            .date_of_birth
            .map(|d| NaiveDate::parse_from_str(&d, DATE_FORMAT))
            .transpose()
            .map_err(|e| {
                DatabaseError::DeserializationError(format!("Invalid date of birth: {}", e))
            })?;

        Ok(UserProfile {
            id: parse_uuid(&self.id)?,
            first_name: self.first_name,
            last_name: self.last_name,
            date_of_birth,
            gender: self.gender,
            weight: self.weight,
            weight_unit: WeightUnit::parse(&self.weight_unit).unwrap_or_default(),
            height: self.height,
            height_unit: HeightUnit::parse(&self.height_unit).unwrap_or_default(),
            height_feet: self.height_feet,
            height_inches: self.height_inches,
            activity_level: self.activity_level,
            primary_goal: self.primary_goal,
            target_weight: self.target_weight,
            timeline: self.timeline,
            workout_frequency: self.workout_frequency,
            session_duration: self.session_duration,
            equipment: parse_list(&self.equipment_json, "equipment")?,
            favorite_activities: parse_list(&self.favorite_activities_json, "activities")?,
            created_at: parse_timestamp(&self.created_at, "created date")?,
            updated_at: parse_timestamp(&self.updated_at, "updated date")?,
        })
    }
}

/// Intermediate struct for reading goal rows from database.
struct GoalRow {
    id: String,
    user_id: String,
    goal_type: String,
    title: String,
    description: String,
    current_value: String,
    target_value: String,
    unit: String,
    timeline: String,
    status: String,
    progress: u8,
    created_at: String,
    updated_at: String,
}

impl GoalRow {
    fn from_row(row: &rusqlite::Row<'_>) -> SqliteResult<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            goal_type: row.get(2)?,
            title: row.get(3)?,
            description: row.get(4)?,
            current_value: row.get(5)?,
            target_value: row.get(6)?,
            unit: row.get(7)?,
            timeline: row.get(8)?,
            status: row.get(9)?,
            progress: row.get(10)?,
            created_at: row.get(11)?,
            updated_at: row.get(12)?,
        })
    }

    fn into_goal(self) -> Result<FitnessGoal, DatabaseError> {
        let goal_type: GoalType = self
            .goal_type
            .parse()
            .map_err(|e| DatabaseError::DeserializationError(format!("{}", e)))?;
        let timeline: GoalTimeline = self
            .timeline
            .parse()
            .map_err(|e| DatabaseError::DeserializationError(format!("{}", e)))?;
        let status: GoalStatus = self
            .status
            .parse()
            .map_err(|e| DatabaseError::DeserializationError(format!("{}", e)))?;

        Ok(FitnessGoal {
            id: parse_uuid(&self.id)?,
            user_id: parse_uuid(&self.user_id)?,
            goal_type,
            title: self.title,
            description: self.description,
            current_value: self.current_value,
            target_value: self.target_value,
            unit: self.unit,
            timeline,
            status,
            progress: self.progress,
            created_at: parse_timestamp(&self.created_at, "created date")?,
            updated_at: parse_timestamp(&self.updated_at, "updated date")?,
        })
    }
}

/// Intermediate struct for reading session rows from database.
struct SessionRow {
    id: String,
    user_id: String,
    workout_id: String,
    workout_name: String,
    duration_minutes: u32,
    completed_exercises: u32,
    completed_sets: u32,
    calories: u32,
    completed_at: String,
}

impl SessionRow {
    fn from_row(row: &rusqlite::Row<'_>) -> SqliteResult<Self> {
        Ok(Self {
            id: row.get(0)?,
            user_id: row.get(1)?,
            workout_id: row.get(2)?,
            workout_name: row.get(3)?,
            duration_minutes: row.get(4)?,
            completed_exercises: row.get(5)?,
            completed_sets: row.get(6)?,
            calories: row.get(7)?,
            completed_at: row.get(8)?,
        })
    }

    fn into_record(self) -> Result<WorkoutSessionRecord, DatabaseError> {
        Ok(WorkoutSessionRecord {
            id: parse_uuid(&self.id)?,
            user_id: parse_uuid(&self.user_id)?,
            workout_id: self.workout_id,
            workout_name: self.workout_name,
            duration_minutes: self.duration_minutes,
            completed_exercises: self.completed_exercises,
            completed_sets: self.completed_sets,
            calories: self.calories,
            completed_at: parse_timestamp(&self.completed_at, "completion date")?,
        })
    }
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_create_in_memory_database() {
        let db = Database::open_in_memory().expect("Failed to create database");
        assert_eq!(db.schema_version().unwrap(), CURRENT_VERSION);
    }

    #[test]
    fn test_tables_created() {
        let db = Database::open_in_memory().expect("Failed to create database");

        let tables: Vec<String> = db
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"user_profiles".to_string()));
        assert!(tables.contains(&"fitness_goals".to_string()));
        assert!(tables.contains(&"workout_sessions".to_string()));
    }

    #[test]
    fn test_missing_profile_is_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get_profile(&Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_profile_create_get_update() {
        let db = Database::open_in_memory().unwrap();
        let mut profile = UserProfile::new(Uuid::new_v4(), "Alex", "Kim");
        profile.date_of_birth = NaiveDate::from_ymd_opt(1990, 4, 12);
        profile.weight = Some(172.5);
        profile.equipment = vec!["Dumbbells".to_string(), "Pull-up bar".to_string()];

        db.create_profile(&profile).unwrap();
        assert!(db.create_profile(&profile).is_err());

        let loaded = db.get_profile(&profile.id).unwrap().unwrap();
        assert_eq!(loaded.first_name, "Alex");
        assert_eq!(loaded.date_of_birth, profile.date_of_birth);
        assert_eq!(loaded.equipment, profile.equipment);
        assert_eq!(loaded.weight_unit, WeightUnit::Lbs);

        profile.weight_unit = WeightUnit::Kg;
        profile.workout_frequency = 5;
        db.update_profile(&profile).unwrap();

        let loaded = db.get_profile(&profile.id).unwrap().unwrap();
        assert_eq!(loaded.weight_unit, WeightUnit::Kg);
        assert_eq!(loaded.workout_frequency, 5);
    }

    #[test]
    fn test_update_missing_profile_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let profile = UserProfile::new(Uuid::new_v4(), "Alex", "Kim");
        assert!(matches!(
            db.update_profile(&profile),
            Err(PersistenceError::NotFound(_))
        ));
    }

    #[test]
    fn test_goals_newest_first() {
        let db = Database::open_in_memory().unwrap();
        let user = Uuid::new_v4();

        let mut older = FitnessGoal::new(user, GoalType::Weight, "Lose weight", "170");
        older.created_at = Utc::now() - Duration::days(2);
        let newer = FitnessGoal::new(user, GoalType::Strength, "Push-ups", "50");
        let other_user = FitnessGoal::new(Uuid::new_v4(), GoalType::Habit, "Walk", "5");

        db.create_goal(&older).unwrap();
        db.create_goal(&newer).unwrap();
        db.create_goal(&other_user).unwrap();

        let goals = db.list_goals(&user).unwrap();
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0].id, newer.id);
        assert_eq!(goals[1].id, older.id);
        assert_eq!(goals[1].goal_type, GoalType::Weight);
    }

    #[test]
    fn test_goal_update_and_delete() {
        let db = Database::open_in_memory().unwrap();
        let user = Uuid::new_v4();
        let mut goal = FitnessGoal::new(user, GoalType::Endurance, "Run 5K", "25");
        db.create_goal(&goal).unwrap();

        goal.set_progress(100);
        db.update_goal(&goal).unwrap();
        let stored = &db.list_goals(&user).unwrap()[0];
        assert_eq!(stored.progress, 100);
        assert_eq!(stored.status, GoalStatus::Completed);

        db.delete_goal(&goal.id).unwrap();
        assert!(db.list_goals(&user).unwrap().is_empty());
        assert!(matches!(
            db.delete_goal(&goal.id),
            Err(PersistenceError::NotFound(_))
        ));
        assert!(matches!(
            db.update_goal(&goal),
            Err(PersistenceError::NotFound(_))
        ));
    }

    #[test]
    fn test_invalid_goal_rejected() {
        let db = Database::open_in_memory().unwrap();
        let goal = FitnessGoal::new(Uuid::new_v4(), GoalType::Custom, "  ", "10");
        assert!(matches!(
            db.create_goal(&goal),
            Err(PersistenceError::Validation(_))
        ));
    }

    #[test]
    fn test_sessions_newest_first_with_limit() {
        let db = Database::open_in_memory().unwrap();
        let user = Uuid::new_v4();
        let base = Utc::now();

        for i in 0..12 {
            let record = WorkoutSessionRecord {
                id: Uuid::new_v4(),
                user_id: user,
                workout_id: "push-day-blast".to_string(),
                workout_name: "Push Day Blast".to_string(),
                duration_minutes: 20 + i,
                completed_exercises: 6,
                completed_sets: 18,
                calories: 250,
                completed_at: base + Duration::minutes(i as i64),
            };
            db.save_session(&record).unwrap();
        }

        let recent = db.recent_sessions(&user).unwrap();
        assert_eq!(recent.len(), 10);
        assert_eq!(recent[0].duration_minutes, 31);
        assert_eq!(recent[9].duration_minutes, 22);

        assert_eq!(db.list_sessions(&user, 3).unwrap().len(), 3);
        assert!(db.list_sessions(&Uuid::new_v4(), 10).unwrap().is_empty());
    }

    #[test]
    fn test_open_on_disk_persists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("fitsession.db");
        let profile = UserProfile::new(Uuid::new_v4(), "Jo", "Park");

        {
            let db = Database::open(&path).unwrap();
            db.create_profile(&profile).unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.schema_version().unwrap(), CURRENT_VERSION);
        assert!(db.get_profile(&profile.id).unwrap().is_some());
    }
}
