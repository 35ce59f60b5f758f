//! Database schema definitions.

/// SQL schema for creating all database tables.
pub const SCHEMA: &str = r#"
-- User profiles, one per user
CREATE TABLE IF NOT EXISTS user_profiles (
    id TEXT PRIMARY KEY,
    first_name TEXT NOT NULL,
    last_name TEXT NOT NULL,
    date_of_birth TEXT,
    gender TEXT,
    weight REAL,
    weight_unit TEXT NOT NULL DEFAULT 'lbs',
    height REAL,
    height_unit TEXT NOT NULL DEFAULT 'ft',
    height_feet INTEGER,
    height_inches INTEGER,
    activity_level TEXT,
    primary_goal TEXT,
    target_weight REAL,
    timeline TEXT,
    workout_frequency INTEGER NOT NULL DEFAULT 3,
    session_duration TEXT,
    equipment_json TEXT NOT NULL DEFAULT '[]',
    favorite_activities_json TEXT NOT NULL DEFAULT '[]',
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Fitness goals
CREATE TABLE IF NOT EXISTS fitness_goals (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    goal_type TEXT NOT NULL,
    title TEXT NOT NULL,
    description TEXT NOT NULL DEFAULT '',
    current_value TEXT NOT NULL DEFAULT '',
    target_value TEXT NOT NULL,
    unit TEXT NOT NULL DEFAULT '',
    timeline TEXT NOT NULL DEFAULT '3-months',
    status TEXT NOT NULL DEFAULT 'active',
    progress INTEGER NOT NULL DEFAULT 0 CHECK (progress BETWEEN 0 AND 100),
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_fitness_goals_user_id ON fitness_goals(user_id);

-- Completed workout sessions (append-only)
CREATE TABLE IF NOT EXISTS workout_sessions (
    id TEXT PRIMARY KEY,
    user_id TEXT NOT NULL,
    workout_id TEXT NOT NULL,
    workout_name TEXT NOT NULL,
    duration_minutes INTEGER NOT NULL,
    completed_exercises INTEGER NOT NULL,
    completed_sets INTEGER NOT NULL,
    calories INTEGER NOT NULL,
    completed_at TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_workout_sessions_user_completed
    ON workout_sessions(user_id, completed_at);
"#;

/// Schema version table for migrations.
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version.
pub const CURRENT_VERSION: i32 = 1;
