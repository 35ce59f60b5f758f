//! User profile and application configuration.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

/// Weight unit preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Lbs,
    Kg,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Lbs => "lbs",
            WeightUnit::Kg => "kg",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lbs" => Some(WeightUnit::Lbs),
            "kg" => Some(WeightUnit::Kg),
            _ => None,
        }
    }
}

/// Height unit preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightUnit {
    #[default]
    Ft,
    Cm,
}

impl HeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            HeightUnit::Ft => "ft",
            HeightUnit::Cm => "cm",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "ft" => Some(HeightUnit::Ft),
            "cm" => Some(HeightUnit::Cm),
            _ => None,
        }
    }
}

/// UI theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Dark theme (default)
    #[default]
    Dark,
    /// Light theme
    Light,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "Dark"),
            Theme::Light => write!(f, "Light"),
        }
    }
}

/// User profile collected during onboarding. One per user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    /// Same id as the identity account
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub gender: Option<String>,
    pub weight: Option<f32>,
    pub weight_unit: WeightUnit,
    pub height: Option<f32>,
    pub height_unit: HeightUnit,
    pub height_feet: Option<u8>,
    pub height_inches: Option<u8>,
    /// Self-reported activity level ("sedentary", "moderate", ...)
    pub activity_level: Option<String>,
    pub primary_goal: Option<String>,
    pub target_weight: Option<f32>,
    pub timeline: Option<String>,
    /// Planned workouts per week
    pub workout_frequency: u8,
    /// Preferred session length ("30-45 min")
    pub session_duration: Option<String>,
    /// Available equipment
    pub equipment: Vec<String>,
    pub favorite_activities: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Create a profile with only a name set.
    pub fn new(id: Uuid, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth: None,
            gender: None,
            weight: None,
            weight_unit: WeightUnit::default(),
            height: None,
            height_unit: HeightUnit::default(),
            height_feet: None,
            height_inches: None,
            activity_level: None,
            primary_goal: None,
            target_weight: None,
            timeline: None,
            workout_frequency: 3,
            session_duration: None,
            equipment: Vec::new(),
            favorite_activities: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Full display name.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Height in centimeters, whichever unit it was entered in.
    pub fn height_cm(&self) -> Option<f32> {
        match self.height_unit {
            HeightUnit::Cm => self.height,
            HeightUnit::Ft => match (self.height_feet, self.height_inches) {
                (None, None) => None,
                (feet, inches) => {
                    let total_inches =
                        feet.unwrap_or(0) as f32 * 12.0 + inches.unwrap_or(0) as f32;
                    Some(total_inches * 2.54)
                }
            },
        }
    }

    /// Weight in kilograms.
    pub fn weight_kg(&self) -> Option<f32> {
        self.weight.map(|w| match self.weight_unit {
            WeightUnit::Kg => w,
            WeightUnit::Lbs => w * 0.453_592,
        })
    }
}

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application version
    pub version: String,
    /// Data directory path
    #[serde(skip)]
    pub data_dir: PathBuf,
    /// User id used when nobody is signed in
    pub local_user_id: Uuid,
    /// Database file name inside the data directory
    pub database_file: String,
    /// Audio cue settings
    #[serde(default)]
    pub audio: AudioSettings,
    /// Session player settings
    #[serde(default)]
    pub session: SessionSettings,
    /// UI settings
    #[serde(default)]
    pub ui: UiSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            data_dir: PathBuf::new(),
            local_user_id: Uuid::new_v4(),
            database_file: "fitsession.db".to_string(),
            audio: AudioSettings::default(),
            session: SessionSettings::default(),
            ui: UiSettings::default(),
        }
    }
}

impl AppConfig {
    /// Full path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.data_dir.join(&self.database_file)
    }

    /// Directory scanned for custom workout definitions.
    pub fn workouts_dir(&self) -> PathBuf {
        self.data_dir.join("workouts")
    }
}

/// Audio cue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioSettings {
    /// Play the rest-over beep
    pub cues_enabled: bool,
    /// Cue volume (0-100)
    pub volume: u8,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            cues_enabled: true,
            volume: 80,
        }
    }
}

/// Session player settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionSettings {
    /// Start timed holds without waiting for the start button
    pub auto_start_holds: bool,
}

/// UI-related settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Color theme
    pub theme: Theme,
    /// Font scale multiplier
    pub font_scale: f32,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            font_scale: 1.0,
        }
    }
}

/// Get the application data directory.
pub fn get_data_dir() -> PathBuf {
    directories::ProjectDirs::from("com", "fitsession", "FitSession")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Get the configuration file path.
pub fn get_config_path() -> PathBuf {
    get_data_dir().join("config.toml")
}

/// Load application configuration from the default location.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&get_config_path(), get_data_dir())
}

/// Load configuration from a specific file. A missing file yields defaults.
pub fn load_config_from(path: &PathBuf, data_dir: PathBuf) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig {
            data_dir,
            ..Default::default()
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::IoError(e.to_string()))?;

    let mut config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    config.data_dir = data_dir;

    Ok(config)
}

/// Save application configuration to the default location.
pub fn save_config(config: &AppConfig) -> Result<(), ConfigError> {
    save_config_to(config, &get_config_path())
}

/// Save configuration to a specific file.
pub fn save_config_to(config: &AppConfig, path: &PathBuf) -> Result<(), ConfigError> {
    // Ensure parent directory exists
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::IoError(e.to_string()))?;
    }

    let content =
        toml::to_string_pretty(config).map_err(|e| ConfigError::SerializeError(e.to_string()))?;

    std::fs::write(path, content).map_err(|e| ConfigError::IoError(e.to_string()))?;

    Ok(())
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Serialize error: {0}")]
    SerializeError(String),
}
