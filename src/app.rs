//! Main application state and egui integration.

use anyhow::Context;
use eframe::egui;

use crossbeam::channel::Receiver;
use fitsession::audio::cue_player_for;
use fitsession::services::{PersistenceService, WorkoutSessionRecord};
use fitsession::storage::config::{self, AppConfig, Theme};
use fitsession::storage::Database;
use fitsession::ui::screens::{
    ActiveWorkoutScreen, LibraryAction, PlayerAction, SaveStatus, Screen, SessionHistoryScreen,
    WorkoutCompleteScreen, WorkoutLibraryScreen,
};
use fitsession::ui::theme;
use fitsession::workouts::{
    ActiveSession, ChannelListener, Clock, SessionEvent, SessionSummary, SystemClock,
    WorkoutCatalog, WorkoutError,
};
use std::sync::Arc;

/// Main application state.
pub struct FitSessionApp {
    current_screen: Screen,
    config: AppConfig,
    catalog: WorkoutCatalog,
    /// None when no database could be opened; sessions then go unsaved
    database: Option<Database>,
    clock: Arc<dyn Clock>,
    /// Running session, if any
    session: Option<ActiveSession>,
    /// Outcomes of the running session
    session_events: Option<Receiver<SessionEvent>>,
    library_screen: WorkoutLibraryScreen,
    active_screen: ActiveWorkoutScreen,
    complete_screen: WorkoutCompleteScreen,
    history_screen: SessionHistoryScreen,
}

impl FitSessionApp {
    /// Create a new application instance.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = load_or_create_config();
        theme::apply(&cc.egui_ctx, config.ui.theme, config.ui.font_scale);

        let mut catalog = WorkoutCatalog::builtin();
        let workouts_dir = config.workouts_dir();
        if workouts_dir.is_dir() {
            match catalog.load_dir(&workouts_dir) {
                Ok(count) => tracing::info!("Loaded {} custom workouts", count),
                Err(e) => tracing::warn!("Failed to load custom workouts: {}", e),
            }
        }

        let database = match open_database(&config) {
            Ok(db) => Some(db),
            Err(e) => {
                tracing::error!("{:#}", e);
                None
            }
        };

        Self {
            current_screen: Screen::WorkoutLibrary,
            config,
            catalog,
            database,
            clock: Arc::new(SystemClock),
            session: None,
            session_events: None,
            library_screen: WorkoutLibraryScreen::new(),
            active_screen: ActiveWorkoutScreen::new(),
            complete_screen: WorkoutCompleteScreen::new(),
            history_screen: SessionHistoryScreen::new(),
        }
    }

    fn navigate(&mut self, screen: Screen) {
        tracing::debug!("Navigating to {:?}", screen);
        if screen == Screen::SessionHistory {
            self.refresh_history();
        }
        self.current_screen = screen;
    }

    /// Begin a session for the given workout.
    fn start_workout(&mut self, workout_id: &str) -> Result<(), WorkoutError> {
        let workout = self.catalog.get(workout_id)?.clone();
        let (listener, events) = ChannelListener::new();
        let cue = cue_player_for(self.config.audio.cues_enabled, self.config.audio.volume);

        let mut session = ActiveSession::start(workout, Arc::clone(&self.clock), cue, Box::new(listener))?;
        let auto_start = self.config.session.auto_start_holds;
        session.apply(|player| player.set_auto_start_holds(auto_start));

        tracing::info!("Started workout {}", workout_id);
        self.session = Some(session);
        self.session_events = Some(events);
        self.active_screen = ActiveWorkoutScreen::new();
        self.navigate(Screen::ActiveWorkout);
        Ok(())
    }

    /// Drain session outcomes from the listener channel.
    fn process_session_events(&mut self) {
        let events: Vec<SessionEvent> = match &self.session_events {
            Some(rx) => rx.try_iter().collect(),
            None => return,
        };

        for event in events {
            match event {
                SessionEvent::Completed(summary) => {
                    // The player is terminal; dropping it releases the cue thread.
                    self.session = None;
                    self.session_events = None;
                    self.complete_screen.set_summary(summary.clone());
                    self.complete_screen.save_status = self.save_summary(&summary);
                    self.navigate(Screen::WorkoutComplete);
                }
                SessionEvent::Exited => {
                    self.session = None;
                    self.session_events = None;
                    self.navigate(Screen::WorkoutLibrary);
                }
            }
        }
    }

    fn save_summary(&self, summary: &SessionSummary) -> SaveStatus {
        let Some(db) = &self.database else {
            return SaveStatus::Failed("no database available".to_string());
        };

        let record = WorkoutSessionRecord::from_summary(self.config.local_user_id, summary);
        match db.save_session(&record) {
            Ok(()) => SaveStatus::Saved,
            Err(e) => {
                tracing::error!("Failed to save session: {}", e);
                SaveStatus::Failed(e.to_string())
            }
        }
    }

    fn refresh_history(&mut self) {
        self.history_screen.error_message = None;
        match &self.database {
            Some(db) => match db.recent_sessions(&self.config.local_user_id) {
                Ok(sessions) => self.history_screen.sessions = sessions,
                Err(e) => {
                    tracing::warn!("Failed to load session history: {}", e);
                    self.history_screen.error_message = Some(e.to_string());
                }
            },
            None => {
                self.history_screen.error_message = Some("No database available".to_string());
            }
        }
    }

    fn handle_player_action(&mut self, action: PlayerAction) {
        match action {
            PlayerAction::Exit => {
                if let Some(session) = self.session.take() {
                    session.exit();
                }
            }
            other => {
                if let Some(session) = self.session.as_mut() {
                    session.apply(|player| other.apply(player));
                }
            }
        }
        self.process_session_events();
    }

    fn toggle_theme(&mut self, ctx: &egui::Context) {
        self.config.ui.theme = match self.config.ui.theme {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        };
        theme::apply(ctx, self.config.ui.theme, self.config.ui.font_scale);
        if let Err(e) = config::save_config(&self.config) {
            tracing::warn!("Failed to save config: {}", e);
        }
    }
}

fn open_database(config: &AppConfig) -> anyhow::Result<Database> {
    let path = config.database_path();
    let db = Database::open(&path)
        .with_context(|| format!("Failed to open database at {}", path.display()))?;
    tracing::info!("Database ready (schema v{})", db.schema_version()?);
    Ok(db)
}

/// Load the config, writing defaults on first run so the local user id sticks.
fn load_or_create_config() -> AppConfig {
    let first_run = !config::get_config_path().exists();
    let config = config::load_config().unwrap_or_else(|e| {
        tracing::warn!("Failed to load config, using defaults: {}", e);
        AppConfig {
            data_dir: config::get_data_dir(),
            ..Default::default()
        }
    });

    if first_run {
        if let Err(e) = config::save_config(&config) {
            tracing::warn!("Failed to write initial config: {}", e);
        }
    }
    config
}

impl eframe::App for FitSessionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Deliver due ticks before drawing
        if let Some(session) = self.session.as_mut() {
            session.pump();
        }
        self.process_session_events();

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("FitSession");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    let theme_icon = match self.config.ui.theme {
                        Theme::Dark => "🌙",
                        Theme::Light => "☀",
                    };
                    if ui.button(theme_icon).clicked() {
                        self.toggle_theme(ctx);
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.current_screen {
            Screen::WorkoutLibrary => {
                match self.library_screen.show(ui, self.catalog.workouts()) {
                    Some(LibraryAction::Start(id)) => {
                        if let Err(e) = self.start_workout(&id) {
                            tracing::error!("Failed to start workout {}: {}", id, e);
                            self.library_screen.error_message = Some(e.to_string());
                        } else {
                            self.library_screen.error_message = None;
                        }
                    }
                    Some(LibraryAction::OpenHistory) => self.navigate(Screen::SessionHistory),
                    None => {}
                }
            }
            Screen::ActiveWorkout => {
                let action = if let Some(session) = &self.session {
                    self.active_screen
                        .show(ui, session.player(), self.config.ui.theme)
                } else {
                    None
                };
                if let Some(action) = action {
                    self.handle_player_action(action);
                } else if self.session.is_none() {
                    self.navigate(Screen::WorkoutLibrary);
                }
            }
            Screen::WorkoutComplete => {
                if let Some(next) = self.complete_screen.show(ui) {
                    self.navigate(next);
                }
            }
            Screen::SessionHistory => {
                if let Some(next) = self.history_screen.show(ui) {
                    self.navigate(next);
                }
            }
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.label(format!("v{}", env!("CARGO_PKG_VERSION")));
                ui.separator();
                let status = match &self.session {
                    Some(session) => session.player().phase().to_string(),
                    None => format!("{} workouts", self.catalog.len()),
                };
                ui.label(status);
            });
        });

        // Wake up for the next countdown tick
        if let Some(wait) = self.session.as_ref().and_then(|s| s.time_until_tick()) {
            ctx.request_repaint_after(wait);
        }
    }
}
