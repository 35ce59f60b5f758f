//! Active workout screen: renders the player and collects user actions.
//!
//! Keyboard shortcuts: Space pauses or resumes, Enter completes the set,
//! Left/Right move between exercises.

use egui::{Align, Color32, Layout, RichText, Ui, Vec2};

use crate::storage::config::Theme;
use crate::ui::theme::{palette, phase_color};
use crate::workouts::player::WorkoutPlayer;
use crate::workouts::types::{ActivePhase, CountdownKind, ExerciseTarget, SessionPhase};

const ENCOURAGEMENT: [&str; 8] = [
    "You've got this! 💪",
    "Keep pushing! 🔥",
    "Almost there! ⚡",
    "Strong work! 🌟",
    "Don't give up! 💯",
    "You're crushing it! 🚀",
    "Feel the burn! 🔥",
    "One more rep! 💪",
];

/// A user input for the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerAction {
    CompleteSet,
    AdvanceExercise,
    RetreatExercise,
    TogglePause,
    StartHold,
    /// Leave the session (confirmed by the user)
    Exit,
}

impl PlayerAction {
    /// Apply to the player. `Exit` consumes the session and is handled by
    /// the owner instead.
    pub fn apply(self, player: &mut WorkoutPlayer) {
        match self {
            PlayerAction::CompleteSet => player.complete_set(),
            PlayerAction::AdvanceExercise => player.advance_exercise(),
            PlayerAction::RetreatExercise => player.retreat_exercise(),
            PlayerAction::TogglePause => player.toggle_pause(),
            PlayerAction::StartHold => player.start_hold(),
            PlayerAction::Exit => {}
        }
    }
}

/// Format seconds as `m:ss`.
pub fn format_countdown(seconds: u32) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Encouragement line, rotating with the number of finished sets.
pub fn encouragement(completed_sets: u32) -> &'static str {
    ENCOURAGEMENT[completed_sets as usize % ENCOURAGEMENT.len()]
}

/// Active workout screen state.
#[derive(Default)]
pub struct ActiveWorkoutScreen {
    /// Show exit confirmation
    pub show_exit_dialog: bool,
}

impl ActiveWorkoutScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the session. Returns at most one action per frame.
    pub fn show(&mut self, ui: &mut Ui, player: &WorkoutPlayer, theme: Theme) -> Option<PlayerAction> {
        let mut action = None;
        let phase = player.phase();

        if !self.show_exit_dialog {
            action = keyboard_action(ui, player);
        }

        ui.vertical(|ui| {
            if let Some(a) = self.render_header(ui, player) {
                action = Some(a);
            }

            ui.add(
                egui::ProgressBar::new(player.progress_percent() / 100.0)
                    .text(format!("{:.0}%", player.progress_percent())),
            );

            ui.add_space(16.0);

            let resting = matches!(
                phase,
                SessionPhase::Resting | SessionPhase::Paused(ActivePhase::Resting)
            );
            let body_action = if resting {
                render_rest(ui, player, phase, theme)
            } else {
                render_exercise(ui, player, phase, theme)
            };
            if body_action.is_some() {
                action = body_action;
            }

            ui.add_space(16.0);

            if let Some(next) = player.next_exercise() {
                ui.group(|ui| {
                    ui.set_min_width(ui.available_width());
                    ui.label(RichText::new("Coming up next:").weak());
                    ui.label(RichText::new(&next.name).strong());
                    ui.label(RichText::new(next.prescription()).small().weak());
                });
            }

            ui.add_space(16.0);

            if let Some(a) = render_controls(ui, player, resting) {
                action = Some(a);
            }
        });

        if self.show_exit_dialog {
            if let Some(a) = self.render_exit_dialog(ui) {
                action = Some(a);
            }
        }

        action
    }

    fn render_header(&mut self, ui: &mut Ui, player: &WorkoutPlayer) -> Option<PlayerAction> {
        ui.horizontal(|ui| {
            if ui.button("✕").on_hover_text("Exit workout").clicked() {
                self.show_exit_dialog = true;
            }

            ui.vertical(|ui| {
                ui.label(RichText::new(&player.workout().name).weak());
                ui.label(
                    RichText::new(format!(
                        "Exercise {} of {}",
                        player.current_exercise_index() + 1,
                        player.workout().exercise_count()
                    ))
                    .strong(),
                );
            });

            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let label = if player.is_paused() { "▶ Resume" } else { "❚❚ Pause" };
                if ui.button(label).clicked() {
                    return Some(PlayerAction::TogglePause);
                }
                ui.label(RichText::new("(Space)").weak().small());
                None
            })
            .inner
        })
        .inner
    }

    fn render_exit_dialog(&mut self, ui: &mut Ui) -> Option<PlayerAction> {
        let mut action = None;

        egui::Window::new("Exit Workout?")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ui.ctx(), |ui| {
                ui.set_min_size(Vec2::new(280.0, 110.0));
                ui.vertical_centered(|ui| {
                    ui.add_space(8.0);
                    ui.label("Progress from this session will not be saved.");
                    ui.add_space(16.0);
                    ui.horizontal(|ui| {
                        if ui.button("Keep Going").clicked() {
                            self.show_exit_dialog = false;
                        }
                        ui.add_space(16.0);
                        if ui
                            .add(egui::Button::new("Exit").fill(Color32::from_rgb(239, 68, 68)))
                            .clicked()
                        {
                            self.show_exit_dialog = false;
                            action = Some(PlayerAction::Exit);
                        }
                    });
                });
            });

        action
    }
}

fn keyboard_action(ui: &Ui, player: &WorkoutPlayer) -> Option<PlayerAction> {
    ui.input(|i| {
        if i.key_pressed(egui::Key::Space) {
            Some(PlayerAction::TogglePause)
        } else if i.key_pressed(egui::Key::Enter) && !player.is_resting() {
            Some(PlayerAction::CompleteSet)
        } else if i.key_pressed(egui::Key::ArrowRight) {
            Some(PlayerAction::AdvanceExercise)
        } else if i.key_pressed(egui::Key::ArrowLeft) {
            Some(PlayerAction::RetreatExercise)
        } else {
            None
        }
    })
}

fn render_rest(
    ui: &mut Ui,
    player: &WorkoutPlayer,
    phase: SessionPhase,
    theme: Theme,
) -> Option<PlayerAction> {
    let exercise = player.current_exercise();

    ui.vertical_centered(|ui| {
        let remaining = player.countdown().unwrap_or(0);
        ui.label(
            RichText::new(format_countdown(remaining))
                .size(64.0)
                .strong()
                .color(phase_color(phase, theme)),
        );
        ui.heading("Rest Time");
        if player.is_paused() {
            ui.label(RichText::new("Paused").color(palette(theme).warning));
        } else {
            ui.label(RichText::new("Get ready for your next set").weak());
        }
        ui.add_space(8.0);
        ui.label(RichText::new(encouragement(player.total_completed_sets())).color(palette(theme).accent));
        ui.add_space(12.0);
        ui.label(RichText::new("Next up:").weak());
        ui.label(RichText::new(&exercise.name).strong());
        ui.label(format!("Set {} of {}", player.current_set(), exercise.sets));
    });

    None
}

fn render_exercise(
    ui: &mut Ui,
    player: &WorkoutPlayer,
    phase: SessionPhase,
    theme: Theme,
) -> Option<PlayerAction> {
    let mut action = None;
    let exercise = player.current_exercise();
    let p = palette(theme);

    ui.vertical_centered(|ui| {
        ui.label(RichText::new(&exercise.name).size(28.0).strong());
        ui.label(
            RichText::new(format!("Set {} of {}", player.current_set(), exercise.sets))
                .size(18.0)
                .color(p.accent),
        );

        ui.add_space(12.0);

        let (value, caption) = match exercise.target {
            ExerciseTarget::Reps(reps) => (format!("{} reps", reps), "repetitions"),
            ExerciseTarget::Hold { seconds } => (format!("{}s", seconds), "hold time"),
        };
        ui.label(RichText::new(value).size(40.0).strong());
        ui.label(RichText::new(caption).weak());

        if !exercise.instructions.is_empty() {
            ui.add_space(8.0);
            ui.label(&exercise.instructions);
        }
        if let Some(ref tip) = exercise.tip {
            ui.add_space(4.0);
            ui.label(RichText::new(format!("💡 Pro Tip: {}", tip)).small().color(p.accent));
        }

        if let ExerciseTarget::Hold { seconds } = exercise.target {
            ui.add_space(12.0);
            match player.countdown_kind() {
                Some(CountdownKind::Hold) => {
                    let remaining = player.countdown().unwrap_or(0);
                    ui.label(
                        RichText::new(format_countdown(remaining))
                            .size(48.0)
                            .strong()
                            .color(phase_color(phase, theme)),
                    );
                    if player.is_paused() {
                        ui.label(RichText::new("Paused").color(p.warning));
                    }
                }
                _ => {
                    ui.label(RichText::new(format_countdown(seconds)).size(48.0).weak());
                    if ui.button("▶ Start Hold").clicked() {
                        action = Some(PlayerAction::StartHold);
                    }
                }
            }
        }

        ui.add_space(8.0);
        ui.label(RichText::new(encouragement(player.total_completed_sets())).strong());
    });

    action
}

fn render_controls(ui: &mut Ui, player: &WorkoutPlayer, resting: bool) -> Option<PlayerAction> {
    let mut action = None;
    let index = player.current_exercise_index();
    let last = player.workout().exercise_count().saturating_sub(1);

    ui.horizontal(|ui| {
        if ui
            .add_enabled(index > 0, egui::Button::new("⏮ Previous"))
            .clicked()
        {
            action = Some(PlayerAction::RetreatExercise);
        }

        let pause_label = if player.is_paused() { "▶" } else { "❚❚" };
        if ui.button(pause_label).clicked() {
            action = Some(PlayerAction::TogglePause);
        }

        if ui
            .add_enabled(index < last, egui::Button::new("Next ⏭"))
            .clicked()
        {
            action = Some(PlayerAction::AdvanceExercise);
        }
    });

    if !resting {
        ui.add_space(8.0);
        let exercise = player.current_exercise();
        let label = if player.current_set() == exercise.sets {
            "Complete Exercise"
        } else {
            "Set Complete"
        };
        if ui
            .add(
                egui::Button::new(RichText::new(label).size(18.0).strong())
                    .fill(Color32::from_rgb(22, 163, 74))
                    .min_size(Vec2::new(ui.available_width(), 48.0)),
            )
            .clicked()
        {
            action = Some(PlayerAction::CompleteSet);
        }
    }

    action
}
