//! Workout complete screen.

use egui::{Color32, RichText, Ui, Vec2};

use crate::workouts::types::SessionSummary;

use super::Screen;

/// Outcome of saving the session record.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SaveStatus {
    #[default]
    Pending,
    Saved,
    Failed(String),
}

/// Achievements shown with the summary.
pub fn achievements(summary: &SessionSummary) -> Vec<(&'static str, bool)> {
    vec![
        ("Workout Completed", true),
        ("Under 25 Minutes", summary.duration_minutes <= 25),
        ("Every Exercise Done", summary.completed_exercises > 0),
    ]
}

/// Workout complete screen state.
#[derive(Default)]
pub struct WorkoutCompleteScreen {
    pub summary: Option<SessionSummary>,
    pub save_status: SaveStatus,
}

impl WorkoutCompleteScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show a freshly completed session.
    pub fn set_summary(&mut self, summary: SessionSummary) {
        self.summary = Some(summary);
        self.save_status = SaveStatus::Pending;
    }

    pub fn show(&mut self, ui: &mut Ui) -> Option<Screen> {
        let mut next = None;

        let Some(summary) = self.summary.as_ref() else {
            ui.label(RichText::new("No completed workout").weak());
            if ui.button("Back to Workouts").clicked() {
                next = Some(Screen::WorkoutLibrary);
            }
            return next;
        };

        ui.vertical_centered(|ui| {
            ui.add_space(24.0);
            ui.label(RichText::new("🏆").size(48.0));
            ui.heading("Workout Complete! 🎉");
            ui.label(RichText::new("Amazing work! You crushed that workout session.").weak());

            ui.add_space(16.0);
            ui.label(RichText::new(&summary.workout_name).size(20.0).strong());
            ui.add_space(8.0);

            egui::Grid::new("summary_grid")
                .num_columns(2)
                .spacing([24.0, 8.0])
                .show(ui, |ui| {
                    ui.label("⏱ Duration");
                    ui.label(RichText::new(format!("{} min", summary.duration_minutes)).strong());
                    ui.end_row();

                    ui.label("🔥 Calories");
                    ui.label(RichText::new(format!("{}", summary.estimated_calories)).strong());
                    ui.end_row();

                    ui.label("🎯 Exercises");
                    ui.label(RichText::new(format!("{}", summary.completed_exercises)).strong());
                    ui.end_row();

                    ui.label("Sets");
                    ui.label(RichText::new(format!("{}", summary.completed_sets)).strong());
                    ui.end_row();
                });

            ui.add_space(16.0);
            ui.label(RichText::new("Achievements").strong());
            for (label, achieved) in achievements(summary) {
                let (icon, color) = if achieved {
                    ("★", Color32::from_rgb(245, 158, 11))
                } else {
                    ("☆", Color32::GRAY)
                };
                ui.label(RichText::new(format!("{} {}", icon, label)).color(color));
            }

            ui.add_space(16.0);
            match &self.save_status {
                SaveStatus::Pending => {
                    ui.label(RichText::new("Saving...").weak());
                }
                SaveStatus::Saved => {
                    ui.label(RichText::new("✔ Saved to your history").color(Color32::from_rgb(34, 197, 94)));
                }
                SaveStatus::Failed(err) => {
                    ui.colored_label(
                        Color32::from_rgb(239, 68, 68),
                        format!("Could not save session: {}", err),
                    );
                }
            }

            ui.add_space(24.0);
            ui.horizontal(|ui| {
                if ui
                    .add(egui::Button::new("Back to Workouts").min_size(Vec2::new(180.0, 40.0)))
                    .clicked()
                {
                    next = Some(Screen::WorkoutLibrary);
                }
                if ui
                    .add(egui::Button::new("View History").min_size(Vec2::new(180.0, 40.0)))
                    .clicked()
                {
                    next = Some(Screen::SessionHistory);
                }
            });
        });

        next
    }
}
