//! Session history screen listing recently saved workouts.

use egui::{RichText, Ui};

use crate::services::persistence::WorkoutSessionRecord;

use super::Screen;

/// Session history screen state.
#[derive(Default)]
pub struct SessionHistoryScreen {
    pub sessions: Vec<WorkoutSessionRecord>,
    pub error_message: Option<String>,
}

impl SessionHistoryScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Totals across the listed sessions: (workouts, minutes, calories).
    pub fn totals(&self) -> (usize, u32, u32) {
        let minutes = self.sessions.iter().map(|s| s.duration_minutes).sum();
        let calories = self.sessions.iter().map(|s| s.calories).sum();
        (self.sessions.len(), minutes, calories)
    }

    pub fn show(&mut self, ui: &mut Ui) -> Option<Screen> {
        let mut next = None;

        ui.horizontal(|ui| {
            if ui.button("← Back").clicked() {
                next = Some(Screen::WorkoutLibrary);
            }
            ui.heading("Recent Sessions");
        });

        ui.add_space(8.0);

        if let Some(ref error) = self.error_message {
            ui.colored_label(egui::Color32::from_rgb(239, 68, 68), error);
            return next;
        }

        let (count, minutes, calories) = self.totals();
        ui.label(format!(
            "{} workouts · {} min · {} cal",
            count, minutes, calories
        ));
        ui.separator();

        if self.sessions.is_empty() {
            ui.label(RichText::new("No sessions yet. Finish a workout to see it here.").weak());
            return next;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("session_history_grid")
                .num_columns(5)
                .striped(true)
                .spacing([16.0, 6.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("Date").strong());
                    ui.label(RichText::new("Workout").strong());
                    ui.label(RichText::new("Duration").strong());
                    ui.label(RichText::new("Sets").strong());
                    ui.label(RichText::new("Calories").strong());
                    ui.end_row();

                    for session in &self.sessions {
                        ui.label(
                            session
                                .completed_at
                                .with_timezone(&chrono::Local)
                                .format("%b %d, %H:%M")
                                .to_string(),
                        );
                        ui.label(&session.workout_name);
                        ui.label(format!("{} min", session.duration_minutes));
                        ui.label(session.completed_sets.to_string());
                        ui.label(session.calories.to_string());
                        ui.end_row();
                    }
                });
        });

        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn test_totals() {
        let record = |minutes, calories| WorkoutSessionRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            workout_id: "w".to_string(),
            workout_name: "W".to_string(),
            duration_minutes: minutes,
            completed_exercises: 1,
            completed_sets: 3,
            calories,
            completed_at: Utc::now(),
        };

        let screen = SessionHistoryScreen {
            sessions: vec![record(20, 150), record(31, 250)],
            error_message: None,
        };
        assert_eq!(screen.totals(), (2, 51, 400));
        assert_eq!(SessionHistoryScreen::new().totals(), (0, 0, 0));
    }
}
