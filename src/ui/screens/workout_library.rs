//! Workout library screen: catalog list with an overview of the selection.

use egui::{Align, Color32, Layout, RichText, Ui, Vec2};

use crate::ui::theme::difficulty_color;
use crate::workouts::types::{Exercise, WorkoutDefinition};

/// What the user asked for on the library screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibraryAction {
    /// Begin a session with the workout of this id
    Start(String),
    /// Show saved sessions
    OpenHistory,
}

/// Workout library screen state.
#[derive(Default)]
pub struct WorkoutLibraryScreen {
    /// Id of the selected workout
    pub selected: Option<String>,
    /// Search filter
    pub search_query: String,
    /// Error message to display (e.g. a workout failed to start)
    pub error_message: Option<String>,
}

impl WorkoutLibraryScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render the library. Returns the user's choice, if any.
    pub fn show(&mut self, ui: &mut Ui, workouts: &[WorkoutDefinition]) -> Option<LibraryAction> {
        let mut action = None;

        if self.selected.is_none() {
            self.selected = workouts.first().map(|w| w.id.clone());
        }

        ui.vertical(|ui| {
            ui.horizontal(|ui| {
                ui.heading("Workouts");

                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    if ui.button("History").clicked() {
                        action = Some(LibraryAction::OpenHistory);
                    }
                });
            });

            ui.add_space(8.0);

            ui.horizontal(|ui| {
                ui.label("Search:");
                ui.text_edit_singleline(&mut self.search_query);
                if ui.button("Clear").clicked() {
                    self.search_query.clear();
                }
            });

            if let Some(ref error) = self.error_message {
                ui.add_space(8.0);
                ui.colored_label(Color32::from_rgb(239, 68, 68), error);
            }

            ui.separator();

            ui.columns(2, |columns| {
                columns[0].vertical(|ui| {
                    egui::ScrollArea::vertical()
                        .id_salt("workout_list")
                        .show(ui, |ui| {
                            let filtered = filter_workouts(workouts, &self.search_query);
                            if filtered.is_empty() {
                                ui.label(RichText::new("No workouts found").weak());
                            }
                            for workout in filtered {
                                let is_selected = self.selected.as_deref() == Some(&workout.id);
                                if render_workout_item(ui, workout, is_selected) {
                                    self.selected = Some(workout.id.clone());
                                }
                            }
                        });
                });

                columns[1].vertical(|ui| {
                    let selected = self
                        .selected
                        .as_deref()
                        .and_then(|id| workouts.iter().find(|w| w.id == id));

                    match selected {
                        Some(workout) => {
                            if render_overview(ui, workout) {
                                action = Some(LibraryAction::Start(workout.id.clone()));
                            }
                        }
                        None => {
                            ui.label(RichText::new("Select a workout to preview").weak());
                        }
                    }
                });
            });
        });

        action
    }
}

/// Workouts whose name or description contains the query (case-insensitive).
pub fn filter_workouts<'a>(
    workouts: &'a [WorkoutDefinition],
    query: &str,
) -> Vec<&'a WorkoutDefinition> {
    let query = query.trim().to_lowercase();
    workouts
        .iter()
        .filter(|w| {
            query.is_empty()
                || w.name.to_lowercase().contains(&query)
                || w.description.to_lowercase().contains(&query)
        })
        .collect()
}

fn render_workout_item(ui: &mut Ui, workout: &WorkoutDefinition, is_selected: bool) -> bool {
    let fill = if is_selected {
        ui.visuals().selection.bg_fill
    } else {
        ui.visuals().faint_bg_color
    };

    let inner = egui::Frame::new()
        .fill(fill)
        .inner_margin(12.0)
        .outer_margin(2.0)
        .corner_radius(6.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            ui.label(RichText::new(&workout.name).strong());
            ui.horizontal(|ui| {
                ui.label(RichText::new(format!("{} min", workout.estimated_minutes)).weak());
                ui.label(RichText::new(format!("{} cal", workout.estimated_calories)).weak());
                ui.label(
                    RichText::new(format!("{} exercises", workout.exercise_count())).weak(),
                );
            });
        });

    inner
        .response
        .interact(egui::Sense::click())
        .clicked()
}

/// Render the overview; returns true when "Start Workout" is clicked.
fn render_overview(ui: &mut Ui, workout: &WorkoutDefinition) -> bool {
    let mut start = false;

    ui.heading(&workout.name);
    if !workout.description.is_empty() {
        ui.label(RichText::new(&workout.description).weak());
    }

    ui.add_space(8.0);

    ui.horizontal(|ui| {
        ui.label(format!("⏱ {} min", workout.estimated_minutes));
        ui.separator();
        ui.label(format!("🔥 {} cal", workout.estimated_calories));
        ui.separator();
        ui.label("Difficulty:");
        for level in 1..=5u8 {
            let color = if level <= workout.difficulty {
                difficulty_color(workout.difficulty)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new("●").color(color));
        }
    });

    if !workout.equipment.is_empty() {
        ui.label(RichText::new(format!("Equipment: {}", workout.equipment.join(", "))).weak());
    }

    ui.add_space(8.0);
    ui.label(format!(
        "{} exercises · {} sets total",
        workout.exercise_count(),
        workout.total_sets()
    ));
    ui.separator();

    egui::ScrollArea::vertical()
        .id_salt("workout_overview")
        .max_height((ui.available_height() - 60.0).max(120.0))
        .show(ui, |ui| {
            for (i, exercise) in workout.exercises.iter().enumerate() {
                render_exercise_row(ui, i + 1, exercise);
            }
        });

    ui.add_space(12.0);

    ui.vertical_centered(|ui| {
        if ui
            .add(
                egui::Button::new(RichText::new("▶ Start Workout").size(18.0))
                    .min_size(Vec2::new(220.0, 44.0)),
            )
            .clicked()
        {
            start = true;
        }
    });

    start
}

fn render_exercise_row(ui: &mut Ui, number: usize, exercise: &Exercise) {
    ui.horizontal(|ui| {
        ui.label(RichText::new(format!("{}.", number)).weak());
        ui.vertical(|ui| {
            ui.label(RichText::new(&exercise.name).strong());
            ui.label(
                RichText::new(format!(
                    "{} · {}",
                    exercise.prescription(),
                    exercise.rest_label()
                ))
                .small()
                .weak(),
            );
        });
    });
    ui.add_space(4.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workouts::catalog::push_day_blast;

    #[test]
    fn test_filter_by_name_and_description() {
        let mut other = WorkoutDefinition::new("legs", "Leg Day", vec![Exercise::reps("s", "Squat", 3, 10)]);
        other.description = "Quads and glutes".to_string();
        let workouts = vec![push_day_blast(), other];

        assert_eq!(filter_workouts(&workouts, "").len(), 2);
        assert_eq!(filter_workouts(&workouts, "push")[0].id, "push-day-blast");
        assert_eq!(filter_workouts(&workouts, "GLUTES")[0].id, "legs");
        assert!(filter_workouts(&workouts, "yoga").is_empty());
    }
}
