//! UI theme definitions.

use egui::{Color32, Visuals};

use crate::storage::config::Theme;
use crate::workouts::types::SessionPhase;

/// Color palette for one theme.
#[derive(Debug, Clone, Copy)]
pub struct Palette {
    pub background: Color32,
    pub panel_bg: Color32,
    pub card_bg: Color32,
    pub text_primary: Color32,
    pub text_secondary: Color32,
    /// Accent (violet)
    pub accent: Color32,
    pub success: Color32,
    pub warning: Color32,
    pub error: Color32,
    pub border: Color32,
}

/// Dark palette.
pub const DARK: Palette = Palette {
    background: Color32::from_rgb(17, 16, 26),
    panel_bg: Color32::from_rgb(26, 24, 38),
    card_bg: Color32::from_rgb(38, 35, 54),
    text_primary: Color32::from_rgb(242, 240, 248),
    text_secondary: Color32::from_rgb(164, 160, 182),
    accent: Color32::from_rgb(139, 92, 246),
    success: Color32::from_rgb(34, 197, 94),
    warning: Color32::from_rgb(245, 158, 11),
    error: Color32::from_rgb(239, 68, 68),
    border: Color32::from_rgb(62, 58, 82),
};

/// Light palette.
pub const LIGHT: Palette = Palette {
    background: Color32::from_rgb(249, 248, 252),
    panel_bg: Color32::from_rgb(255, 255, 255),
    card_bg: Color32::from_rgb(243, 241, 250),
    text_primary: Color32::from_rgb(30, 27, 46),
    text_secondary: Color32::from_rgb(100, 96, 120),
    accent: Color32::from_rgb(124, 58, 237),
    success: Color32::from_rgb(22, 163, 74),
    warning: Color32::from_rgb(217, 119, 6),
    error: Color32::from_rgb(220, 38, 38),
    border: Color32::from_rgb(221, 216, 234),
};

/// Palette for a theme.
pub fn palette(theme: Theme) -> &'static Palette {
    match theme {
        Theme::Dark => &DARK,
        Theme::Light => &LIGHT,
    }
}

/// egui visuals for a theme.
pub fn visuals(theme: Theme) -> Visuals {
    let p = palette(theme);
    let mut visuals = match theme {
        Theme::Dark => Visuals::dark(),
        Theme::Light => Visuals::light(),
    };

    visuals.window_fill = p.panel_bg;
    visuals.panel_fill = p.panel_bg;
    visuals.faint_bg_color = p.card_bg;
    visuals.extreme_bg_color = p.background;

    visuals.widgets.noninteractive.bg_fill = p.card_bg;
    visuals.widgets.inactive.bg_fill = p.card_bg;
    visuals.widgets.active.bg_fill = p.accent;

    visuals.selection.bg_fill = p.accent.linear_multiply(0.35);
    visuals.selection.stroke.color = p.accent;

    visuals.widgets.noninteractive.fg_stroke.color = p.text_primary;
    visuals.widgets.inactive.fg_stroke.color = p.text_secondary;
    visuals.widgets.hovered.fg_stroke.color = p.text_primary;

    visuals.widgets.noninteractive.bg_stroke.color = p.border;
    visuals.widgets.inactive.bg_stroke.color = p.border;

    visuals
}

/// Apply theme and font scale to a context.
pub fn apply(ctx: &egui::Context, theme: Theme, font_scale: f32) {
    ctx.set_visuals(visuals(theme));
    ctx.set_zoom_factor(font_scale.clamp(0.5, 3.0));
}

/// Badge color for a session phase.
pub fn phase_color(phase: SessionPhase, theme: Theme) -> Color32 {
    let p = palette(theme);
    match phase {
        SessionPhase::Exercising => p.accent,
        SessionPhase::Resting => p.success,
        SessionPhase::Paused(_) => p.warning,
        SessionPhase::Complete => p.success,
    }
}

/// Color for a 1-5 difficulty rank.
pub fn difficulty_color(difficulty: u8) -> Color32 {
    match difficulty {
        0..=1 => Color32::from_rgb(34, 197, 94),
        2 => Color32::from_rgb(132, 204, 22),
        3 => Color32::from_rgb(245, 158, 11),
        4 => Color32::from_rgb(249, 115, 22),
        _ => Color32::from_rgb(239, 68, 68),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workouts::types::ActivePhase;

    #[test]
    fn test_visuals_follow_theme() {
        assert!(visuals(Theme::Dark).dark_mode);
        assert!(!visuals(Theme::Light).dark_mode);
        assert_eq!(visuals(Theme::Dark).panel_fill, DARK.panel_bg);
    }

    #[test]
    fn test_phase_colors() {
        assert_eq!(phase_color(SessionPhase::Resting, Theme::Dark), DARK.success);
        assert_eq!(
            phase_color(SessionPhase::Paused(ActivePhase::Resting), Theme::Light),
            LIGHT.warning
        );
        assert_eq!(difficulty_color(9), difficulty_color(5));
    }
}
