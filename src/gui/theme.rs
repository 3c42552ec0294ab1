//! Theme Module
//! Maps the dashboard theme onto egui visuals and widget colours.

use crate::layout::Theme;
use egui::Color32;

/// Colours used by the widget cards
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub card_fill: Color32,
    pub card_text: Color32,
    pub border: Color32,
    pub accent: Color32,
    pub positive: Color32,
    pub negative: Color32,
    pub muted: Color32,
}

impl Palette {
    pub fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                card_fill: Color32::WHITE,
                card_text: Color32::BLACK,
                border: Color32::from_gray(210),
                accent: Color32::from_rgb(0x88, 0x84, 0xd8),
                positive: Color32::from_rgb(40, 167, 69),
                negative: Color32::from_rgb(220, 53, 69),
                muted: Color32::GRAY,
            },
            Theme::Dark => Self {
                card_fill: Color32::from_rgb(0x33, 0x33, 0x33),
                card_text: Color32::WHITE,
                border: Color32::from_gray(70),
                accent: Color32::from_rgb(0x88, 0x84, 0xd8),
                positive: Color32::from_rgb(46, 204, 113),
                negative: Color32::from_rgb(231, 76, 60),
                muted: Color32::from_gray(160),
            },
        }
    }
}

pub fn visuals(theme: Theme) -> egui::Visuals {
    match theme {
        Theme::Light => egui::Visuals::light(),
        Theme::Dark => egui::Visuals::dark(),
    }
}

/// Applies the theme to the whole context when it changed since last frame.
#[derive(Default)]
pub struct ThemeApplier {
    applied: Option<Theme>,
}

impl ThemeApplier {
    pub fn apply(&mut self, ctx: &egui::Context, theme: Theme) {
        if self.applied == Some(theme) {
            return;
        }
        ctx.set_visuals(visuals(theme));
        self.applied = Some(theme);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visuals_follow_theme() {
        assert!(visuals(Theme::Dark).dark_mode);
        assert!(!visuals(Theme::Light).dark_mode);
    }

    #[test]
    fn test_applier_only_reapplies_on_change() {
        let ctx = egui::Context::default();
        let mut applier = ThemeApplier::default();
        applier.apply(&ctx, Theme::Dark);
        assert!(ctx.style().visuals.dark_mode);

        // Unchanged theme leaves the context alone
        ctx.set_visuals(egui::Visuals::light());
        applier.apply(&ctx, Theme::Dark);
        assert!(!ctx.style().visuals.dark_mode);

        applier.apply(&ctx, Theme::Light);
        assert_eq!(applier.applied, Some(Theme::Light));
        applier.apply(&ctx, Theme::Dark);
        assert!(ctx.style().visuals.dark_mode);
    }

    #[test]
    fn test_card_colours() {
        assert_eq!(Palette::for_theme(Theme::Dark).card_text, Color32::WHITE);
        assert_eq!(Palette::for_theme(Theme::Light).card_fill, Color32::WHITE);
    }
}
