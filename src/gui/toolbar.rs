//! Toolbar Widget
//! Top button row and bottom status line.

use crate::data::{DataStore, FetchStatus};
use crate::layout::{Theme, WidgetKind};
use egui::{Color32, RichText};
use std::time::SystemTime;

/// Short user-facing message shown in the status line.
#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub text: String,
    pub is_error: bool,
}

/// Top toolbar plus the status line below the grid.
#[derive(Default)]
pub struct Toolbar {
    pub notice: Option<Notice>,
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error: false,
        });
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.notice = Some(Notice {
            text: text.into(),
            is_error: true,
        });
    }

    /// Label of the theme button for the current theme
    pub fn theme_button_label(theme: Theme) -> &'static str {
        match theme {
            Theme::Light => "Switch to Dark Mode",
            Theme::Dark => "Switch to Light Mode",
        }
    }

    /// Draw the button row
    pub fn show(&mut self, ui: &mut egui::Ui, theme: Theme) -> ToolbarAction {
        let mut action = ToolbarAction::None;

        ui.horizontal_wrapped(|ui| {
            ui.label(
                RichText::new("📈 Coin Dashboard")
                    .size(18.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.add_space(12.0);

            for (kind, label) in [
                (WidgetKind::Table, "➕ Add Table"),
                (WidgetKind::Chart, "➕ Add Chart"),
                (WidgetKind::Summary, "➕ Add Summary"),
            ] {
                if ui.button(label).clicked() {
                    action = ToolbarAction::AddWidget(kind);
                }
            }

            ui.separator();

            if ui.button(Self::theme_button_label(theme)).clicked() {
                action = ToolbarAction::ToggleTheme;
            }
            if ui.button("💾 Export Configuration").clicked() {
                action = ToolbarAction::Export;
            }
            if ui.button("📂 Import Configuration").clicked() {
                action = ToolbarAction::Import;
            }
        });

        action
    }

    /// Draw fetch status and the latest notice
    pub fn show_status(&self, ui: &mut egui::Ui, store: &DataStore) {
        ui.horizontal(|ui| {
            let status = store.status();
            let color = match status {
                FetchStatus::Failed => Color32::from_rgb(220, 53, 69),
                FetchStatus::Succeeded => Color32::from_rgb(40, 167, 69),
                _ => Color32::GRAY,
            };
            ui.label(RichText::new(format!("● {}", status.label())).color(color));
            ui.label(RichText::new(format!("{} coins", store.records().len())).size(11.0));

            if let Some(updated) = store.last_updated() {
                ui.label(RichText::new(updated_label(updated)).size(11.0).color(Color32::GRAY));
            }
            if let (FetchStatus::Failed, Some(error)) = (status, store.last_error()) {
                ui.label(RichText::new(error).size(11.0).color(Color32::GRAY));
            }

            if let Some(notice) = &self.notice {
                ui.separator();
                let color = if notice.is_error {
                    Color32::from_rgb(220, 53, 69)
                } else {
                    Color32::GRAY
                };
                ui.label(RichText::new(&notice.text).size(11.0).color(color));
            }
        });
    }
}

fn updated_label(updated: SystemTime) -> String {
    let secs = updated.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    format!("updated {}s ago", secs)
}

/// Actions triggered by the toolbar
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    None,
    AddWidget(WidgetKind),
    ToggleTheme,
    Export,
    Import,
}
