//! Grid View
//! Places widget cards on the responsive grid; handles drag, resize and delete.

use crate::gui::theme::Palette;
use crate::layout::{
    compact_vertical, move_entry, Breakpoint, DashboardConfig, GridGeometry, LayoutEntry,
    Layouts, WidgetInstance,
};
use egui::{vec2, Color32, CursorIcon, Id, Rect, RichText, Sense, Stroke, UiBuilder, Vec2};

const HANDLE_SIZE: f32 = 14.0;
const CARD_PADDING: f32 = 8.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DragMode {
    Move,
    Resize,
}

/// Card being dragged and how far the pointer has travelled.
#[derive(Debug, Clone)]
struct DragState {
    widget_id: String,
    mode: DragMode,
    offset: Vec2,
}

/// Actions triggered from the grid
#[derive(Debug, Clone, PartialEq)]
pub enum GridAction {
    None,
    Delete(String),
    Layout(Layouts),
}

/// Entries to draw for one tier: one per widget, fitted and compacted.
/// Widgets without an entry in this tier get the default placement; entries
/// whose widget no longer exists are skipped.
pub fn placements(
    config: &DashboardConfig,
    bp: Breakpoint,
    grid: &GridGeometry,
) -> Vec<LayoutEntry> {
    let entries: Vec<LayoutEntry> = config
        .widgets
        .iter()
        .map(|w| {
            let entry = config
                .layout
                .entry(bp, &w.id)
                .cloned()
                .unwrap_or_else(|| LayoutEntry::default_for(&w.id));
            grid.fit(&entry)
        })
        .collect();
    compact_vertical(&entries)
}

/// Layouts after one card in the active tier was moved or resized.
/// Cards under the updated one make way for it.
pub fn with_updated_entry(
    layouts: &Layouts,
    bp: Breakpoint,
    current: &[LayoutEntry],
    updated: LayoutEntry,
) -> Layouts {
    let mut next = layouts.clone();
    *next.tier_mut(bp) = move_entry(current, updated);
    next
}

#[derive(Default)]
pub struct GridView {
    drag: Option<DragState>,
}

impl GridView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw every widget card. `body` renders the inside of a card.
    pub fn show(
        &mut self,
        ui: &mut egui::Ui,
        config: &DashboardConfig,
        palette: &Palette,
        mut body: impl FnMut(&mut egui::Ui, &WidgetInstance),
    ) -> GridAction {
        let mut action = GridAction::None;

        let width = ui.available_width();
        let bp = Breakpoint::for_width(width);
        let origin = ui.cursor().min;
        let grid = GridGeometry::new(origin, width, bp.cols());
        let entries = placements(config, bp, &grid);

        let _ = ui.allocate_exact_size(vec2(width, grid.content_height(&entries)), Sense::hover());

        for (widget, entry) in config.widgets.iter().zip(entries.iter()) {
            let base = grid.cell_rect(entry);
            let rect = match &self.drag {
                Some(drag) if drag.widget_id == widget.id => match drag.mode {
                    DragMode::Move => base.translate(drag.offset),
                    DragMode::Resize => Rect::from_min_size(
                        base.min,
                        (base.size() + drag.offset).max(vec2(grid.col_width, 2.0 * HANDLE_SIZE)),
                    ),
                },
                _ => base,
            };

            let mut card = ui.new_child(UiBuilder::new().max_rect(rect));
            card.set_clip_rect(rect.intersect(ui.clip_rect()));

            let mut move_response = None;
            egui::Frame::none()
                .rounding(8.0)
                .stroke(Stroke::new(1.0, palette.border))
                .fill(palette.card_fill)
                .inner_margin(CARD_PADDING)
                .show(&mut card, |ui| {
                    ui.set_min_size(rect.size() - vec2(2.0 * CARD_PADDING, 2.0 * CARD_PADDING));

                    ui.horizontal(|ui| {
                        let handle = ui
                            .add(
                                egui::Label::new(RichText::new("☰").size(16.0))
                                    .sense(Sense::drag()),
                            )
                            .on_hover_cursor(CursorIcon::Grab);
                        move_response = Some(handle);

                        ui.label(
                            RichText::new(widget.kind.title())
                                .size(16.0)
                                .strong()
                                .color(palette.card_text),
                        );

                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            let delete = egui::Button::new(
                                RichText::new("×").size(16.0).color(Color32::WHITE),
                            )
                            .fill(Color32::from_rgb(220, 53, 69))
                            .rounding(12.0);
                            if ui.add(delete).on_hover_text("Remove widget").clicked() {
                                action = GridAction::Delete(widget.id.clone());
                            }
                        });
                    });
                    ui.separator();

                    egui::ScrollArea::both()
                        .id_salt(&widget.id)
                        .auto_shrink([false, false])
                        .show(ui, |ui| body(ui, widget));
                });

            let handle = vec2(HANDLE_SIZE, HANDLE_SIZE);
            let corner = Rect::from_min_size(rect.max - handle, handle);
            let resize_response = ui
                .interact(corner, Id::new(("resize", &widget.id)), Sense::drag())
                .on_hover_cursor(CursorIcon::ResizeNwSe);
            ui.painter().line_segment(
                [corner.left_bottom(), corner.right_top()],
                Stroke::new(1.5, palette.muted),
            );

            let responses = [
                (DragMode::Move, move_response),
                (DragMode::Resize, Some(resize_response)),
            ];
            for (mode, response) in responses {
                let Some(response) = response else { continue };

                if response.drag_started() {
                    self.drag = Some(DragState {
                        widget_id: widget.id.clone(),
                        mode,
                        offset: Vec2::ZERO,
                    });
                }
                if response.dragged() {
                    let active = self
                        .drag
                        .as_mut()
                        .filter(|d| d.widget_id == widget.id && d.mode == mode);
                    if let Some(drag) = active {
                        drag.offset += response.drag_delta();
                    }
                }
                if response.drag_stopped() {
                    if let Some(drag) = self.drag.take() {
                        let updated = Self::drop_entry(&grid, entry, &drag);
                        if &updated != entry {
                            action = GridAction::Layout(with_updated_entry(
                                &config.layout,
                                bp,
                                &entries,
                                updated,
                            ));
                        }
                    }
                }
            }
        }

        if self.drag.is_some() {
            ui.ctx().request_repaint();
        }

        action
    }

    /// Snap a dragged card back onto the grid.
    fn drop_entry(grid: &GridGeometry, entry: &LayoutEntry, drag: &DragState) -> LayoutEntry {
        let base = grid.cell_rect(entry);
        match drag.mode {
            DragMode::Move => {
                let (x, y) = grid.position_to_cell(base.min + drag.offset, entry.w);
                LayoutEntry {
                    x,
                    y,
                    ..entry.clone()
                }
            }
            DragMode::Resize => {
                let (w, h) = grid.size_to_span(base.size() + drag.offset, entry.x);
                LayoutEntry {
                    w,
                    h,
                    ..entry.clone()
                }
            }
        }
    }
}
