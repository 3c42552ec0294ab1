//! Widgets module - table, chart and summary renderers

mod chart;
pub mod format;
mod summary;
mod table;

pub use chart::ChartWidget;
pub use summary::SummaryWidget;
pub use table::TableWidget;

use crate::data::MarketRecord;
use crate::gui::theme::Palette;
use crate::layout::{WidgetInstance, WidgetKind};
use crate::view::ViewState;

/// Render the body of one widget card.
pub fn show_widget(
    ui: &mut egui::Ui,
    widget: &WidgetInstance,
    records: &[MarketRecord],
    view_state: &mut ViewState,
    palette: &Palette,
) {
    match widget.kind {
        WidgetKind::Table => TableWidget::show(ui, &widget.id, records, view_state, palette),
        WidgetKind::Chart => ChartWidget::show(ui, &widget.id, records, palette),
        WidgetKind::Summary => SummaryWidget::show(ui, records, palette),
    }
}
