//! Chart Widget
//! Price line across the fetched coins using egui_plot.

use crate::data::MarketRecord;
use crate::gui::theme::Palette;
use egui_plot::{Line, Plot, PlotPoints};

/// One chart point: coin name and its current price.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub name: String,
    pub price: f64,
}

/// Map every record to a (name, price) point, keeping list order.
pub fn price_series(records: &[MarketRecord]) -> Vec<PricePoint> {
    records
        .iter()
        .map(|r| PricePoint {
            name: r.name.clone(),
            price: r.current_price,
        })
        .collect()
}

pub struct ChartWidget;

impl ChartWidget {
    pub fn show(
        ui: &mut egui::Ui,
        widget_id: &str,
        records: &[MarketRecord],
        palette: &Palette,
    ) {
        let series = price_series(records);
        let points: Vec<[f64; 2]> = series
            .iter()
            .enumerate()
            .map(|(i, p)| [i as f64, p.price])
            .collect();
        let names: Vec<String> = series.into_iter().map(|p| p.name).collect();

        Plot::new(format!("chart_{}", widget_id))
            .height(ui.available_height().max(120.0))
            .allow_scroll(false)
            .y_axis_label("Price (USD)")
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (idx - mark.value).abs() < 1e-9 {
                    names.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(points))
                        .color(palette.accent)
                        .name("price"),
                );
            });
    }
}
