//! Table Widget
//! Sortable, filterable, paginated market table.

use super::format;
use crate::data::MarketRecord;
use crate::gui::theme::Palette;
use crate::view::{self, FilterTier, SortKey, ViewState};
use egui::{ComboBox, RichText, TextEdit};

/// Columns shown, in order, with their header text
const COLUMNS: [(SortKey, &str); 4] = [
    (SortKey::Name, "Name"),
    (SortKey::CurrentPrice, "Price"),
    (SortKey::MarketCap, "Market Cap"),
    (SortKey::PriceChange24h, "24h Change (%)"),
];

pub struct TableWidget;

impl TableWidget {
    /// Draw the table for one widget instance.
    pub fn show(
        ui: &mut egui::Ui,
        widget_id: &str,
        records: &[MarketRecord],
        state: &mut ViewState,
        palette: &Palette,
    ) {
        // Filters
        ui.horizontal(|ui| {
            ComboBox::from_id_salt(format!("tier_{}", widget_id))
                .width(170.0)
                .selected_text(state.filter_tier.label())
                .show_ui(ui, |ui| {
                    for tier in FilterTier::ALL {
                        ui.selectable_value(&mut state.filter_tier, tier, tier.label());
                    }
                });

            ui.add(
                TextEdit::singleline(&mut state.filter_query)
                    .hint_text("Search by name")
                    .desired_width(160.0),
            );
        });

        ui.add_space(6.0);

        let page = view::apply(records, state);

        egui::Grid::new(format!("table_{}", widget_id))
            .striped(true)
            .num_columns(COLUMNS.len())
            .spacing([18.0, 4.0])
            .show(ui, |ui| {
                for (key, title) in COLUMNS {
                    let text = format!("{} {}", title, state.indicator(key));
                    let header = egui::Button::new(
                        RichText::new(text.trim_end()).strong().color(palette.card_text),
                    )
                    .frame(false);
                    if ui.add(header).clicked() {
                        state.toggle_sort(key);
                    }
                }
                ui.end_row();

                for record in &page.rows {
                    ui.label(RichText::new(&record.name).color(palette.card_text));
                    for amount in [record.current_price, record.market_cap] {
                        ui.label(RichText::new(format::usd(amount)).color(palette.card_text));
                    }

                    let change_color = match record.price_change_percentage_24h {
                        Some(pct) if pct >= 0.0 => palette.positive,
                        Some(_) => palette.negative,
                        None => palette.muted,
                    };
                    ui.label(
                        RichText::new(format::percent_change(record.price_change_percentage_24h))
                            .color(change_color),
                    );
                    ui.end_row();
                }
            });

        let summary = if page.rows.is_empty() {
            "No matching coins".to_string()
        } else {
            format!("{} matching coins", page.total_matches)
        };
        ui.label(RichText::new(summary).size(11.0).color(palette.muted));

        ui.add_space(6.0);

        // Pagination
        ui.horizontal_wrapped(|ui| {
            if ui
                .add_enabled(state.page > 1, egui::Button::new("Previous"))
                .clicked()
            {
                state.previous_page();
            }
            for n in 1..=page.page_count {
                if ui.selectable_label(state.page == n, n.to_string()).clicked() {
                    state.go_to_page(n);
                }
            }
            if ui
                .add_enabled(state.page < page.page_count, egui::Button::new("Next"))
                .clicked()
            {
                state.next_page(page.page_count);
            }
        });
    }
}
