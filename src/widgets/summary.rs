//! Summary Card Widget

use crate::data::MarketRecord;
use crate::gui::theme::Palette;
use crate::stats::PriceSummary;
use egui::RichText;

pub struct SummaryWidget;

impl SummaryWidget {
    /// Card lines, or nothing at all for an empty list.
    pub fn lines(records: &[MarketRecord]) -> Option<[String; 3]> {
        let summary = PriceSummary::from_records(records)?;
        Some([
            format!("Highest Price: ${}", summary.highest),
            format!("Lowest Price: ${}", summary.lowest),
            format!("Average Price: ${}", summary.average_label()),
        ])
    }

    pub fn show(ui: &mut egui::Ui, records: &[MarketRecord], palette: &Palette) {
        let Some(lines) = Self::lines(records) else {
            return;
        };

        for line in lines {
            ui.label(RichText::new(line).size(15.0).color(palette.card_text));
            ui.add_space(4.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::record;

    #[test]
    fn test_summary_lines() {
        let records = vec![
            record("a", "Alpha", 10.0, 100.0, 1),
            record("b", "Beta", 5.0, 50.0, 2),
        ];
        let lines = SummaryWidget::lines(&records).unwrap();
        assert_eq!(lines[0], "Highest Price: $10");
        assert_eq!(lines[1], "Lowest Price: $5");
        assert_eq!(lines[2], "Average Price: $7.50");
    }

    #[test]
    fn test_empty_renders_nothing() {
        assert!(SummaryWidget::lines(&[]).is_none());
    }
}
