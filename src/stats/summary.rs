//! Price Summary Module
//! Highest, lowest and average current price over the full market list.

use crate::data::MarketRecord;
use statrs::statistics::Statistics;

/// Summary card figures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceSummary {
    pub highest: f64,
    pub lowest: f64,
    pub average: f64,
}

impl PriceSummary {
    /// Compute over every record. `None` for an empty list.
    pub fn from_records(records: &[MarketRecord]) -> Option<Self> {
        if records.is_empty() {
            return None;
        }

        let prices: Vec<f64> = records.iter().map(|r| r.current_price).collect();

        Some(Self {
            highest: Statistics::max(&prices),
            lowest: Statistics::min(&prices),
            average: Statistics::mean(&prices),
        })
    }

    /// Average with two decimals
    pub fn average_label(&self) -> String {
        format!("{:.2}", self.average)
    }
}
