//! Stats module - summary statistics

mod summary;

pub use summary::PriceSummary;
