//! View module - table sort/filter/paginate pipeline

mod pipeline;
mod state;

pub use pipeline::apply;
pub use state::{FilterTier, SortDirection, SortKey, ViewState};
