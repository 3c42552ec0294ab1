//! Data module - market snapshot fetching, polling and storage

mod poller;
pub(crate) mod record;
mod source;
mod store;

pub use poller::{Notify, Poller};
pub use record::MarketRecord;
pub use source::{FetchError, HttpMarketSource, MarketSource, DEFAULT_ENDPOINT};
pub use store::{DataStore, FetchEvent, FetchStatus};
