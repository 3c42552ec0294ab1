//! Data Store Module
//! Holds the latest market snapshot and the fetch status.

use super::{FetchError, MarketRecord};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::SystemTime;

/// Lifecycle of the most recent refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl FetchStatus {
    pub fn label(&self) -> &'static str {
        match self {
            FetchStatus::Idle => "Idle",
            FetchStatus::Loading => "Loading",
            FetchStatus::Succeeded => "Live",
            FetchStatus::Failed => "Fetch failed",
        }
    }
}

/// Event sent from the poller to the store
#[derive(Debug)]
pub enum FetchEvent {
    Started,
    Completed(Result<Vec<MarketRecord>, FetchError>),
}

/// Latest record list plus fetch bookkeeping.
///
/// Only the UI thread owns the store; background fetches reach it through
/// [`FetchEvent`]s drained by [`DataStore::pump`].
#[derive(Default)]
pub struct DataStore {
    records: Vec<MarketRecord>,
    status: FetchStatus,
    last_updated: Option<SystemTime>,
    last_error: Option<String>,
}

impl DataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[MarketRecord] {
        &self.records
    }

    pub fn status(&self) -> FetchStatus {
        self.status
    }

    pub fn last_updated(&self) -> Option<SystemTime> {
        self.last_updated
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Apply a single fetch event.
    pub fn apply(&mut self, event: FetchEvent) {
        match event {
            FetchEvent::Started => {
                self.status = FetchStatus::Loading;
            }
            FetchEvent::Completed(Ok(records)) => {
                tracing::debug!(count = records.len(), "market snapshot received");
                self.records = records;
                self.status = FetchStatus::Succeeded;
                self.last_updated = Some(SystemTime::now());
                self.last_error = None;
            }
            FetchEvent::Completed(Err(e)) => {
                // Stale data stays on screen
                tracing::warn!(error = %e, "market fetch failed");
                self.status = FetchStatus::Failed;
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Drain every pending event. Returns true when anything changed.
    pub fn pump(&mut self, rx: &Receiver<FetchEvent>) -> bool {
        let mut changed = false;
        loop {
            match rx.try_recv() {
                Ok(event) => {
                    self.apply(event);
                    changed = true;
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        changed
    }
}
