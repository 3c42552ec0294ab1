//! Poller Module
//! Cancellable periodic refresh driving the data store.

use super::{FetchEvent, MarketSource};
use std::sync::mpsc::{channel, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Called after every event so the UI can schedule a repaint.
pub type Notify = Arc<dyn Fn() + Send + Sync>;

/// Scheduled refresh task.
///
/// Fires one refresh immediately, then one per `interval` until stopped.
/// Each refresh runs on its own worker thread, so a slow request never delays
/// the next tick and overlapping requests are possible.
pub struct Poller {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Poller {
    pub fn start(
        source: Arc<dyn MarketSource>,
        interval: Duration,
        events: Sender<FetchEvent>,
        notify: Notify,
    ) -> Self {
        let (stop_tx, stop_rx) = channel::<()>();

        let handle = thread::spawn(move || {
            let mut tick: u64 = 0;
            loop {
                tick += 1;
                tracing::debug!(tick, "refresh tick");

                if events.send(FetchEvent::Started).is_err() {
                    break; // Store is gone
                }
                notify();

                let source = Arc::clone(&source);
                let events = events.clone();
                let notify = Arc::clone(&notify);
                thread::spawn(move || {
                    let result = source.fetch();
                    if events.send(FetchEvent::Completed(result)).is_ok() {
                        notify();
                    }
                });

                match stop_rx.recv_timeout(interval) {
                    Err(RecvTimeoutError::Timeout) => continue,
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                }
            }
            tracing::debug!(ticks = tick, "poller stopped");
        });

        Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle.is_some()
    }

    /// Revoke the schedule and wait for the ticker to exit.
    pub fn stop(&mut self) {
        // Dropping the sender wakes the ticker immediately
        self.stop_tx.take();
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                tracing::error!("poller thread panicked");
            }
        }
    }
}

impl Drop for Poller {
    fn drop(&mut self) {
        self.stop();
    }
}
