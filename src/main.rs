//! Coin Dashboard - Live Crypto Market Dashboard
//!
//! Polls a public market API and shows the results through configurable
//! table, chart and summary widgets on a responsive grid.

mod config;
mod data;
mod gui;
mod layout;
mod stats;
mod view;
mod widgets;

use anyhow::Context;
use config::DashboardSettings;
use eframe::egui;
use gui::DashboardApp;
use layout::{FileStore, MemoryStore, SlotStore};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("coin_dashboard=info")),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = DashboardSettings::from_env().context("invalid dashboard settings")?;
    let slots = open_slots(&settings);

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 800.0])
            .with_min_inner_size([400.0, 400.0])
            .with_title("Coin Dashboard"),
        ..Default::default()
    };

    // Run the application
    eframe::run_native(
        "Coin Dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, settings, slots)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard window failed: {}", e))
}

/// Durable slot storage, or memory only when the data directory is unusable.
fn open_slots(settings: &DashboardSettings) -> Box<dyn SlotStore> {
    let Some(dir) = &settings.data_dir else {
        tracing::warn!("no data directory, dashboard config will not be saved");
        return Box::new(MemoryStore::new());
    };

    match FileStore::open(dir) {
        Ok(store) => {
            tracing::info!(dir = %dir.display(), "dashboard config storage");
            Box::new(store)
        }
        Err(e) => {
            tracing::warn!(error = %e, "config storage unavailable, using memory");
            Box::new(MemoryStore::new())
        }
    }
}
