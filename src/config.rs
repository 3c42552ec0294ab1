//! Runtime settings from environment variables
//!
//! Every value falls back to a default when its variable is not set.

use crate::data::DEFAULT_ENDPOINT;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const ENDPOINT_VAR: &str = "COIN_DASHBOARD_ENDPOINT";
pub const POLL_SECS_VAR: &str = "COIN_DASHBOARD_POLL_SECS";
pub const DATA_DIR_VAR: &str = "COIN_DASHBOARD_DATA_DIR";

/// Refresh period when nothing is configured
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Error, Debug, PartialEq)]
pub enum SettingsError {
    #[error("COIN_DASHBOARD_POLL_SECS must be a whole number of seconds >= 1, got '{0}'")]
    InvalidPollInterval(String),
    #[error("COIN_DASHBOARD_ENDPOINT must be an http(s) URL, got '{0}'")]
    InvalidEndpoint(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSettings {
    /// Markets endpoint polled for snapshots
    pub endpoint: String,
    pub poll_interval: Duration,
    /// Where the layout, widget list and theme are stored. `None` keeps them
    /// in memory only.
    pub data_dir: Option<PathBuf>,
}

impl DashboardSettings {
    pub fn from_env() -> Result<Self, SettingsError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, SettingsError> {
        let endpoint = lookup(ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        if !(endpoint.starts_with("http://") || endpoint.starts_with("https://")) {
            return Err(SettingsError::InvalidEndpoint(endpoint));
        }

        let poll_interval = match lookup(POLL_SECS_VAR) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs >= 1 => Duration::from_secs(secs),
                _ => return Err(SettingsError::InvalidPollInterval(raw)),
            },
            None => DEFAULT_POLL_INTERVAL,
        };

        let data_dir = lookup(DATA_DIR_VAR)
            .map(PathBuf::from)
            .or_else(|| dirs::data_dir().map(|dir| dir.join("coin_dashboard")));

        Ok(Self {
            endpoint,
            poll_interval,
            data_dir,
        })
    }
}
