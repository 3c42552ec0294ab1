//! Layout Manager Module
//! Owns the dashboard config and persists every mutation immediately.

use super::storage::{LAYOUT_SLOT, THEME_SLOT, WIDGETS_SLOT};
use super::{
    Breakpoint, DashboardConfig, LayoutEntry, Layouts, SlotStore, StorageError, Theme,
    WidgetInstance, WidgetKind,
};
use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;

/// File name offered when exporting
pub const EXPORT_FILE_NAME: &str = "dashboard_config.json";

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Invalid configuration document: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Failed to read configuration file: {0}")]
    Io(#[from] io::Error),
    #[error("Configuration imported but not saved: {0}")]
    Storage(#[from] StorageError),
}

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to encode configuration: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("Failed to write configuration file: {0}")]
    Io(#[from] io::Error),
}

/// Dashboard configuration plus the slot store it is saved to.
///
/// Mutations apply in memory first; a `StorageError` means the change is
/// live but was not saved.
pub struct LayoutManager<S: SlotStore> {
    config: DashboardConfig,
    store: S,
    last_stamp: u128,
}

impl<S: SlotStore> LayoutManager<S> {
    /// Seed state from the store. Missing or unreadable slots fall back to
    /// defaults.
    pub fn load(store: S) -> Self {
        let layout: Layouts = read_json_slot(&store, LAYOUT_SLOT).unwrap_or_default();
        let widgets: Vec<WidgetInstance> = read_json_slot(&store, WIDGETS_SLOT).unwrap_or_default();
        let theme = match store.get(THEME_SLOT) {
            Ok(Some(text)) => text.parse().unwrap_or_else(|e| {
                tracing::warn!(error = %e, "ignoring stored theme");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring stored theme");
                Theme::default()
            }
        };

        tracing::info!(widgets = widgets.len(), theme = %theme, "dashboard config loaded");

        Self {
            config: DashboardConfig {
                layout,
                widgets,
                theme,
            },
            store,
            last_stamp: 0,
        }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    pub fn widgets(&self) -> &[WidgetInstance] {
        &self.config.widgets
    }

    #[cfg(test)]
    pub fn layouts(&self) -> &Layouts {
        &self.config.layout
    }

    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    #[cfg(test)]
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Time-derived id, unique among current widgets and never handed out twice.
    fn next_widget_id(&mut self, kind: WidgetKind) -> String {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();
        let mut stamp = now.max(self.last_stamp + 1);

        loop {
            let id = format!("{}-{}", kind.as_str(), stamp);
            if self.config.widget(&id).is_none() {
                self.last_stamp = stamp;
                return id;
            }
            stamp += 1;
        }
    }

    /// Add a widget with the default placement in every tier.
    pub fn add_widget(&mut self, kind: WidgetKind) -> Result<String, StorageError> {
        let id = self.next_widget_id(kind);

        self.config.widgets.push(WidgetInstance {
            id: id.clone(),
            kind,
        });
        for bp in Breakpoint::ALL {
            self.config
                .layout
                .tier_mut(bp)
                .push(LayoutEntry::default_for(&id));
        }

        tracing::info!(widget = %id, "widget added");
        self.persist_layout_and_widgets()?;
        Ok(id)
    }

    /// Remove a widget and its entry in every tier. Unknown ids are ignored.
    pub fn delete_widget(&mut self, id: &str) -> Result<(), StorageError> {
        if self.config.widget(id).is_none() {
            return Ok(());
        }

        self.config.widgets.retain(|w| w.id != id);
        for bp in Breakpoint::ALL {
            self.config.layout.tier_mut(bp).retain(|e| e.i != id);
        }

        tracing::info!(widget = %id, "widget deleted");
        self.persist_layout_and_widgets()
    }

    /// Replace every tier with the caller's placements.
    pub fn update_layout(&mut self, layouts: Layouts) -> Result<(), StorageError> {
        if self.config.layout == layouts {
            return Ok(());
        }
        self.config.layout = layouts;
        tracing::debug!("layout updated");
        self.persist_layout()
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), StorageError> {
        self.config.theme = theme;
        tracing::info!(theme = %theme, "theme changed");
        self.persist_theme()
    }

    pub fn toggle_theme(&mut self) -> Result<(), StorageError> {
        self.set_theme(self.config.theme.toggled())
    }

    /// Pretty-printed export document.
    pub fn export_config(&self) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(&self.config)?)
    }

    pub fn export_to_path(&self, path: &Path) -> Result<(), ExportError> {
        fs::write(path, self.export_config()?)?;
        tracing::info!(path = %path.display(), "configuration exported");
        Ok(())
    }

    /// Replace the whole config with a parsed document.
    ///
    /// Nothing changes unless the document parses completely.
    pub fn import_config(&mut self, document: &str) -> Result<(), ImportError> {
        let config: DashboardConfig = serde_json::from_str(document)?;

        self.config = config;
        tracing::info!(widgets = self.config.widgets.len(), "configuration imported");

        let widgets = self.persist_layout_and_widgets();
        let theme = self.persist_theme();
        Ok(widgets.and(theme)?)
    }

    pub fn import_from_path(&mut self, path: &Path) -> Result<(), ImportError> {
        let document = fs::read_to_string(path)?;
        self.import_config(&document)
    }

    /// Both slots are attempted; the first failure is reported.
    fn persist_layout_and_widgets(&mut self) -> Result<(), StorageError> {
        let layout = self.persist_layout();
        let widgets = self.persist_widgets();
        layout.and(widgets)
    }

    fn persist_layout(&mut self) -> Result<(), StorageError> {
        let text = encode_slot(LAYOUT_SLOT, &self.config.layout)?;
        self.store.set(LAYOUT_SLOT, &text)
    }

    fn persist_widgets(&mut self) -> Result<(), StorageError> {
        let text = encode_slot(WIDGETS_SLOT, &self.config.widgets)?;
        self.store.set(WIDGETS_SLOT, &text)
    }

    fn persist_theme(&mut self) -> Result<(), StorageError> {
        self.store.set(THEME_SLOT, self.config.theme.as_str())
    }
}

fn encode_slot<T: serde::Serialize>(slot: &str, value: &T) -> Result<String, StorageError> {
    serde_json::to_string(value).map_err(|source| StorageError::Encode {
        slot: slot.to_string(),
        source,
    })
}

fn read_json_slot<S: SlotStore, T: DeserializeOwned>(store: &S, slot: &str) -> Option<T> {
    let text = match store.get(slot) {
        Ok(text) => text?,
        Err(e) => {
            tracing::warn!(slot, error = %e, "slot unreadable, using default");
            return None;
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(slot, error = %e, "slot corrupt, using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{FileStore, MemoryStore};

    fn manager() -> LayoutManager<MemoryStore> {
        LayoutManager::load(MemoryStore::new())
    }

    /// Memory store whose writes to one slot always fail.
    struct BrokenSlot {
        inner: MemoryStore,
        broken: &'static str,
    }

    impl SlotStore for BrokenSlot {
        fn get(&self, slot: &str) -> Result<Option<String>, StorageError> {
            self.inner.get(slot)
        }

        fn set(&mut self, slot: &str, value: &str) -> Result<(), StorageError> {
            if slot == self.broken {
                return Err(StorageError::Write {
                    slot: slot.to_string(),
                    source: io::Error::other("disk full"),
                });
            }
            self.inner.set(slot, value)
        }
    }

    #[test]
    fn test_load_defaults_from_empty_store() {
        let m = manager();
        assert!(m.widgets().is_empty());
        assert_eq!(m.layouts(), &Layouts::default());
        assert_eq!(m.theme(), Theme::Light);
    }

    #[test]
    fn test_load_tolerates_corrupt_slots() {
        let mut store = MemoryStore::new();
        store.set(LAYOUT_SLOT, "{not json").unwrap();
        store.set(WIDGETS_SLOT, "null").unwrap();
        store.set(THEME_SLOT, "purple").unwrap();

        let m = LayoutManager::load(store);
        assert_eq!(m.config(), &DashboardConfig::default());
    }

    #[test]
    fn test_add_widget_places_in_every_tier() {
        let mut m = manager();
        let id = m.add_widget(WidgetKind::Table).unwrap();

        assert!(id.starts_with("table-"));
        assert_eq!(m.widgets().len(), 1);
        for bp in Breakpoint::ALL {
            assert_eq!(m.layouts().entry(bp, &id), Some(&LayoutEntry::default_for(&id)));
        }
        assert_eq!(m.store().writes(), 2);
    }

    #[test]
    fn test_ids_are_unique() {
        let mut m = manager();
        let a = m.add_widget(WidgetKind::Chart).unwrap();
        let b = m.add_widget(WidgetKind::Chart).unwrap();
        m.delete_widget(&b).unwrap();
        let c = m.add_widget(WidgetKind::Chart).unwrap();
        assert_ne!(a, b);
        assert_ne!(b, c);
        assert_ne!(a, c);
    }

    #[test]
    fn test_add_then_delete_restores_state() {
        let mut m = manager();
        m.add_widget(WidgetKind::Summary).unwrap();
        m.add_widget(WidgetKind::Chart).unwrap();
        let before = m.config().clone();

        let id = m.add_widget(WidgetKind::Table).unwrap();
        m.delete_widget(&id).unwrap();

        assert_eq!(m.config(), &before);
    }

    #[test]
    fn test_delete_leaves_other_widgets() {
        let mut m = manager();
        let keep = m.add_widget(WidgetKind::Chart).unwrap();
        let gone = m.add_widget(WidgetKind::Table).unwrap();

        m.delete_widget(&gone).unwrap();
        assert_eq!(m.widgets().len(), 1);
        for bp in Breakpoint::ALL {
            assert_eq!(m.layouts().tier(bp).len(), 1);
            assert_eq!(m.layouts().tier(bp)[0].i, keep);
        }
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let mut m = manager();
        m.add_widget(WidgetKind::Chart).unwrap();
        let writes = m.store().writes();
        m.delete_widget("chart-0").unwrap();
        assert_eq!(m.store().writes(), writes);
    }

    #[test]
    fn test_update_layout_keeps_stale_entries() {
        let mut m = manager();
        let id = m.add_widget(WidgetKind::Chart).unwrap();

        let mut layouts = m.layouts().clone();
        layouts.lg[0].x = 3;
        layouts.lg.push(LayoutEntry::default_for("table-deleted"));
        m.update_layout(layouts.clone()).unwrap();

        assert_eq!(m.layouts(), &layouts);
        assert_eq!(m.layouts().entry(Breakpoint::Lg, &id).map(|e| e.x), Some(3));
        assert_eq!(m.widgets().len(), 1);
    }

    #[test]
    fn test_failed_layout_write_still_saves_widgets() {
        let mut m = LayoutManager::load(BrokenSlot {
            inner: MemoryStore::new(),
            broken: LAYOUT_SLOT,
        });

        let err = m.add_widget(WidgetKind::Table).unwrap_err();
        assert!(matches!(err, StorageError::Write { ref slot, .. } if slot == LAYOUT_SLOT));
        assert_eq!(m.widgets().len(), 1);

        let saved = m.store().inner.get(WIDGETS_SLOT).unwrap().unwrap();
        let widgets: Vec<WidgetInstance> = serde_json::from_str(&saved).unwrap();
        assert_eq!(widgets, m.widgets());
    }

    #[test]
    fn test_failed_widget_write_reported_on_delete() {
        let mut m = LayoutManager::load(BrokenSlot {
            inner: MemoryStore::new(),
            broken: WIDGETS_SLOT,
        });
        let err = m.add_widget(WidgetKind::Chart).unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));

        let id = m.widgets()[0].id.clone();
        assert!(m.delete_widget(&id).is_err());
        assert!(m.widgets().is_empty());
        assert_eq!(
            m.store().inner.get(LAYOUT_SLOT).unwrap().as_deref(),
            Some(r#"{"lg":[],"md":[],"sm":[],"xs":[],"xxs":[]}"#)
        );
    }

    #[test]
    fn test_theme_persisted_as_plain_string() {
        let mut m = manager();
        m.toggle_theme().unwrap();
        assert_eq!(m.theme(), Theme::Dark);
        assert_eq!(m.store().get(THEME_SLOT).unwrap().as_deref(), Some("dark"));
        assert!(m.widgets().is_empty());
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut m = manager();
        m.add_widget(WidgetKind::Table).unwrap();
        m.add_widget(WidgetKind::Summary).unwrap();
        m.set_theme(Theme::Dark).unwrap();
        let document = m.export_config().unwrap();
        let exported = m.config().clone();

        let mut other = manager();
        other.import_config(&document).unwrap();
        assert_eq!(other.config(), &exported);
        assert!(document.contains("\n  \"components\""));
    }

    #[test]
    fn test_import_missing_components_fails() {
        let mut m = manager();
        let id = m.add_widget(WidgetKind::Table).unwrap();
        let before = m.config().clone();
        let writes = m.store().writes();

        let err = m
            .import_config(r#"{"layout": {}, "theme": "dark"}"#)
            .unwrap_err();
        assert!(matches!(err, ImportError::Parse(_)));
        assert_eq!(m.config(), &before);
        assert_eq!(m.store().writes(), writes);
        assert!(m.config().widget(&id).is_some());
    }

    #[test]
    fn test_import_rejects_garbage() {
        let mut m = manager();
        assert!(m.import_config("not json").is_err());
        assert!(m
            .import_config(r#"{"layout": {}, "components": [], "theme": "blue"}"#)
            .is_err());
        assert!(m
            .import_config(r#"{"layout": "none", "components": [], "theme": "dark"}"#)
            .is_err());
        assert_eq!(m.config(), &DashboardConfig::default());
    }

    #[test]
    fn test_state_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let (id, config) = {
            let mut m = LayoutManager::load(FileStore::open(dir.path()).unwrap());
            let id = m.add_widget(WidgetKind::Chart).unwrap();
            m.set_theme(Theme::Dark).unwrap();
            (id, m.config().clone())
        };

        let reloaded = LayoutManager::load(FileStore::open(dir.path()).unwrap());
        assert_eq!(reloaded.config(), &config);
        assert!(reloaded.config().widget(&id).is_some());
    }

    #[test]
    fn test_export_import_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);

        let mut m = manager();
        m.add_widget(WidgetKind::Summary).unwrap();
        m.export_to_path(&path).unwrap();

        let mut other = manager();
        other.import_from_path(&path).unwrap();
        assert_eq!(other.config(), m.config());

        let missing = dir.path().join("nope.json");
        assert!(matches!(other.import_from_path(&missing), Err(ImportError::Io(_))));
    }
}
