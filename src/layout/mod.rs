//! Layout module - widgets, grid placement, theme and their persistence

mod grid;
mod manager;
mod model;
mod storage;

pub use grid::{compact_vertical, move_entry, Breakpoint, GridGeometry};
pub use manager::{LayoutManager, EXPORT_FILE_NAME};
pub use model::{DashboardConfig, LayoutEntry, Layouts, Theme, WidgetInstance, WidgetKind};
pub use storage::{FileStore, MemoryStore, SlotStore, StorageError};
