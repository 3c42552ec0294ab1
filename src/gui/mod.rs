//! GUI module - User interface components

mod app;
mod grid_view;
pub mod theme;
mod toolbar;

pub use app::DashboardApp;
pub use grid_view::{GridAction, GridView};
pub use toolbar::{Toolbar, ToolbarAction};
