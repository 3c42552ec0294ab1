//! Dashboard Config Model
//! Widgets, per-tier placements and theme: the unit of persistence and export.

use super::Breakpoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Placement of one widget on the grid, in grid units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutEntry {
    /// Widget id
    pub i: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl LayoutEntry {
    /// Placement given to every newly added widget.
    pub fn default_for(widget_id: &str) -> Self {
        Self {
            i: widget_id.to_string(),
            x: 0,
            y: 0,
            w: 6,
            h: 4,
        }
    }
}

/// Entries for each breakpoint tier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layouts {
    #[serde(default)]
    pub lg: Vec<LayoutEntry>,
    #[serde(default)]
    pub md: Vec<LayoutEntry>,
    #[serde(default)]
    pub sm: Vec<LayoutEntry>,
    #[serde(default)]
    pub xs: Vec<LayoutEntry>,
    #[serde(default)]
    pub xxs: Vec<LayoutEntry>,
}

impl Layouts {
    pub fn tier(&self, bp: Breakpoint) -> &[LayoutEntry] {
        match bp {
            Breakpoint::Lg => &self.lg,
            Breakpoint::Md => &self.md,
            Breakpoint::Sm => &self.sm,
            Breakpoint::Xs => &self.xs,
            Breakpoint::Xxs => &self.xxs,
        }
    }

    pub fn tier_mut(&mut self, bp: Breakpoint) -> &mut Vec<LayoutEntry> {
        match bp {
            Breakpoint::Lg => &mut self.lg,
            Breakpoint::Md => &mut self.md,
            Breakpoint::Sm => &mut self.sm,
            Breakpoint::Xs => &mut self.xs,
            Breakpoint::Xxs => &mut self.xxs,
        }
    }

    /// Entry for a widget in one tier
    pub fn entry(&self, bp: Breakpoint, widget_id: &str) -> Option<&LayoutEntry> {
        self.tier(bp).iter().find(|e| e.i == widget_id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WidgetKind {
    Table,
    Chart,
    Summary,
}

impl WidgetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            WidgetKind::Table => "table",
            WidgetKind::Chart => "chart",
            WidgetKind::Summary => "summary",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            WidgetKind::Table => "Cryptocurrency Table",
            WidgetKind::Chart => "Price Trends",
            WidgetKind::Summary => "Summary",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetInstance {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: WidgetKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(format!("unknown theme '{}'", other)),
        }
    }
}

/// Whole dashboard configuration.
///
/// Serializes as the export document: `layout`, `components`, `theme`.
/// All three keys are required when parsing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub layout: Layouts,
    #[serde(rename = "components")]
    pub widgets: Vec<WidgetInstance>,
    pub theme: Theme,
}

impl DashboardConfig {
    pub fn widget(&self, id: &str) -> Option<&WidgetInstance> {
        self.widgets.iter().find(|w| w.id == id)
    }
}
