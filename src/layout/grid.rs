//! Responsive Grid Module
//! Breakpoint tiers and grid-unit ↔ pixel geometry.
//!
//! The tier widths, column counts, row height and margins match the browser
//! grid the layout documents were first written for, so saved layouts place
//! widgets identically here.

use super::LayoutEntry;
use egui::{Pos2, Rect, Vec2};

/// Height of one grid row in points
pub const ROW_HEIGHT: f32 = 30.0;
/// Gap between cells and around the container edge
pub const MARGIN: f32 = 10.0;

/// Responsive breakpoint tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Breakpoint {
    Lg,
    Md,
    Sm,
    Xs,
    Xxs,
}

impl Breakpoint {
    pub const ALL: [Breakpoint; 5] = [
        Breakpoint::Lg,
        Breakpoint::Md,
        Breakpoint::Sm,
        Breakpoint::Xs,
        Breakpoint::Xxs,
    ];

    /// Smallest container width that selects this tier
    pub fn min_width(&self) -> f32 {
        match self {
            Breakpoint::Lg => 1200.0,
            Breakpoint::Md => 996.0,
            Breakpoint::Sm => 768.0,
            Breakpoint::Xs => 480.0,
            Breakpoint::Xxs => 0.0,
        }
    }

    pub fn cols(&self) -> u32 {
        match self {
            Breakpoint::Lg => 12,
            Breakpoint::Md => 10,
            Breakpoint::Sm => 8,
            Breakpoint::Xs => 6,
            Breakpoint::Xxs => 4,
        }
    }

    /// Widest tier whose minimum the width reaches.
    pub fn for_width(width: f32) -> Self {
        Self::ALL
            .into_iter()
            .find(|bp| width >= bp.min_width())
            .unwrap_or(Breakpoint::Xxs)
    }
}

/// Pixel geometry of the grid for one container width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub origin: Pos2,
    pub cols: u32,
    pub col_width: f32,
}

impl GridGeometry {
    pub fn new(origin: Pos2, width: f32, cols: u32) -> Self {
        let cols = cols.max(1);
        let col_width = ((width - MARGIN * (cols as f32 + 1.0)) / cols as f32).max(1.0);
        Self {
            origin,
            cols,
            col_width,
        }
    }

    /// Clamp an entry so it fits inside the column count.
    pub fn fit(&self, entry: &LayoutEntry) -> LayoutEntry {
        let w = entry.w.clamp(1, self.cols);
        let x = entry.x.min(self.cols - w);
        LayoutEntry {
            x,
            w,
            h: entry.h.max(1),
            ..entry.clone()
        }
    }

    /// Screen rect of a grid cell span.
    pub fn cell_rect(&self, entry: &LayoutEntry) -> Rect {
        let entry = self.fit(entry);
        let left = MARGIN + entry.x as f32 * (self.col_width + MARGIN);
        let top = MARGIN + entry.y as f32 * (ROW_HEIGHT + MARGIN);
        let size = self.span_size(entry.w, entry.h);
        Rect::from_min_size(self.origin + Vec2::new(left, top), size)
    }

    pub fn span_size(&self, w: u32, h: u32) -> Vec2 {
        Vec2::new(
            w as f32 * self.col_width + w.saturating_sub(1) as f32 * MARGIN,
            h as f32 * ROW_HEIGHT + h.saturating_sub(1) as f32 * MARGIN,
        )
    }

    /// Nearest grid cell for a card whose top-left corner sits at `pos`.
    pub fn position_to_cell(&self, pos: Pos2, w: u32) -> (u32, u32) {
        let local = pos - self.origin;
        let x = ((local.x - MARGIN) / (self.col_width + MARGIN)).round();
        let y = ((local.y - MARGIN) / (ROW_HEIGHT + MARGIN)).round();
        let max_x = self.cols.saturating_sub(w.clamp(1, self.cols));
        ((x.max(0.0) as u32).min(max_x), y.max(0.0) as u32)
    }

    /// Nearest span for a card of pixel `size` starting at column `x`.
    pub fn size_to_span(&self, size: Vec2, x: u32) -> (u32, u32) {
        let w = ((size.x + MARGIN) / (self.col_width + MARGIN)).round();
        let h = ((size.y + MARGIN) / (ROW_HEIGHT + MARGIN)).round();
        let max_w = self.cols.saturating_sub(x).max(1);
        ((w.max(1.0) as u32).min(max_w), h.max(1.0) as u32)
    }

    /// Total pixel height needed to show every entry.
    pub fn content_height(&self, entries: &[LayoutEntry]) -> f32 {
        let rows = entries.iter().map(bottom).max().unwrap_or(0);
        MARGIN + rows as f32 * (ROW_HEIGHT + MARGIN)
    }
}

/// First row below the entry
fn bottom(entry: &LayoutEntry) -> u32 {
    entry.y.saturating_add(entry.h.max(1))
}

fn collides(a: &LayoutEntry, b: &LayoutEntry) -> bool {
    a.i != b.i
        && a.x < b.x.saturating_add(b.w)
        && b.x < a.x.saturating_add(a.w)
        && a.y < bottom(b)
        && b.y < bottom(a)
}

/// Vertical compaction: every item rises as far as it can without
/// overlapping an earlier one, then drops below anything it still hits.
/// Output keeps the input order.
pub fn compact_vertical(entries: &[LayoutEntry]) -> Vec<LayoutEntry> {
    let mut order: Vec<usize> = (0..entries.len()).collect();
    order.sort_by_key(|&idx| (entries[idx].y, entries[idx].x));

    let mut placed: Vec<LayoutEntry> = Vec::with_capacity(entries.len());
    let mut result = entries.to_vec();

    for idx in order {
        let mut item = entries[idx].clone();
        // Nothing can sit lower than the bottom of what is already placed
        let floor = placed.iter().map(bottom).max().unwrap_or(0);
        item.y = item.y.min(floor);

        while item.y > 0 {
            let candidate = LayoutEntry {
                y: item.y - 1,
                ..item.clone()
            };
            if placed.iter().any(|p| collides(p, &candidate)) {
                break;
            }
            item.y -= 1;
        }

        while let Some(hit) = placed.iter().find(|p| collides(p, &item)) {
            item.y = bottom(hit);
        }

        result[idx] = item.clone();
        placed.push(item);
    }

    result
}

/// Put `moved` where it was dropped, push every card it lands on below it
/// (cascading), then compact. The moved card keeps its place ahead of the
/// cards it displaced.
pub fn move_entry(entries: &[LayoutEntry], moved: LayoutEntry) -> Vec<LayoutEntry> {
    let mut items: Vec<LayoutEntry> = entries
        .iter()
        .map(|e| if e.i == moved.i { moved.clone() } else { e.clone() })
        .collect();

    let mut pushers = vec![moved.clone()];
    while let Some(pusher) = pushers.pop() {
        for item in items.iter_mut() {
            if item.i != moved.i && collides(&pusher, item) {
                item.y = bottom(&pusher);
                pushers.push(item.clone());
            }
        }
    }

    compact_vertical(&items)
}
