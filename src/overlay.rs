//! Mini-window overlay management.
//!
//! Mini-windows are small transient popups drawn above normal board content:
//! the trade-in-progress summary (centered over the board) and the tile
//! value hint (pinned near the pointer, forced fully inside board bounds).
//! This module owns their placement and lifetime; drawing goes through the
//! host's draw backend like everything else.

use crate::model::geometry::Rect;

/// Nominal glyph cell used to size mini-window text before the backend sees
/// it. Backends with real font metrics draw within the rect we hand them.
pub const MINI_CHAR_WIDTH: u32 = 8;
pub const MINI_LINE_HEIGHT: u32 = 16;
const MINI_PADDING: u32 = 6;

/// The kinds of mini-window this view can show. At most one of each exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiniWindowKind {
    /// "Trading N tiles" summary while trade mode is active.
    TradeSummary = 0,
    /// Tile value tooltip shown on a long press.
    ValueHint = 1,
}

impl MiniWindowKind {
    pub const COUNT: usize = 2;
}

/// One live mini-window: its computed bounds and display text.
#[derive(Debug, Clone)]
pub struct MiniWindow {
    pub kind: MiniWindowKind,
    pub rect: Rect,
    pub text: String,
}

/// Registry of live mini-windows, keyed by kind.
#[derive(Debug, Clone, Default)]
pub struct OverlayManager {
    windows: [Option<MiniWindow>; MiniWindowKind::COUNT],
}

/// Size a window to its text plus padding.
fn sized_for(text: &str) -> (u32, u32) {
    let width = text.chars().count() as u32 * MINI_CHAR_WIDTH + 2 * MINI_PADDING;
    let height = MINI_LINE_HEIGHT + 2 * MINI_PADDING;
    (width, height)
}

/// Center a window of the given size over `bounds`.
fn centered_in(bounds: &Rect, width: u32, height: u32) -> Rect {
    let x = bounds.x + (bounds.width.saturating_sub(width) / 2) as i32;
    let y = bounds.y + (bounds.height.saturating_sub(height) / 2) as i32;
    Rect::new(x, y, width, height)
}

/// Pin a window of the given size near a point, clamped fully inside
/// `bounds`. The window prefers to sit just below-right of the point.
fn pinned_near(point: (i32, i32), bounds: &Rect, width: u32, height: u32) -> Rect {
    let mut x = point.0 + 4;
    let mut y = point.1 + 4;
    let max_x = bounds.right() - width as i32;
    let max_y = bounds.bottom() - height as i32;
    x = x.min(max_x).max(bounds.x);
    y = y.min(max_y).max(bounds.y);
    Rect::new(x, y, width, height)
}

impl OverlayManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Show (or re-show with new text) the trade summary, centered over the
    /// board rect. Returns the rect of any previous instance so the caller
    /// can invalidate it.
    pub fn show_trade_summary(&mut self, board: &Rect, text: String) -> Option<Rect> {
        let (w, h) = sized_for(&text);
        let rect = centered_in(board, w, h);
        self.windows[MiniWindowKind::TradeSummary as usize]
            .replace(MiniWindow {
                kind: MiniWindowKind::TradeSummary,
                rect,
                text,
            })
            .map(|win| win.rect)
    }

    /// Show the value hint pinned near the pointer-down location.
    pub fn show_value_hint(&mut self, at: (i32, i32), board: &Rect, text: String) -> Option<Rect> {
        let (w, h) = sized_for(&text);
        let rect = pinned_near(at, board, w, h);
        self.windows[MiniWindowKind::ValueHint as usize]
            .replace(MiniWindow {
                kind: MiniWindowKind::ValueHint,
                rect,
                text,
            })
            .map(|win| win.rect)
    }

    /// Tear down a window, returning its rect for invalidation.
    pub fn hide(&mut self, kind: MiniWindowKind) -> Option<Rect> {
        self.windows[kind as usize].take().map(|win| win.rect)
    }

    pub fn get(&self, kind: MiniWindowKind) -> Option<&MiniWindow> {
        self.windows[kind as usize].as_ref()
    }

    pub fn is_visible(&self, kind: MiniWindowKind) -> bool {
        self.windows[kind as usize].is_some()
    }

    /// Kinds whose bounds intersect the given rect. Used by the dirty
    /// tracker: dirtying content underneath a mini-window dirties the window.
    pub fn intersecting(&self, rect: &Rect) -> Vec<MiniWindowKind> {
        self.windows
            .iter()
            .flatten()
            .filter(|win| win.rect.intersects(rect))
            .map(|win| win.kind)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MiniWindow> {
        self.windows.iter().flatten()
    }
}
