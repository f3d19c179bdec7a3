//! Scroll controller.
//!
//! Owns the vertical scroll offset and its clamping: the visible window may
//! never exceed board bounds (`offset + visible_rows <= total_rows`) and
//! never moves at all when the whole board already fits.

use crate::host::Ctx;
use crate::model::BoardView;
use crate::overlay::MiniWindowKind;

/// Which way a scroll would have to go to reveal a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDir {
    Up,
    Down,
}

/// Set the absolute scroll offset. Out-of-range offsets are rejected
/// outright (no clamping) and leave the prior offset unchanged.
pub fn set_scroll_offset(view: &mut BoardView, ctx: &mut Ctx, offset: usize) -> bool {
    if view.layout.visible_rows >= view.params.rows {
        // Whole board on screen: scrolling is a no-op by definition.
        return false;
    }
    if offset + view.layout.visible_rows > view.params.rows {
        tracing::debug!(offset, "rejecting out-of-range scroll offset");
        return false;
    }
    if offset == view.scroll_offset {
        return false;
    }

    // The trade summary rides on top of board content; invalidate it at its
    // old position, move, then again at the new one.
    let trade_rect = view
        .overlays
        .get(MiniWindowKind::TradeSummary)
        .map(|w| w.rect);
    if let Some(rect) = trade_rect {
        view.invalidate_rect(rect);
        view.dirty.mark_mini(MiniWindowKind::TradeSummary);
    }

    view.scroll_offset = offset;
    view.relayout();
    // Every visible cell now shows a different board row.
    view.dirty.mark_all_tiles();

    if view.overlays.is_visible(MiniWindowKind::TradeSummary) {
        let board = view.layout.board;
        let text = view
            .overlays
            .get(MiniWindowKind::TradeSummary)
            .map(|w| w.text.clone())
            .unwrap_or_default();
        if let Some(old) = view.overlays.show_trade_summary(&board, text) {
            view.invalidate_rect(old);
        }
        view.dirty.mark_mini(MiniWindowKind::TradeSummary);
    }

    ctx.host.scroll_changed(view.scroll_offset, view.layout.visible_rows);
    true
}

/// Relative scroll, clamped into the valid range.
pub fn scroll_by(view: &mut BoardView, ctx: &mut Ctx, delta: i32) -> bool {
    let max = view.layout.max_scroll_offset(view.params.rows) as i32;
    let target = (view.scroll_offset as i32 + delta).clamp(0, max);
    set_scroll_offset(view, ctx, target as usize)
}

/// Whether `row` sits just outside the visible window, and on which side.
/// Used by auto-scroll-during-drag and by keyboard navigation to decide
/// whether crossing the window boundary should scroll rather than refuse.
pub fn can_scroll_to_reveal(view: &BoardView, row: usize) -> Option<ScrollDir> {
    if row < view.scroll_offset {
        Some(ScrollDir::Up)
    } else if row > view.last_visible_row() {
        Some(ScrollDir::Down)
    } else {
        None
    }
}
