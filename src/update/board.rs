//! Board-level operations: flip, display toggles, player selection and
//! geometry changes.

use crate::host::Ctx;
use crate::model::geometry::CellRegion;
use crate::model::BoardView;
use crate::overlay::MiniWindowKind;
use crate::view::layout::LayoutParams;

use super::{pointer, tray};

fn transpose(region: CellRegion) -> CellRegion {
    CellRegion {
        left: region.top,
        top: region.left,
        right: region.bottom,
        bottom: region.right,
    }
}

/// Toggle the board flip (transpose of row/column addressing). All
/// view-space per-player state transposes with it, so the same physical
/// cells stay addressed; invalidation issued before the toggle and the
/// mirrored invalidation after cover the same cells.
pub fn toggle_flip(view: &mut BoardView, ctx: &mut Ctx) -> bool {
    // A flip mid-gesture would scramble the session's coordinates.
    pointer::pointer_cancel(view, ctx);

    view.dirty.mark_all_tiles();

    let flipped = !view.transform.is_flipped();
    view.transform.set_flipped(flipped);
    std::mem::swap(&mut view.params.rows, &mut view.params.cols);

    for player in &mut view.players {
        std::mem::swap(&mut player.arrow.col, &mut player.arrow.row);
        player.arrow.orientation = player.arrow.orientation.toggled();
        std::mem::swap(&mut player.board_cursor.col, &mut player.board_cursor.row);
        if let Some(region) = player.hint_region {
            player.hint_region = Some(transpose(region));
        }
    }

    view.dirty.resize(view.params.rows, view.params.cols);
    view.dirty.mark_all_tiles();
    view.relayout();
    tray::enforce_geometry(view, ctx);
    ctx.host
        .scroll_changed(view.scroll_offset, view.layout.visible_rows);
    tracing::debug!(flipped, "board flip toggled");
    true
}

pub fn set_show_colors(view: &mut BoardView, show: bool) -> bool {
    if view.show_colors == show {
        return false;
    }
    view.show_colors = show;
    view.dirty.mark_all_tiles();
    true
}

pub fn set_show_values(view: &mut BoardView, show: bool) -> bool {
    if view.show_values == show {
        return false;
    }
    view.show_values = show;
    view.dirty.mark_all_tiles();
    view.dirty.mark_tray_all(view.params.tray_size);
    true
}

/// Switch which player's tray/cursor/trade state is displayed. Distinct
/// from whose turn it is.
pub fn select_player(view: &mut BoardView, ctx: &mut Ctx, player: usize) -> bool {
    if player >= view.players.len() || player == view.selected_player {
        return false;
    }
    // Interrupt any gesture owned by the outgoing player.
    pointer::pointer_cancel(view, ctx);

    invalidate_player_markers(view, view.selected_player);
    view.selected_player = player;
    invalidate_player_markers(view, player);

    // Trade summary reflects the newly selected player (or nobody).
    if let Some(rect) = view.overlays.hide(MiniWindowKind::TradeSummary) {
        view.invalidate_rect(rect);
        view.dirty.clear_mini(MiniWindowKind::TradeSummary);
    }
    if view.player().trading {
        let count = view.player().selected_count();
        let text = match count {
            1 => "Trading 1 tile".to_string(),
            n => format!("Trading {} tiles", n),
        };
        let board = view.layout.board;
        view.overlays.show_trade_summary(&board, text);
        view.dirty.mark_mini(MiniWindowKind::TradeSummary);
    }

    view.dirty.mark_tray_all(view.params.tray_size);
    view.dirty.mark_divider();
    view.dirty.mark_score();
    true
}

/// Everything on the board that renders differently per player.
fn invalidate_player_markers(view: &mut BoardView, player: usize) {
    let arrow = view.players[player].arrow;
    if arrow.visible {
        view.invalidate_cell(arrow.cell());
    }
    if let Some(region) = view.players[player].hint_region {
        for cell in region.border_cells() {
            view.invalidate_cell(cell);
        }
    }
}

/// The host resized or re-scaled the view. Params arrive in model-space
/// dimensions; view space swaps them while flipped.
pub fn relayout(view: &mut BoardView, ctx: &mut Ctx, params: LayoutParams) -> bool {
    let mut params = params;
    if view.transform.is_flipped() {
        std::mem::swap(&mut params.rows, &mut params.cols);
    }
    if params == view.params {
        return false;
    }
    pointer::pointer_cancel(view, ctx);

    view.params = params;
    view.dirty.resize(view.params.rows, view.params.cols);
    view.relayout();
    tray::enforce_geometry(view, ctx);

    view.dirty.mark_all_tiles();
    view.dirty.mark_tray_all(view.params.tray_size);
    view.dirty.mark_divider();
    view.dirty.mark_score();
    view.dirty.mark_timer();
    ctx.host
        .scroll_changed(view.scroll_offset, view.layout.visible_rows);
    true
}
