//! Keyboard navigation (capability-gated).
//!
//! A closed key set moves a per-player board cursor and tray cursor, with a
//! focus owner (board / tray / score) and a "dived" flag distinguishing
//! focus resting on an area from focus acting inside it. All paths exist in
//! every build; `ViewConfig::keyboard_nav` decides at runtime.

use crate::host::Ctx;
use crate::messages::{Direction, KeyAction, NavKey};
use crate::model::geometry::Cell;
use crate::model::{BoardView, FocusOwner, TrayVisibility};

use super::{arrow, board, scroll, tray};

pub fn handle_key(view: &mut BoardView, ctx: &mut Ctx, key: NavKey, action: KeyAction) -> bool {
    if !view.config.keyboard_nav {
        return false;
    }
    // Releases carry no behavior; repeats act like presses.
    if action == KeyAction::Up {
        return false;
    }

    match key {
        NavKey::RaiseFocus => raise_focus(view),
        NavKey::Confirm => confirm(view, ctx),
        NavKey::Move(dir) => move_cursor(view, ctx, dir, false),
        NavKey::Jump(dir) => move_cursor(view, ctx, dir, true),
        NavKey::Delete => delete_at_cursor(view, ctx),
    }
}

/// Undive, or cycle focus to the next area.
fn raise_focus(view: &mut BoardView) -> bool {
    if view.focus.dived {
        view.focus.dived = false;
    } else {
        view.focus.owner = view.focus.owner.next();
    }
    invalidate_focus(view);
    true
}

fn confirm(view: &mut BoardView, ctx: &mut Ctx) -> bool {
    if !view.focus.dived {
        view.focus.dived = true;
        invalidate_focus(view);
        return true;
    }
    match view.focus.owner {
        FocusOwner::Board => {
            let cursor = view.player().board_cursor;
            arrow::tap_board_cell(view, ctx, cursor)
        }
        FocusOwner::Tray => {
            if view.tray_visibility == TrayVisibility::Revealed {
                let slot = view.player().tray_cursor;
                tray::toggle_selection(view, ctx, slot)
            } else {
                tray::tap_advance_visibility(view, ctx)
            }
        }
        FocusOwner::Score => {
            let target = view.focus.score_cursor;
            board::select_player(view, ctx, target)
        }
    }
}

fn move_cursor(view: &mut BoardView, ctx: &mut Ctx, dir: Direction, jump: bool) -> bool {
    if !view.focus.dived {
        return false;
    }
    match view.focus.owner {
        FocusOwner::Board => move_board_cursor(view, ctx, dir, jump),
        FocusOwner::Tray => move_tray_cursor(view, dir, jump),
        FocusOwner::Score => move_score_cursor(view, ctx, dir),
    }
}

fn move_board_cursor(view: &mut BoardView, ctx: &mut Ctx, dir: Direction, jump: bool) -> bool {
    let cursor = view.player().board_cursor;
    let (cols, rows) = (view.params.cols, view.params.rows);
    let target = match (dir, jump) {
        (Direction::Left, false) => Cell::new(cursor.col.saturating_sub(1), cursor.row),
        (Direction::Left, true) => Cell::new(0, cursor.row),
        (Direction::Right, false) => Cell::new((cursor.col + 1).min(cols - 1), cursor.row),
        (Direction::Right, true) => Cell::new(cols - 1, cursor.row),
        (Direction::Up, false) => Cell::new(cursor.col, cursor.row.saturating_sub(1)),
        (Direction::Up, true) => Cell::new(cursor.col, 0),
        (Direction::Down, false) => Cell::new(cursor.col, (cursor.row + 1).min(rows - 1)),
        (Direction::Down, true) => Cell::new(cursor.col, rows - 1),
    };
    if target == cursor {
        return false;
    }

    view.invalidate_cell(cursor);
    view.player_mut().board_cursor = target;
    view.invalidate_cell(target);

    // Crossing the visible window boundary scrolls instead of refusing.
    if let Some(dir) = scroll::can_scroll_to_reveal(view, target.row) {
        let delta = match dir {
            scroll::ScrollDir::Up => target.row as i32 - view.scroll_offset as i32,
            scroll::ScrollDir::Down => target.row as i32 - view.last_visible_row() as i32,
        };
        scroll::scroll_by(view, ctx, delta);
    }
    true
}

fn move_tray_cursor(view: &mut BoardView, dir: Direction, jump: bool) -> bool {
    let size = view.params.tray_size;
    if size == 0 {
        return false;
    }
    let cursor = view.player().tray_cursor;
    let target = match (dir, jump) {
        (Direction::Left, false) => cursor.saturating_sub(1),
        (Direction::Left, true) => 0,
        (Direction::Right, false) => (cursor + 1).min(size - 1),
        (Direction::Right, true) => size - 1,
        _ => return false,
    };
    if target == cursor {
        return false;
    }
    view.player_mut().tray_cursor = target;
    view.dirty.mark_tray_slot(cursor);
    view.dirty.mark_tray_slot(target);
    true
}

fn move_score_cursor(view: &mut BoardView, ctx: &mut Ctx, dir: Direction) -> bool {
    let count = ctx.server.player_count();
    if count == 0 {
        return false;
    }
    let cursor = view.focus.score_cursor;
    let target = match dir {
        Direction::Up => cursor.saturating_sub(1),
        Direction::Down => (cursor + 1).min(count - 1),
        _ => return false,
    };
    if target == cursor {
        return false;
    }
    view.focus.score_cursor = target;
    view.dirty.mark_score();
    true
}

/// Delete takes back the pending tile under the board cursor.
fn delete_at_cursor(view: &mut BoardView, ctx: &mut Ctx) -> bool {
    if view.focus.owner != FocusOwner::Board || !view.focus.dived {
        return false;
    }
    let cursor = view.player().board_cursor;
    let mcell = view.transform.to_model(cursor);
    if ctx
        .model
        .take_back_pending(view.selected_player, mcell.col, mcell.row)
    {
        view.invalidate_cell(cursor);
        view.dirty.mark_tray_all(view.params.tray_size);
        true
    } else {
        false
    }
}

/// Focus indicators live on the cursor cell, the tray strip and the score
/// area; mark them all when ownership changes.
fn invalidate_focus(view: &mut BoardView) {
    let cursor = view.player().board_cursor;
    view.invalidate_cell(cursor);
    view.dirty.mark_tray_all(view.params.tray_size);
    view.dirty.mark_score();
}
