//! Placement arrow: the "type-to-place" insertion cursor.
//!
//! The arrow marks the cell the next placed tile lands on, with an
//! orientation subsequent tiles advance along. It is never shown on an
//! occupied cell; a tile landing under it forces it invisible.

use crate::host::Ctx;
use crate::messages::Direction;
use crate::model::geometry::{Cell, Orientation};
use crate::model::BoardView;

use super::scroll;

/// Whether a view-space cell currently holds a tile.
pub fn cell_occupied(view: &BoardView, ctx: &Ctx, cell: Cell) -> bool {
    let mcell = view.transform.to_model(cell);
    ctx.model.tile_at(mcell.col, mcell.row).is_some()
}

/// Handle a tap on a board cell: place the sole selected tray tile there,
/// or run the arrow show/rotate/hide cycle.
pub fn tap_board_cell(view: &mut BoardView, ctx: &mut Ctx, cell: Cell) -> bool {
    if view.player().trading {
        return false;
    }
    if cell_occupied(view, ctx, cell) {
        return false;
    }

    // A single highlighted tray tile makes the tap a placement.
    if let Some(slot) = view.player().sole_selected_slot() {
        let player = view.selected_player;
        let mcell = view.transform.to_model(cell);
        if ctx.model.tray_tile(player, slot).is_some()
            && ctx.model.move_tray_to_board(player, slot, mcell.col, mcell.row)
        {
            view.player_mut().selected = 0;
            view.dirty.mark_tray_slot(slot);
            view.invalidate_cell(cell);
            hide_if_at(view, cell);
            return true;
        }
        return false;
    }

    let arrow = view.player().arrow;
    if arrow.is_at(cell) {
        // Tapping the arrow's own cell alternates orientation, then hides.
        if arrow.orientation == Orientation::Horizontal {
            view.player_mut().arrow.orientation = Orientation::Vertical;
        } else {
            view.player_mut().arrow.visible = false;
        }
        view.invalidate_cell(cell);
        return true;
    }

    // Move (or first-show) the arrow here.
    if arrow.visible {
        view.invalidate_cell(arrow.cell());
    } else {
        view.player_mut().arrow.orientation = Orientation::Horizontal;
    }
    view.player_mut().arrow.col = cell.col;
    view.player_mut().arrow.row = cell.row;
    view.player_mut().arrow.visible = true;
    view.invalidate_cell(cell);
    true
}

/// Advance the arrow one step in a direction, skipping occupied cells and
/// stopping at the last empty cell ("at edge" reports no change). A hidden
/// arrow is first shown at the center of the visible window.
pub fn move_arrow(view: &mut BoardView, ctx: &mut Ctx, direction: Direction) -> bool {
    if view.player().trading {
        return false;
    }
    if !view.player().arrow.visible {
        return show_at_center(view, ctx);
    }

    let from = view.player().arrow.cell();
    let Some(target) = next_empty_cell(view, ctx, from, direction) else {
        return false;
    };

    view.invalidate_cell(from);
    view.player_mut().arrow.col = target.col;
    view.player_mut().arrow.row = target.row;
    view.invalidate_cell(target);

    // Crossing the visible window boundary scrolls rather than refusing.
    if let Some(dir) = scroll::can_scroll_to_reveal(view, target.row) {
        let delta = match dir {
            scroll::ScrollDir::Up => -1,
            scroll::ScrollDir::Down => 1,
        };
        scroll::scroll_by(view, ctx, delta);
    }
    true
}

/// First cell in `direction` from `from` that is empty, or `None` when
/// every remaining cell that way is occupied or the edge is already here.
fn next_empty_cell(
    view: &BoardView,
    ctx: &Ctx,
    from: Cell,
    direction: Direction,
) -> Option<Cell> {
    let (cols, rows) = (view.params.cols, view.params.rows);
    let mut cell = from;
    loop {
        cell = match direction {
            Direction::Left => Cell::new(cell.col.checked_sub(1)?, cell.row),
            Direction::Right if cell.col + 1 < cols => Cell::new(cell.col + 1, cell.row),
            Direction::Up => Cell::new(cell.col, cell.row.checked_sub(1)?),
            Direction::Down if cell.row + 1 < rows => Cell::new(cell.col, cell.row + 1),
            _ => return None,
        };
        if !cell_occupied(view, ctx, cell) {
            return Some(cell);
        }
    }
}

/// Show a fresh arrow: horizontal, at the center of the visible window.
fn show_at_center(view: &mut BoardView, ctx: &mut Ctx) -> bool {
    let center_row = view.scroll_offset + view.layout.visible_rows / 2;
    let mut cell = Cell::new(view.params.cols / 2, center_row.min(view.params.rows - 1));
    if cell_occupied(view, ctx, cell) {
        match next_empty_cell(view, ctx, cell, Direction::Right)
            .or_else(|| next_empty_cell(view, ctx, cell, Direction::Left))
        {
            Some(empty) => cell = empty,
            None => return false,
        }
    }
    let player = view.player_mut();
    player.arrow.col = cell.col;
    player.arrow.row = cell.row;
    player.arrow.orientation = Orientation::Horizontal;
    player.arrow.visible = true;
    view.invalidate_cell(cell);
    true
}

/// Flip orientation in place; legal only while the arrow cell stays empty.
pub fn toggle_orientation(view: &mut BoardView, ctx: &mut Ctx) -> bool {
    let arrow = view.player().arrow;
    if !arrow.visible || cell_occupied(view, ctx, arrow.cell()) {
        return false;
    }
    view.player_mut().arrow.orientation = arrow.orientation.toggled();
    view.invalidate_cell(arrow.cell());
    true
}

/// A tile landed on this view cell; any arrow there goes invisible (it is
/// never drawn under a placed tile). Every player's arrow is checked so a
/// stale arrow can't resurface when that player is selected again.
pub fn hide_if_at(view: &mut BoardView, cell: Cell) -> bool {
    let mut hid = false;
    for player in &mut view.players {
        if player.arrow.is_at(cell) {
            player.arrow.visible = false;
            hid = true;
        }
    }
    if hid {
        view.invalidate_cell(cell);
    }
    hid
}

/// Force the arrow invisible (entering trade mode).
pub fn force_hide(view: &mut BoardView) -> bool {
    let arrow = view.player().arrow;
    if arrow.visible {
        view.player_mut().arrow.visible = false;
        view.invalidate_cell(arrow.cell());
        true
    } else {
        false
    }
}
