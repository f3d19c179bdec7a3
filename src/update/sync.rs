//! Re-entry points for model/server callbacks and the game clock.
//!
//! The model and server invoke these synchronously whenever they mutate;
//! calls may arrive from inside another update (re-entrancy is expected).
//! Coordinates arrive in model space and go through the flip transform
//! before any dirty marking.

use crate::host::Ctx;
use crate::model::geometry::Cell;
use crate::model::{BoardView, TrayVisibility};

use super::{arrow, tray};

/// A board cell's content changed in the model.
pub fn cell_changed(view: &mut BoardView, ctx: &mut Ctx, col: usize, row: usize) -> bool {
    debug_assert!(
        col < ctx.model.cols() && row < ctx.model.rows(),
        "model cell ({}, {}) out of range",
        col,
        row
    );
    let vcell = view.transform.to_view(Cell::new(col, row));
    view.invalidate_cell(vcell);
    if ctx.model.tile_at(col, row).is_some() {
        // Never draw an arrow under a newly placed tile.
        arrow::hide_if_at(view, vcell);
    }
    true
}

/// A player's tray contents changed in the model.
pub fn tray_changed(view: &mut BoardView, ctx: &mut Ctx, player: usize) -> bool {
    let size = ctx.model.tray_size();
    if let Some(state) = view.players.get_mut(player) {
        if state.divider > size {
            state.divider = size;
        }
    }
    if player == view.selected_player {
        view.dirty.mark_tray_all(size);
        view.dirty.mark_divider();
    }
    view.dirty.mark_score();
    true
}

/// The dictionary was swapped out: every player's search engine restarts
/// and committed hint regions are dropped.
pub fn dictionary_changed(view: &mut BoardView, ctx: &mut Ctx) -> bool {
    let mut changed = false;
    for player in 0..view.players.len() {
        if let Some(region) = view.players[player].hint_region.take() {
            for cell in region.border_cells() {
                view.invalidate_cell(cell);
            }
            changed = true;
        }
        ctx.host.reset_engine(player);
    }
    changed
}

pub fn turn_changed(view: &mut BoardView) -> bool {
    view.dirty.mark_score();
    view.dirty.mark_timer();
    true
}

/// Game over: score area changes and a reversed tray upgrades to revealed
/// (there is nothing left to protect).
pub fn game_over(view: &mut BoardView, ctx: &mut Ctx) -> bool {
    view.game_over = true;
    view.dirty.mark_score();
    if view.tray_visibility == TrayVisibility::Reversed {
        tray::request_visibility(view, ctx, TrayVisibility::Revealed);
    }
    true
}

/// Periodic clock tick: charge the running player and refresh the score
/// and timer areas. Ignored while the clock is pushed paused.
pub fn clock_tick(view: &mut BoardView, ctx: &mut Ctx, seconds: u32) -> bool {
    if view.clock_pause_depth > 0 {
        return false;
    }
    let Some(turn) = ctx.server.turn() else {
        return false;
    };
    if let Some(player) = view.players.get_mut(turn) {
        player.time_budget -= seconds as i32;
        view.dirty.mark_score();
        view.dirty.mark_timer();
        true
    } else {
        false
    }
}
