//! Hint-region selection for the move-search engine.
//!
//! A player may rubber-band a sub-rectangle of the board to narrow where
//! the external search engine looks for plays. The committed region is kept
//! normalized in view coordinates and handed to the engine in model
//! coordinates; clearing it (or revoking the permission) resets that
//! player's engine.

use crate::host::Ctx;
use crate::model::geometry::{Cell, CellRegion};
use crate::model::BoardView;

/// Whether hint-region gestures are currently possible for the selected
/// player.
pub fn enabled_for_selected(view: &BoardView) -> bool {
    view.config.hint_region && view.player().hint_allowed
}

/// Commit the result of a hint-region drag. A "positive" drag (one whose
/// origin row number is at or above the end's) installs the normalized
/// rect; the opposite direction clears any existing region. Either way the
/// engine restarts.
pub fn commit_drag(view: &mut BoardView, ctx: &mut Ctx, anchor: Cell, end: Cell) -> bool {
    let player = view.selected_player;
    invalidate_region_border(view, player);

    if anchor.row >= end.row {
        let region = CellRegion::from_corners(anchor, end);
        view.players[player].hint_region = Some(region);
        invalidate_region_border(view, player);
        tracing::debug!(?region, player, "hint region committed");
    } else {
        view.players[player].hint_region = None;
        tracing::debug!(player, "hint region cleared by backwards drag");
    }

    ctx.host.reset_engine(player);
    true
}

/// Drop a player's region (feature disabled, permission revoked, or
/// dictionary swap) and restart their engine.
pub fn clear(view: &mut BoardView, ctx: &mut Ctx, player: usize) -> bool {
    if view.players[player].hint_region.is_none() {
        return false;
    }
    invalidate_region_border(view, player);
    view.players[player].hint_region = None;
    ctx.host.reset_engine(player);
    true
}

/// Grant or revoke the per-player permission.
pub fn set_allowed(view: &mut BoardView, ctx: &mut Ctx, player: usize, allowed: bool) -> bool {
    if player >= view.players.len() || view.players[player].hint_allowed == allowed {
        return false;
    }
    view.players[player].hint_allowed = allowed;
    if !allowed {
        clear(view, ctx, player);
    }
    true
}

/// The active region as the search engine wants it: normalized, in model
/// coordinates (flip undone).
pub fn engine_region(view: &BoardView, player: usize) -> Option<CellRegion> {
    let region = view.players.get(player)?.hint_region?;
    Some(view.transform.map_region(region))
}

fn invalidate_region_border(view: &mut BoardView, player: usize) {
    if let Some(region) = view.players[player].hint_region {
        for cell in region.border_cells() {
            view.invalidate_cell(cell);
        }
    }
}
