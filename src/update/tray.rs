//! Tray visibility state machine, trade mode and divider placement.
//!
//! Visibility is HIDDEN / REVERSED / REVEALED, one state per game at a
//! time. Hiding is only possible when the board can visually obscure the
//! tray; revealing runs the password/robot/remote challenge; a finished game
//! overrides all of it (reversed upgrades to revealed).

use crate::host::{Ctx, UserError};
use crate::model::{BoardView, TrayVisibility};
use crate::overlay::MiniWindowKind;

use super::arrow;

/// Request a tray visibility change, applying the redefinition rules and
/// the reveal challenge. Returns whether the state changed.
pub fn request_visibility(view: &mut BoardView, ctx: &mut Ctx, want: TrayVisibility) -> bool {
    let mut want = want;

    // Hiding is redefined as reversing when the board can't obscure the tray.
    if want == TrayVisibility::Hidden && !view.layout.board_obscures_tray {
        want = TrayVisibility::Reversed;
    }
    // A finished game has nothing left to protect.
    if want == TrayVisibility::Reversed && view.game_over {
        want = TrayVisibility::Revealed;
    }

    if want == view.tray_visibility {
        return false;
    }

    if want == TrayVisibility::Revealed && !view.game_over {
        let player = view.selected_player;
        if ctx.server.is_remote(player) {
            ctx.host.user_error(UserError::RemoteTray);
            return false;
        }
        if ctx.server.is_robot(player) {
            ctx.host.user_error(UserError::RobotTray);
            return false;
        }
        if ctx.server.has_password(player) && !challenge_password(ctx, player) {
            return false;
        }
    }

    apply_visibility(view, ctx, want);
    true
}

/// Prompt until the right password arrives or the user gives up. Wrong
/// attempts change no view state.
fn challenge_password(ctx: &mut Ctx, player: usize) -> bool {
    loop {
        match ctx.host.request_password(player) {
            None => return false,
            Some(guess) if ctx.server.check_password(player, &guess) => return true,
            Some(_) => ctx.host.user_error(UserError::BadPassword),
        }
    }
}

fn apply_visibility(view: &mut BoardView, ctx: &mut Ctx, want: TrayVisibility) {
    let old = view.tray_visibility;
    tracing::debug!(?old, new = ?want, "tray visibility transition");
    view.tray_visibility = want;

    if want == TrayVisibility::Hidden {
        // The freed tray space may admit more visible rows; remember where
        // we were so unhiding can put the window back.
        view.saved_scroll = Some(view.scroll_offset);
        view.relayout();
        view.dirty.mark_all_tiles();
    } else if old == TrayVisibility::Hidden {
        view.relayout();
        if let Some(saved) = view.saved_scroll.take() {
            let max = view.layout.max_scroll_offset(view.params.rows);
            view.scroll_offset = saved.min(max);
        }
        view.dirty.mark_all_tiles();
    }

    if want == TrayVisibility::Revealed {
        // Bold/selection indicators depend on visibility.
        view.dirty.mark_tray_all(view.params.tray_size);
        view.dirty.mark_divider();
        let arrow_cell = view.player().arrow.visible.then(|| view.player().arrow.cell());
        if let Some(cell) = arrow_cell {
            view.invalidate_cell(cell);
        }
    } else if want == TrayVisibility::Reversed {
        view.dirty.mark_tray_all(view.params.tray_size);
        view.dirty.mark_divider();
    }

    ctx.host.tray_state_changed(want, view.layout.visible_rows);
}

/// Geometry changed; a hidden tray that can no longer hide becomes
/// reversed.
pub fn enforce_geometry(view: &mut BoardView, ctx: &mut Ctx) {
    if view.tray_visibility == TrayVisibility::Hidden && !view.layout.board_obscures_tray {
        apply_visibility(view, ctx, TrayVisibility::Reversed);
    }
}

/// Enter trade mode: tray taps now toggle selection-for-exchange.
pub fn start_trade(view: &mut BoardView, ctx: &mut Ctx) -> bool {
    if view.player().trading {
        return false;
    }
    let player = view.selected_player;
    if ctx.server.turn() != Some(player) {
        ctx.host.user_error(UserError::NotYourTurn);
        return false;
    }
    if ctx.server.pool_count() < ctx.model.tray_size() {
        ctx.host.user_error(UserError::TooFewPoolTiles);
        return false;
    }

    view.player_mut().trading = true;
    view.player_mut().selected = 0;
    // The arrow is forced invisible while trading.
    arrow::force_hide(view);
    view.dirty.mark_tray_all(view.params.tray_size);
    show_trade_summary(view);
    true
}

/// Leave trade mode without exchanging anything.
pub fn cancel_trade(view: &mut BoardView) -> bool {
    if !view.player().trading {
        return false;
    }
    view.player_mut().trading = false;
    view.player_mut().selected = 0;
    view.dirty.mark_tray_all(view.params.tray_size);
    hide_trade_summary(view);
    true
}

/// Confirm the selected tiles for exchange. The actual swap is the
/// server's business; this only runs the confirmation query and clears the
/// mode on acceptance.
pub fn commit_trade(view: &mut BoardView, ctx: &mut Ctx) -> bool {
    if !view.player().trading {
        return false;
    }
    let count = view.player().selected_count();
    if count == 0 {
        return cancel_trade(view);
    }
    if !ctx.host.confirm_trade(view.selected_player, count) {
        return false;
    }
    cancel_trade(view)
}

/// Toggle a tray slot's selection highlight (trade selection, or the
/// single-tile selection used by tap-to-place).
pub fn toggle_selection(view: &mut BoardView, ctx: &mut Ctx, slot: usize) -> bool {
    if slot >= ctx.model.tray_size() {
        return false;
    }
    if !view.player().trading {
        // Outside trade mode only one slot is highlighted at a time.
        let already = view.player().slot_selected(slot);
        let old = view.player().selected;
        view.player_mut().selected = 0;
        view.dirty.mark_tray_mask(old);
        if !already {
            view.player_mut().toggle_slot(slot);
        }
    } else {
        view.player_mut().toggle_slot(slot);
        show_trade_summary(view);
    }
    view.dirty.mark_tray_slot(slot);
    true
}

/// Move the divider to a slot boundary, clamped to 0..=tray_size.
pub fn set_divider(view: &mut BoardView, position: usize) -> bool {
    let position = position.min(view.params.tray_size);
    if view.player().divider == position {
        return false;
    }
    view.player_mut().divider = position;
    view.dirty.mark_divider();
    view.dirty.mark_tray_all(view.params.tray_size);
    true
}

fn show_trade_summary(view: &mut BoardView) {
    let count = view.player().selected_count();
    let text = match count {
        1 => "Trading 1 tile".to_string(),
        n => format!("Trading {} tiles", n),
    };
    let board = view.layout.board;
    if let Some(old) = view.overlays.show_trade_summary(&board, text) {
        view.invalidate_rect(old);
    }
    view.dirty.mark_mini(MiniWindowKind::TradeSummary);
}

fn hide_trade_summary(view: &mut BoardView) {
    if let Some(rect) = view.overlays.hide(MiniWindowKind::TradeSummary) {
        view.invalidate_rect(rect);
        view.dirty.clear_mini(MiniWindowKind::TradeSummary);
    }
}

/// A tap landing on the tray while it isn't revealed advances visibility:
/// hidden trays reverse, reversed trays ask to reveal.
pub fn tap_advance_visibility(view: &mut BoardView, ctx: &mut Ctx) -> bool {
    match view.tray_visibility {
        TrayVisibility::Hidden => request_visibility(view, ctx, TrayVisibility::Reversed),
        TrayVisibility::Reversed => request_visibility(view, ctx, TrayVisibility::Revealed),
        TrayVisibility::Revealed => false,
    }
}
