//! Pointer input: the unified drag-and-drop controller.
//!
//! One state machine spans all four drop-target kinds (tile, board scroll,
//! divider, hint region), because targets can change mid-gesture. Taps are
//! resolved on pointer-up: a gesture whose object descriptor never changed
//! identity is a tap, everything else commits as a drag. A drag-start (the
//! first descriptor change) always cancels the pending long-press timer; a
//! long-press fire racing into the same dispatch cycle is ignored once the
//! gesture has moved.

use crate::host::{Ctx, TimerKind};
use crate::messages::Modifiers;
use crate::model::drag::{DragKind, DragSession, ObjDesc};
use crate::model::geometry::{Cell, CellRegion};
use crate::model::{BoardView, TrayVisibility};
use crate::overlay::MiniWindowKind;
use crate::view::hit_test::hit_test;
use crate::view::layout;

use super::{arrow, hint, scroll, tray};

/// Long-press detection delay.
pub const HOLD_DELAY_MS: u32 = 800;
/// Auto-scroll repeat interval while a tile drag hovers a scrollable edge.
pub const AUTO_SCROLL_INTERVAL_MS: u32 = 250;
/// Rows of pointer travel per one row of board scroll. Board scrolling is
/// coarse-grained, not 1:1 tracking.
pub const SCROLL_DRAG_QUANTUM: u32 = 2;

pub fn pointer_down(view: &mut BoardView, ctx: &mut Ctx, x: i32, y: i32, mods: Modifiers) -> bool {
    if !view.config.pointer {
        return false;
    }

    // A new pointer-down anywhere tears down the value hint.
    let mut changed = dismiss_value_hint(view);
    view.last_pointer_down = (x, y);

    // Host-level pairing should prevent this, but an unterminated gesture
    // must not leak a session.
    if view.drag.is_some() {
        changed |= pointer_cancel(view, ctx);
    }

    let hit = hit_test(view, x, y);
    view.pending_tap = hit;

    match hit {
        ObjDesc::Divider => {
            view.drag = Some(DragSession::new(DragKind::Divider, hit));
        }
        ObjDesc::TraySlot(slot) if view.tray_visibility == TrayVisibility::Revealed => {
            if !view.player().trading {
                if let Some(tile) = ctx.model.tray_tile(view.selected_player, slot) {
                    view.drag = Some(DragSession::new(DragKind::Tile(tile), hit));
                    view.dirty.mark_tray_slot(slot);
                    ctx.host.set_timer(TimerKind::PointerHold, HOLD_DELAY_MS);
                    changed = true;
                }
            } else if ctx.model.tray_tile(view.selected_player, slot).is_some() {
                ctx.host.set_timer(TimerKind::PointerHold, HOLD_DELAY_MS);
            }
        }
        ObjDesc::TraySlot(_) => {
            // Reversed tray: the tap (resolved on up) advances visibility.
        }
        ObjDesc::Cell { col, row } => {
            let cell = Cell::new(col, row);
            let mcell = view.transform.to_model(cell);
            let tile = ctx.model.tile_at(mcell.col, mcell.row);

            if !view.player().trading {
                if tile.is_some_and(|t| t.pending) {
                    // A not-yet-committed tile is grabbable in place.
                    let tile = tile.unwrap().tile;
                    view.drag = Some(DragSession::new(DragKind::Tile(tile), hit));
                    view.invalidate_cell(cell);
                    ctx.host.set_timer(TimerKind::PointerHold, HOLD_DELAY_MS);
                    changed = true;
                } else if hint::enabled_for_selected(view) && mods.alt {
                    view.drag = Some(DragSession::new(
                        DragKind::HintRegion {
                            anchor: cell,
                            last: CellRegion::single(cell),
                        },
                        hit,
                    ));
                } else if view.layout.visible_rows < view.params.rows {
                    view.drag = Some(DragSession::new(
                        DragKind::Board {
                            anchor_y: y,
                            steps_applied: 0,
                        },
                        hit,
                    ));
                    if tile.is_some() {
                        ctx.host.set_timer(TimerKind::PointerHold, HOLD_DELAY_MS);
                    }
                } else if tile.is_some() {
                    // No drag possible here; the hold timer can still pop a
                    // value hint.
                    ctx.host.set_timer(TimerKind::PointerHold, HOLD_DELAY_MS);
                }
            } else if tile.is_some() {
                ctx.host.set_timer(TimerKind::PointerHold, HOLD_DELAY_MS);
            }
        }
        ObjDesc::None => {
            view.pending_tap = ObjDesc::None;
        }
    }

    changed
}

pub fn pointer_move(view: &mut BoardView, ctx: &mut Ctx, x: i32, y: i32) -> bool {
    if !view.config.pointer {
        return false;
    }
    let Some(mut session) = view.drag.take() else {
        return false;
    };

    let mut changed = false;
    match &mut session.kind {
        DragKind::Board {
            anchor_y,
            steps_applied,
        } => {
            let quantum = (view.params.vscale * SCROLL_DRAG_QUANTUM).max(1) as i32;
            let steps = (y - *anchor_y) / quantum;
            let delta = steps - *steps_applied;
            if delta != 0 {
                *steps_applied = steps;
                mark_moved(view, ctx, &mut session);
                // Dragging the board downward reveals earlier rows.
                changed |= scroll::scroll_by(view, ctx, -delta);
            }
        }
        DragKind::Divider => {
            let position = layout::divider_position_near(&view.params, &view.layout, x);
            if position != view.player().divider {
                mark_moved(view, ctx, &mut session);
                changed |= tray::set_divider(view, position);
            }
        }
        DragKind::HintRegion { anchor, last } => {
            let cell = layout::cell_near(&view.params, &view.layout, view.scroll_offset, x, y);
            let candidate = CellRegion::from_corners(*anchor, cell);
            if candidate != *last {
                let old = *last;
                *last = candidate;
                mark_moved(view, ctx, &mut session);
                // Diff old vs. new borders for minimal invalidation.
                for c in old.border_cells() {
                    view.invalidate_cell(c);
                }
                for c in candidate.border_cells() {
                    view.invalidate_cell(c);
                }
                changed = true;
            }
        }
        DragKind::Tile(_) => {
            let hit = hit_test(view, x, y);
            if hit != session.current {
                mark_moved(view, ctx, &mut session);
                view.invalidate_obj(session.current);
                view.invalidate_obj(hit);
                session.current = hit;
                changed = true;
            }
            // Hovering the top/bottom visible row arms the auto-scroll
            // timer; leaving the edge cancels it immediately.
            let at_edge = session
                .current
                .as_cell()
                .and_then(|c| edge_scroll_dir(view, c))
                .is_some();
            if at_edge && !session.auto_scroll {
                ctx.host
                    .set_timer(TimerKind::AutoScroll, AUTO_SCROLL_INTERVAL_MS);
                session.auto_scroll = true;
            } else if !at_edge && session.auto_scroll {
                ctx.host.cancel_timer(TimerKind::AutoScroll);
                session.auto_scroll = false;
            }
        }
    }

    view.drag = Some(session);
    changed
}

pub fn pointer_up(view: &mut BoardView, ctx: &mut Ctx, x: i32, y: i32) -> bool {
    if !view.config.pointer {
        return false;
    }
    ctx.host.cancel_timer(TimerKind::PointerHold);
    let mut changed = dismiss_value_hint(view);

    if let Some(session) = view.drag.take() {
        if session.auto_scroll {
            ctx.host.cancel_timer(TimerKind::AutoScroll);
        }
        if session.moved {
            view.pending_tap = ObjDesc::None;
            changed |= commit_drag(view, ctx, session, x, y);
        } else if session.is_tile() {
            // Tap on a tile: drop the drag-source styling, let the pending
            // tap resolve below.
            view.invalidate_obj(session.origin);
            changed = true;
        }
    }

    let tap = std::mem::take(&mut view.pending_tap);
    if tap != ObjDesc::None {
        changed |= dispatch_tap(view, ctx, tap);
    }
    changed
}

/// Host-level interruption: identical cleanup to an invalid drop, without a
/// pointer-up event.
pub fn pointer_cancel(view: &mut BoardView, ctx: &mut Ctx) -> bool {
    ctx.host.cancel_timer(TimerKind::PointerHold);
    let mut changed = dismiss_value_hint(view);
    view.pending_tap = ObjDesc::None;

    if let Some(session) = view.drag.take() {
        if session.auto_scroll {
            ctx.host.cancel_timer(TimerKind::AutoScroll);
        }
        view.invalidate_obj(session.origin);
        view.invalidate_obj(session.current);
        changed = true;
    }
    changed
}

/// The long-press timer elapsed: pop a value hint for the tile under the
/// original pointer-down, if the gesture hasn't turned into a drag.
pub fn pointer_hold_fired(view: &mut BoardView, ctx: &mut Ctx) -> bool {
    // Drag-start cancelled this timer; if the fire races in anyway, motion
    // wins deterministically.
    if view.drag.as_ref().is_some_and(|s| s.moved) {
        return false;
    }

    let obj = if view.pending_tap != ObjDesc::None {
        view.pending_tap
    } else if let Some(session) = &view.drag {
        session.origin
    } else {
        return false;
    };

    let tile = match obj {
        ObjDesc::Cell { col, row } => {
            let mcell = view.transform.to_model(Cell::new(col, row));
            ctx.model.tile_at(mcell.col, mcell.row).map(|t| t.tile)
        }
        ObjDesc::TraySlot(slot) if view.tray_visibility == TrayVisibility::Revealed => {
            ctx.model.tray_tile(view.selected_player, slot)
        }
        _ => None,
    };
    let Some(tile) = tile else {
        return false;
    };

    let text = if tile.is_blank {
        "blank = 0".to_string()
    } else {
        format!("{} = {}", tile.face, ctx.model.tile_value(tile))
    };
    let board = view.layout.board;
    let at = view.last_pointer_down;
    if let Some(old) = view.overlays.show_value_hint(at, &board, text) {
        view.invalidate_rect(old);
    }
    view.dirty.mark_mini(MiniWindowKind::ValueHint);
    // A long press is not a tap.
    view.pending_tap = ObjDesc::None;
    true
}

/// One auto-scroll tick: scroll a row toward the hovered edge, keep the
/// timer armed while the pointer stays there and more rows remain.
pub fn auto_scroll_tick(view: &mut BoardView, ctx: &mut Ctx) -> bool {
    let Some(mut session) = view.drag.take() else {
        return false;
    };
    if !session.is_tile() || !session.auto_scroll {
        view.drag = Some(session);
        return false;
    }

    let dir = session
        .current
        .as_cell()
        .and_then(|c| edge_scroll_dir(view, c));
    let changed = match dir {
        Some(scroll::ScrollDir::Up) => {
            let scrolled = scroll::scroll_by(view, ctx, -1);
            if scrolled {
                // The unmoved pointer now hovers the previous board row.
                if let ObjDesc::Cell { row, .. } = &mut session.current {
                    *row = row.saturating_sub(1);
                }
            }
            scrolled
        }
        Some(scroll::ScrollDir::Down) => {
            let scrolled = scroll::scroll_by(view, ctx, 1);
            if scrolled {
                if let ObjDesc::Cell { row, .. } = &mut session.current {
                    *row += 1;
                }
            }
            scrolled
        }
        None => false,
    };

    if changed {
        ctx.host
            .set_timer(TimerKind::AutoScroll, AUTO_SCROLL_INTERVAL_MS);
    } else {
        ctx.host.cancel_timer(TimerKind::AutoScroll);
        session.auto_scroll = false;
    }
    view.drag = Some(session);
    changed
}

/// First descriptor change of a gesture: it stops being a tap, the
/// long-press timer dies, and a lingering value hint is dismissed.
fn mark_moved(view: &mut BoardView, ctx: &mut Ctx, session: &mut DragSession) {
    if !session.moved {
        session.moved = true;
        ctx.host.cancel_timer(TimerKind::PointerHold);
    }
    view.pending_tap = ObjDesc::None;
    dismiss_value_hint(view);
}

/// Scroll direction needed to keep feeding a tile drag hovering the top or
/// bottom visible row, if any rows remain that way.
fn edge_scroll_dir(view: &BoardView, cell: Cell) -> Option<scroll::ScrollDir> {
    if cell.row == view.scroll_offset && view.scroll_offset > 0 {
        Some(scroll::ScrollDir::Up)
    } else if cell.row == view.last_visible_row()
        && view.scroll_offset + view.layout.visible_rows < view.params.rows
    {
        Some(scroll::ScrollDir::Down)
    } else {
        None
    }
}

fn dismiss_value_hint(view: &mut BoardView) -> bool {
    if let Some(rect) = view.overlays.hide(MiniWindowKind::ValueHint) {
        view.invalidate_rect(rect);
        view.dirty.clear_mini(MiniWindowKind::ValueHint);
        true
    } else {
        false
    }
}

/// A completed gesture that never changed descriptor identity.
fn dispatch_tap(view: &mut BoardView, ctx: &mut Ctx, tap: ObjDesc) -> bool {
    match tap {
        ObjDesc::TraySlot(slot) => {
            if view.tray_visibility == TrayVisibility::Revealed {
                tray::toggle_selection(view, ctx, slot)
            } else {
                tray::tap_advance_visibility(view, ctx)
            }
        }
        ObjDesc::Cell { col, row } => arrow::tap_board_cell(view, ctx, Cell::new(col, row)),
        ObjDesc::Divider | ObjDesc::None => false,
    }
}

/// Commit a moved gesture. Exactly one ending applies; every path returns
/// the session to idle and invalidates both origin and final descriptors.
fn commit_drag(view: &mut BoardView, ctx: &mut Ctx, session: DragSession, x: i32, y: i32) -> bool {
    match session.kind {
        // Scrolling and divider placement were applied live.
        DragKind::Board { .. } | DragKind::Divider => false,

        DragKind::HintRegion { anchor, last } => {
            // Clean up the rubber-band outline.
            for c in last.border_cells() {
                view.invalidate_cell(c);
            }
            let end = layout::cell_near(&view.params, &view.layout, view.scroll_offset, x, y);
            hint::commit_drag(view, ctx, anchor, end)
        }

        DragKind::Tile(_) => {
            let player = view.selected_player;
            let final_hit = hit_test(view, x, y);

            let committed = match final_hit {
                ObjDesc::TraySlot(dst) => match session.origin {
                    ObjDesc::TraySlot(src) if src != dst => {
                        ctx.model.move_within_tray(player, src, dst)
                    }
                    // Ended back on the origin slot: zero model mutations,
                    // the pre-drag selection highlight just comes back.
                    ObjDesc::TraySlot(_) => false,
                    ObjDesc::Cell { col, row } => {
                        let mcell = view.transform.to_model(Cell::new(col, row));
                        ctx.model.move_board_to_tray(player, mcell.col, mcell.row, dst)
                    }
                    _ => false,
                },
                ObjDesc::Cell { col, row } if !view.player().trading => {
                    let dest = Cell::new(col, row);
                    let mdest = view.transform.to_model(dest);
                    if ctx.model.tile_at(mdest.col, mdest.row).is_some() {
                        // Occupied cell: invalid drop, tile returns home.
                        false
                    } else {
                        let ok = match session.origin {
                            ObjDesc::TraySlot(src) => {
                                let ok = ctx
                                    .model
                                    .move_tray_to_board(player, src, mdest.col, mdest.row);
                                if ok {
                                    // The moved slot's selection state is stale.
                                    view.players[player].selected &= !(1 << src);
                                    view.dirty.mark_tray_slot(src);
                                }
                                ok
                            }
                            ObjDesc::Cell {
                                col: ocol,
                                row: orow,
                            } => {
                                let morigin = view.transform.to_model(Cell::new(ocol, orow));
                                ctx.model.move_board_to_board(
                                    player, morigin.col, morigin.row, mdest.col, mdest.row,
                                )
                            }
                            _ => false,
                        };
                        if ok {
                            arrow::hide_if_at(view, dest);
                        }
                        ok
                    }
                }
                _ => false,
            };

            if !committed {
                tracing::debug!(?final_hit, "tile drop not accepted, returning to origin");
            }
            // Tiles at both ends render differently now ("mid-drag" vs.
            // "settled").
            view.invalidate_obj(session.origin);
            view.invalidate_obj(session.current);
            view.invalidate_obj(final_hit);
            true
        }
    }
}
