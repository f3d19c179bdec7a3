//! The redraw pass.
//!
//! Walks the dirty state and asks the host's `DrawBackend` to redraw exactly
//! what is marked. A backend may report any call as "not completed"; the
//! corresponding dirty bit is then retained and the host retries on its next
//! opportunity - expected behavior, not an error. Redraw is only ever
//! triggered from the host's main loop; update calls never paint.

use crate::host::{
    CellContent, DrawBackend, GameModel, GameServer, MiniWindowContent, ScoreContent,
    TimerContent, TraySlotContent,
};
use crate::model::drag::ObjDesc;
use crate::model::geometry::Cell;
use crate::model::{BoardView, TrayVisibility};
use crate::overlay::MiniWindowKind;

use super::layout;

/// Redraw everything marked dirty. Returns `true` when the visible window
/// is fully clean afterwards; `false` means some draw call reported "not
/// completed" and another pass is needed.
pub fn paint(
    view: &mut BoardView,
    model: &dyn GameModel,
    server: &dyn GameServer,
    backend: &mut dyn DrawBackend,
) -> bool {
    paint_board(view, model, backend);
    paint_tray(view, model, backend);
    paint_score(view, model, server, backend);
    paint_timer(view, server, backend);
    paint_minis(view, backend);

    !view
        .dirty
        .needs_redraw_in(view.scroll_offset, view.layout.visible_rows)
}

fn paint_board(view: &mut BoardView, model: &dyn GameModel, backend: &mut dyn DrawBackend) {
    let first = view.scroll_offset;
    let last = first + view.layout.visible_rows;
    for row in first..last {
        let cols: Vec<usize> = match view.dirty.row_mask(row) {
            Some(mask) => mask.iter_set().collect(),
            None => continue,
        };
        for col in cols {
            let cell = Cell::new(col, row);
            let Some(rect) = view.cell_rect(cell) else {
                view.dirty.clear_cell(col, row);
                continue;
            };
            let content = cell_content(view, model, cell);
            if backend.draw_cell(rect, &content) {
                view.dirty.clear_cell(col, row);
            }
        }
    }
}

/// Build the content descriptor for one view-space cell.
fn cell_content(view: &BoardView, model: &dyn GameModel, cell: Cell) -> CellContent {
    let mcell = view.transform.to_model(cell);
    let tile = model.tile_at(mcell.col, mcell.row);
    let bonus = model.bonus_at(mcell.col, mcell.row);
    let player = view.player();

    let drag_source = view
        .drag
        .as_ref()
        .is_some_and(|s| s.is_tile() && s.origin == ObjDesc::cell(cell.col, cell.row));

    let hint_border = player.hint_region.is_some_and(|r| {
        r.contains(cell)
            && (cell.col == r.left || cell.col == r.right || cell.row == r.top
                || cell.row == r.bottom)
    });

    let arrow = if tile.is_none() && player.arrow.is_at(cell) {
        Some(player.arrow.orientation)
    } else {
        None
    };

    let theme = &view.theme;
    let bg = match tile {
        Some(t) if t.pending => theme.board.pending_tile,
        Some(t) if t.recent => theme.board.recent_tile,
        Some(_) => theme.board.tile,
        None => theme.bonus_color(bonus, view.show_colors),
    };

    CellContent {
        glyph: tile.map(|t| t.tile.face),
        value: tile.and_then(|t| {
            view.show_values.then(|| model.tile_value(t.tile))
        }),
        bonus,
        blank: tile.is_some_and(|t| t.tile.is_blank),
        pending: tile.is_some_and(|t| t.pending),
        recent: tile.is_some_and(|t| t.recent),
        drag_source,
        hint_border,
        arrow,
        bg,
        fg: theme.board.tile_text,
    }
}

fn paint_tray(view: &mut BoardView, model: &dyn GameModel, backend: &mut dyn DrawBackend) {
    if view.tray_visibility == TrayVisibility::Hidden {
        // Nothing to draw behind the board; the cells on top carry the bits.
        for slot in 0..view.params.tray_size {
            view.dirty.clear_tray_slot(slot);
        }
        view.dirty.clear_divider();
        return;
    }

    let face_up = view.tray_visibility == TrayVisibility::Revealed;
    let mask = view.dirty.tray_mask();
    for slot in 0..view.params.tray_size {
        if mask & (1 << slot) == 0 {
            continue;
        }
        let Some(rect) = layout::tray_slot_rect(&view.params, &view.layout, slot) else {
            view.dirty.clear_tray_slot(slot);
            continue;
        };
        let tile = model.tray_tile(view.selected_player, slot);
        let player = view.player();
        let selected = player.slot_selected(slot);
        let drag_source = view
            .drag
            .as_ref()
            .is_some_and(|s| s.is_tile() && s.origin == ObjDesc::TraySlot(slot));
        let theme = &view.theme;
        let content = TraySlotContent {
            tile: if face_up { tile } else { None },
            value: if face_up {
                tile.map(|t| model.tile_value(t))
            } else {
                None
            },
            face_up,
            selected,
            drag_source,
            bg: if !face_up {
                theme.tray.face_down
            } else if selected {
                theme.tray.slot_selected
            } else {
                theme.tray.slot
            },
            fg: theme.tray.tile_text,
        };
        if backend.draw_tray_slot(rect, slot, &content) {
            view.dirty.clear_tray_slot(slot);
        }
    }

    // Divider only exists visually while the tray is revealed.
    if view.dirty.divider_dirty() {
        if face_up {
            let rect = layout::divider_rect(&view.params, &view.layout, view.player().divider);
            if backend.draw_divider(rect) {
                view.dirty.clear_divider();
            }
        } else {
            view.dirty.clear_divider();
        }
    }
}

fn paint_score(
    view: &mut BoardView,
    model: &dyn GameModel,
    server: &dyn GameServer,
    backend: &mut dyn DrawBackend,
) {
    if !view.dirty.score_dirty() {
        return;
    }
    let content = ScoreContent {
        turn: server.turn(),
        selected_player: view.selected_player,
        pool_remaining: server.pool_count(),
        pending_tiles: model.pending_count(view.selected_player),
        game_over: server.game_over(),
    };
    if backend.draw_score(view.layout.score, &content) {
        view.dirty.clear_score();
    }
}

fn paint_timer(view: &mut BoardView, server: &dyn GameServer, backend: &mut dyn DrawBackend) {
    if !view.dirty.timer_dirty() {
        return;
    }
    let player = server.turn().unwrap_or(view.selected_player);
    debug_assert!(player < view.players.len());
    let content = TimerContent {
        player,
        seconds_remaining: view.players.get(player).map_or(0, |p| p.time_budget),
    };
    if backend.draw_timer(view.layout.timer, &content) {
        view.dirty.clear_timer();
    }
}

fn paint_minis(view: &mut BoardView, backend: &mut dyn DrawBackend) {
    for kind in [MiniWindowKind::TradeSummary, MiniWindowKind::ValueHint] {
        if !view.dirty.mini_dirty(kind) {
            continue;
        }
        match view.overlays.get(kind) {
            Some(win) => {
                let content = MiniWindowContent {
                    text: win.text.clone(),
                };
                let rect = win.rect;
                if backend.draw_mini_window(rect, &content) {
                    view.dirty.clear_mini(kind);
                }
            }
            // Window already torn down; the cells underneath carry the bits.
            None => view.dirty.clear_mini(kind),
        }
    }
}
