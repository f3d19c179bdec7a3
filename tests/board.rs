//! Board-level tests - flip transposition, player selection, the game
//! clock, and display toggles.

mod common;

use common::Harness;
use crosstile::messages::{BoardMsg, ServerEvent, TimerMsg, TrayMsg};
use crosstile::model::geometry::Cell;
use crosstile::Msg;

#[test]
fn test_flip_twice_restores_everything() {
    let mut h = Harness::new();
    let (x, y) = h.cell_center(3, 8);
    h.tap(x, y);

    h.update(Msg::Board(BoardMsg::ToggleFlip));
    let arrow = h.view.player().arrow;
    assert_eq!((arrow.col, arrow.row), (8, 3));
    assert!(h.view.transform.is_flipped());

    h.update(Msg::Board(BoardMsg::ToggleFlip));
    let arrow = h.view.player().arrow;
    assert_eq!((arrow.col, arrow.row), (3, 8));
    assert!(!h.view.transform.is_flipped());
}

#[test]
fn test_flip_addresses_same_model_cell() {
    let mut h = Harness::new();
    h.model.place(2, 9, 'Z', false);
    h.update(Msg::Board(BoardMsg::ToggleFlip));
    h.drain_dirty();

    // The tile's glyph must appear at view cell (9,2) now.
    h.update(Msg::Model(crosstile::messages::ModelEvent::CellChanged { col: 2, row: 9 }));
    h.paint();
    let expected = h.view.cell_rect(Cell::new(9, 2)).unwrap();
    assert!(h
        .backend
        .cells
        .iter()
        .any(|(rect, content)| *rect == expected && content.glyph == Some('Z')));
}

#[test]
fn test_select_player_swaps_tray_and_markers() {
    let mut h = Harness::new();
    h.model.fill_tray(0, "RACKS");
    h.model.fill_tray(1, "MOUSE");
    h.reveal_tray();

    // Player 0 leaves an arrow behind.
    let (x, y) = h.cell_center(4, 4);
    h.tap(x, y);
    h.drain_dirty();

    assert!(h.update(Msg::Board(BoardMsg::SelectPlayer(1))));
    assert_eq!(h.view.selected_player, 1);
    // The new player's arrow state is independent.
    assert!(!h.view.player().arrow.visible);
    // Old arrow cell and the whole tray repaint.
    assert!(h.view.dirty.cell_dirty(4, 4));
    assert_eq!(h.view.dirty.tray_mask(), 0b111_1111);

    // Selecting the same player again changes nothing.
    assert!(!h.update(Msg::Board(BoardMsg::SelectPlayer(1))));
    // Out of range is refused.
    assert!(!h.update(Msg::Board(BoardMsg::SelectPlayer(5))));
}

#[test]
fn test_clock_tick_charges_running_player() {
    let mut h = Harness::new();
    h.server.turn = Some(1);
    h.drain_dirty();

    assert!(h.update(Msg::Timer(TimerMsg::ClockTick { seconds: 3 })));
    assert_eq!(h.view.players[1].time_budget, -3);
    assert_eq!(h.view.players[0].time_budget, 0);
    assert!(h.view.dirty.score_dirty());
    assert!(h.view.dirty.timer_dirty());
}

#[test]
fn test_clock_pause_nesting() {
    let mut h = Harness::new();
    // Only the outermost push/pop reach the host clock.
    h.view.push_clock_pause(&mut h.host);
    h.view.push_clock_pause(&mut h.host);
    h.view.pop_clock_pause(&mut h.host);
    assert_eq!(h.host.clock_running, vec![false]);
    h.view.pop_clock_pause(&mut h.host);
    assert_eq!(h.host.clock_running, vec![false, true]);

    // Ticks while paused are swallowed.
    h.view.clock_pause_depth = 1;
    assert!(!h.update(Msg::Timer(TimerMsg::ClockTick { seconds: 1 })));
}

#[test]
fn test_show_toggles_mark_board() {
    let mut h = Harness::new();
    h.drain_dirty();
    assert!(h.update(Msg::Board(BoardMsg::SetShowColors(false))));
    assert!(h.view.dirty.cell_dirty(0, 0));
    assert!(!h.update(Msg::Board(BoardMsg::SetShowColors(false))));

    h.drain_dirty();
    assert!(h.update(Msg::Board(BoardMsg::SetShowValues(true))));
    assert!(h.view.dirty.cell_dirty(7, 7));
    assert_ne!(h.view.dirty.tray_mask(), 0);
}

#[test]
fn test_turn_change_marks_score_and_timer() {
    let mut h = Harness::new();
    h.drain_dirty();
    assert!(h.update(Msg::Server(ServerEvent::TurnChanged)));
    assert!(h.view.dirty.score_dirty());
    assert!(h.view.dirty.timer_dirty());
}

#[test]
fn test_tray_change_marks_selected_players_tray() {
    let mut h = Harness::new();
    h.drain_dirty();

    // The other player's tray isn't displayed; only the score area moves.
    assert!(h.update(Msg::Model(crosstile::messages::ModelEvent::TrayChanged { player: 1 })));
    assert_eq!(h.view.dirty.tray_mask(), 0);
    assert!(h.view.dirty.score_dirty());

    h.drain_dirty();
    h.view.player_mut().divider = 9; // stale divider beyond the tray
    assert!(h.update(Msg::Model(crosstile::messages::ModelEvent::TrayChanged { player: 0 })));
    assert_eq!(h.view.dirty.tray_mask(), 0b111_1111);
    assert_eq!(h.view.player().divider, common::TRAY_SIZE);
}

#[test]
fn test_dictionary_change_resets_all_engines() {
    let mut h = Harness::new();
    h.update(Msg::Model(crosstile::messages::ModelEvent::DictionaryChanged));
    assert_eq!(h.host.engine_resets, vec![0, 1]);
}

#[test]
fn test_new_game_resets_player_state_not_geometry() {
    let mut h = Harness::new();
    h.reveal_tray();
    let (x, y) = h.cell_center(4, 4);
    h.tap(x, y);
    h.update(Msg::Tray(TrayMsg::SetDivider(3)));
    h.update(Msg::Board(BoardMsg::SetScrollOffset(1)));

    h.view.new_game();
    assert!(!h.view.player().arrow.visible);
    assert_eq!(h.view.player().divider, 0);
    // Geometry and scroll survive; a full repaint is queued.
    assert_eq!(h.view.scroll_offset, 1);
    assert!(h.view.dirty.cell_dirty(0, 1));
}
