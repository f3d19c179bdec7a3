//! Keyboard-navigation tests - focus cycling, cursor movement with
//! window-edge scrolling, delete-takes-back, capability gating.

mod common;

use common::Harness;
use crosstile::messages::{Direction, NavKey};
use crosstile::model::FocusOwner;
use crosstile::{Msg, ViewConfig};

fn kb_harness() -> Harness {
    let config = ViewConfig {
        keyboard_nav: true,
        ..Default::default()
    };
    Harness::with_config(config)
}

#[test]
fn test_raise_focus_cycles_areas() {
    let mut h = kb_harness();
    assert_eq!(h.view.focus.owner, FocusOwner::Board);
    assert!(h.update(Msg::key_down(NavKey::RaiseFocus)));
    assert_eq!(h.view.focus.owner, FocusOwner::Tray);
    h.update(Msg::key_down(NavKey::RaiseFocus));
    h.update(Msg::key_down(NavKey::RaiseFocus));
    assert_eq!(h.view.focus.owner, FocusOwner::Board);
}

#[test]
fn test_raise_focus_undives_first() {
    let mut h = kb_harness();
    h.update(Msg::key_down(NavKey::Confirm)); // dive into the board
    assert!(h.view.focus.dived);
    h.update(Msg::key_down(NavKey::RaiseFocus));
    assert!(!h.view.focus.dived);
    assert_eq!(h.view.focus.owner, FocusOwner::Board);
}

#[test]
fn test_board_cursor_scrolls_at_window_edge() {
    let mut h = kb_harness();
    h.update(Msg::key_down(NavKey::Confirm));

    // Walk the cursor to the bottom of the 12-row window, then one more.
    for _ in 0..11 {
        assert!(h.update(Msg::key_down(NavKey::Move(Direction::Down))));
    }
    assert_eq!(h.view.player().board_cursor.row, 11);
    assert_eq!(h.view.scroll_offset, 0);

    // Crossing the boundary scrolls instead of refusing.
    assert!(h.update(Msg::key_down(NavKey::Move(Direction::Down))));
    assert_eq!(h.view.player().board_cursor.row, 12);
    assert_eq!(h.view.scroll_offset, 1);

    // Jump to the far edge scrolls the rest of the way.
    assert!(h.update(Msg::key_down(NavKey::Jump(Direction::Down))));
    assert_eq!(h.view.player().board_cursor.row, 14);
    assert_eq!(h.view.scroll_offset, 3);

    // At the board edge there is nowhere further to go.
    assert!(!h.update(Msg::key_down(NavKey::Move(Direction::Down))));
}

#[test]
fn test_tray_cursor_moves_and_jumps() {
    let mut h = kb_harness();
    h.update(Msg::key_down(NavKey::RaiseFocus)); // focus tray
    h.update(Msg::key_down(NavKey::Confirm)); // dive

    assert!(h.update(Msg::key_down(NavKey::Move(Direction::Right))));
    assert_eq!(h.view.player().tray_cursor, 1);
    assert!(h.update(Msg::key_down(NavKey::Jump(Direction::Right))));
    assert_eq!(h.view.player().tray_cursor, common::TRAY_SIZE - 1);
    assert!(h.update(Msg::key_down(NavKey::Jump(Direction::Left))));
    assert_eq!(h.view.player().tray_cursor, 0);
    assert!(!h.update(Msg::key_down(NavKey::Move(Direction::Left))));
}

#[test]
fn test_delete_takes_back_pending_tile() {
    let mut h = kb_harness();
    h.model.place(2, 0, 'C', true);
    h.update(Msg::key_down(NavKey::Confirm));
    h.update(Msg::key_down(NavKey::Move(Direction::Right)));
    h.update(Msg::key_down(NavKey::Move(Direction::Right)));
    assert_eq!(h.view.player().board_cursor.col, 2);

    assert!(h.update(Msg::key_down(NavKey::Delete)));
    assert!(h.model.board.is_empty());
    assert_eq!(h.model.trays[0][0].map(|t| t.face), Some('C'));

    // Nothing pending under the cursor now.
    assert!(!h.update(Msg::key_down(NavKey::Delete)));
}

#[test]
fn test_score_focus_selects_player() {
    let mut h = kb_harness();
    h.update(Msg::key_down(NavKey::RaiseFocus));
    h.update(Msg::key_down(NavKey::RaiseFocus)); // focus score
    assert_eq!(h.view.focus.owner, FocusOwner::Score);
    h.update(Msg::key_down(NavKey::Confirm)); // dive

    assert!(h.update(Msg::key_down(NavKey::Move(Direction::Down))));
    assert_eq!(h.view.focus.score_cursor, 1);
    assert!(h.update(Msg::key_down(NavKey::Confirm)));
    assert_eq!(h.view.selected_player, 1);
}

#[test]
fn test_keys_ignored_without_capability() {
    let mut h = Harness::new();
    assert!(!h.update(Msg::key_down(NavKey::RaiseFocus)));
    assert!(!h.update(Msg::key_down(NavKey::Move(Direction::Down))));
    assert_eq!(h.view.focus.owner, FocusOwner::Board);
}
