//! Session-record integration tests - capture/apply through a live view.

mod common;

use common::Harness;
use crosstile::messages::{BoardMsg, TrayMsg};
use crosstile::model::geometry::Orientation;
use crosstile::model::TrayVisibility;
use crosstile::session::{SessionRecord, CURRENT_VERSION};
use crosstile::Msg;

#[test]
fn test_capture_encode_decode_apply_round_trip() {
    let mut h = Harness::new();
    h.model.fill_tray(0, "RACKS");
    h.reveal_tray();

    // Build up some state: arrow, selection, divider, scroll, flip.
    let (x, y) = h.cell_center(7, 6);
    h.tap(x, y);
    h.tap(x, y); // vertical arrow at (7,6)
    let (sx, sy) = h.slot_center(2);
    h.tap(sx, sy);
    h.update(Msg::Tray(TrayMsg::SetDivider(4)));
    h.update(Msg::Board(BoardMsg::SetScrollOffset(2)));
    h.update(Msg::Board(BoardMsg::ToggleFlip));

    let record = SessionRecord::capture(&h.view);
    let bytes = record.encode(CURRENT_VERSION);
    let decoded = SessionRecord::decode(&bytes, CURRENT_VERSION, 2).unwrap();
    assert_eq!(decoded, record);

    // Apply into a fresh view over the same game.
    let mut g = Harness::new();
    decoded.apply(&mut g.view);

    assert!(g.view.transform.is_flipped());
    assert_eq!(g.view.tray_visibility, TrayVisibility::Revealed);
    let arrow = g.view.player().arrow;
    assert!(arrow.visible);
    // The flip transposed the arrow with the board.
    assert_eq!((arrow.col, arrow.row), (6, 7));
    assert_eq!(arrow.orientation, Orientation::Horizontal);
    assert!(g.view.player().slot_selected(2));
    assert_eq!(g.view.player().divider, 4);
    assert_eq!(g.view.scroll_offset, 2);

    // Everything restored is pending a repaint.
    assert!(g.view.dirty.cell_dirty(0, g.view.scroll_offset));
    assert_ne!(g.view.dirty.tray_mask(), 0);
}

#[test]
fn test_apply_clamps_scroll_to_geometry() {
    let mut h = Harness::new();
    h.update(Msg::Board(BoardMsg::SetScrollOffset(3)));
    let record = SessionRecord::capture(&h.view);

    // A view whose tray never obscured the board has no scroll range.
    let mut g = Harness::new();
    g.update(Msg::Tray(TrayMsg::Hide));
    let mut restored = record.clone();
    restored.tray_visibility = TrayVisibility::Hidden;
    restored.apply(&mut g.view);
    assert_eq!(g.view.scroll_offset, 0);
}

#[test]
fn test_apply_enforces_trading_arrow_invariant() {
    let mut record = SessionRecord::default();
    record.players = vec![Default::default(), Default::default()];
    record.players[0].trading = true;
    record.players[0].arrow.visible = true;

    let mut h = Harness::new();
    record.apply(&mut h.view);
    assert!(h.view.player().trading);
    assert!(!h.view.player().arrow.visible);
}
