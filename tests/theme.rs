//! Theme loading tests.

use std::io::Write;

use crosstile::host::Bonus;
use crosstile::theme::{from_file, Color, Theme};

#[test]
fn test_default_theme_is_classic() {
    let theme = Theme::default();
    assert_eq!(theme.name, "Classic");
    // Bonus squares are distinct from the plain background.
    assert_ne!(theme.board.double_word, theme.board.empty);
    assert_ne!(theme.board.triple_word, theme.board.double_word);
}

#[test]
fn test_theme_from_yaml_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(
        file,
        r##"
name: Night

board:
  empty: "#202020"
  double_letter: "#104060"
  triple_letter: "#1060A0"
  double_word: "#601010"
  triple_word: "#A01010"
  tile: "#404040"
  tile_text: "#E0E0E0"
  pending_tile: "#505050"
  recent_tile: "#686030"
  arrow: "#80C080"
  hint_border: "#C0A040"

tray:
  slot: "#303030"
  slot_selected: "#585838"
  tile_text: "#E0E0E0"
  face_down: "#181818"
"##
    )
    .unwrap();

    let theme = from_file(file.path()).unwrap();
    assert_eq!(theme.name, "Night");
    assert_eq!(theme.board.empty, Color::rgb(0x20, 0x20, 0x20));
    assert_eq!(
        theme.bonus_color(Bonus::TripleWord, true),
        Color::rgb(0xA0, 0x10, 0x10)
    );
}

#[test]
fn test_malformed_theme_rejected() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "name: Broken\nboard:\n  empty: \"#xyz\"\n").unwrap();
    assert!(from_file(file.path()).is_err());
}
