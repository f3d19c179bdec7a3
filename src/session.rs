//! Persisted session record.
//!
//! A versioned, bit-packed, order-significant stream of the view state that
//! survives a session: scroll, flip, display toggles, per-player arrow /
//! divider / selection / trade state, optional keyboard-navigation and
//! hint-region fields, the selected player and the tray visibility. The
//! container (an external key/value store) owns the bytes and knows the
//! version they were written with; readers default any optional field a
//! pre-upgrade record lacks.
//!
//! Bits are packed LSB-first within each byte.

use anyhow::{bail, Result};

use crate::model::geometry::{Cell, CellRegion, Orientation};
use crate::model::{Arrow, BoardView, FocusOwner, FocusState, TrayVisibility};

/// First version with keyboard-navigation fields (focus state, board and
/// tray cursors).
pub const VERSION_KEYBOARD_NAV: u8 = 2;
/// First version with hint-region rectangles.
pub const VERSION_HINT_REGION: u8 = 3;
pub const CURRENT_VERSION: u8 = VERSION_HINT_REGION;

struct BitWriter {
    bytes: Vec<u8>,
    bit: usize,
}

impl BitWriter {
    fn new() -> Self {
        Self {
            bytes: Vec::new(),
            bit: 0,
        }
    }

    fn write(&mut self, value: u32, width: u32) {
        debug_assert!(width <= 32);
        debug_assert!(
            width == 32 || value < (1 << width),
            "value {} exceeds {} bits",
            value,
            width
        );
        for i in 0..width {
            if self.bit % 8 == 0 {
                self.bytes.push(0);
            }
            if value >> i & 1 != 0 {
                *self.bytes.last_mut().unwrap() |= 1 << (self.bit % 8);
            }
            self.bit += 1;
        }
    }

    fn write_bool(&mut self, value: bool) {
        self.write(value as u32, 1);
    }

    fn finish(self) -> Vec<u8> {
        self.bytes
    }
}

struct BitReader<'a> {
    bytes: &'a [u8],
    bit: usize,
}

impl<'a> BitReader<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, bit: 0 }
    }

    fn read(&mut self, width: u32) -> Result<u32> {
        let mut value = 0u32;
        for i in 0..width {
            let byte = self.bit / 8;
            if byte >= self.bytes.len() {
                bail!("session record truncated at bit {}", self.bit);
            }
            if self.bytes[byte] >> (self.bit % 8) & 1 != 0 {
                value |= 1 << i;
            }
            self.bit += 1;
        }
        Ok(value)
    }

    fn read_bool(&mut self) -> Result<bool> {
        Ok(self.read(1)? != 0)
    }
}

/// Per-player slice of the record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerRecord {
    pub arrow: Arrow,
    pub divider: usize,
    pub selected: u32,
    pub trading: bool,
    pub board_cursor: Cell,
    pub tray_cursor: usize,
    pub hint_region: Option<CellRegion>,
}

/// The complete serializable view state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionRecord {
    pub scroll_offset: usize,
    pub flipped: bool,
    pub game_over: bool,
    pub show_colors: bool,
    pub show_values: bool,
    pub focus_owner: FocusOwner,
    pub focus_dived: bool,
    pub score_cursor: usize,
    pub players: Vec<PlayerRecord>,
    pub selected_player: usize,
    pub tray_visibility: TrayVisibility,
}

impl SessionRecord {
    /// Snapshot the savable parts of a view.
    pub fn capture(view: &BoardView) -> Self {
        Self {
            scroll_offset: view.scroll_offset,
            flipped: view.transform.is_flipped(),
            game_over: view.game_over,
            show_colors: view.show_colors,
            show_values: view.show_values,
            focus_owner: view.focus.owner,
            focus_dived: view.focus.dived,
            score_cursor: view.focus.score_cursor,
            players: view
                .players
                .iter()
                .map(|p| PlayerRecord {
                    arrow: p.arrow,
                    divider: p.divider,
                    selected: p.selected,
                    trading: p.trading,
                    board_cursor: p.board_cursor,
                    tray_cursor: p.tray_cursor,
                    hint_region: p.hint_region,
                })
                .collect(),
            selected_player: view.selected_player,
            tray_visibility: view.tray_visibility,
        }
    }

    /// Restore a snapshot into a freshly constructed view. Everything
    /// restored is marked dirty; geometry is recomputed.
    pub fn apply(&self, view: &mut BoardView) {
        view.transform.set_flipped(self.flipped);
        if self.flipped {
            std::mem::swap(&mut view.params.rows, &mut view.params.cols);
            view.dirty.resize(view.params.rows, view.params.cols);
        }
        view.game_over = self.game_over;
        view.show_colors = self.show_colors;
        view.show_values = self.show_values;
        view.focus = FocusState {
            owner: self.focus_owner,
            dived: self.focus_dived,
            score_cursor: self.score_cursor,
        };
        for (state, rec) in view.players.iter_mut().zip(&self.players) {
            state.arrow = rec.arrow;
            state.divider = rec.divider;
            state.selected = rec.selected;
            state.trading = rec.trading;
            if state.trading {
                // The arrow is never visible while trading.
                state.arrow.visible = false;
            }
            state.board_cursor = rec.board_cursor;
            state.tray_cursor = rec.tray_cursor;
            state.hint_region = rec.hint_region;
        }
        if self.selected_player < view.players.len() {
            view.selected_player = self.selected_player;
        }
        view.tray_visibility = self.tray_visibility;

        view.relayout();
        let max = view.layout.max_scroll_offset(view.params.rows);
        view.scroll_offset = self.scroll_offset.min(max);
        view.dirty.mark_all_tiles();
        view.dirty.mark_tray_all(view.params.tray_size);
        view.dirty.mark_divider();
        view.dirty.mark_score();
        view.dirty.mark_timer();
    }

    /// Encode at a given version. Writing an old version drops the fields
    /// that version doesn't know about.
    pub fn encode(&self, version: u8) -> Vec<u8> {
        let mut w = BitWriter::new();
        w.write(self.scroll_offset.min(3) as u32, 2);
        w.write_bool(self.flipped);
        w.write_bool(self.game_over);
        w.write_bool(self.show_colors);
        w.write_bool(self.show_values);

        if version >= VERSION_KEYBOARD_NAV {
            w.write(self.focus_owner.bits(), 2);
            w.write_bool(self.focus_dived);
            w.write(self.score_cursor.min(7) as u32, 3);
        }

        for p in &self.players {
            w.write(p.arrow.col.min(31) as u32, 5);
            w.write(p.arrow.row.min(31) as u32, 5);
            w.write_bool(p.arrow.orientation == Orientation::Vertical);
            w.write_bool(p.arrow.visible);
            w.write(p.divider.min(15) as u32, 4);
            w.write(p.selected & 0xFF, 8);
            w.write_bool(p.trading);

            if version >= VERSION_KEYBOARD_NAV {
                w.write(p.board_cursor.col.min(31) as u32, 5);
                w.write(p.board_cursor.row.min(31) as u32, 5);
                w.write(p.tray_cursor.min(7) as u32, 3);
            }
            if version >= VERSION_HINT_REGION {
                w.write_bool(p.hint_region.is_some());
                if let Some(region) = p.hint_region {
                    w.write(region.left.min(15) as u32, 4);
                    w.write(region.top.min(15) as u32, 4);
                    w.write(region.right.min(15) as u32, 4);
                    w.write(region.bottom.min(15) as u32, 4);
                }
            }
        }

        w.write(self.selected_player.min(3) as u32, 2);
        w.write(self.tray_visibility.bits(), 2);
        w.finish()
    }

    /// Decode a record written at `version` for `num_players` players.
    /// Fields absent from older versions come back as defaults.
    pub fn decode(bytes: &[u8], version: u8, num_players: usize) -> Result<Self> {
        let mut r = BitReader::new(bytes);
        let mut rec = SessionRecord {
            scroll_offset: r.read(2)? as usize,
            flipped: r.read_bool()?,
            game_over: r.read_bool()?,
            show_colors: r.read_bool()?,
            show_values: r.read_bool()?,
            ..Default::default()
        };

        if version >= VERSION_KEYBOARD_NAV {
            rec.focus_owner = FocusOwner::from_bits(r.read(2)?);
            rec.focus_dived = r.read_bool()?;
            rec.score_cursor = r.read(3)? as usize;
        }

        for _ in 0..num_players {
            let mut p = PlayerRecord {
                arrow: Arrow {
                    col: r.read(5)? as usize,
                    row: r.read(5)? as usize,
                    orientation: if r.read_bool()? {
                        Orientation::Vertical
                    } else {
                        Orientation::Horizontal
                    },
                    visible: r.read_bool()?,
                },
                divider: r.read(4)? as usize,
                selected: r.read(8)?,
                trading: r.read_bool()?,
                ..Default::default()
            };

            if version >= VERSION_KEYBOARD_NAV {
                p.board_cursor = Cell::new(r.read(5)? as usize, r.read(5)? as usize);
                p.tray_cursor = r.read(3)? as usize;
            }
            if version >= VERSION_HINT_REGION && r.read_bool()? {
                let (left, top) = (r.read(4)? as usize, r.read(4)? as usize);
                let (right, bottom) = (r.read(4)? as usize, r.read(4)? as usize);
                if left <= right && top <= bottom {
                    p.hint_region = Some(CellRegion {
                        left,
                        top,
                        right,
                        bottom,
                    });
                }
            }
            rec.players.push(p);
        }

        rec.selected_player = r.read(2)? as usize;
        rec.tray_visibility = TrayVisibility::from_bits(r.read(2)?);
        Ok(rec)
    }
}
