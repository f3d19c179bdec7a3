//! Per-player view state.
//!
//! Each player keeps their own placement arrow, tray divider, trade
//! selection and (when the capabilities allow) hint region and keyboard
//! cursors. All of it is view-local; the game model never sees these.

use super::geometry::{Cell, CellRegion, Orientation};

/// The "type-to-place" insertion arrow: the cell the next placed tile will
/// land on, plus the direction subsequent tiles advance in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Arrow {
    pub col: usize,
    pub row: usize,
    pub orientation: Orientation,
    pub visible: bool,
}

impl Arrow {
    pub fn cell(&self) -> Cell {
        Cell::new(self.col, self.row)
    }

    pub fn is_at(&self, cell: Cell) -> bool {
        self.visible && self.col == cell.col && self.row == cell.row
    }
}

/// All view state belonging to one player. Reset on "new game"; otherwise
/// lives as long as the session.
#[derive(Debug, Clone)]
pub struct PerPlayerState {
    /// Placement arrow, in view coordinates.
    pub arrow: Arrow,
    /// Tray divider index, 0..=tray_size: slots left of it hold tiles kept
    /// from the previous turn, slots right of it freshly drawn ones.
    pub divider: usize,
    /// Trade mode: tray taps toggle selection-for-exchange.
    pub trading: bool,
    /// Bitmask of highlighted tray slots.
    pub selected: u32,
    /// Committed hint region in view coordinates, normalized. `None` when
    /// the player has no active region.
    pub hint_region: Option<CellRegion>,
    /// Host-granted permission to use hint regions at all.
    pub hint_allowed: bool,
    /// Keyboard-navigation board cursor, in view coordinates.
    pub board_cursor: Cell,
    /// Keyboard-navigation tray slot cursor.
    pub tray_cursor: usize,
    /// Remaining clock budget in seconds; may go negative on overtime.
    pub time_budget: i32,
}

impl Default for PerPlayerState {
    fn default() -> Self {
        Self {
            arrow: Arrow::default(),
            divider: 0,
            trading: false,
            selected: 0,
            hint_region: None,
            hint_allowed: true,
            board_cursor: Cell::default(),
            tray_cursor: 0,
            time_budget: 0,
        }
    }
}

impl PerPlayerState {
    /// Back to defaults for a fresh game.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    pub fn slot_selected(&self, slot: usize) -> bool {
        slot < 32 && self.selected & (1 << slot) != 0
    }

    pub fn toggle_slot(&mut self, slot: usize) {
        if slot < 32 {
            self.selected ^= 1 << slot;
        }
    }

    pub fn selected_count(&self) -> usize {
        self.selected.count_ones() as usize
    }

    /// The single selected slot, if exactly one is selected.
    pub fn sole_selected_slot(&self) -> Option<usize> {
        if self.selected.count_ones() == 1 {
            Some(self.selected.trailing_zeros() as usize)
        } else {
            None
        }
    }
}
