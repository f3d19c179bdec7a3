//! Drag gesture session state.
//!
//! One state machine covers all four drop-target kinds (board cell, tray
//! slot, tray divider, hint region) because targets can change mid-gesture.
//! The session never owns a tile: tiles stay logically attached to their
//! origin (tray or board) until the drop commits through the game model.

use crate::host::Tile;

use super::geometry::{Cell, CellRegion};

/// Identity of the object under the pointer, as produced by hit-testing.
/// Board cells are in view coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ObjDesc {
    #[default]
    None,
    Cell {
        col: usize,
        row: usize,
    },
    TraySlot(usize),
    Divider,
}

impl ObjDesc {
    pub fn cell(col: usize, row: usize) -> Self {
        ObjDesc::Cell { col, row }
    }

    pub fn as_cell(&self) -> Option<Cell> {
        match self {
            ObjDesc::Cell { col, row } => Some(Cell::new(*col, *row)),
            _ => None,
        }
    }
}

/// What kind of drag is in flight, with per-kind working state.
#[derive(Debug, Clone, PartialEq)]
pub enum DragKind {
    /// A tile picked up from a tray slot or a pending board cell.
    Tile(Tile),
    /// Coarse board scrolling; motion is quantized to row steps.
    Board {
        /// Pointer y at gesture start, the quantization anchor.
        anchor_y: i32,
        /// Row steps already applied.
        steps_applied: i32,
    },
    /// Live divider repositioning.
    Divider,
    /// Rubber-band selection of a move-search hint region.
    HintRegion {
        anchor: Cell,
        last: CellRegion,
    },
}

/// A live gesture between pointer-down and the matching up/cancel.
#[derive(Debug, Clone, PartialEq)]
pub struct DragSession {
    pub kind: DragKind,
    pub origin: ObjDesc,
    pub current: ObjDesc,
    /// True once the descriptor identity has changed, not on mere pixel
    /// motion.
    pub moved: bool,
    /// An auto-scroll timer is armed for this gesture.
    pub auto_scroll: bool,
}

impl DragSession {
    pub fn new(kind: DragKind, origin: ObjDesc) -> Self {
        debug_assert!(origin != ObjDesc::None, "drag session needs an origin");
        Self {
            kind,
            origin,
            current: origin,
            moved: false,
            auto_scroll: false,
        }
    }

    pub fn is_tile(&self) -> bool {
        matches!(self.kind, DragKind::Tile(_))
    }
}
