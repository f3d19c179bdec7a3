//! View-core state - the complete per-session state of the board view.
//!
//! [`BoardView`] is the single owned context object: screen geometry, scroll
//! state, per-player UI state, the dirty tracker, the drag session and the
//! mini-window registry. It is constructed once per game session (fresh or
//! restored from a session record) and handed explicitly to every operation;
//! there are no ambient globals.

pub mod dirty;
pub mod drag;
pub mod geometry;
pub mod player;
pub mod transform;

pub use dirty::{DirtyState, RowMask};
pub use drag::{DragKind, DragSession, ObjDesc};
pub use geometry::{Cell, CellRegion, Orientation, Rect};
pub use player::{Arrow, PerPlayerState};
pub use transform::Transform;

use crate::config::ViewConfig;
use crate::overlay::OverlayManager;
use crate::theme::Theme;
use crate::view::layout::{self, Layout, LayoutParams};

/// Tray visibility, one state active per game at a time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrayVisibility {
    /// Tray area hidden behind the board (only possible when the board can
    /// visually obscure it).
    Hidden,
    /// Tray present but tiles face-down.
    #[default]
    Reversed,
    /// Tiles face-up and interactive.
    Revealed,
}

impl TrayVisibility {
    pub fn bits(self) -> u32 {
        match self {
            TrayVisibility::Hidden => 0,
            TrayVisibility::Reversed => 1,
            TrayVisibility::Revealed => 2,
        }
    }

    pub fn from_bits(bits: u32) -> Self {
        match bits {
            0 => TrayVisibility::Hidden,
            2 => TrayVisibility::Revealed,
            _ => TrayVisibility::Reversed,
        }
    }
}

/// Which area owns keyboard focus (keyboard-navigation capability).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusOwner {
    #[default]
    Board,
    Tray,
    Score,
}

impl FocusOwner {
    pub fn bits(self) -> u32 {
        match self {
            FocusOwner::Board => 0,
            FocusOwner::Tray => 1,
            FocusOwner::Score => 2,
        }
    }

    pub fn from_bits(bits: u32) -> Self {
        match bits {
            1 => FocusOwner::Tray,
            2 => FocusOwner::Score,
            _ => FocusOwner::Board,
        }
    }

    pub fn next(self) -> Self {
        match self {
            FocusOwner::Board => FocusOwner::Tray,
            FocusOwner::Tray => FocusOwner::Score,
            FocusOwner::Score => FocusOwner::Board,
        }
    }
}

/// Keyboard focus state, shared across players (the cursor locations
/// themselves are per-player).
#[derive(Debug, Clone, Copy, Default)]
pub struct FocusState {
    pub owner: FocusOwner,
    /// Focus has "dived" into the owning area (moves act inside it) rather
    /// than resting on it.
    pub dived: bool,
    pub score_cursor: usize,
}

/// The complete view state for one game session.
#[derive(Debug)]
pub struct BoardView {
    /// Capabilities and cosmetic defaults, resolved once at construction.
    pub config: ViewConfig,
    pub theme: Theme,
    /// Requested geometry (view-space row/col counts: swapped while flipped).
    pub params: LayoutParams,
    /// Derived geometry.
    pub layout: Layout,
    pub scroll_offset: usize,
    /// Scroll offset stashed while the tray is hidden, restored on unhide.
    pub saved_scroll: Option<usize>,
    pub transform: Transform,
    pub tray_visibility: TrayVisibility,
    /// Whose tray/cursor/trade state is displayed (not necessarily whose
    /// turn it is).
    pub selected_player: usize,
    pub players: Vec<PerPlayerState>,
    pub dirty: DirtyState,
    pub drag: Option<DragSession>,
    pub overlays: OverlayManager,
    /// Object under an unconsumed tap: set on pointer-down, consumed on
    /// pointer-up if the gesture never moved.
    pub pending_tap: ObjDesc,
    pub last_pointer_down: (i32, i32),
    /// Nested clock-pause counter; the host clock stops on 0->1 and restarts
    /// on 1->0.
    pub clock_pause_depth: u32,
    pub show_colors: bool,
    pub show_values: bool,
    /// Cached from the server's game-over callback.
    pub game_over: bool,
    pub focus: FocusState,
}

impl BoardView {
    pub fn new(config: ViewConfig, theme: Theme, params: LayoutParams, num_players: usize) -> Self {
        let show_colors = config.show_colors;
        let show_values = config.show_cell_values;
        let layout = Layout::compute(&params, true);
        // A fresh view has everything undrawn.
        let mut dirty = DirtyState::new(params.rows, params.cols);
        dirty.mark_all_tiles();
        dirty.mark_tray_all(params.tray_size);
        dirty.mark_divider();
        dirty.mark_score();
        dirty.mark_timer();
        Self {
            config,
            theme,
            layout,
            scroll_offset: 0,
            saved_scroll: None,
            transform: Transform::default(),
            tray_visibility: TrayVisibility::Reversed,
            selected_player: 0,
            players: vec![PerPlayerState::default(); num_players],
            dirty,
            drag: None,
            overlays: OverlayManager::new(),
            pending_tap: ObjDesc::None,
            last_pointer_down: (0, 0),
            clock_pause_depth: 0,
            show_colors,
            show_values,
            game_over: false,
            focus: FocusState::default(),
            params,
        }
    }

    /// Reset per-player state for a new game. Geometry and preferences
    /// persist; cursors, selections, trade state and hint regions do not.
    pub fn new_game(&mut self) {
        for player in &mut self.players {
            player.reset();
        }
        self.game_over = false;
        self.drag = None;
        self.pending_tap = ObjDesc::None;
        self.dirty.mark_all_tiles();
        self.dirty.mark_tray_all(self.params.tray_size);
        self.dirty.mark_score();
    }

    #[inline]
    pub fn tray_shown(&self) -> bool {
        self.tray_visibility != TrayVisibility::Hidden
    }

    #[inline]
    pub fn visible_rows(&self) -> usize {
        self.layout.visible_rows
    }

    /// Index of the last row inside the visible window.
    pub fn last_visible_row(&self) -> usize {
        (self.scroll_offset + self.layout.visible_rows).saturating_sub(1)
    }

    /// Recompute derived geometry and clamp the scroll offset to it.
    pub fn relayout(&mut self) {
        self.layout = Layout::compute(&self.params, self.tray_shown());
        let max = self.layout.max_scroll_offset(self.params.rows);
        if self.scroll_offset > max {
            self.scroll_offset = max;
        }
    }

    #[inline]
    pub fn player(&self) -> &PerPlayerState {
        &self.players[self.selected_player]
    }

    #[inline]
    pub fn player_mut(&mut self) -> &mut PerPlayerState {
        &mut self.players[self.selected_player]
    }

    /// Pixel rect of a view-space cell, if currently visible.
    pub fn cell_rect(&self, cell: Cell) -> Option<Rect> {
        layout::cell_rect(&self.params, &self.layout, self.scroll_offset, cell)
    }

    /// Mark one view-space cell dirty, cascading to any mini-window that
    /// overlaps it.
    pub fn invalidate_cell(&mut self, cell: Cell) {
        self.dirty.mark_cell(cell.col, cell.row);
        if let Some(rect) = self.cell_rect(cell) {
            for kind in self.overlays.intersecting(&rect) {
                self.dirty.mark_mini(kind);
            }
        }
    }

    /// Mark everything a pixel rect touches: board cells (clipped to the
    /// visible window), tray slots, divider, score and timer areas, plus any
    /// overlapping mini-window.
    pub fn invalidate_rect(&mut self, rect: Rect) {
        if let Some(board_part) = rect.intersect(&self.layout.board) {
            if let (Some(a), Some(b)) = (
                layout::cell_at(
                    &self.params,
                    &self.layout,
                    self.scroll_offset,
                    board_part.x,
                    board_part.y,
                ),
                layout::cell_at(
                    &self.params,
                    &self.layout,
                    self.scroll_offset,
                    board_part.right() - 1,
                    board_part.bottom() - 1,
                ),
            ) {
                self.dirty.mark_cells(a.col, a.row, b.col, b.row);
            }
        }
        if rect.intersects(&self.layout.tray) {
            for slot in 0..self.params.tray_size {
                if layout::tray_slot_rect(&self.params, &self.layout, slot)
                    .is_some_and(|r| r.intersects(&rect))
                {
                    self.dirty.mark_tray_slot(slot);
                }
            }
            self.dirty.mark_divider();
        }
        if rect.intersects(&self.layout.score) {
            self.dirty.mark_score();
        }
        if rect.intersects(&self.layout.timer) {
            self.dirty.mark_timer();
        }
        for kind in self.overlays.intersecting(&rect) {
            self.dirty.mark_mini(kind);
        }
    }

    /// Mark the object under a drag descriptor dirty.
    pub fn invalidate_obj(&mut self, obj: ObjDesc) {
        match obj {
            ObjDesc::None => {}
            ObjDesc::Cell { col, row } => self.invalidate_cell(Cell::new(col, row)),
            ObjDesc::TraySlot(slot) => self.dirty.mark_tray_slot(slot),
            ObjDesc::Divider => self.dirty.mark_divider(),
        }
    }

    /// Push a clock pause. Only the first push actually stops the host
    /// clock; nested pushes just deepen the counter.
    pub fn push_clock_pause(&mut self, host: &mut dyn crate::host::HostAdapter) {
        if self.clock_pause_depth == 0 {
            host.set_clock_running(false);
        }
        self.clock_pause_depth += 1;
    }

    /// Pop a clock pause; the matching last pop restarts the host clock.
    pub fn pop_clock_pause(&mut self, host: &mut dyn crate::host::HostAdapter) {
        debug_assert!(self.clock_pause_depth > 0, "unbalanced clock pause pop");
        if self.clock_pause_depth > 0 {
            self.clock_pause_depth -= 1;
            if self.clock_pause_depth == 0 {
                host.set_clock_running(true);
            }
        }
    }

    /// Debug-only consistency checks; release builds skip these entirely.
    pub fn assert_invariants(&self) {
        debug_assert!(
            self.scroll_offset + self.layout.visible_rows <= self.params.rows
                || self.layout.visible_rows == 0,
            "scroll window escapes board: offset {} + visible {} > rows {}",
            self.scroll_offset,
            self.layout.visible_rows,
            self.params.rows,
        );
        debug_assert!(self.selected_player < self.players.len());
        for player in &self.players {
            debug_assert!(player.divider <= self.params.tray_size);
            if player.trading {
                debug_assert!(!player.arrow.visible, "arrow shown while trading");
            }
            if let Some(region) = player.hint_region {
                debug_assert!(region.left <= region.right && region.top <= region.bottom);
            }
        }
        if let Some(session) = &self.drag {
            debug_assert!(session.origin != ObjDesc::None, "drag session without origin");
        }
    }
}
