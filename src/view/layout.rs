//! Board/tray layout computation.
//!
//! A single source of truth for how the board, tray, score and timer areas
//! divide the window. All functions here are pure and shared between the
//! redraw pass and hit-testing, so the two can never disagree about where a
//! cell is.
//!
//! Policy: the tray sits below or overlapping the board's bottom, never
//! above. If the board's natural height exceeds the space above the tray,
//! the board is cut to a whole number of rows (never a partial row) and
//! scrolling becomes necessary. A hidden tray that overlaps the board frees
//! its vertical space for additional visible rows.

use crate::model::geometry::{Cell, Rect};

/// Requested geometry, as configured by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutParams {
    /// Top-left corner of the board grid.
    pub board_x: i32,
    pub board_y: i32,
    /// Cell scale in pixels.
    pub hscale: u32,
    pub vscale: u32,
    /// Board shape in view coordinates (swapped when flipped).
    pub rows: usize,
    pub cols: usize,
    /// Requested tray / score / timer areas.
    pub tray: Rect,
    pub score: Rect,
    pub timer: Rect,
    pub tray_size: usize,
}

impl LayoutParams {
    /// Full (unscrolled) board extent.
    pub fn full_board_rect(&self) -> Rect {
        Rect::new(
            self.board_x,
            self.board_y,
            self.cols as u32 * self.hscale,
            self.rows as u32 * self.vscale,
        )
    }
}

/// Derived geometry, recomputed whenever scale, flip, scroll or tray
/// visibility changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Layout {
    /// Visible board portion: whole rows only.
    pub board: Rect,
    pub tray: Rect,
    pub score: Rect,
    pub timer: Rect,
    pub visible_rows: usize,
    /// The requested tray area intersects the full board extent.
    pub tray_overlaps_board: bool,
    /// The full board extent covers the tray area entirely, so hiding the
    /// tray behind the board is geometrically possible.
    pub board_obscures_tray: bool,
}

impl Layout {
    pub fn compute(params: &LayoutParams, tray_shown: bool) -> Layout {
        let full = params.full_board_rect();
        let tray_overlaps_board = params.tray.intersects(&full);
        let board_obscures_tray = full.intersect(&params.tray) == Some(params.tray);

        // Vertical space available to the board: down to the tray top while
        // the tray is shown, down to the tray bottom once it is hidden.
        let limit_y = if tray_shown {
            params.tray.y
        } else {
            params.tray.bottom()
        };
        let avail = (limit_y - params.board_y).max(0) as u32;
        let visible_rows = (avail / params.vscale.max(1)) as usize;
        let visible_rows = visible_rows.min(params.rows);

        Layout {
            board: Rect::new(
                params.board_x,
                params.board_y,
                params.cols as u32 * params.hscale,
                visible_rows as u32 * params.vscale,
            ),
            tray: params.tray,
            score: params.score,
            timer: params.timer,
            visible_rows,
            tray_overlaps_board,
            board_obscures_tray,
        }
    }

    /// Highest scroll offset this layout admits for the given board height.
    pub fn max_scroll_offset(&self, total_rows: usize) -> usize {
        total_rows.saturating_sub(self.visible_rows)
    }
}

/// Pixel rect of a view-space cell, or `None` when the row is scrolled out
/// of the visible window.
pub fn cell_rect(
    params: &LayoutParams,
    layout: &Layout,
    scroll_offset: usize,
    cell: Cell,
) -> Option<Rect> {
    if cell.col >= params.cols || cell.row >= params.rows {
        return None;
    }
    if cell.row < scroll_offset || cell.row >= scroll_offset + layout.visible_rows {
        return None;
    }
    let visual_row = cell.row - scroll_offset;
    Some(Rect::new(
        params.board_x + (cell.col as u32 * params.hscale) as i32,
        params.board_y + (visual_row as u32 * params.vscale) as i32,
        params.hscale,
        params.vscale,
    ))
}

/// The view-space cell under a pixel position, if any.
pub fn cell_at(
    params: &LayoutParams,
    layout: &Layout,
    scroll_offset: usize,
    x: i32,
    y: i32,
) -> Option<Cell> {
    if !layout.board.contains(x, y) {
        return None;
    }
    let col = ((x - params.board_x) / params.hscale.max(1) as i32) as usize;
    let visual_row = ((y - params.board_y) / params.vscale.max(1) as i32) as usize;
    let row = visual_row + scroll_offset;
    if col < params.cols && row < params.rows {
        Some(Cell::new(col, row))
    } else {
        None
    }
}

/// The view-space cell nearest a pixel position, clamping into board
/// bounds. Used while rubber-banding a hint region so the candidate rect
/// keeps tracking a pointer that leaves the board.
pub fn cell_near(params: &LayoutParams, layout: &Layout, scroll_offset: usize, x: i32, y: i32) -> Cell {
    let x = x.clamp(layout.board.x, layout.board.right() - 1);
    let y = y.clamp(layout.board.y, layout.board.bottom().max(layout.board.y + 1) - 1);
    let col = (((x - params.board_x) / params.hscale.max(1) as i32) as usize).min(params.cols - 1);
    let visual_row = ((y - params.board_y) / params.vscale.max(1) as i32) as usize;
    let row = (visual_row + scroll_offset).min(params.rows - 1);
    Cell::new(col, row)
}

/// Pixel rect of a tray slot.
pub fn tray_slot_rect(params: &LayoutParams, layout: &Layout, slot: usize) -> Option<Rect> {
    if slot >= params.tray_size {
        return None;
    }
    let slot_w = layout.tray.width / params.tray_size.max(1) as u32;
    Some(Rect::new(
        layout.tray.x + (slot as u32 * slot_w) as i32,
        layout.tray.y,
        slot_w,
        layout.tray.height,
    ))
}

/// The tray slot under a pixel position.
pub fn tray_slot_at(params: &LayoutParams, layout: &Layout, x: i32, y: i32) -> Option<usize> {
    if !layout.tray.contains(x, y) {
        return None;
    }
    let slot_w = layout.tray.width / params.tray_size.max(1) as u32;
    if slot_w == 0 {
        return None;
    }
    let slot = ((x - layout.tray.x) / slot_w as i32) as usize;
    (slot < params.tray_size).then_some(slot)
}

/// Pixel rect of the divider at its current position.
pub fn divider_rect(params: &LayoutParams, layout: &Layout, divider: usize) -> Rect {
    let slot_w = layout.tray.width / params.tray_size.max(1) as u32;
    let x = layout.tray.x + (divider.min(params.tray_size) as u32 * slot_w) as i32;
    Rect::new(x - 1, layout.tray.y, 3, layout.tray.height)
}

/// Slop in pixels added to each side of the divider's visual rect so it can
/// actually be grabbed.
pub const DIVIDER_GRAB_SLOP: i32 = 4;

/// Whether a pixel position hits the (widened) divider grab band.
pub fn divider_hit(params: &LayoutParams, layout: &Layout, divider: usize, x: i32, y: i32) -> bool {
    let rect = divider_rect(params, layout, divider);
    x >= rect.x - DIVIDER_GRAB_SLOP
        && x < rect.right() + DIVIDER_GRAB_SLOP
        && y >= rect.y
        && y < rect.bottom()
}

/// Divider position (a slot boundary, 0..=tray_size) nearest a pixel x.
pub fn divider_position_near(params: &LayoutParams, layout: &Layout, x: i32) -> usize {
    let slot_w = layout.tray.width / params.tray_size.max(1) as u32;
    if slot_w == 0 {
        return 0;
    }
    let rel = (x - layout.tray.x).max(0) as u32;
    let pos = ((rel + slot_w / 2) / slot_w) as usize;
    pos.min(params.tray_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params_15x15() -> LayoutParams {
        LayoutParams {
            board_x: 0,
            board_y: 0,
            hscale: 20,
            vscale: 20,
            rows: 15,
            cols: 15,
            // Tray overlapping the board's last three rows.
            tray: Rect::new(0, 240, 300, 60),
            score: Rect::new(300, 0, 80, 200),
            timer: Rect::new(300, 200, 80, 40),
            tray_size: 7,
        }
    }

    #[test]
    fn test_whole_rows_only() {
        let params = params_15x15();
        let layout = Layout::compute(&params, true);
        // 240px above the tray at 20px per row: exactly 12 rows.
        assert_eq!(layout.visible_rows, 12);
        assert_eq!(layout.board.height, 240);
        assert_eq!(layout.max_scroll_offset(15), 3);
    }

    #[test]
    fn test_hidden_tray_frees_rows() {
        let params = params_15x15();
        let layout = Layout::compute(&params, false);
        assert_eq!(layout.visible_rows, 15);
        assert_eq!(layout.max_scroll_offset(15), 0);
    }

    #[test]
    fn test_overlap_flags() {
        let params = params_15x15();
        let layout = Layout::compute(&params, true);
        assert!(layout.tray_overlaps_board);
        assert!(layout.board_obscures_tray);

        // Tray fully below the board: no overlap, hiding impossible.
        let mut below = params;
        below.tray = Rect::new(0, 320, 300, 60);
        let layout = Layout::compute(&below, true);
        assert!(!layout.tray_overlaps_board);
        assert!(!layout.board_obscures_tray);
        assert_eq!(layout.visible_rows, 15);
    }

    #[test]
    fn test_cell_rect_respects_scroll() {
        let params = params_15x15();
        let layout = Layout::compute(&params, true);
        // Scrolled down 3 rows: row 2 is off-screen, row 3 is at the top.
        assert_eq!(cell_rect(&params, &layout, 3, Cell::new(0, 2)), None);
        assert_eq!(
            cell_rect(&params, &layout, 3, Cell::new(0, 3)),
            Some(Rect::new(0, 0, 20, 20))
        );
        assert_eq!(
            cell_rect(&params, &layout, 3, Cell::new(4, 14)),
            Some(Rect::new(80, 220, 20, 20))
        );
    }

    #[test]
    fn test_cell_at_round_trips() {
        let params = params_15x15();
        let layout = Layout::compute(&params, true);
        let cell = Cell::new(7, 9);
        let rect = cell_rect(&params, &layout, 3, cell).unwrap();
        assert_eq!(
            cell_at(&params, &layout, 3, rect.x + 5, rect.y + 5),
            Some(cell)
        );
    }

    #[test]
    fn test_tray_slots_and_divider() {
        let params = params_15x15();
        let layout = Layout::compute(&params, true);
        let slot3 = tray_slot_rect(&params, &layout, 3).unwrap();
        assert_eq!(
            tray_slot_at(&params, &layout, slot3.x + 2, slot3.y + 2),
            Some(3)
        );
        // Divider at boundary 2, grab band is widened.
        let d = divider_rect(&params, &layout, 2);
        assert!(divider_hit(&params, &layout, 2, d.x - DIVIDER_GRAB_SLOP, d.y + 1));
        assert!(!divider_hit(&params, &layout, 2, d.x - DIVIDER_GRAB_SLOP - 6, d.y + 1));
        // Rounding to nearest boundary.
        assert_eq!(divider_position_near(&params, &layout, 0), 0);
        let slot_w = (layout.tray.width / 7) as i32;
        assert_eq!(divider_position_near(&params, &layout, slot_w * 2 + 3), 2);
        assert_eq!(divider_position_near(&params, &layout, i32::MAX / 2), 7);
    }
}
