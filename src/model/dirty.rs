//! Dirty-region tracking for minimal redraw.
//!
//! The single source of truth for "what must be redrawn": one dynamically
//! sized column bitset per visible board row (view coordinates), a tray-slot
//! bitmask, and flags for the divider, score area, timer and each
//! mini-window. Marks are conservative; a bit is cleared only after the draw
//! backend reports the corresponding region as actually drawn.

use crate::overlay::MiniWindowKind;

/// A per-row column bitset, sized to the actual board width.
#[derive(Debug, Clone, Default)]
pub struct RowMask {
    words: Vec<u64>,
    cols: usize,
}

impl RowMask {
    pub fn new(cols: usize) -> Self {
        Self {
            words: vec![0; cols.div_ceil(64)],
            cols,
        }
    }

    #[inline]
    pub fn set(&mut self, col: usize) {
        debug_assert!(col < self.cols, "column {} out of range", col);
        if col < self.cols {
            self.words[col / 64] |= 1 << (col % 64);
        }
    }

    #[inline]
    pub fn clear(&mut self, col: usize) {
        if col < self.cols {
            self.words[col / 64] &= !(1 << (col % 64));
        }
    }

    #[inline]
    pub fn get(&self, col: usize) -> bool {
        col < self.cols && self.words[col / 64] & (1 << (col % 64)) != 0
    }

    pub fn set_all(&mut self) {
        for (i, word) in self.words.iter_mut().enumerate() {
            let bits_here = (self.cols - i * 64).min(64);
            *word = if bits_here == 64 {
                u64::MAX
            } else {
                (1u64 << bits_here) - 1
            };
        }
    }

    pub fn clear_all(&mut self) {
        self.words.fill(0);
    }

    pub fn any(&self) -> bool {
        self.words.iter().any(|w| *w != 0)
    }

    /// Iterate set columns in ascending order.
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        let cols = self.cols;
        self.words
            .iter()
            .enumerate()
            .flat_map(move |(i, word)| {
                let mut w = *word;
                std::iter::from_fn(move || {
                    if w == 0 {
                        return None;
                    }
                    let bit = w.trailing_zeros() as usize;
                    w &= w - 1;
                    Some(i * 64 + bit)
                })
            })
            .filter(move |c| *c < cols)
    }
}

/// The aggregate dirty state for one board view.
#[derive(Debug, Clone, Default)]
pub struct DirtyState {
    rows: Vec<RowMask>,
    cols: usize,
    tray: u32,
    divider: bool,
    score: bool,
    timer: bool,
    mini: [bool; MiniWindowKind::COUNT],
}

impl DirtyState {
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: vec![RowMask::new(cols); rows],
            cols,
            ..Default::default()
        }
    }

    /// Rebuild for a new board shape (flip or relayout). Everything is
    /// implicitly dirty afterwards; callers mark what they need.
    pub fn resize(&mut self, rows: usize, cols: usize) {
        self.rows = vec![RowMask::new(cols); rows];
        self.cols = cols;
    }

    pub fn mark_cell(&mut self, col: usize, row: usize) {
        if let Some(mask) = self.rows.get_mut(row) {
            mask.set(col);
        }
    }

    /// Mark an inclusive cell range, clipped against board bounds.
    pub fn mark_cells(&mut self, col0: usize, row0: usize, col1: usize, row1: usize) {
        if self.rows.is_empty() || self.cols == 0 {
            return;
        }
        for row in row0..=row1.min(self.rows.len() - 1) {
            for col in col0..=col1.min(self.cols - 1) {
                self.rows[row].set(col);
            }
        }
    }

    pub fn mark_all_tiles(&mut self) {
        for mask in &mut self.rows {
            mask.set_all();
        }
    }

    pub fn mark_row(&mut self, row: usize) {
        if let Some(mask) = self.rows.get_mut(row) {
            mask.set_all();
        }
    }

    pub fn clear_cell(&mut self, col: usize, row: usize) {
        if let Some(mask) = self.rows.get_mut(row) {
            mask.clear(col);
        }
    }

    pub fn clear_row(&mut self, row: usize) {
        if let Some(mask) = self.rows.get_mut(row) {
            mask.clear_all();
        }
    }

    #[inline]
    pub fn cell_dirty(&self, col: usize, row: usize) -> bool {
        self.rows.get(row).is_some_and(|m| m.get(col))
    }

    pub fn row_mask(&self, row: usize) -> Option<&RowMask> {
        self.rows.get(row)
    }

    pub fn mark_tray_slot(&mut self, slot: usize) {
        if slot < 32 {
            self.tray |= 1 << slot;
        }
    }

    pub fn mark_tray_mask(&mut self, mask: u32) {
        self.tray |= mask;
    }

    pub fn mark_tray_all(&mut self, tray_size: usize) {
        self.tray |= if tray_size >= 32 {
            u32::MAX
        } else {
            (1u32 << tray_size) - 1
        };
    }

    pub fn clear_tray_slot(&mut self, slot: usize) {
        if slot < 32 {
            self.tray &= !(1 << slot);
        }
    }

    #[inline]
    pub fn tray_mask(&self) -> u32 {
        self.tray
    }

    pub fn mark_divider(&mut self) {
        self.divider = true;
    }

    pub fn clear_divider(&mut self) {
        self.divider = false;
    }

    #[inline]
    pub fn divider_dirty(&self) -> bool {
        self.divider
    }

    pub fn mark_score(&mut self) {
        self.score = true;
    }

    pub fn clear_score(&mut self) {
        self.score = false;
    }

    #[inline]
    pub fn score_dirty(&self) -> bool {
        self.score
    }

    pub fn mark_timer(&mut self) {
        self.timer = true;
    }

    pub fn clear_timer(&mut self) {
        self.timer = false;
    }

    #[inline]
    pub fn timer_dirty(&self) -> bool {
        self.timer
    }

    pub fn mark_mini(&mut self, kind: MiniWindowKind) {
        self.mini[kind as usize] = true;
    }

    pub fn clear_mini(&mut self, kind: MiniWindowKind) {
        self.mini[kind as usize] = false;
    }

    #[inline]
    pub fn mini_dirty(&self, kind: MiniWindowKind) -> bool {
        self.mini[kind as usize]
    }

    /// Whether any region at all is marked.
    pub fn needs_redraw(&self) -> bool {
        self.tray != 0
            || self.divider
            || self.score
            || self.timer
            || self.mini.iter().any(|m| *m)
            || self.rows.iter().any(|m| m.any())
    }

    /// Whether anything inside the given visible row window is marked.
    pub fn needs_redraw_in(&self, first_row: usize, visible_rows: usize) -> bool {
        if self.tray != 0
            || self.divider
            || self.score
            || self.timer
            || self.mini.iter().any(|m| *m)
        {
            return true;
        }
        self.rows
            .iter()
            .skip(first_row)
            .take(visible_rows)
            .any(|m| m.any())
    }

}
