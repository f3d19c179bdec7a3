//! Model ↔ view coordinate transform.
//!
//! The board can be flipped to mirror it for alternate seating orientations.
//! A flip is a transpose of row/column addressing, not a rotation, so the
//! transform is its own inverse. Every component converts through here before
//! hit-testing or touching the dirty tracker; the game model always speaks in
//! unflipped (model) coordinates.

use super::geometry::{Cell, CellRegion};

#[derive(Debug, Clone, Copy, Default)]
pub struct Transform {
    flipped: bool,
}

impl Transform {
    pub fn new(flipped: bool) -> Self {
        Self { flipped }
    }

    #[inline]
    pub fn is_flipped(&self) -> bool {
        self.flipped
    }

    pub fn set_flipped(&mut self, flipped: bool) {
        self.flipped = flipped;
    }

    /// Map a model-space cell to view space.
    #[inline]
    pub fn to_view(&self, cell: Cell) -> Cell {
        if self.flipped {
            Cell::new(cell.row, cell.col)
        } else {
            cell
        }
    }

    /// Map a view-space cell to model space. The transpose is self-inverse,
    /// so this is the same operation as `to_view`.
    #[inline]
    pub fn to_model(&self, cell: Cell) -> Cell {
        self.to_view(cell)
    }

    /// Transpose a cell region between spaces. Normalization is preserved:
    /// swapping both corners of a sorted rect yields a sorted rect.
    pub fn map_region(&self, region: CellRegion) -> CellRegion {
        if self.flipped {
            CellRegion {
                left: region.top,
                top: region.left,
                right: region.bottom,
                bottom: region.right,
            }
        } else {
            region
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_when_not_flipped() {
        let t = Transform::new(false);
        let c = Cell::new(3, 9);
        assert_eq!(t.to_view(c), c);
        assert_eq!(t.to_model(c), c);
    }

    #[test]
    fn test_flip_is_self_inverse() {
        let t = Transform::new(true);
        let c = Cell::new(4, 11);
        assert_eq!(t.to_view(t.to_view(c)), c);
        assert_eq!(t.to_model(t.to_view(c)), c);
    }

    #[test]
    fn test_region_stays_normalized() {
        let t = Transform::new(true);
        let r = CellRegion::from_corners(Cell::new(2, 1), Cell::new(5, 5));
        let m = t.map_region(r);
        assert!(m.left <= m.right && m.top <= m.bottom);
        assert_eq!(t.map_region(m), r);
    }
}
