//! Board coordinate domain
//!
//! Cells are addressed as `(x, y)` with `x` growing right and `y` growing down.
//! Positions outside the board are representable so that collision checks can
//! see a candidate head before it is committed.

use glam::IVec2;
use serde::Serialize;

use super::modes::EdgeBehavior;
use crate::consts::GRID_SIZE;

/// Fixed rectangular board, at least one cell on each side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct GridSpace {
    width: i32,
    height: i32,
}

impl Default for GridSpace {
    fn default() -> Self {
        Self::new(GRID_SIZE, GRID_SIZE)
    }
}

impl GridSpace {
    /// Sides below one cell are raised to one
    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: if width < 1 { 1 } else { width },
            height: if height < 1 { 1 } else { height },
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Number of cells on the board
    pub fn cell_count(&self) -> usize {
        (self.width * self.height) as usize
    }

    /// Toroidal addressing: fold any position back onto the board
    #[inline]
    pub fn wrap(&self, pos: IVec2) -> IVec2 {
        IVec2::new(pos.x.rem_euclid(self.width), pos.y.rem_euclid(self.height))
    }

    #[inline]
    pub fn in_bounds(&self, pos: IVec2) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// Produce the candidate head for a mode's edge behavior.
    ///
    /// Bounded modes leave the position untouched so the collision check can
    /// reject it; wrapping modes fold it back onto the board.
    pub fn resolve(&self, pos: IVec2, edges: EdgeBehavior) -> IVec2 {
        match edges {
            EdgeBehavior::Wrap => self.wrap(pos),
            EdgeBehavior::Bounded => pos,
        }
    }

    /// Every cell in row-major order
    pub fn cells(&self) -> impl Iterator<Item = IVec2> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| IVec2::new(x, y)))
    }
}
