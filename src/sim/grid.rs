//! Brick grid storage
//!
//! A level's bricks are a fixed 10-column grid of present/absent cells. Cells
//! only ever go from present to absent; a fresh grid is built per level.

use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::{BRICK_COLUMNS, BRICK_EXTRA_ROWS, BRICK_HEIGHT, BRICK_WIDTH};

/// Row-major grid of brick cells
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrickGrid {
    rows: usize,
    cells: Vec<bool>,
}

impl BrickGrid {
    /// Create a grid with `rows` rows, every cell present
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            cells: vec![true; rows * BRICK_COLUMNS],
        }
    }

    /// Grid for the given level (`level + 2` rows)
    pub fn for_level(level: u32) -> Self {
        Self::new((level + BRICK_EXTRA_ROWS) as usize)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn columns(&self) -> usize {
        BRICK_COLUMNS
    }

    /// Whether the cell still holds a brick (out of range reads as absent)
    pub fn is_present(&self, row: usize, col: usize) -> bool {
        self.index(row, col).is_some_and(|i| self.cells[i])
    }

    /// Knock a brick out. Returns true if it was present.
    pub fn clear(&mut self, row: usize, col: usize) -> bool {
        match self.index(row, col) {
            Some(i) if self.cells[i] => {
                self.cells[i] = false;
                true
            }
            _ => false,
        }
    }

    /// Number of bricks still standing
    pub fn remaining(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    /// Level-cleared condition
    pub fn is_cleared(&self) -> bool {
        self.cells.iter().all(|&c| !c)
    }

    /// Playfield rectangle of a cell
    pub fn brick_rect(row: usize, col: usize) -> Rect {
        Rect::new(
            col as f32 * BRICK_WIDTH,
            row as f32 * BRICK_HEIGHT,
            BRICK_WIDTH,
            BRICK_HEIGHT,
        )
    }

    /// Present cells in row-major order (top-to-bottom, left-to-right)
    pub fn present_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, present)| **present)
            .map(|(i, _)| (i / BRICK_COLUMNS, i % BRICK_COLUMNS))
    }

    fn index(&self, row: usize, col: usize) -> Option<usize> {
        (row < self.rows && col < BRICK_COLUMNS).then(|| row * BRICK_COLUMNS + col)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_grid_dimensions() {
        for level in 1..=5 {
            let grid = BrickGrid::for_level(level);
            assert_eq!(grid.columns(), 10);
            assert_eq!(grid.rows(), level as usize + 2);
            assert_eq!(grid.remaining(), grid.rows() * 10);
        }
    }

    #[test]
    fn test_clear_is_one_way() {
        let mut grid = BrickGrid::new(3);
        assert!(grid.clear(1, 4));
        assert!(!grid.is_present(1, 4));
        // Second clear is a no-op
        assert!(!grid.clear(1, 4));
        assert!(!grid.is_present(1, 4));
        assert_eq!(grid.remaining(), 29);
    }

    #[test]
    fn test_out_of_range_cells_are_absent() {
        let mut grid = BrickGrid::new(2);
        assert!(!grid.is_present(2, 0));
        assert!(!grid.is_present(0, 10));
        assert!(!grid.clear(5, 5));
    }

    #[test]
    fn test_cleared_after_last_brick() {
        let mut grid = BrickGrid::new(1);
        for col in 0..9 {
            grid.clear(0, col);
        }
        assert!(!grid.is_cleared());
        grid.clear(0, 9);
        assert!(grid.is_cleared());
        assert_eq!(grid.present_cells().count(), 0);
    }

    #[test]
    fn test_present_cells_row_major() {
        let mut grid = BrickGrid::new(2);
        grid.clear(0, 0);
        let first: Vec<_> = grid.present_cells().take(3).collect();
        assert_eq!(first, vec![(0, 1), (0, 2), (0, 3)]);
        assert_eq!(grid.present_cells().last(), Some((1, 9)));
    }

    #[test]
    fn test_brick_rect_layout() {
        let rect = BrickGrid::brick_rect(2, 3);
        assert_eq!(rect.x, 240.0);
        assert_eq!(rect.y, 60.0);
        assert_eq!(rect.w, 80.0);
        assert_eq!(rect.h, 30.0);
    }
}
