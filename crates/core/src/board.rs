//! Board module - manages the locked-cell grid
//!
//! The board is a `width x height` grid where each cell is either empty or
//! locked. Uses a flat row-major vector so rows can be shifted with
//! `copy_within`.
//! Coordinates: (x, y) where x grows left to right and y grows top to bottom.
//! Rows above the top (`y < 0`) are off-board; pieces may hang there but never lock there.

use thiserror::Error;

use crate::piece::Piece;
use crate::shape::Shape;
use crate::types::CellValue;

/// Why a piece could not be committed to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LockError {
    /// A block sits above the visible ceiling; the game is over
    #[error("block at ({x}, {y}) is above the ceiling")]
    AboveCeiling { x: i32, y: i32 },
    /// A block is off the sides/floor or overlaps a locked cell
    #[error("block at ({x}, {y}) is blocked")]
    Blocked { x: i32, y: i32 },
}

/// The locked-cell grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x); `true` = locked
    cells: Vec<bool>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<CellValue> {
        self.index(x, y).map(|idx| {
            if self.cells[idx] {
                CellValue::Locked
            } else {
                CellValue::Empty
            }
        })
    }

    /// Set cell at position (x, y) to locked or empty
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, locked: bool) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = locked;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and locked
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        matches!(self.get(x, y), Some(CellValue::Locked))
    }

    /// Check whether `shape` fits with its top-left cell at (`x`, `y`).
    ///
    /// A block fails when its column is outside the board, its row is at or
    /// below the floor, or it lands on a locked cell. Blocks above the ceiling
    /// never fail.
    pub fn is_valid_position(&self, shape: &Shape, x: i32, y: i32) -> bool {
        shape.cells().iter().all(|&(dx, dy)| {
            let (px, py) = (x + dx, y + dy);
            if px < 0 || px as usize >= self.width {
                return false;
            }
            if py >= 0 && py as usize >= self.height {
                return false;
            }
            py < 0 || !self.is_occupied(px, py)
        })
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        if y >= self.height {
            return false;
        }
        let start = y * self.width;
        self.cells[start..start + self.width].iter().all(|&c| c)
    }

    /// Clear a row and shift all rows above it down by one.
    /// The top row becomes empty.
    pub fn clear_row(&mut self, y: usize) {
        if y >= self.height {
            return;
        }

        let width = self.width;
        for row in (1..=y).rev() {
            let src_start = (row - 1) * width;
            self.cells
                .copy_within(src_start..src_start + width, row * width);
        }

        for cell in &mut self.cells[..width] {
            *cell = false;
        }
    }

    /// Clear all full rows and return how many were cleared.
    ///
    /// Scans bottom-up; after a clear the same row index is examined again, so
    /// stacked full rows collapse in one call.
    pub fn clear_full_rows(&mut self) -> usize {
        let mut cleared = 0;
        let mut y = self.height;
        while y > 0 {
            if self.is_row_full(y - 1) {
                self.clear_row(y - 1);
                cleared += 1;
            } else {
                y -= 1;
            }
        }
        cleared
    }

    /// Commit every block of `piece` as locked.
    ///
    /// Nothing is written unless every block can be placed.
    pub fn lock(&mut self, piece: &Piece) -> Result<(), LockError> {
        let cells = piece.cells();

        if let Some(&(x, y)) = cells.iter().find(|&&(_, y)| y < 0) {
            return Err(LockError::AboveCeiling { x, y });
        }
        if let Some(&(x, y)) = cells
            .iter()
            .find(|&&(x, y)| !matches!(self.get(x, y), Some(CellValue::Empty)))
        {
            return Err(LockError::Blocked { x, y });
        }

        for &(x, y) in &cells {
            self.set(x, y, true);
        }
        Ok(())
    }

    /// Number of locked cells
    pub fn locked_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| !c)
    }

    /// Clear the entire board
    pub fn clear(&mut self) {
        self.cells.fill(false);
    }

    /// Copy the board into `out` as rows of cell values, reusing its allocations.
    pub fn write_rows(&self, out: &mut Vec<Vec<CellValue>>) {
        out.resize_with(self.height, Vec::new);
        for (y, row) in out.iter_mut().enumerate() {
            row.clear();
            let start = y * self.width;
            row.extend(self.cells[start..start + self.width].iter().map(|&c| {
                if c {
                    CellValue::Locked
                } else {
                    CellValue::Empty
                }
            }));
        }
    }

    /// Owned copy of the board as rows of cell values
    pub fn to_rows(&self) -> Vec<Vec<CellValue>> {
        let mut rows = Vec::with_capacity(self.height);
        self.write_rows(&mut rows);
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PieceKind;

    #[test]
    fn test_lock_error_messages() {
        let err: Box<dyn std::error::Error> = Box::new(LockError::AboveCeiling { x: 4, y: -1 });
        assert_eq!(err.to_string(), "block at (4, -1) is above the ceiling");
        assert_eq!(
            LockError::Blocked { x: 5, y: 19 }.to_string(),
            "block at (5, 19) is blocked"
        );
    }

    #[test]
    fn test_board_index_calculation() {
        let board = Board::new(10, 20);
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_board_flat_array() {
        let mut board = Board::new(10, 20);

        board.set(0, 0, true);
        board.set(5, 10, true);

        assert_eq!(board.get(0, 0), Some(CellValue::Locked));
        assert_eq!(board.get(5, 10), Some(CellValue::Locked));
        assert!(board.cells[0]);
        assert!(board.cells[10 * 10 + 5]);
        assert_eq!(board.locked_count(), 2);
    }

    #[test]
    fn test_clear_row_shifts_down() {
        let mut board = Board::new(4, 3);
        board.set(1, 0, true);
        board.set(2, 1, true);
        for x in 0..4 {
            board.set(x, 2, true);
        }

        board.clear_row(2);

        assert!(board.is_occupied(1, 1));
        assert!(board.is_occupied(2, 2));
        assert_eq!(board.locked_count(), 2);
        assert!((0..4).all(|x| !board.is_occupied(x, 0)));
    }

    #[test]
    fn test_lock_above_ceiling_commits_nothing() {
        let mut board = Board::new(10, 20);
        let piece = Piece::spawn(PieceKind::T, 10);

        assert!(matches!(
            board.lock(&piece),
            Err(LockError::AboveCeiling { .. })
        ));
        assert!(board.is_empty());
    }

    #[test]
    fn test_lock_blocked() {
        let mut board = Board::new(10, 20);
        board.set(4, 6, true);
        let piece = Piece::new(PieceKind::O, 3, 5);

        assert_eq!(board.lock(&piece), Err(LockError::Blocked { x: 4, y: 6 }));
        assert_eq!(board.locked_count(), 1);
    }

    #[test]
    fn test_write_rows_reuses_buffer() {
        let mut board = Board::new(3, 2);
        board.set(2, 1, true);

        let mut rows = vec![vec![CellValue::Active; 8]; 5];
        board.write_rows(&mut rows);

        assert_eq!(
            rows,
            vec![
                vec![CellValue::Empty; 3],
                vec![CellValue::Empty, CellValue::Empty, CellValue::Locked],
            ]
        );
    }
}
