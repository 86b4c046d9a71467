//! Shape module - 4x4 occupancy grids for the seven pieces
//!
//! Every piece lives in a 4x4 bounding grid (row 0 at the top). Rotation is a
//! pure permutation of that grid, so a rotated shape always keeps its four
//! blocks.

use arrayvec::ArrayVec;

use crate::types::{PieceKind, SHAPE_SIZE};

/// Offset of a single block relative to the shape's top-left corner, as `(dx, dy)`
pub type BlockOffset = (i32, i32);

/// Set blocks of a shape. A 4x4 grid can never hold more than 16.
pub type ShapeCells = ArrayVec<BlockOffset, { SHAPE_SIZE * SHAPE_SIZE }>;

/// A 4x4 occupancy grid, indexed `[row][col]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shape {
    grid: [[bool; SHAPE_SIZE]; SHAPE_SIZE],
}

impl Shape {
    /// Build a shape from rows of 0/1 values (non-zero means occupied)
    pub fn from_rows(rows: [[u8; SHAPE_SIZE]; SHAPE_SIZE]) -> Self {
        Self {
            grid: rows.map(|row| row.map(|v| v != 0)),
        }
    }

    /// Canonical spawn orientation for a piece kind
    pub fn of(kind: PieceKind) -> Self {
        let rows = match kind {
            PieceKind::I => [[0, 0, 0, 0], [1, 1, 1, 1], [0, 0, 0, 0], [0, 0, 0, 0]],
            PieceKind::O => [[0, 0, 0, 0], [0, 1, 1, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
            PieceKind::S => [[0, 0, 0, 0], [0, 1, 1, 0], [1, 1, 0, 0], [0, 0, 0, 0]],
            PieceKind::Z => [[0, 0, 0, 0], [1, 1, 0, 0], [0, 1, 1, 0], [0, 0, 0, 0]],
            PieceKind::J => [[0, 0, 0, 0], [1, 0, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
            PieceKind::L => [[0, 0, 0, 0], [0, 0, 1, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
            PieceKind::T => [[0, 0, 0, 0], [0, 1, 0, 0], [1, 1, 1, 0], [0, 0, 0, 0]],
        };
        Self::from_rows(rows)
    }

    /// Whether the block at (`col`, `row`) is set. Out of range is `false`.
    pub fn is_set(&self, col: usize, row: usize) -> bool {
        row < SHAPE_SIZE && col < SHAPE_SIZE && self.grid[row][col]
    }

    /// Number of set blocks
    pub fn count(&self) -> usize {
        self.grid
            .iter()
            .map(|row| row.iter().filter(|&&set| set).count())
            .sum()
    }

    /// Offsets of all set blocks, row by row (stack-only).
    pub fn cells(&self) -> ShapeCells {
        let mut out = ShapeCells::new();
        for (dy, row) in self.grid.iter().enumerate() {
            for (dx, &set) in row.iter().enumerate() {
                if set {
                    out.push((dx as i32, dy as i32));
                }
            }
        }
        out
    }

    /// Index of the lowest row holding a block, `None` for an empty grid
    pub fn lowest_row(&self) -> Option<usize> {
        self.grid.iter().rposition(|row| row.iter().any(|&set| set))
    }

    /// Rotate 90° clockwise: `result[x][n-1-y] = self[y][x]`
    pub fn rotate_cw(&self) -> Self {
        let n = SHAPE_SIZE;
        let mut grid = [[false; SHAPE_SIZE]; SHAPE_SIZE];
        for y in 0..n {
            for x in 0..n {
                grid[x][n - 1 - y] = self.grid[y][x];
            }
        }
        Self { grid }
    }

    /// Rotate 90° counter-clockwise: `result[n-1-x][y] = self[y][x]`
    pub fn rotate_ccw(&self) -> Self {
        let n = SHAPE_SIZE;
        let mut grid = [[false; SHAPE_SIZE]; SHAPE_SIZE];
        for y in 0..n {
            for x in 0..n {
                grid[n - 1 - x][y] = self.grid[y][x];
            }
        }
        Self { grid }
    }

    /// Rotate in the given direction
    pub fn rotated(&self, clockwise: bool) -> Self {
        if clockwise {
            self.rotate_cw()
        } else {
            self.rotate_ccw()
        }
    }
}
