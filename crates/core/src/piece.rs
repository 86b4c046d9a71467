//! Piece module - the falling piece and rotation with wall kicks
//!
//! A [`Piece`] is a kind, its current 4x4 orientation and the board position of
//! the grid's top-left cell. Pieces are values: moving or rotating produces a
//! new piece and the session swaps it in only when the new position is valid.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::shape::Shape;
use crate::types::{PieceKind, SHAPE_SIZE};

/// Anchor offsets tried in order when a rotation collides
pub const ROTATION_KICKS: [(i32, i32); 3] = [(0, 0), (1, 0), (-1, 0)];

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    /// Create a piece in its canonical orientation at an explicit anchor
    pub fn new(kind: PieceKind, x: i32, y: i32) -> Self {
        Self {
            kind,
            shape: Shape::of(kind),
            x,
            y,
        }
    }

    /// Create a piece at the spawn anchor for a board of `board_width` columns.
    ///
    /// Horizontally the 4-wide grid starts at `(width - 2) / 2`; vertically the
    /// lowest occupied row of the shape sits on the top visible row.
    pub fn spawn(kind: PieceKind, board_width: usize) -> Self {
        let shape = Shape::of(kind);
        let lowest = shape.lowest_row().unwrap_or(SHAPE_SIZE - 1) as i32;
        Self {
            kind,
            shape,
            x: (board_width as i32 - 2) / 2,
            y: -lowest,
        }
    }

    /// Board coordinates of every block
    pub fn cells(&self) -> ArrayVec<(i32, i32), { SHAPE_SIZE * SHAPE_SIZE }> {
        self.shape
            .cells()
            .into_iter()
            .map(|(dx, dy)| (self.x + dx, self.y + dy))
            .collect()
    }

    /// Same piece shifted by (`dx`, `dy`)
    pub fn moved(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Check the piece against walls, floor and locked cells
    pub fn is_valid(&self, board: &Board) -> bool {
        board.is_valid_position(&self.shape, self.x, self.y)
    }

    /// True iff no block is above the visible ceiling
    pub fn is_fully_visible(&self) -> bool {
        self.cells().iter().all(|&(_, y)| y >= 0)
    }
}

/// Try to rotate `piece`, kicking one column right then left on collision.
///
/// `is_valid` decides whether a shape fits at an anchor. Returns the rotated
/// piece (shape and anchor updated together), or `None` when every kick fails.
pub fn try_rotate<F>(piece: &Piece, clockwise: bool, is_valid: F) -> Option<Piece>
where
    F: Fn(&Shape, i32, i32) -> bool,
{
    let rotated = piece.shape.rotated(clockwise);

    ROTATION_KICKS.iter().find_map(|&(dx, dy)| {
        let (x, y) = (piece.x + dx, piece.y + dy);
        is_valid(&rotated, x, y).then_some(Piece {
            kind: piece.kind,
            shape: rotated,
            x,
            y,
        })
    })
}
