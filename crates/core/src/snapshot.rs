//! Snapshot module - owned, read-only copies of session state

use std::fmt;

use crate::piece::Piece;
use crate::shape::Shape;
use crate::types::{CellValue, PieceKind, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub kind: PieceKind,
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl ActiveSnapshot {
    /// Board coordinates of the piece's blocks with its anchor moved to row `y`
    pub fn cells_at(&self, y: i32) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.shape
            .cells()
            .into_iter()
            .map(move |(dx, dy)| (self.x + dx, y + dy))
    }
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            kind: value.kind,
            shape: value.shape,
            x: value.x,
            y: value.y,
        }
    }
}

/// Owned, read-only copy of everything a view needs
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GameSnapshot {
    /// Rendered board: `board[y][x]`, locked cells overlaid with the active piece
    pub board: Vec<Vec<CellValue>>,
    pub active: Option<ActiveSnapshot>,
    pub ghost_y: Option<i32>,
    pub hold: Option<PieceKind>,
    pub can_hold: bool,
    pub next_queue: Vec<PieceKind>,
    pub state: SessionState,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub fall_interval_ms: u32,
}

impl GameSnapshot {
    pub fn width(&self) -> usize {
        self.board.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.board.len()
    }

    pub fn playable(&self) -> bool {
        self.state.is_playing()
    }

    /// Rendered board as numeric codes (0 empty, 1 locked, 2 active)
    pub fn board_codes(&self) -> Vec<Vec<u8>> {
        self.board
            .iter()
            .map(|row| row.iter().map(CellValue::as_u8).collect())
            .collect()
    }
}

/// Text dump of the board and stats, one character per cell
impl fmt::Display for GameSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.board {
            for cell in row {
                let ch = match cell {
                    CellValue::Empty => '.',
                    CellValue::Locked => '#',
                    CellValue::Active => '@',
                };
                write!(f, "{}", ch)?;
            }
            writeln!(f)?;
        }
        writeln!(f, "Score: {}", self.score)?;
        writeln!(f, "Level: {}", self.level)?;
        write!(f, "Lines: {}", self.lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_dump() {
        let snap = GameSnapshot {
            board: vec![
                vec![CellValue::Empty, CellValue::Active],
                vec![CellValue::Locked, CellValue::Empty],
            ],
            score: 300,
            level: 1,
            lines: 2,
            ..GameSnapshot::default()
        };

        assert_eq!(snap.to_string(), ".@\n#.\nScore: 300\nLevel: 1\nLines: 2");
        assert_eq!(snap.board_codes(), vec![vec![0, 2], vec![1, 0]]);
        assert_eq!((snap.width(), snap.height()), (2, 2));
    }
}
