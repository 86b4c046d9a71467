//! Shared types module - plain data structures and constants
//!
//! This crate defines the vocabulary shared by the simulation core, the input
//! mapping and the terminal view. Everything here is plain data with no
//! dependencies, so any layer can use it.
//!
//! # Board Coordinates
//!
//! - `x` is the column, 0 = left edge
//! - `y` is the row, 0 = top visible row, increasing downward
//! - rows with `y < 0` are above the visible ceiling (pieces spawn there)
//!
//! # Timing
//!
//! The fall interval depends on the level (milliseconds per row):
//!
//! | Level | Interval |
//! |-------|----------|
//! | 1 | 1000ms |
//! | 2 | 900ms |
//! | 5 | 600ms |
//! | 10+ | 100ms (floor) |
//!
//! # Examples
//!
//! ```
//! use alpha_tetris_types::{GameCommand, PieceKind, SessionState};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameCommand::from_str("hardDrop"), Some(GameCommand::HardDrop));
//! assert!(SessionState::Playing.is_playing());
//! ```

/// Default board width in cells
pub const DEFAULT_BOARD_WIDTH: usize = 10;

/// Default board height in cells
pub const DEFAULT_BOARD_HEIGHT: usize = 20;

/// Side length of the square grid every piece shape lives in
pub const SHAPE_SIZE: usize = 4;

/// Number of pieces in one bag (one of each kind)
pub const BAG_SIZE: usize = 7;

/// Default number of upcoming pieces exposed in the next queue
pub const DEFAULT_PREVIEW_LEN: usize = 5;

/// Fixed timestep interval in milliseconds used by the terminal runner (~60 FPS)
pub const TICK_MS: u32 = 16;

/// Fall interval at level 1
pub const BASE_FALL_MS: u32 = 1000;

/// Fall interval reduction per level above 1
pub const FALL_STEP_MS: u32 = 100;

/// Fall interval floor
pub const MIN_FALL_MS: u32 = 100;

/// Lines needed to advance one level
pub const LINES_PER_LEVEL: u32 = 10;

/// Base points for clearing N rows in one lock, multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per row travelled by a hard drop
pub const HARD_DROP_POINTS_PER_ROW: u32 = 2;

/// The seven piece kinds
///
/// Declaration order is the order of a fresh, unshuffled bag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    S,
    Z,
    J,
    L,
    T,
}

impl PieceKind {
    /// All kinds in bag order
    pub const ALL: [PieceKind; BAG_SIZE] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
        PieceKind::T,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use alpha_tetris_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "z" => Some(PieceKind::Z),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "t" => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::Z => "z",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::T => "t",
        }
    }

    /// Uppercase letter used by text views
    pub fn as_char(&self) -> char {
        match self {
            PieceKind::I => 'I',
            PieceKind::O => 'O',
            PieceKind::S => 'S',
            PieceKind::Z => 'Z',
            PieceKind::J => 'J',
            PieceKind::L => 'L',
            PieceKind::T => 'T',
        }
    }
}

/// A cell of the rendered board
///
/// The persistent board only ever stores `Empty` and `Locked`. `Active` marks
/// cells covered by the falling piece in a rendered snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Locked,
    Active,
}

impl CellValue {
    /// Numeric code used by the rendered board (0 empty, 1 locked, 2 active)
    pub fn as_u8(&self) -> u8 {
        match self {
            CellValue::Empty => 0,
            CellValue::Locked => 1,
            CellValue::Active => 2,
        }
    }
}

/// Lifecycle of a game session
///
/// `PreGame → Playing ⇄ Paused`, `Playing → GameOver → Playing` (via start).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    PreGame,
    Playing,
    Paused,
    GameOver,
}

impl SessionState {
    pub fn is_playing(&self) -> bool {
        matches!(self, SessionState::Playing)
    }

    /// Whether `start` is the expected next command (nothing in progress)
    pub fn awaits_start(&self) -> bool {
        matches!(self, SessionState::PreGame | SessionState::GameOver)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::PreGame => "preGame",
            SessionState::Playing => "playing",
            SessionState::Paused => "paused",
            SessionState::GameOver => "gameOver",
        }
    }
}

/// Commands accepted by a game session
///
/// These are driven by keyboard input, tests, or any other controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameCommand {
    /// Reset everything and spawn the first piece
    Start,
    /// Suspend gravity and input (Playing only)
    Pause,
    /// Continue a paused game
    Resume,
    /// Move piece one column left
    MoveLeft,
    /// Move piece one column right
    MoveRight,
    /// One manual gravity step
    SoftDrop,
    /// Instantly drop piece to lowest valid position and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Store or swap the active piece
    Hold,
}

impl GameCommand {
    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use alpha_tetris_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("ROTATECCW"), Some(GameCommand::RotateCcw));
    /// assert_eq!(GameCommand::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(GameCommand::Start),
            "pause" => Some(GameCommand::Pause),
            "resume" => Some(GameCommand::Resume),
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "softdrop" => Some(GameCommand::SoftDrop),
            "harddrop" => Some(GameCommand::HardDrop),
            "rotatecw" => Some(GameCommand::RotateCw),
            "rotateccw" => Some(GameCommand::RotateCcw),
            "hold" => Some(GameCommand::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::Start => "start",
            GameCommand::Pause => "pause",
            GameCommand::Resume => "resume",
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::HardDrop => "hardDrop",
            GameCommand::RotateCw => "rotateCw",
            GameCommand::RotateCcw => "rotateCcw",
            GameCommand::Hold => "hold",
        }
    }
}

/// Notification raised by a session after it changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameEvent {
    /// Board, piece, hold, queue, stats or session state changed
    BoardUpdated,
    /// The session entered `GameOver` (raised once per game)
    GameOver,
}
