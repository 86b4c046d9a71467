//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has no dependencies on terminals or I/O, so the same session runs in a
//! terminal front-end, in tests, or headless.
//!
//! # Module Structure
//!
//! - [`board`]: width x height grid of locked cells with collision checks and row clearing
//! - [`shape`]: 4x4 occupancy grids and grid rotation
//! - [`piece`]: the falling piece and rotation with one-column kicks
//! - [`rng`]: seeded 7-bag piece queue
//! - [`scoring`]: line clear and hard drop points, levels and fall speed
//! - [`config`]: board size, seed and preview length, with env overrides
//! - [`session`]: the game state machine and its event stream
//! - [`snapshot`]: owned read-only copies of session state for views
//!
//! # Coordinates
//!
//! Row 0 is the top visible row and y grows downward. Pieces spawn partly
//! above the ceiling (negative rows); locking a piece that still has a block
//! up there ends the game.
//!
//! # Example
//!
//! ```
//! use alpha_tetris_core::GameSession;
//! use alpha_tetris_types::{GameCommand, SessionState};
//!
//! let mut game = GameSession::with_seed(12345);
//! game.start();
//!
//! game.apply(GameCommand::MoveRight);
//! game.apply(GameCommand::RotateCw);
//! game.apply(GameCommand::HardDrop);
//!
//! assert_eq!(game.state(), SessionState::Playing);
//! assert!(game.score() > 0); // hard drop pays per row
//! ```
//!
//! # Timing
//!
//! Call [`GameSession::tick`] with the elapsed milliseconds; the active piece
//! falls one row every `max(100, 1000 - 100 * (level - 1))` ms.

pub mod board;
pub mod config;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod session;
pub mod shape;
pub mod snapshot;

pub use alpha_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{Board, LockError};
pub use config::{ConfigError, GameConfig};
pub use piece::{try_rotate, Piece};
pub use rng::{PieceQueue, SimpleRng};
pub use scoring::{fall_interval_ms, hard_drop_score, level_for_lines, line_clear_score};
pub use session::GameSession;
pub use shape::Shape;
pub use snapshot::{ActiveSnapshot, GameSnapshot};
