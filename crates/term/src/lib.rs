//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal play. [`GameView`] draws a
//! `GameSnapshot` into a [`FrameBuffer`] of styled cells (pure, testable), and
//! [`TerminalRenderer`] flushes framebuffers to the terminal with `crossterm`.
//! Each board cell is two columns wide by default to keep blocks square.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use alpha_tetris_core as core;
pub use alpha_tetris_types as types;

pub use fb::{Cell, CellStyle, FrameBuffer, Rgb};
pub use game_view::{AnchorY, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
