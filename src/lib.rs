//! Alpha Tetris (workspace facade crate).
//!
//! Re-exports the workspace crates as `alpha_tetris::{types, core, input, term}`
//! so tests, benches and the binary depend on a single package.

pub use alpha_tetris_core as core;
pub use alpha_tetris_input as input;
pub use alpha_tetris_term as term;
pub use alpha_tetris_types as types;
