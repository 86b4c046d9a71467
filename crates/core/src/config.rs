//! Session configuration
//!
//! Defaults give the standard 10x20 board. [`GameConfig::from_env`] layers
//! `TETRIS_*` environment overrides on top:
//!
//! - `TETRIS_WIDTH`: board columns (default 10)
//! - `TETRIS_HEIGHT`: board rows (default 20)
//! - `TETRIS_SEED`: piece randomizer seed (default 1)
//! - `TETRIS_PREVIEW`: next-queue length shown to views (default 5)

use thiserror::Error;

use crate::types::{DEFAULT_BOARD_HEIGHT, DEFAULT_BOARD_WIDTH, DEFAULT_PREVIEW_LEN};

/// Largest accepted board side
pub const MAX_BOARD_DIMENSION: usize = 1024;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid board {name}: {value}")]
    InvalidDimension { name: &'static str, value: i64 },
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub seed: u32,
    pub preview_len: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_BOARD_WIDTH,
            height: DEFAULT_BOARD_HEIGHT,
            seed: 1,
            preview_len: DEFAULT_PREVIEW_LEN,
        }
    }
}

impl GameConfig {
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_preview_len(mut self, preview_len: usize) -> Self {
        self.preview_len = preview_len;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_dimension("width", self.width as i64)?;
        check_dimension("height", self.height as i64)?;
        Ok(())
    }

    /// Defaults overridden by `TETRIS_*` environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `TETRIS_*` key
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(v) = lookup("TETRIS_WIDTH") {
            config.width = parse_dimension("TETRIS_WIDTH", "width", &v)?;
        }
        if let Some(v) = lookup("TETRIS_HEIGHT") {
            config.height = parse_dimension("TETRIS_HEIGHT", "height", &v)?;
        }
        if let Some(v) = lookup("TETRIS_SEED") {
            config.seed = v.trim().parse::<u32>().map_err(|_| ConfigError::InvalidValue {
                key: "TETRIS_SEED",
                value: v.clone(),
            })?;
        }
        if let Some(v) = lookup("TETRIS_PREVIEW") {
            config.preview_len =
                v.trim().parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                    key: "TETRIS_PREVIEW",
                    value: v.clone(),
                })?;
        }

        config.validate()?;
        Ok(config)
    }
}

fn check_dimension(name: &'static str, value: i64) -> Result<(), ConfigError> {
    if value <= 0 || value > MAX_BOARD_DIMENSION as i64 {
        return Err(ConfigError::InvalidDimension { name, value });
    }
    Ok(())
}

fn parse_dimension(key: &'static str, name: &'static str, raw: &str) -> Result<usize, ConfigError> {
    let value = raw.trim().parse::<i64>().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })?;
    check_dimension(name, value)?;
    Ok(value as usize)
}
