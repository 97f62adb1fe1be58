use std::fmt;

use crate::grid::Board;
use crate::{Position, Rgb};

pub const SCREEN_WIDTH: i32 = 640;
pub const SCREEN_HEIGHT: i32 = 480;
pub const GRID_SIZE: i32 = 20;

/// Ticks per second.
pub const SPEED: u32 = 10;

pub const DEFAULT_POSITION: Position = (SCREEN_WIDTH / 2, SCREEN_HEIGHT / 2);

pub const BOARD_BACKGROUND_COLOR: Rgb = (0, 0, 0);
pub const BORDER_COLOR: Rgb = (93, 216, 228);
pub const APPLE_COLOR: Rgb = (255, 0, 0);
pub const SNAKE_COLOR: Rgb = (0, 255, 0);
pub const DEFAULT_COLOR: Rgb = (255, 255, 255);

pub const TITLE: &str = "Snake";
pub const LOG_FILE: &str = "snake.log";

/// Random draws tried before falling back to scanning the free cells.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 10_000;

#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub screen_width: i32,
    pub screen_height: i32,
    pub grid_size: i32,
    pub speed: u32,
    pub default_position: Position,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    NonPositive(&'static str),
    Misaligned { dimension: &'static str, value: i32, cell: i32 },
    StartOutside(Position),
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            grid_size: GRID_SIZE,
            speed: SPEED,
            default_position: DEFAULT_POSITION,
        }
    }
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("screen width", self.screen_width),
            ("screen height", self.screen_height),
            ("grid size", self.grid_size),
        ];

        for (name, value) in sizes.iter() {
            if *value <= 0 {
                return Err(ConfigError::NonPositive(*name));
            }
        }

        if self.speed == 0 {
            return Err(ConfigError::NonPositive("speed"));
        }

        for (name, value) in sizes[..2].iter() {
            if value % self.grid_size != 0 {
                return Err(ConfigError::Misaligned { dimension: *name, value: *value, cell: self.grid_size });
            }
        }

        if !Board::from_config(self).contains(self.default_position) {
            return Err(ConfigError::StartOutside(self.default_position));
        }

        Ok(())
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NonPositive(name) => write!(f, "{} must be positive", name),
            ConfigError::Misaligned { dimension, value, cell } => {
                write!(f, "{} {} is not a multiple of the cell size {}", dimension, value, cell)
            }
            ConfigError::StartOutside((x, y)) => {
                write!(f, "start position ({}, {}) is not a cell on the board", x, y)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
