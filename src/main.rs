mod clock;
mod config;
mod entity;
mod food;
mod game;
mod grid;
mod input;
mod snake;
mod term;

use std::fs::File;

use anyhow::{Context, Result};
use log::{error, info};
use rand::{rngs::StdRng, SeedableRng};
use simplelog::{Config, LevelFilter, WriteLogger};

use crate::config::{GameConfig, LOG_FILE, TITLE};
use crate::game::SnakeGame;
use crate::grid::Board;
use crate::term::TermManager;

/// Top-left corner of a cell, in pixels.
pub type Position = (i32, i32);
pub type Rgb = (u8, u8, u8);

fn main() -> Result<()> {
    // The terminal is the game screen, so logs go to a file
    WriteLogger::init(LevelFilter::Info, Config::default(), File::create(LOG_FILE)?)
        .context("Error initializing logger")?;

    let config = GameConfig::default();
    config.validate().context("Invalid game configuration")?;

    let board = Board::from_config(&config);
    let term = TermManager::new(board);
    term.ensure_fits()?;

    info!("starting on a {}x{} board at {} ticks/s", board.columns(), board.rows(), config.speed);

    let mut game = SnakeGame::new(config, term, StdRng::from_entropy())?;
    let result = game.term_mut().setup(TITLE).and_then(|_| game.play());

    if let Err(err) = game.term_mut().restore() {
        error!("failed to restore terminal: {:?}", err);
    }

    if let Err(err) = &result {
        error!("game stopped: {:?}", err);
    }

    result
}
