use crate::config::GameConfig;
use crate::snake::Direction;
use crate::Position;

/// The playing field, measured in pixels. Every position on it is the
/// top-left corner of a `cell` x `cell` square, and movement wraps around
/// on both axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    cell: i32,
}

impl Board {
    pub fn new(width: i32, height: i32, cell: i32) -> Self {
        Board { width, height, cell }
    }

    pub fn from_config(config: &GameConfig) -> Self {
        Board::new(config.screen_width, config.screen_height, config.grid_size)
    }

    pub fn cell(&self) -> i32 {
        self.cell
    }

    pub fn columns(&self) -> i32 {
        self.width / self.cell
    }

    pub fn rows(&self) -> i32 {
        self.height / self.cell
    }

    pub fn cell_count(&self) -> usize {
        (self.columns() * self.rows()) as usize
    }

    pub fn cell_at(&self, col: i32, row: i32) -> Position {
        (col * self.cell, row * self.cell)
    }

    pub fn contains(&self, pos: Position) -> bool {
        (0..self.width).contains(&pos.0)
            && (0..self.height).contains(&pos.1)
            && pos.0 % self.cell == 0
            && pos.1 % self.cell == 0
    }

    pub fn wrap(&self, pos: Position) -> Position {
        (pos.0.rem_euclid(self.width), pos.1.rem_euclid(self.height))
    }

    /// The cell one step away from `pos` in `direction`.
    pub fn step(&self, pos: Position, direction: Direction) -> Position {
        let (dx, dy) = direction.vector();
        self.wrap((pos.0 + dx * self.cell, pos.1 + dy * self.cell))
    }

    pub fn cells(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.rows()).flat_map(move |row| (0..self.columns()).map(move |col| self.cell_at(col, row)))
    }
}
