use anyhow::Result;
use rand::{seq::SliceRandom, Rng};

use crate::config::{BOARD_BACKGROUND_COLOR, BORDER_COLOR, DEFAULT_POSITION, SNAKE_COLOR};
use crate::entity::{cell_rect, Entity, GameObject};
use crate::grid::Board;
use crate::term::Canvas;
use crate::Position;
use Direction::*;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right
}

impl Direction {
    pub const ALL: [Direction; 4] = [Up, Down, Left, Right];

    pub fn vector(&self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }

    pub fn is_opposite(&self, other: Direction) -> bool {
        self.opposite() == other
    }

    pub fn random<R: Rng>(rng: &mut R) -> Direction {
        *Direction::ALL.choose(rng).unwrap_or(&Right)
    }
}

pub struct Snake {
    base: GameObject,
    length: usize,
    positions: Vec<Position>,
    direction: Direction,
    next_direction: Option<Direction>,
    last: Option<Position>,
}

impl Snake {
    pub fn new(start: Position) -> Self {
        Snake {
            base: GameObject::new(start, SNAKE_COLOR),
            length: 1,
            positions: vec![start],
            direction: Right,
            next_direction: None,
            last: None,
        }
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn head(&self) -> Position {
        self.positions[0]
    }

    pub fn length(&self) -> usize {
        self.length
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Queue a turn for the next tick. Callers are responsible for not
    /// queueing a reversal, see `input::handle_keys`.
    pub fn set_next_direction(&mut self, direction: Direction) {
        self.next_direction = Some(direction);
    }

    pub fn update_direction(&mut self) {
        if let Some(dir) = self.next_direction.take() {
            if !dir.is_opposite(self.direction) {
                self.direction = dir;
            }
        }
    }

    /// Advance one cell. The vacated tail, if any, is kept in `last` so the
    /// next draw can erase it.
    pub fn move_step(&mut self, board: &Board) -> Position {
        let new_head = board.step(self.head(), self.direction);
        self.positions.insert(0, new_head);

        self.last = if self.positions.len() > self.length {
            self.positions.pop()
        } else {
            None
        };

        new_head
    }

    /// The two cells nearest the head are never counted as a hit.
    pub fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.positions.iter().skip(2).any(|pos| *pos == head)
    }

    pub fn grow(&mut self) {
        self.length += 1;
    }

    pub fn reset<R: Rng>(&mut self, rng: &mut R) {
        self.length = 1;
        self.positions = vec![self.object().position];
        self.direction = Direction::random(rng);
        self.next_direction = None;
        self.last = None;
    }
}

impl Default for Snake {
    fn default() -> Self {
        Snake::new(DEFAULT_POSITION)
    }
}

impl Entity for Snake {
    fn object(&self) -> &GameObject {
        &self.base
    }

    fn draw(&self, canvas: &mut dyn Canvas) -> Result<()> {
        let size = canvas.cell_size();

        let head = cell_rect(self.head(), size);
        canvas.fill_rect(head, self.base.body_color)?;
        canvas.stroke_rect(head, BORDER_COLOR)?;

        if let Some(tail) = self.last {
            canvas.fill_rect(cell_rect(tail, size), BOARD_BACKGROUND_COLOR)?;
        }

        Ok(())
    }
}

#[cfg(test)]
impl Snake {
    pub fn with_body(positions: Vec<Position>, direction: Direction) -> Self {
        let mut snake = Snake::new(DEFAULT_POSITION);
        snake.length = positions.len();
        snake.positions = positions;
        snake.direction = direction;
        snake
    }

    pub fn last(&self) -> Option<Position> {
        self.last
    }

    pub fn next_direction(&self) -> Option<Direction> {
        self.next_direction
    }
}
