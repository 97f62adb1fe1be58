use std::fmt;

use anyhow::Result;
use log::warn;
use rand::{seq::SliceRandom, Rng};

use crate::config::{APPLE_COLOR, BORDER_COLOR, MAX_PLACEMENT_ATTEMPTS};
use crate::entity::{cell_rect, Entity, GameObject};
use crate::grid::Board;
use crate::term::Canvas;
use crate::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementError {
    BoardFull,
}

pub struct Apple {
    base: GameObject,
}

impl Apple {
    /// Create an apple on a random cell not covered by `occupied`.
    pub fn new<R: Rng>(occupied: &[Position], board: &Board, rng: &mut R) -> Result<Self, PlacementError> {
        let mut apple = Apple { base: GameObject::new((0, 0), APPLE_COLOR) };
        apple.randomize_position(occupied, board, rng)?;
        Ok(apple)
    }

    pub fn position(&self) -> Position {
        self.object().position
    }

    pub fn randomize_position<R: Rng>(
        &mut self,
        occupied: &[Position],
        board: &Board,
        rng: &mut R,
    ) -> Result<(), PlacementError> {
        for _ in 0..MAX_PLACEMENT_ATTEMPTS {
            let candidate = board.cell_at(rng.gen_range(0..board.columns()), rng.gen_range(0..board.rows()));
            if !occupied.contains(&candidate) {
                self.base.position = candidate;
                return Ok(());
            }
        }

        // Sampling kept hitting the snake, pick from what is left instead
        warn!("apple placement gave up after {} draws, scanning free cells", MAX_PLACEMENT_ATTEMPTS);
        let free: Vec<Position> = board.cells().filter(|pos| !occupied.contains(pos)).collect();

        match free.choose(rng) {
            Some(pos) => {
                self.base.position = *pos;
                Ok(())
            }
            None => Err(PlacementError::BoardFull),
        }
    }

    #[cfg(test)]
    pub fn place_at(&mut self, position: Position) {
        self.base.position = position;
    }
}

impl Entity for Apple {
    fn object(&self) -> &GameObject {
        &self.base
    }

    fn draw(&self, canvas: &mut dyn Canvas) -> Result<()> {
        let rect = cell_rect(self.base.position, canvas.cell_size());
        canvas.fill_rect(rect, self.base.body_color)?;
        canvas.stroke_rect(rect, BORDER_COLOR)
    }
}

impl fmt::Display for PlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementError::BoardFull => write!(f, "no free cell left for the apple"),
        }
    }
}

impl std::error::Error for PlacementError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Rect;
    use crate::term::tests::MockTerm;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_placement_is_on_board() {
        let board = Board::new(640, 480, 20);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..200 {
            let apple = Apple::new(&[], &board, &mut rng).unwrap();
            assert!(board.contains(apple.position()));
        }
    }

    #[test]
    fn test_placement_avoids_snake() {
        let board = Board::new(80, 40, 20);
        let mut rng = StdRng::seed_from_u64(3);
        let occupied = vec![(0, 0), (20, 0), (40, 0), (60, 0), (0, 20), (20, 20), (40, 20)];

        for _ in 0..50 {
            let apple = Apple::new(&occupied, &board, &mut rng).unwrap();
            assert_eq!(apple.position(), (60, 20));
        }
    }

    #[test]
    fn test_relocation_avoids_snake() {
        let board = Board::new(640, 480, 20);
        let mut rng = StdRng::seed_from_u64(11);
        let occupied: Vec<Position> = board.cells().take(700).collect();
        let mut apple = Apple::new(&[], &board, &mut rng).unwrap();

        for _ in 0..100 {
            apple.randomize_position(&occupied, &board, &mut rng).unwrap();
            assert!(!occupied.contains(&apple.position()));
        }
    }

    #[test]
    fn test_board_full() {
        let board = Board::new(40, 40, 20);
        let mut rng = StdRng::seed_from_u64(5);
        let occupied: Vec<Position> = board.cells().collect();

        assert_eq!(Apple::new(&occupied, &board, &mut rng).err(), Some(PlacementError::BoardFull));
    }

    #[test]
    fn test_draw() {
        let board = Board::new(640, 480, 20);
        let mut rng = StdRng::seed_from_u64(9);
        let mut apple = Apple::new(&[], &board, &mut rng).unwrap();
        apple.place_at((40, 60));

        let mut term = MockTerm::new();
        apple.draw(&mut term).unwrap();

        let rect = Rect { x: 40, y: 60, size: 20 };
        assert_eq!(term.fills, vec![(rect, APPLE_COLOR)]);
        assert_eq!(term.strokes, vec![(rect, BORDER_COLOR)]);
    }
}
