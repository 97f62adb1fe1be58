use anyhow::Result;
use log::{debug, info, warn};
use rand::Rng;

use crate::clock::Clock;
use crate::config::{GameConfig, BOARD_BACKGROUND_COLOR};
use crate::entity::Entity;
use crate::food::{Apple, PlacementError};
use crate::grid::Board;
use crate::input::handle_keys;
use crate::snake::Snake;
use crate::term::{Canvas, EventSource};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Everything a running game needs, owned in one place and driven by `play`.
pub struct SnakeGame<T, R> {
    config: GameConfig,
    board: Board,
    term: T,
    clock: Clock,
    rng: R,
    snake: Snake,
    apple: Apple,
}

impl<T: Canvas + EventSource, R: Rng> SnakeGame<T, R> {
    pub fn new(config: GameConfig, term: T, mut rng: R) -> Result<Self> {
        let board = Board::from_config(&config);
        let snake = Snake::new(config.default_position);
        let apple = Apple::new(snake.positions(), &board, &mut rng)?;

        Ok(SnakeGame { config, board, term, clock: Clock::new(), rng, snake, apple })
    }

    pub fn term_mut(&mut self) -> &mut T {
        &mut self.term
    }

    /// Run at the configured speed until the player quits.
    pub fn play(&mut self) -> Result<()> {
        self.term.clear(BOARD_BACKGROUND_COLOR)?;
        self.term.present()?;

        loop {
            self.clock.tick(self.config.speed);

            if self.step()? == Flow::Quit {
                info!("quit requested at length {}", self.snake.length());
                return Ok(());
            }
        }
    }

    /// One frame: draw, read input, move, then resolve collisions and food.
    pub fn step(&mut self) -> Result<Flow> {
        self.apple.draw(&mut self.term)?;
        self.snake.draw(&mut self.term)?;

        let events = self.term.poll_events()?;
        if handle_keys(&mut self.snake, &events) {
            return Ok(Flow::Quit);
        }

        self.snake.update_direction();
        self.snake.move_step(&self.board);

        if self.snake.collides_with_self() {
            info!("snake bit itself at length {}", self.snake.length());
            self.restart()?;
        }

        if self.apple.position() == self.snake.head() {
            self.snake.grow();
            debug!("apple eaten at {:?}, length now {}", self.apple.position(), self.snake.length());

            if let Err(PlacementError::BoardFull) =
                self.apple.randomize_position(self.snake.positions(), &self.board, &mut self.rng)
            {
                warn!("board filled up at length {}, starting over", self.snake.length());
                self.restart()?;
                self.apple.randomize_position(self.snake.positions(), &self.board, &mut self.rng)?;
            }
        }

        self.term.present()?;
        Ok(Flow::Continue)
    }

    fn restart(&mut self) -> Result<()> {
        self.snake.reset(&mut self.rng);
        self.term.clear(BOARD_BACKGROUND_COLOR)
    }
}

#[cfg(test)]
impl<T, R> SnakeGame<T, R> {
    fn snake(&self) -> &Snake {
        &self.snake
    }

    fn apple(&self) -> &Apple {
        &self.apple
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{APPLE_COLOR, SNAKE_COLOR};
    use crate::entity::Rect;
    use crate::input::InputEvent;
    use crate::snake::Direction::*;
    use crate::term::tests::MockTerm;
    use rand::{rngs::StdRng, SeedableRng};

    fn game(config: GameConfig, script: Vec<Vec<InputEvent>>) -> SnakeGame<MockTerm, StdRng> {
        let mut game = SnakeGame::new(config, MockTerm::with_script(script), StdRng::seed_from_u64(42)).unwrap();
        // Out of the way of anything the tests below do
        game.apple.place_at((0, 0));
        game
    }

    #[test]
    fn test_three_ticks_without_input() {
        let mut game = game(GameConfig::default(), vec![]);

        for _ in 0..3 {
            assert_eq!(game.step().unwrap(), Flow::Continue);
        }

        assert_eq!(game.snake().positions(), &[(380, 240)]);
        assert_eq!(game.snake().length(), 1);
        assert_eq!(game.term.presents, 3);
    }

    #[test]
    fn test_three_ticks_wrap_right_edge() {
        let config = GameConfig { default_position: (600, 240), ..Default::default() };
        let mut game = game(config, vec![]);

        for _ in 0..3 {
            game.step().unwrap();
        }

        assert_eq!(game.snake().positions(), &[(20, 240)]);
    }

    #[test]
    fn test_eating_food_grows_and_relocates() {
        let mut game = game(GameConfig::default(), vec![]);
        game.apple.place_at((340, 240));

        game.step().unwrap();

        assert_eq!(game.snake().length(), 2);
        assert!(!game.snake().positions().contains(&game.apple().position()));

        game.step().unwrap();
        assert_eq!(game.snake().positions(), &[(360, 240), (340, 240)]);
    }

    #[test]
    fn test_first_frame_draws_apple_then_snake() {
        let mut game = game(GameConfig::default(), vec![]);
        game.step().unwrap();

        assert_eq!(
            game.term.fills,
            vec![
                (Rect { x: 0, y: 0, size: 20 }, APPLE_COLOR),
                (Rect { x: 320, y: 240, size: 20 }, SNAKE_COLOR),
            ]
        );
    }

    #[test]
    fn test_turn_and_reversal() {
        let mut game = game(GameConfig::default(), vec![vec![InputEvent::Turn(Left)], vec![InputEvent::Turn(Up)]]);

        game.step().unwrap();
        assert_eq!(game.snake().direction(), Right);
        assert_eq!(game.snake().head(), (340, 240));

        game.step().unwrap();
        assert_eq!(game.snake().direction(), Up);
        assert_eq!(game.snake().head(), (340, 220));
    }

    #[test]
    fn test_quit_stops_before_moving() {
        let mut game = game(GameConfig::default(), vec![vec![InputEvent::Turn(Up), InputEvent::Quit]]);

        assert_eq!(game.step().unwrap(), Flow::Quit);
        assert_eq!(game.snake().head(), (320, 240));
        assert_eq!(game.term.presents, 0);
    }

    #[test]
    fn test_play_returns_on_quit() {
        let mut game = game(GameConfig::default(), vec![vec![], vec![InputEvent::Quit]]);
        game.play().unwrap();

        assert_eq!(game.snake().head(), (340, 240));
        assert_eq!(game.term.clears, vec![BOARD_BACKGROUND_COLOR]);
    }

    #[test]
    fn test_self_collision_resets() {
        let mut game = game(GameConfig::default(), vec![]);
        game.snake = Snake::with_body(vec![(100, 100), (120, 100), (120, 120), (100, 120), (80, 120)], Down);

        game.step().unwrap();

        assert_eq!(game.snake().length(), 1);
        assert_eq!(game.snake().positions(), &[(320, 240)]);
        assert_eq!(game.term.clears, vec![BOARD_BACKGROUND_COLOR]);
    }

    #[test]
    fn test_neck_is_not_a_collision() {
        let mut game = game(GameConfig::default(), vec![]);
        game.snake = Snake::with_body(vec![(100, 100), (80, 100), (60, 100)], Right);

        game.step().unwrap();

        assert_eq!(game.snake().length(), 3);
        assert!(game.term.clears.is_empty());
    }

    #[test]
    fn test_full_board_starts_over() {
        let config = GameConfig {
            screen_width: 40,
            screen_height: 20,
            grid_size: 20,
            default_position: (0, 0),
            ..Default::default()
        };
        let mut game = SnakeGame::new(config, MockTerm::new(), StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(game.apple().position(), (20, 0));

        game.step().unwrap();
        assert_eq!(game.snake().length(), 2);
        assert_eq!(game.apple().position(), (0, 0));

        game.step().unwrap();
        assert_eq!(game.snake().length(), 1);
        assert_eq!(game.snake().positions(), &[(0, 0)]);
        assert_eq!(game.apple().position(), (20, 0));
        assert_eq!(game.term.clears, vec![BOARD_BACKGROUND_COLOR]);
    }
}
