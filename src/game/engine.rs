use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{
    action::Direction,
    config::GameConfig,
    state::{GameStatus, Position, Snake},
};
use crate::error::ConfigError;

/// The snake game: board, snake, food, score and terminal status
///
/// Food placement draws from the generator handed in at construction, so a
/// game built from a fixed seed replays identically.
#[derive(Debug, Clone)]
pub struct Game {
    config: GameConfig,
    snake: Snake,
    food: Position,
    score: u32,
    status: GameStatus,
    rng: StdRng,
}

impl Game {
    /// Create a new game whose food placement is seeded with `seed`
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    /// Create a new game drawing food positions from `rng`
    pub fn with_rng(config: GameConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let snake = Snake::centered(config.grid_size);
        let mut game = Self {
            config,
            snake,
            food: Position::new(0, 0),
            score: 0,
            status: GameStatus::Running,
            rng,
        };
        game.reset();
        Ok(game)
    }

    /// Create a game at an explicit state
    ///
    /// The food is taken as given; callers are responsible for keeping it off
    /// the snake.
    pub fn from_parts(
        config: GameConfig,
        snake: Snake,
        food: Position,
        rng: StdRng,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            snake,
            food,
            score: 0,
            status: GameStatus::Running,
            rng,
        })
    }

    /// Reset the game to its initial state and place fresh food
    pub fn reset(&mut self) {
        self.snake = Snake::centered(self.config.grid_size);
        self.score = 0;
        self.status = GameStatus::Running;
        // A length-2 snake on a board of at least 4 cells always leaves room
        if let Some(food) = self.spawn_food() {
            self.food = food;
        }
    }

    /// Alias for [`Game::reset`] used by the training loops
    pub fn reset_game(&mut self) {
        self.reset();
    }

    /// Execute one tick in the given direction
    ///
    /// Does nothing once the game is over or won. Eating places the new
    /// segment on the same tick, so a move that fills the board registers as
    /// a win and is never checked for collision.
    pub fn update(&mut self, direction: Direction) {
        if self.is_terminal() {
            return;
        }

        self.snake.change_direction(direction);

        let ate_food = self.snake.next_head() == self.food;
        if ate_food {
            self.snake.grow();
        }
        self.snake.move_forward();

        if ate_food {
            self.score += 1;
            if self.snake.len() >= self.config.cell_count() {
                self.status = GameStatus::Won;
                return;
            }
            match self.spawn_food() {
                Some(food) => self.food = food,
                None => {
                    self.status = GameStatus::Won;
                    return;
                }
            }
        }

        if self.is_collision() {
            self.status = GameStatus::GameOver;
        }
    }

    /// Execute one tick from an action index (`0 = Up, 1 = Down, 2 = Left, 3 = Right`)
    ///
    /// # Panics
    ///
    /// Panics on an index outside the action space.
    pub fn update_action(&mut self, action: usize) {
        let direction = Direction::from_index(action)
            .unwrap_or_else(|| panic!("action index {} outside 0..4", action));
        self.update(direction);
    }

    /// Check whether the head is off the board or on the body
    ///
    /// Called after the move, so the vacated tail cell is already free.
    pub fn is_collision(&self) -> bool {
        !self.snake.head().is_in_bounds(self.config.grid_size) || self.snake.head_hits_body()
    }

    /// Pick a uniformly random free cell, `None` when the board is full
    pub fn spawn_food(&mut self) -> Option<Position> {
        let n = self.config.grid_size as i32;
        let free: Vec<Position> = (0..n)
            .flat_map(|y| (0..n).map(move |x| Position::new(x, y)))
            .filter(|&pos| !self.snake.contains(pos))
            .collect();

        if free.is_empty() {
            return None;
        }
        Some(free[self.rng.gen_range(0..free.len())])
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> Position {
        self.food
    }

    /// Food eaten this episode
    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn is_won(&self) -> bool {
        self.status == GameStatus::Won
    }

    pub fn is_terminal(&self) -> bool {
        self.status != GameStatus::Running
    }
}
