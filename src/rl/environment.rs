use super::config::RewardConfig;
use super::observation::encode_state;
use super::reward::transition_reward;
use crate::game::{Direction, Game};

/// Snake environment for tabular reinforcement learning
///
/// Wraps the game and provides a discrete RL interface with:
/// - State indices from the 12-bit encoder
/// - Discrete action space (0: Up, 1: Down, 2: Left, 3: Right)
/// - Standard RL interface (reset, step)
pub struct SnakeEnvironment {
    game: Game,
    rewards: RewardConfig,
}

impl SnakeEnvironment {
    /// Create a new Snake environment around an existing game
    pub fn new(game: Game, rewards: RewardConfig) -> Self {
        Self { game, rewards }
    }

    /// Reset the environment and return the initial state index
    pub fn reset(&mut self) -> usize {
        self.game.reset_game();
        encode_state(&self.game)
    }

    /// Step the environment with a discrete action
    ///
    /// Returns: (next_state, reward, done), where done covers both losing and
    /// winning.
    ///
    /// # Panics
    ///
    /// Panics on an action index outside 0..4.
    pub fn step(&mut self, action: usize) -> (usize, f64, bool) {
        let direction = Direction::from_index(action)
            .unwrap_or_else(|| panic!("action index {} outside 0..4", action));

        let prev_score = self.game.score();
        self.game.update(direction);

        let reward = transition_reward(&self.game, prev_score, &self.rewards);
        let next_state = encode_state(&self.game);

        (next_state, reward, self.game.is_terminal())
    }

    /// Get current state index without stepping
    pub fn state(&self) -> usize {
        encode_state(&self.game)
    }

    /// Get reference to current game (for testing/debugging)
    pub fn game(&self) -> &Game {
        &self.game
    }
}
