//! Evaluation bench for trained agents
//!
//! Plays a batch of games with a fixed controller and reports win count,
//! average score and high score. Games that go too long without eating are
//! cut off and counted as timeouts.

use anyhow::{Context, Result};
use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::evolution::{play_episode, FitnessConfig};
use crate::game::{Game, GameConfig};
use crate::metrics::GameMetrics;
use crate::policy::ActionSelector;

/// Configuration for evaluation mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluateConfig {
    /// Number of games to play
    pub games: usize,

    pub game_config: GameConfig,

    /// Steps without eating before a game is cut off
    pub stall_limit: u64,

    /// Seed for food placement; entropy when unset
    pub seed: Option<u64>,
}

impl Default for EvaluateConfig {
    fn default() -> Self {
        Self {
            games: 100,
            game_config: GameConfig::default(),
            stall_limit: 10_000,
            seed: None,
        }
    }
}

pub struct EvaluateMode<S: ActionSelector> {
    selector: S,
    game: Game,
    config: EvaluateConfig,
    metrics: GameMetrics,
}

impl<S: ActionSelector> EvaluateMode<S> {
    pub fn new(config: EvaluateConfig, selector: S) -> Result<Self> {
        if config.stall_limit == 0 {
            anyhow::bail!("stall_limit must be at least 1");
        }
        let seed = config
            .seed
            .unwrap_or_else(|| StdRng::from_entropy().gen());
        let game = Game::new(config.game_config.clone(), seed)
            .context("Invalid game configuration")?;

        Ok(Self {
            selector,
            game,
            config,
            metrics: GameMetrics::new(),
        })
    }

    /// Play every game and return the tallies
    pub fn run(&mut self) -> Result<&GameMetrics> {
        let rollout = FitnessConfig {
            stall_limit: self.config.stall_limit,
            stall_penalty: 0,
            ..Default::default()
        };

        for game_index in 0..self.config.games {
            let outcome = play_episode(&mut self.game, &self.selector, &rollout);
            debug!(
                "game {}: score {}, {} steps{}",
                game_index + 1,
                self.game.score(),
                outcome.frames_alive,
                if outcome.won { ", won" } else { "" }
            );
            self.metrics.on_game_over(
                self.game.score(),
                outcome.frames_alive,
                outcome.won,
                outcome.stalled,
            );
        }
        self.metrics.update();

        println!("\nEvaluation complete!");
        println!("{}", self.metrics.format_summary());

        Ok(&self.metrics)
    }

    pub fn metrics(&self) -> &GameMetrics {
        &self.metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::HeuristicPolicy;

    #[test]
    fn test_heuristic_wins_every_tiny_game() {
        let config = EvaluateConfig {
            games: 10,
            game_config: GameConfig::new(2),
            seed: Some(1),
            ..Default::default()
        };
        let mut mode = EvaluateMode::new(config, HeuristicPolicy).unwrap();

        let metrics = mode.run().unwrap();

        assert_eq!(metrics.games_played, 10);
        assert_eq!(metrics.wins, 10);
        assert_eq!(metrics.high_score, 2);
        assert_eq!(metrics.average_score(), 2.0);
        assert_eq!(metrics.timeouts, 0);
    }

    #[test]
    fn test_tallies_cover_every_game() {
        let config = EvaluateConfig {
            games: 5,
            game_config: GameConfig::new(8),
            stall_limit: 500,
            seed: Some(3),
        };
        let mut mode = EvaluateMode::new(config, HeuristicPolicy).unwrap();

        mode.run().unwrap();

        let metrics = mode.metrics();
        assert_eq!(metrics.games_played, 5);
        assert!(metrics.wins + metrics.timeouts <= 5);
        assert!(metrics.average_score() <= metrics.high_score as f64);
    }

    #[test]
    fn test_zero_stall_limit_rejected() {
        let config = EvaluateConfig {
            stall_limit: 0,
            ..Default::default()
        };
        assert!(EvaluateMode::new(config, HeuristicPolicy).is_err());
    }
}
