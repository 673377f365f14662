//! Training mode for the tabular Q-learning agent
//!
//! Runs episodes on a small board, updating the Q-table after every
//! transition and decaying exploration after every episode. Progress is
//! printed every `log_frequency` episodes and appended to the score and
//! reward streams, and the table is checkpointed every
//! `checkpoint_frequency` episodes.
//!
//! # Example
//!
//! ```rust,no_run
//! use snake_agents::modes::{TrainConfig, TrainMode};
//! use std::path::PathBuf;
//!
//! let config = TrainConfig::new(10_000, PathBuf::from("runs/q_learning"));
//! let mut train_mode = TrainMode::new(config)?;
//! train_mode.run()?;
//! # Ok::<(), anyhow::Error>(())
//! ```

use anyhow::{Context, Result};
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::game::{Game, GameConfig, ACTION_SPACE};
use crate::metrics::{LogStream, TrainingStats};
use crate::persistence::{save_q_table, ModelMetadata, QTableArtifact};
use crate::rl::{QAgent, QLearningConfig, RewardConfig, SnakeEnvironment, STATE_SPACE};

/// Configuration for training mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainConfig {
    /// Number of episodes to train
    pub num_episodes: usize,

    /// Directory for the final table, checkpoints and log streams
    pub output_dir: PathBuf,

    /// Save a checkpoint every N episodes
    pub checkpoint_frequency: usize,

    /// Log training progress every N episodes
    pub log_frequency: usize,

    /// Episodes longer than this are cut off
    pub max_steps_per_episode: usize,

    pub game_config: GameConfig,
    pub q_learning: QLearningConfig,
    pub rewards: RewardConfig,

    /// Seed for exploration and food placement; entropy when unset
    pub seed: Option<u64>,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self::new(100_000, PathBuf::from("runs/q_learning"))
    }
}

impl TrainConfig {
    /// Create a new training configuration with defaults
    ///
    /// # Example
    ///
    /// ```rust
    /// use snake_agents::modes::TrainConfig;
    /// use std::path::PathBuf;
    ///
    /// let config = TrainConfig::new(10_000, PathBuf::from("runs/q"));
    /// assert_eq!(config.game_config.grid_size, 5);
    /// ```
    pub fn new(num_episodes: usize, output_dir: PathBuf) -> Self {
        Self {
            num_episodes,
            output_dir,
            checkpoint_frequency: 1000,
            log_frequency: 100,
            max_steps_per_episode: 10_000,
            game_config: GameConfig::small(),
            q_learning: QLearningConfig::default(),
            rewards: RewardConfig::default(),
            seed: None,
        }
    }

    pub fn model_path(&self) -> PathBuf {
        self.output_dir.join("q_table.json")
    }
}

/// Training mode for the Q-learning agent
pub struct TrainMode {
    agent: QAgent,
    env: SnakeEnvironment,
    /// Drives exploration
    rng: StdRng,
    stats: TrainingStats,
    config: TrainConfig,
    score_log: LogStream,
    reward_log: LogStream,
    current_episode: usize,
}

impl TrainMode {
    /// Validate the configuration, build the agent and open the log streams
    pub fn new(config: TrainConfig) -> Result<Self> {
        config
            .q_learning
            .validate()
            .context("Invalid Q-learning configuration")?;
        if config.log_frequency == 0 || config.checkpoint_frequency == 0 {
            anyhow::bail!("log_frequency and checkpoint_frequency must be at least 1");
        }

        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let game = Game::new(config.game_config.clone(), rng.gen())
            .context("Invalid game configuration")?;
        let env = SnakeEnvironment::new(game, config.rewards.clone());
        let agent = QAgent::new(config.q_learning.clone(), STATE_SPACE, ACTION_SPACE);

        let score_log = LogStream::create(config.output_dir.join("avg_score.txt"))?;
        let reward_log = LogStream::create(config.output_dir.join("avg_reward.txt"))?;

        Ok(Self {
            agent,
            env,
            rng,
            stats: TrainingStats::new(config.log_frequency),
            config,
            score_log,
            reward_log,
            current_episode: 0,
        })
    }

    /// Run the training loop
    pub fn run(&mut self) -> Result<()> {
        self.print_header();

        for episode in 0..self.config.num_episodes {
            self.current_episode = episode;

            let (episode_reward, episode_steps, episode_score) = self.run_episode();
            self.stats
                .record_episode(episode_reward, episode_steps, episode_score);
            self.stats.set_exploration_rate(self.agent.exploration_rate());

            if (episode + 1) % self.config.log_frequency == 0 {
                self.log_progress(episode + 1)?;
            }

            if (episode + 1) % self.config.checkpoint_frequency == 0 {
                self.save_checkpoint()?;
            }
        }

        let model_path = self.config.model_path();
        save_q_table(&self.artifact(), &model_path)
            .with_context(|| format!("Failed to save final table to {:?}", model_path))?;

        println!("\nTraining complete!");
        println!("Final Q-table saved to: {:?}", model_path);
        println!("\nFinal Statistics:");
        println!("{}", self.stats.format_summary());

        Ok(())
    }

    /// Run a single training episode
    ///
    /// Returns the total reward, the number of steps and the food eaten.
    fn run_episode(&mut self) -> (f64, usize, u32) {
        let mut state = self.env.reset();
        let mut episode_reward = 0.0;
        let mut episode_steps = 0;
        let mut done = false;

        while !done && episode_steps < self.config.max_steps_per_episode {
            let action = self.agent.choose_action(state, &mut self.rng);
            let (next_state, reward, terminated) = self.env.step(action);
            self.agent.update_q_table(state, action, reward, next_state);

            episode_reward += reward;
            episode_steps += 1;
            done = terminated;
            state = next_state;
        }

        if !done {
            debug!(
                "episode {} cut off after {} steps",
                self.current_episode + 1,
                episode_steps
            );
        }

        self.agent.decay_exploration();
        (episode_reward, episode_steps, self.env.game().score())
    }

    fn artifact(&self) -> QTableArtifact {
        QTableArtifact {
            q_table: self.agent.q_table().clone(),
            episodes_trained: self.stats.total_episodes(),
            config: self.config.q_learning.clone(),
            metadata: ModelMetadata::new(self.config.game_config.grid_size, self.config.seed),
        }
    }

    fn save_checkpoint(&self) -> Result<()> {
        let checkpoint_path = self
            .config
            .output_dir
            .join("checkpoints")
            .join(format!("q_table_ep{}.json", self.stats.total_episodes()));

        save_q_table(&self.artifact(), &checkpoint_path)
            .with_context(|| format!("Failed to save checkpoint to {:?}", checkpoint_path))?;

        info!("Checkpoint saved: {:?}", checkpoint_path);
        Ok(())
    }

    fn print_header(&self) {
        println!("{}", "=".repeat(70));
        println!("Q-Learning Training - Snake");
        println!("{}", "=".repeat(70));
        println!("Episodes: {}", self.config.num_episodes);
        println!(
            "Game Config: {}x{} grid",
            self.config.game_config.grid_size, self.config.game_config.grid_size
        );
        println!("Q-Learning Config:");
        println!("  Learning rate: {}", self.config.q_learning.learning_rate);
        println!("  Discount: {}", self.config.q_learning.discount);
        println!(
            "  Exploration: {} -> {} (x{} per episode)",
            self.config.q_learning.exploration_rate,
            self.config.q_learning.min_exploration,
            self.config.q_learning.exploration_decay
        );
        println!("Checkpoints: Every {} episodes", self.config.checkpoint_frequency);
        println!("Logging: Every {} episodes", self.config.log_frequency);
        println!("Output dir: {:?}", self.config.output_dir);
        println!("{}", "=".repeat(70));
        println!();
    }

    fn log_progress(&mut self, episode: usize) -> Result<()> {
        println!(
            "[Episode {}/{}] {}",
            episode,
            self.config.num_episodes,
            self.stats.format_summary()
        );
        self.score_log.record(self.stats.mean_episode_score())?;
        self.reward_log.record(self.stats.mean_episode_reward())?;
        Ok(())
    }

    pub fn agent(&self) -> &QAgent {
        &self.agent
    }

    pub fn stats(&self) -> &TrainingStats {
        &self.stats
    }
}
