//! Episode rollouts and the curriculum fitness formula

use super::config::FitnessConfig;
use super::genome::Genome;
use crate::error::GeneticError;
use crate::game::Game;
use crate::policy::{ActionSelector, GenomePolicy};

/// Result of one played-out episode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EpisodeOutcome {
    /// Final body length minus one
    pub score: u64,
    /// Ticks played, less the stall penalty when the episode was cut off
    pub frames_alive: u64,
    pub won: bool,
    pub stalled: bool,
}

/// Mean fitness and mean score of one genome
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitnessReport {
    pub fitness: f64,
    pub mean_score: f64,
}

/// Reset `game` and let `selector` play until the episode ends
///
/// An episode that goes `stall_limit` ticks without eating is cut off and
/// loses `stall_penalty` frames.
pub fn play_episode<S: ActionSelector + ?Sized>(
    game: &mut Game,
    selector: &S,
    config: &FitnessConfig,
) -> EpisodeOutcome {
    game.reset_game();

    let mut frames_alive: u64 = 0;
    let mut frames_since_food: u64 = 0;
    let mut stalled = false;

    while !game.is_terminal() {
        let direction = selector.select_action(game);
        let prev_score = game.score();
        game.update(direction);
        frames_alive += 1;

        if game.score() > prev_score {
            frames_since_food = 0;
        } else {
            frames_since_food += 1;
        }

        if frames_since_food >= config.stall_limit {
            stalled = true;
            frames_alive = frames_alive.saturating_sub(config.stall_penalty);
            break;
        }
    }

    EpisodeOutcome {
        score: game.snake().len().saturating_sub(1) as u64,
        frames_alive,
        won: game.is_won(),
        stalled,
    }
}

/// Fitness of a single episode
///
/// Early generations reward eating (`score^3 * frames`); from
/// `switch_generation` on, survival weighs more (`(2 * score)^2 * frames^1.5`).
pub fn episode_fitness(outcome: &EpisodeOutcome, generation: usize, config: &FitnessConfig) -> f64 {
    let score = outcome.score as f64;
    let frames = outcome.frames_alive as f64;
    if generation < config.switch_generation {
        score.powi(3) * frames
    } else {
        (2.0 * score).powi(2) * frames.powf(1.5)
    }
}

/// Play `config.episodes` episodes with the genome's controller and average
pub fn evaluate_genome(
    genome: &Genome,
    game: &mut Game,
    generation: usize,
    config: &FitnessConfig,
) -> Result<FitnessReport, GeneticError> {
    let policy = GenomePolicy::new(genome)?;
    evaluate_selector(&policy, game, generation, config)
}

/// Average fitness and score of any controller over `config.episodes` episodes
pub fn evaluate_selector<S: ActionSelector + ?Sized>(
    selector: &S,
    game: &mut Game,
    generation: usize,
    config: &FitnessConfig,
) -> Result<FitnessReport, GeneticError> {
    config.validate()?;
    let episodes = config.episodes;
    let mut fitness_sum = 0.0;
    let mut score_sum = 0.0;

    for _ in 0..episodes {
        let outcome = play_episode(game, selector, config);
        fitness_sum += episode_fitness(&outcome, generation, config);
        score_sum += outcome.score as f64;
    }

    Ok(FitnessReport {
        fitness: fitness_sum / episodes as f64,
        mean_score: score_sum / episodes as f64,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use crate::game::{Direction, GameConfig};
    use crate::policy::HeuristicPolicy;

    /// Turns clockwise every tick
    struct Circler;

    impl ActionSelector for Circler {
        fn select_action(&self, game: &Game) -> Direction {
            match game.snake().direction() {
                Direction::Up => Direction::Right,
                Direction::Right => Direction::Down,
                Direction::Down => Direction::Left,
                Direction::Left => Direction::Up,
            }
        }
    }

    #[test]
    fn test_fitness_before_switch() {
        let config = FitnessConfig::default();
        let outcome = EpisodeOutcome {
            score: 3,
            frames_alive: 10,
            won: false,
            stalled: false,
        };
        assert_eq!(episode_fitness(&outcome, 0, &config), 270.0);
        assert_eq!(episode_fitness(&outcome, 249, &config), 270.0);
    }

    #[test]
    fn test_fitness_after_switch() {
        let config = FitnessConfig::default();
        let outcome = EpisodeOutcome {
            score: 3,
            frames_alive: 4,
            won: false,
            stalled: false,
        };
        // (2*3)^2 * 4^1.5 = 36 * 8
        assert_eq!(episode_fitness(&outcome, 250, &config), 288.0);
    }

    #[test]
    fn test_zero_score_has_zero_fitness() {
        let config = FitnessConfig::default();
        let outcome = EpisodeOutcome {
            score: 0,
            frames_alive: 500,
            won: false,
            stalled: false,
        };
        assert_eq!(episode_fitness(&outcome, 0, &config), 0.0);
        assert_eq!(episode_fitness(&outcome, 300, &config), 0.0);
    }

    #[test]
    fn test_stalled_episode_is_cut_off_and_penalised() {
        let config = FitnessConfig {
            stall_limit: 60,
            stall_penalty: 50,
            ..Default::default()
        };
        let mut game = Game::new(GameConfig::new(10), 1).unwrap();

        let outcome = play_episode(&mut game, &Circler, &config);

        // A two-cell snake circling a 2x2 loop never collides, so unless food
        // spawned on the loop the episode can only end by stalling
        if outcome.score == 0 {
            assert!(outcome.stalled);
            assert_eq!(outcome.frames_alive, 10);
            assert!(!game.is_terminal());
        }
    }

    #[test]
    fn test_stall_penalty_saturates() {
        let config = FitnessConfig {
            stall_limit: 1,
            stall_penalty: 50,
            ..Default::default()
        };
        let mut game = Game::new(GameConfig::new(10), 2).unwrap();

        let outcome = play_episode(&mut game, &Circler, &config);
        if outcome.stalled {
            assert_eq!(outcome.frames_alive, 0);
        }
    }

    #[test]
    fn test_heuristic_wins_tiny_board() {
        let mut game = Game::new(GameConfig::new(2), 3).unwrap();
        let outcome = play_episode(&mut game, &HeuristicPolicy, &FitnessConfig::default());

        assert!(outcome.won);
        assert_eq!(outcome.score, 3);
        assert!(outcome.frames_alive > 0);
    }

    #[test]
    fn test_evaluate_genome_averages_episodes() {
        let config = FitnessConfig {
            episodes: 5,
            ..Default::default()
        };
        let genome = Genome::from_bits(vec![true; 8]);
        let mut game = Game::new(GameConfig::new(2), 4).unwrap();

        let report = evaluate_genome(&genome, &mut game, 0, &config).unwrap();

        // Every episode on a 2x2 board is won with score 3
        assert_eq!(report.mean_score, 3.0);
        assert!(report.fitness > 0.0);
    }

    #[test]
    fn test_evaluate_genome_is_reproducible_per_seed() {
        let config = FitnessConfig {
            episodes: 3,
            ..Default::default()
        };
        let genome = Genome::from_bits(vec![true, false, true, true, false, false, true, false]);

        let mut first = Game::new(GameConfig::new(8), 11).unwrap();
        let mut second = Game::new(GameConfig::new(8), 11).unwrap();

        assert_eq!(
            evaluate_genome(&genome, &mut first, 0, &config).unwrap(),
            evaluate_genome(&genome, &mut second, 0, &config).unwrap()
        );
    }

    #[test]
    fn test_evaluate_genome_rejects_short_genome() {
        let mut game = Game::new(GameConfig::new(5), 1).unwrap();
        let genome = Genome::from_bits(vec![true; 2]);
        assert!(evaluate_genome(&genome, &mut game, 0, &FitnessConfig::default()).is_err());
    }

    #[test]
    fn test_zero_episodes_is_rejected() {
        let config = FitnessConfig {
            episodes: 0,
            ..Default::default()
        };
        let genome = Genome::from_bits(vec![true; 8]);
        let mut game = Game::new(GameConfig::new(2), 4).unwrap();

        assert_eq!(
            evaluate_genome(&genome, &mut game, 0, &config),
            Err(GeneticError::Config(ConfigError::Zero("episodes")))
        );
        assert_eq!(
            evaluate_selector(&HeuristicPolicy, &mut game, 0, &config),
            Err(GeneticError::Config(ConfigError::Zero("episodes")))
        );
    }
}
