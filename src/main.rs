use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use snake_agents::config::RunConfig;
use snake_agents::game::GameConfig;
use snake_agents::modes::{EvaluateMode, EvolveMode, TrainMode};
use snake_agents::persistence::{load_genome, load_q_table};
use snake_agents::policy::{ActionSelector, GenomePolicy, HeuristicPolicy, QTablePolicy};

#[derive(Parser)]
#[command(name = "snake_agents")]
#[command(version, about = "Q-learning and genetic algorithm agents for Snake")]
struct Cli {
    /// What to run
    #[arg(long, default_value = "train")]
    mode: Mode,

    /// JSON run configuration; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Training episodes (train mode)
    #[arg(long)]
    episodes: Option<usize>,

    /// Generations (evolve mode)
    #[arg(long)]
    generations: Option<usize>,

    /// Population size (evolve mode)
    #[arg(long)]
    population: Option<usize>,

    /// Games to play (evaluate mode)
    #[arg(long)]
    games: Option<usize>,

    /// Board side length
    #[arg(long)]
    grid_size: Option<usize>,

    /// Seed for every random stream of the run
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for models, checkpoints and log streams
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Controller to evaluate
    #[arg(long, default_value = "heuristic")]
    agent: Agent,

    /// Saved Q-table or genome to evaluate
    #[arg(long)]
    model: Option<PathBuf>,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Train a tabular Q-learning agent
    Train,
    /// Evolve a population of genomes
    Evolve,
    /// Benchmark a controller over a batch of games
    Evaluate,
}

#[derive(Clone, ValueEnum)]
enum Agent {
    /// Greedy lookup in a saved Q-table
    QTable,
    /// Genome-shaped greedy controller
    Genome,
    /// Plain greedy food-seeking rule
    Heuristic,
}

impl Cli {
    /// Merge the config file, if any, with command-line overrides
    fn run_config(&self) -> Result<RunConfig> {
        let mut config = match &self.config {
            Some(path) => RunConfig::load(path)?,
            None => RunConfig::default(),
        };

        if let Some(episodes) = self.episodes {
            config.train.num_episodes = episodes;
        }
        if let Some(generations) = self.generations {
            config.evolve.ga.generations = generations;
        }
        if let Some(population) = self.population {
            config.evolve.ga.population_size = population;
        }
        if let Some(games) = self.games {
            config.evaluate.games = games;
        }
        if let Some(grid_size) = self.grid_size {
            config.train.game_config = GameConfig::new(grid_size);
            config.evolve.ga.grid_size = grid_size;
            config.evaluate.game_config = GameConfig::new(grid_size);
        }
        if let Some(seed) = self.seed {
            config.train.seed = Some(seed);
            config.evolve.ga.seed = Some(seed);
            config.evaluate.seed = Some(seed);
        }
        if let Some(output_dir) = &self.output_dir {
            config.train.output_dir = output_dir.clone();
            config.evolve.output_dir = output_dir.clone();
        }

        Ok(config)
    }

    fn selector(&self, config: &RunConfig) -> Result<Box<dyn ActionSelector>> {
        let selector: Box<dyn ActionSelector> = match self.agent {
            Agent::Heuristic => Box::new(HeuristicPolicy),
            Agent::QTable => {
                let path = self
                    .model
                    .clone()
                    .unwrap_or_else(|| config.train.model_path());
                let artifact = load_q_table(&path)?;
                log::info!(
                    "Loaded Q-table trained for {} episodes from {:?}",
                    artifact.episodes_trained,
                    path
                );
                Box::new(QTablePolicy::new(artifact.q_table).context("Unusable Q-table")?)
            }
            Agent::Genome => {
                let path = self
                    .model
                    .clone()
                    .unwrap_or_else(|| config.evolve.model_path());
                let artifact = load_genome(&path)?;
                log::info!(
                    "Loaded genome from generation {} (fitness {:.2}) from {:?}",
                    artifact.generation,
                    artifact.fitness,
                    path
                );
                Box::new(GenomePolicy::new(&artifact.genome).context("Unusable genome")?)
            }
        };
        Ok(selector)
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.run_config()?;

    match cli.mode {
        Mode::Train => {
            let mut train_mode = TrainMode::new(config.train)?;
            train_mode.run()?;
        }
        Mode::Evolve => {
            let mut evolve_mode = EvolveMode::new(config.evolve)?;
            evolve_mode.run()?;
        }
        Mode::Evaluate => {
            let selector = cli.selector(&config)?;
            let mut evaluate_mode = EvaluateMode::new(config.evaluate, selector)?;
            evaluate_mode.run()?;
        }
    }

    Ok(())
}
