//! Action selection for trained agents
//!
//! Every agent is reduced to one [`ActionSelector`] when it is constructed,
//! so the play loop never branches on agent type per tick.

use crate::error::{ConfigError, GeneticError};
use crate::evolution::Genome;
use crate::game::{Direction, Game, ACTION_SPACE};
use crate::rl::observation::{heuristic_action, heuristic_scores, is_danger, SCAN_ORDER};
use crate::rl::{encode_state, QTable, STATE_SPACE};

/// Chooses the next move from a read-only view of the game
pub trait ActionSelector {
    fn select_action(&self, game: &Game) -> Direction;
}

impl<T: ActionSelector + ?Sized> ActionSelector for Box<T> {
    fn select_action(&self, game: &Game) -> Direction {
        (**self).select_action(game)
    }
}

/// The bare greedy food-seeking rule
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy;

impl ActionSelector for HeuristicPolicy {
    fn select_action(&self, game: &Game) -> Direction {
        heuristic_action(game)
    }
}

/// Greedy lookup in a learned Q-table
#[derive(Debug, Clone)]
pub struct QTablePolicy {
    table: QTable,
}

impl QTablePolicy {
    /// Wrap a table; its shape must match the state encoder and action space
    pub fn new(table: QTable) -> Result<Self, ConfigError> {
        if table.state_space() != STATE_SPACE || table.action_space() != ACTION_SPACE {
            return Err(ConfigError::TableShape {
                expected_states: STATE_SPACE,
                expected_actions: ACTION_SPACE,
                states: table.state_space(),
                actions: table.action_space(),
            });
        }
        Ok(Self { table })
    }
}

impl ActionSelector for QTablePolicy {
    fn select_action(&self, game: &Game) -> Direction {
        let action = self.table.best_action(encode_state(game));
        Direction::ALL[action]
    }
}

/// Greedy controller whose fallback moves are shaped by a genome
///
/// When the greedy rule has a food-aligned safe move it is taken. Otherwise
/// the controller picks the safe, non-reversing direction the genome prefers
/// most, and defers to the greedy rule when nothing is safe.
#[derive(Debug, Clone, PartialEq)]
pub struct GenomePolicy {
    /// Indexed by action index
    preferences: [f64; ACTION_SPACE],
}

impl GenomePolicy {
    /// Decode a genome into per-direction preferences
    pub fn new(genome: &Genome) -> Result<Self, GeneticError> {
        Ok(Self {
            preferences: genome.direction_preferences()?,
        })
    }

    /// Preference weight for a direction, in [0, 1]
    pub fn preference(&self, direction: Direction) -> f64 {
        self.preferences[direction.index()]
    }
}

impl ActionSelector for GenomePolicy {
    fn select_action(&self, game: &Game) -> Direction {
        if heuristic_scores(game).iter().any(|&score| score > 0) {
            return heuristic_action(game);
        }

        let head = game.snake().head();
        let reverse = game.snake().direction().opposite();
        let mut best: Option<(Direction, f64)> = None;
        for direction in SCAN_ORDER {
            if direction == reverse || is_danger(game, head.moved_in_direction(direction)) {
                continue;
            }
            let weight = self.preference(direction);
            if best.map_or(true, |(_, best_weight)| weight > best_weight) {
                best = Some((direction, weight));
            }
        }

        best.map(|(direction, _)| direction)
            .unwrap_or_else(|| heuristic_action(game))
    }
}
