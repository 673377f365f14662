use super::config::RewardConfig;
use crate::game::{Direction, Game};

/// Reward for the transition that produced `game`
///
/// Collision outranks being trapped, which outranks eating. `prev_score` is
/// the score before the move.
pub fn transition_reward(game: &Game, prev_score: u32, rewards: &RewardConfig) -> f64 {
    if game.is_collision() {
        return rewards.collision_penalty;
    }

    if escape_routes(game) == 0 {
        return rewards.trapped_penalty;
    }

    if game.score() > prev_score {
        return rewards.food_reward;
    }

    0.0
}

/// Number of in-bounds neighbours of the head not covered by the body
pub fn escape_routes(game: &Game) -> usize {
    let snake = game.snake();
    let head = snake.head();
    Direction::ALL
        .iter()
        .map(|&d| head.moved_in_direction(d))
        .filter(|&pos| pos.is_in_bounds(game.grid_size()) && !snake.collides_with_body(pos))
        .count()
}
