//! Compact observations of the game state
//!
//! Two pure views of a [`Game`]:
//! - a 12-bit state index used as the Q-table row key
//! - a greedy, food-seeking action that the genome-driven controller builds on

use crate::game::{Direction, Game, Position};

/// Number of distinct state indices produced by [`encode_state`]
pub const STATE_SPACE: usize = 1 << 12;

/// Directions in the order the encoder and the heuristic enumerate them
pub const SCAN_ORDER: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

/// Check if a cell is off the board or occupied by any snake segment
pub fn is_danger(game: &Game, pos: Position) -> bool {
    !pos.is_in_bounds(game.grid_size()) || game.snake().contains(pos)
}

/// Encode the game state as an index in `[0, STATE_SPACE)`
///
/// Bits, least significant first:
/// - 0..4: food is right of, left of, below, above the head
/// - 4..8: danger to the left, right, up, down of the head
/// - 8..12: moving right, left, up, down, read from the head and the
///   segment behind it (all clear for a single-segment snake)
pub fn encode_state(game: &Game) -> usize {
    let head = game.snake().head();
    let food = game.food();
    let prev = game.snake().body().get(1).copied().unwrap_or(head);

    let food_bits = [
        head.x < food.x,
        head.x > food.x,
        head.y < food.y,
        head.y > food.y,
    ];
    let danger_bits = SCAN_ORDER.map(|d| is_danger(game, head.moved_in_direction(d)));
    let moving_bits = [
        head.x > prev.x,
        head.x < prev.x,
        head.y < prev.y,
        head.y > prev.y,
    ];

    food_bits
        .iter()
        .chain(danger_bits.iter())
        .chain(moving_bits.iter())
        .enumerate()
        .fold(0, |index, (bit, &set)| index | (usize::from(set) << bit))
}

/// Score of each direction in [`SCAN_ORDER`] for the greedy controller
///
/// A direction scores 1 when it closes the distance to the food on its axis,
/// is not the reverse of the current heading, and is not dangerous.
pub fn heuristic_scores(game: &Game) -> [u8; 4] {
    let head = game.snake().head();
    let food = game.food();
    let current = game.snake().direction();

    SCAN_ORDER.map(|direction| {
        let toward_food = match direction {
            Direction::Left => head.x > food.x,
            Direction::Right => head.x < food.x,
            Direction::Up => head.y > food.y,
            Direction::Down => head.y < food.y,
        };
        let preferred = toward_food && direction != current.opposite();
        let safe = !is_danger(game, head.moved_in_direction(direction));
        u8::from(preferred && safe)
    })
}

/// Greedy food-seeking move
///
/// Picks the highest-scoring direction; ties resolve to the first in
/// left, right, up, down order, so a board with no good move yields left.
pub fn heuristic_action(game: &Game) -> Direction {
    let scores = heuristic_scores(game);
    let mut best = 0;
    for (i, &score) in scores.iter().enumerate() {
        if score > scores[best] {
            best = i;
        }
    }
    SCAN_ORDER[best]
}
