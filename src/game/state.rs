use std::collections::VecDeque;

use super::action::Direction;

/// A position on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move position by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Move position in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Check if the position lies on a `grid_size` x `grid_size` board
    pub fn is_in_bounds(&self, grid_size: usize) -> bool {
        let n = grid_size as i32;
        self.x >= 0 && self.x < n && self.y >= 0 && self.y < n
    }
}

/// The snake in the game
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    /// Body segments, with head at the front
    body: VecDeque<Position>,
    /// Current direction of movement
    direction: Direction,
    /// Skip the tail trim on the next move
    growing: bool,
}

impl Snake {
    /// Create a snake from explicit segments, head first
    ///
    /// # Panics
    ///
    /// Panics if `body` is empty.
    pub fn new(body: Vec<Position>, direction: Direction) -> Self {
        assert!(!body.is_empty(), "snake body must have at least one segment");
        Self {
            body: body.into(),
            direction,
            growing: false,
        }
    }

    /// The starting snake: length 2, facing up, head near the centre
    ///
    /// The head row is clamped so the tail below it stays on the board.
    pub fn centered(grid_size: usize) -> Self {
        let mid = (grid_size / 2) as i32;
        let head_y = mid.min(grid_size as i32 - 2);
        Self::new(
            vec![Position::new(mid, head_y), Position::new(mid, head_y + 1)],
            Direction::Up,
        )
    }

    /// Get the head position
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Get the tail position (last segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// All segments, head first
    pub fn body(&self) -> &VecDeque<Position> {
        &self.body
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_growing(&self) -> bool {
        self.growing
    }

    /// Where the head lands on the next move
    pub fn next_head(&self) -> Position {
        self.head().moved_in_direction(self.direction)
    }

    /// Check if position is occupied by any segment, head included
    pub fn contains(&self, pos: Position) -> bool {
        self.body.contains(&pos)
    }

    /// Check if position collides with body segments (excluding head)
    pub fn collides_with_body(&self, pos: Position) -> bool {
        self.body.iter().skip(1).any(|&segment| segment == pos)
    }

    /// Check if the head shares a cell with any other segment
    ///
    /// Meant for after [`Snake::move_forward`], which has already released
    /// the vacated tail cell.
    pub fn head_hits_body(&self) -> bool {
        self.collides_with_body(self.head())
    }

    /// Turn, unless the new direction is the exact reverse of the current one
    ///
    /// Returns whether the direction was accepted.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if self.direction.is_opposite(direction) {
            return false;
        }
        self.direction = direction;
        true
    }

    /// Keep the tail in place on the next move
    pub fn grow(&mut self) {
        self.growing = true;
    }

    /// Advance one cell in the current direction
    pub fn move_forward(&mut self) {
        let new_head = self.next_head();
        self.body.push_front(new_head);

        if !self.growing {
            self.body.pop_back();
        }
        self.growing = false;
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }
}

/// Where an episode stands; exactly one holds at a time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Running,
    /// The head left the board or ran into the body
    GameOver,
    /// The body covers every cell
    Won,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_movement() {
        let pos = Position::new(5, 5);
        assert_eq!(pos.moved_by(1, 0), Position::new(6, 5));
        assert_eq!(pos.moved_by(-1, 0), Position::new(4, 5));
        assert_eq!(pos.moved_in_direction(Direction::Down), Position::new(5, 6));
        assert_eq!(pos.moved_in_direction(Direction::Up), Position::new(5, 4));
    }

    #[test]
    fn test_bounds_checking() {
        assert!(Position::new(0, 0).is_in_bounds(20));
        assert!(Position::new(19, 19).is_in_bounds(20));
        assert!(!Position::new(-1, 0).is_in_bounds(20));
        assert!(!Position::new(20, 0).is_in_bounds(20));
        assert!(!Position::new(0, 20).is_in_bounds(20));
    }

    #[test]
    fn test_centered_snake() {
        let snake = Snake::centered(5);
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), Position::new(2, 2));
        assert_eq!(snake.tail(), Position::new(2, 3));
        assert_eq!(snake.direction(), Direction::Up);

        let snake = Snake::centered(2);
        assert_eq!(snake.head(), Position::new(1, 0));
        assert_eq!(snake.tail(), Position::new(1, 1));
        assert!(snake.body().iter().all(|p| p.is_in_bounds(2)));
    }

    #[test]
    fn test_move_preserves_length() {
        let mut snake = Snake::centered(10);
        let head = snake.head();

        snake.move_forward();
        assert_eq!(snake.len(), 2);
        assert_eq!(snake.head(), head.moved_in_direction(Direction::Up));
        assert_eq!(snake.tail(), head);
    }

    #[test]
    fn test_grow_adds_exactly_one_segment() {
        let mut snake = Snake::centered(10);
        snake.grow();
        assert!(snake.is_growing());

        snake.move_forward();
        assert_eq!(snake.len(), 3);
        assert!(!snake.is_growing());

        // Growth is one-shot
        snake.move_forward();
        assert_eq!(snake.len(), 3);
    }

    #[test]
    fn test_change_direction_rejects_reverse_only() {
        for current in Direction::ALL {
            for requested in Direction::ALL {
                let mut snake = Snake::new(vec![Position::new(5, 5)], current);
                let accepted = snake.change_direction(requested);
                if requested == current.opposite() {
                    assert!(!accepted);
                    assert_eq!(snake.direction(), current);
                } else {
                    assert!(accepted);
                    assert_eq!(snake.direction(), requested);
                }
            }
        }
    }

    #[test]
    fn test_collision_detection() {
        let snake = Snake::new(
            vec![Position::new(5, 5), Position::new(4, 5), Position::new(3, 5)],
            Direction::Right,
        );
        assert!(!snake.collides_with_body(Position::new(5, 5))); // head
        assert!(snake.collides_with_body(Position::new(4, 5))); // body
        assert!(!snake.collides_with_body(Position::new(10, 10))); // empty
        assert!(!snake.head_hits_body());
    }

    #[test]
    fn test_head_on_last_segment_is_a_hit() {
        let snake = Snake::new(
            vec![
                Position::new(1, 1),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(1, 1),
            ],
            Direction::Up,
        );
        assert!(snake.head_hits_body());

        let snake = Snake::new(
            vec![
                Position::new(1, 1),
                Position::new(1, 1),
                Position::new(2, 2),
                Position::new(2, 3),
            ],
            Direction::Up,
        );
        assert!(snake.head_hits_body());
    }
}
