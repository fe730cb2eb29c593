use std::collections::VecDeque;

use crate::config::GridSize;
use crate::grid::Position;
use crate::input::{Direction, direction_change_is_valid};
use crate::wall::Wall;

/// Why a move was rejected.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Collision {
    OutOfBounds,
    Wall,
    SelfCollision,
}

/// Result of one movement step.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum MoveOutcome {
    /// Head advanced, tail followed.
    Moved,
    /// Head advanced onto food, tail stayed.
    AteFood,
    /// Candidate head was invalid; the body did not change.
    Collided(Collision),
}

/// Snake body, heading, and the latched heading for the next tick.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    heading: Direction,
    pending_heading: Direction,
}

impl Default for Snake {
    /// Three segments at `(10,10) (9,10) (8,10)` heading right.
    fn default() -> Self {
        Self::from_segments(
            vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10),
            ],
            Direction::Right,
        )
    }
}

impl Snake {
    /// Creates a snake from explicit body segments (front is head).
    ///
    /// An empty segment list yields a one-cell snake at the origin.
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, heading: Direction) -> Self {
        let mut body = VecDeque::from(segments);
        if body.is_empty() {
            body.push_front(Position::new(0, 0));
        }

        Self {
            body,
            heading,
            pending_heading: heading,
        }
    }

    /// Latches `direction` for the next tick.
    ///
    /// Reversals of the current heading are ignored; returns whether the
    /// request was accepted.
    pub fn set_pending_heading(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.heading, direction) {
            return false;
        }
        self.pending_heading = direction;
        true
    }

    /// Advances one cell towards the committed heading.
    ///
    /// `food` is the position eaten if the new head lands on it.
    pub fn step(&mut self, food: Option<Position>, walls: &[Wall], bounds: GridSize) -> MoveOutcome {
        self.heading = self.pending_heading;
        let candidate = self.head().step(self.heading);

        if let Err(collision) = self.check_move(candidate, walls, bounds) {
            return MoveOutcome::Collided(collision);
        }

        self.body.push_front(candidate);
        if food == Some(candidate) {
            return MoveOutcome::AteFood;
        }

        let _ = self.body.pop_back();
        MoveOutcome::Moved
    }

    /// Validates a candidate head against bounds, walls, and the body.
    ///
    /// The current tail is excluded from the body check since it leaves its
    /// cell on a non-growing move.
    pub fn check_move(
        &self,
        candidate: Position,
        walls: &[Wall],
        bounds: GridSize,
    ) -> Result<(), Collision> {
        if !candidate.is_within_bounds(bounds) {
            return Err(Collision::OutOfBounds);
        }

        if walls.iter().any(|wall| wall.position == candidate) {
            return Err(Collision::Wall);
        }

        let without_tail = self.body.len().saturating_sub(1);
        if self
            .body
            .iter()
            .take(without_tail)
            .any(|segment| *segment == candidate)
        {
            return Err(Collision::SelfCollision);
        }

        Ok(())
    }

    #[must_use]
    pub fn is_valid_move(&self, candidate: Position, walls: &[Wall], bounds: GridSize) -> bool {
        self.check_move(candidate, walls, bounds).is_ok()
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        // The body is never empty: construction guarantees one segment and
        // `step` only pops after pushing.
        self.body.front().copied().unwrap_or(Position::new(0, 0))
    }

    /// Returns the tail position.
    #[must_use]
    pub fn tail(&self) -> Position {
        self.body.back().copied().unwrap_or(self.head())
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    /// Returns current segment count.
    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Returns true when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the committed heading.
    #[must_use]
    pub fn heading(&self) -> Direction {
        self.heading
    }

    /// Returns the heading that the next tick will commit.
    #[must_use]
    pub fn pending_heading(&self) -> Direction {
        self.pending_heading
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}

#[cfg(test)]
mod tests {
    use crate::config::GRID_SIZE;
    use crate::grid::Position;
    use crate::input::Direction;
    use crate::wall::Wall;

    use super::{Collision, MoveOutcome, Snake};

    fn segments(snake: &Snake) -> Vec<Position> {
        snake.segments().copied().collect()
    }

    /// Snake whose head at (2,2) is boxed in by its own body, tail at (3,2).
    fn coiled(heading: Direction) -> Snake {
        Snake::from_segments(
            vec![
                Position::new(2, 2),
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
            ],
            heading,
        )
    }

    #[test]
    fn default_snake_starts_in_the_middle() {
        let snake = Snake::default();
        assert_eq!(
            segments(&snake),
            vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ]
        );
        assert_eq!(snake.heading(), Direction::Right);
    }

    #[test]
    fn moving_keeps_length() {
        let mut snake = Snake::default();

        let outcome = snake.step(None, &[], GRID_SIZE);

        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(
            segments(&snake),
            vec![
                Position::new(11, 10),
                Position::new(10, 10),
                Position::new(9, 10)
            ]
        );
    }

    #[test]
    fn eating_grows_by_one() {
        let mut snake = Snake::default();

        let outcome = snake.step(Some(Position::new(11, 10)), &[], GRID_SIZE);

        assert_eq!(outcome, MoveOutcome::AteFood);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.tail(), Position::new(8, 10));
    }

    #[test]
    fn reversal_is_ignored() {
        let mut snake = Snake::default();

        assert!(!snake.set_pending_heading(Direction::Left));
        snake.step(None, &[], GRID_SIZE);

        assert_eq!(snake.head(), Position::new(11, 10));
        assert_eq!(snake.heading(), Direction::Right);
    }

    #[test]
    fn reversal_needs_an_intermediate_turn() {
        let mut snake = Snake::default();

        assert!(snake.set_pending_heading(Direction::Up));
        // Still heading right until the tick commits Up.
        assert!(!snake.set_pending_heading(Direction::Left));
        assert_eq!(snake.pending_heading(), Direction::Up);

        snake.step(None, &[], GRID_SIZE);
        assert!(snake.set_pending_heading(Direction::Left));
        snake.step(None, &[], GRID_SIZE);

        assert_eq!(snake.head(), Position::new(9, 9));
    }

    #[test]
    fn leaving_the_grid_collides_without_mutation() {
        let mut snake = Snake::from_segments(
            vec![Position::new(19, 0), Position::new(18, 0)],
            Direction::Right,
        );
        let before = segments(&snake);

        let outcome = snake.step(None, &[], GRID_SIZE);

        assert_eq!(outcome, MoveOutcome::Collided(Collision::OutOfBounds));
        assert_eq!(segments(&snake), before);
    }

    #[test]
    fn wall_ahead_collides_without_mutation() {
        let mut snake = Snake::default();
        let before = segments(&snake);

        let outcome = snake.step(None, &[Wall::at(11, 10)], GRID_SIZE);

        assert_eq!(outcome, MoveOutcome::Collided(Collision::Wall));
        assert_eq!(segments(&snake), before);
    }

    #[test]
    fn is_valid_move_rejects_bounds_walls_and_body() {
        let snake = Snake::default();
        let walls = [Wall::at(0, 0)];

        assert!(!snake.is_valid_move(Position::new(-1, 4), &walls, GRID_SIZE));
        assert!(!snake.is_valid_move(Position::new(4, 20), &walls, GRID_SIZE));
        assert!(!snake.is_valid_move(Position::new(0, 0), &walls, GRID_SIZE));
        assert!(!snake.is_valid_move(Position::new(10, 10), &walls, GRID_SIZE));
        assert!(!snake.is_valid_move(Position::new(9, 10), &walls, GRID_SIZE));
        assert!(snake.is_valid_move(Position::new(8, 10), &walls, GRID_SIZE));
        assert!(snake.is_valid_move(Position::new(11, 10), &walls, GRID_SIZE));
    }

    #[test]
    fn moving_into_the_vacating_tail_is_legal() {
        let mut snake = coiled(Direction::Up);
        assert!(snake.set_pending_heading(Direction::Right));

        let outcome = snake.step(None, &[], GRID_SIZE);

        assert_eq!(outcome, MoveOutcome::Moved);
        assert_eq!(snake.head(), Position::new(3, 2));
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn moving_into_a_body_segment_collides() {
        let mut snake = coiled(Direction::Left);
        assert!(snake.set_pending_heading(Direction::Down));

        let outcome = snake.step(None, &[], GRID_SIZE);

        assert_eq!(outcome, MoveOutcome::Collided(Collision::SelfCollision));
        assert_eq!(snake.len(), 4);
    }
}
