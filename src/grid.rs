use crate::config::{GridSize, SPAWN_ATTEMPTS};
use crate::input::Direction;
use crate::rng::RandomSource;

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring position one cell towards `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Chebyshev distance to `other`.
    #[must_use]
    pub fn chebyshev_distance(self, other: Self) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }
}

/// Center cell of a grid (`(10, 10)` on the 20×20 board).
#[must_use]
pub fn center(bounds: GridSize) -> Position {
    Position {
        x: i32::from(bounds.width / 2),
        y: i32::from(bounds.height / 2),
    }
}

/// Finds a cell for which `is_blocked` returns false.
///
/// Samples uniformly up to [`SPAWN_ATTEMPTS`] times, then scans the grid in
/// row-major order. Returns `None` when every cell is blocked.
pub fn find_free_cell<R, F>(rng: &mut R, bounds: GridSize, is_blocked: F) -> Option<Position>
where
    R: RandomSource + ?Sized,
    F: Fn(Position) -> bool,
{
    if bounds.total_cells() == 0 {
        return None;
    }

    for _ in 0..SPAWN_ATTEMPTS {
        let candidate = Position {
            x: rng.below(usize::from(bounds.width)) as i32,
            y: rng.below(usize::from(bounds.height)) as i32,
        };
        if !is_blocked(candidate) {
            return Some(candidate);
        }
    }

    log::debug!("random placement exhausted after {SPAWN_ATTEMPTS} attempts, scanning grid");
    cells(bounds).find(|cell| !is_blocked(*cell))
}

/// Iterates every cell of the grid in row-major order.
pub fn cells(bounds: GridSize) -> impl Iterator<Item = Position> {
    let width = i32::from(bounds.width);
    let height = i32::from(bounds.height);
    (0..height).flat_map(move |y| (0..width).map(move |x| Position { x, y }))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::{GRID_SIZE, GridSize};
    use crate::input::Direction;
    use crate::rng::SequenceRandom;

    use super::{Position, center, cells, find_free_cell};

    #[test]
    fn bounds_check_rejects_every_edge() {
        assert!(Position::new(0, 0).is_within_bounds(GRID_SIZE));
        assert!(Position::new(19, 19).is_within_bounds(GRID_SIZE));
        assert!(!Position::new(-1, 5).is_within_bounds(GRID_SIZE));
        assert!(!Position::new(5, -1).is_within_bounds(GRID_SIZE));
        assert!(!Position::new(20, 5).is_within_bounds(GRID_SIZE));
        assert!(!Position::new(5, 20).is_within_bounds(GRID_SIZE));
    }

    #[test]
    fn step_moves_one_cell() {
        let origin = Position::new(10, 10);
        assert_eq!(origin.step(Direction::Up), Position::new(10, 9));
        assert_eq!(origin.step(Direction::Down), Position::new(10, 11));
        assert_eq!(origin.step(Direction::Left), Position::new(9, 10));
        assert_eq!(origin.step(Direction::Right), Position::new(11, 10));
    }

    #[test]
    fn center_of_default_grid() {
        assert_eq!(center(GRID_SIZE), Position::new(10, 10));
    }

    #[test]
    fn free_cell_is_never_blocked() {
        let mut rng = StdRng::seed_from_u64(11);
        let blocked = |p: Position| p.x < 18;

        for _ in 0..50 {
            let cell = find_free_cell(&mut rng, GRID_SIZE, blocked).expect("free cell");
            assert!(cell.x >= 18);
        }
    }

    #[test]
    fn falls_back_to_scan_when_sampling_keeps_missing() {
        // Always samples (0, 0), which is blocked.
        let mut rng = SequenceRandom::new(vec![0]);
        let bounds = GridSize {
            width: 3,
            height: 3,
        };

        let cell = find_free_cell(&mut rng, bounds, |p| p == Position::new(0, 0));

        assert_eq!(cell, Some(Position::new(1, 0)));
    }

    #[test]
    fn full_board_yields_none() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(find_free_cell(&mut rng, GRID_SIZE, |_| true), None);
    }

    #[test]
    fn cells_are_row_major() {
        let bounds = GridSize {
            width: 2,
            height: 2,
        };
        let all: Vec<_> = cells(bounds).collect();
        assert_eq!(
            all,
            vec![
                Position::new(0, 0),
                Position::new(1, 0),
                Position::new(0, 1),
                Position::new(1, 1),
            ]
        );
    }
}
