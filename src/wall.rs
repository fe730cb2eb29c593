use crate::config::{GridSize, RANDOM_WALL_COUNT, WALL_SAFE_RADIUS};
use crate::grid::{Position, center, find_free_cell};
use crate::rng::RandomSource;

/// Static obstacle cell.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Wall {
    pub position: Position,
}

impl Wall {
    #[must_use]
    pub const fn at(x: i32, y: i32) -> Self {
        Self {
            position: Position { x, y },
        }
    }
}

/// Wall layouts, one per level until the table runs out.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum WallPattern {
    /// Row y = 5 for x in 5..15.
    HorizontalBar,
    /// Column x = 5 for y in 5..15.
    VerticalBar,
    /// Closed 10×10 box with corners at (5,5) and (14,14).
    ClosedBox,
    /// Box sides plus a bottom row at y = 15, open at the top.
    OpenBox,
    /// Scattered random obstacles around a clear center.
    Scattered,
}

impl WallPattern {
    pub const TABLE: [WallPattern; 5] = [
        WallPattern::HorizontalBar,
        WallPattern::VerticalBar,
        WallPattern::ClosedBox,
        WallPattern::OpenBox,
        WallPattern::Scattered,
    ];

    /// Index into [`Self::TABLE`] for `level`: `min(level - 1, len - 1)`.
    #[must_use]
    pub fn index_for_level(level: u32) -> usize {
        let index = usize::try_from(level.saturating_sub(1)).unwrap_or(usize::MAX);
        index.min(Self::TABLE.len() - 1)
    }

    #[must_use]
    pub fn for_level(level: u32) -> Self {
        Self::TABLE[Self::index_for_level(level)]
    }
}

/// Builds the wall set for `level`.
///
/// `is_occupied` marks cells the scattered pattern must avoid (snake and
/// food); fixed patterns ignore it. The returned set always replaces the
/// previous one.
pub fn generate_walls<R, F>(rng: &mut R, bounds: GridSize, level: u32, is_occupied: F) -> Vec<Wall>
where
    R: RandomSource + ?Sized,
    F: Fn(Position) -> bool,
{
    let mut walls = Vec::new();

    match WallPattern::for_level(level) {
        WallPattern::HorizontalBar => {
            walls.extend((5..15).map(|x| Wall::at(x, 5)));
        }
        WallPattern::VerticalBar => {
            walls.extend((5..15).map(|y| Wall::at(5, y)));
        }
        WallPattern::ClosedBox => {
            for x in 5..15 {
                walls.push(Wall::at(x, 5));
                walls.push(Wall::at(x, 14));
            }
            for y in 6..14 {
                walls.push(Wall::at(5, y));
                walls.push(Wall::at(14, y));
            }
        }
        WallPattern::OpenBox => {
            walls.extend((5..15).map(|x| Wall::at(x, 15)));
            for y in 5..15 {
                walls.push(Wall::at(5, y));
                walls.push(Wall::at(14, y));
            }
        }
        WallPattern::Scattered => {
            let safe_center = center(bounds);
            for _ in 0..RANDOM_WALL_COUNT {
                let cell = find_free_cell(rng, bounds, |candidate| {
                    is_occupied(candidate)
                        || candidate.chebyshev_distance(safe_center) <= WALL_SAFE_RADIUS
                        || walls.iter().any(|wall| wall.position == candidate)
                });
                let Some(position) = cell else {
                    log::debug!("no room for more scattered walls after {}", walls.len());
                    break;
                };
                walls.push(Wall { position });
            }
        }
    }

    walls
}
