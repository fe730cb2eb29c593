use ratatui::style::Color;

use crate::config::{GridSize, Theme};
use crate::grid::{Position, find_free_cell};
use crate::rng::RandomSource;

/// Food type; decides score value and color.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub enum FoodKind {
    Normal,
    Special,
    Golden,
}

impl FoodKind {
    /// All kinds, in the order used for uniform selection.
    pub const ALL: [FoodKind; 3] = [FoodKind::Normal, FoodKind::Special, FoodKind::Golden];

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        match self {
            Self::Normal => 10,
            Self::Special => 30,
            Self::Golden => 50,
        }
    }

    /// Returns the built-in display color.
    #[must_use]
    pub fn color(self) -> Color {
        match self {
            Self::Normal => Color::Rgb(0xe7, 0x4c, 0x3c),
            Self::Special => Color::Rgb(0x9b, 0x59, 0xb6),
            Self::Golden => Color::Rgb(0xf1, 0xc4, 0x0f),
        }
    }

    /// Returns the color the active theme assigns to this kind.
    #[must_use]
    pub fn themed_color(self, theme: &Theme) -> Color {
        match self {
            Self::Normal => theme.food_normal,
            Self::Special => theme.food_special,
            Self::Golden => theme.food_golden,
        }
    }
}

/// Food entity currently active on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
    pub kind: FoodKind,
}

impl Food {
    #[must_use]
    pub fn new(position: Position, kind: FoodKind) -> Self {
        Self { position, kind }
    }

    /// Creates a normal food at `position`.
    #[must_use]
    pub fn normal(position: Position) -> Self {
        Self::new(position, FoodKind::Normal)
    }

    #[must_use]
    pub fn points(self) -> u32 {
        self.kind.points()
    }

    /// Spawns food of a uniformly chosen kind on a cell `is_occupied` rejects.
    ///
    /// Returns `None` when the board has no free cell.
    pub fn spawn<R, F>(rng: &mut R, bounds: GridSize, is_occupied: F) -> Option<Self>
    where
        R: RandomSource + ?Sized,
        F: Fn(Position) -> bool,
    {
        let kind = rng
            .choose(&FoodKind::ALL)
            .copied()
            .unwrap_or(FoodKind::Normal);
        let position = find_free_cell(rng, bounds, is_occupied)?;
        Some(Self::new(position, kind))
    }
}
