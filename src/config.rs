use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;

use crate::food::FoodKind;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }
}

/// The fixed playing field.
pub const GRID_SIZE: GridSize = GridSize {
    width: 20,
    height: 20,
};

/// Tick interval at level 0 of the speed formula.
pub const BASE_TICK_INTERVAL_MS: u64 = 150;

/// Fastest allowed tick interval.
pub const MIN_TICK_INTERVAL_MS: u64 = 50;

/// Tick interval reduction per level.
pub const TICK_INTERVAL_STEP_MS: u64 = 5;

/// Score needed per level increase.
pub const POINTS_PER_LEVEL: u32 = 100;

/// Period of the food top-up timer.
pub const FOOD_TOP_UP_INTERVAL: Duration = Duration::from_millis(5000);

/// Top-up only adds food while fewer than this many are active.
pub const MAX_ACTIVE_FOOD: usize = 3;

/// How long the "Level N!" notice stays visible.
pub const LEVEL_UP_NOTICE_DURATION: Duration = Duration::from_millis(2000);

/// Number of finished runs kept in the score history.
pub const SCORE_HISTORY_CAPACITY: usize = 5;

/// Random samples tried before a spawner falls back to a grid scan.
pub const SPAWN_ATTEMPTS: usize = 256;

/// Number of obstacles placed by the random wall pattern.
pub const RANDOM_WALL_COUNT: usize = 20;

/// Chebyshev radius around the board center kept clear by random walls.
pub const WALL_SAFE_RADIUS: i32 = 2;

/// Terminal columns used to draw one grid cell.
pub const CELL_WIDTH: u16 = 2;

/// Idle wait used by the run loop when no timer is armed.
pub const IDLE_POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Head and body colors for one snake palette.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct SnakePalette {
    pub head: Color,
    pub body: Color,
}

/// Number of level palettes; palette index is `min(level / 2, SNAKE_PALETTE_COUNT - 1)`.
pub const SNAKE_PALETTE_COUNT: usize = 5;

/// A color theme applied to all visual elements.
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,
    /// Snake colors, indexed by palette index.
    pub snake_palettes: [SnakePalette; SNAKE_PALETTE_COUNT],
    pub food_normal: Color,
    pub food_special: Color,
    pub food_golden: Color,
    pub wall: Color,
    /// Background color for empty play-area cells.
    pub field_bg: Color,
    pub border_fg: Color,
    pub ui_text: Color,
    pub ui_accent: Color,
    pub ui_muted: Color,
    /// Background for popups and the history panel.
    pub overlay_bg: Color,
}

/// Returns the built-in theme.
#[must_use]
pub fn fallback_theme() -> Theme {
    Theme {
        name: "Classic".to_owned(),
        snake_palettes: [
            SnakePalette {
                head: Color::Rgb(0x27, 0xae, 0x60),
                body: Color::Rgb(0x2e, 0xcc, 0x71),
            },
            SnakePalette {
                head: Color::Rgb(0x29, 0x80, 0xb9),
                body: Color::Rgb(0x34, 0x98, 0xdb),
            },
            SnakePalette {
                head: Color::Rgb(0x8e, 0x44, 0xad),
                body: Color::Rgb(0x9b, 0x59, 0xb6),
            },
            SnakePalette {
                head: Color::Rgb(0xc0, 0x39, 0x2b),
                body: Color::Rgb(0xe7, 0x4c, 0x3c),
            },
            SnakePalette {
                head: Color::Rgb(0xf3, 0x9c, 0x12),
                body: Color::Rgb(0xf1, 0xc4, 0x0f),
            },
        ],
        food_normal: FoodKind::Normal.color(),
        food_special: FoodKind::Special.color(),
        food_golden: FoodKind::Golden.color(),
        wall: Color::Rgb(0x95, 0xa5, 0xa6),
        field_bg: Color::Rgb(0x2c, 0x3e, 0x50),
        border_fg: Color::Rgb(0x7f, 0x8c, 0x8d),
        ui_text: Color::Rgb(0xec, 0xf0, 0xf1),
        ui_accent: Color::Rgb(0xf1, 0xc4, 0x0f),
        ui_muted: Color::Rgb(0x7f, 0x8c, 0x8d),
        overlay_bg: Color::Black,
    }
}

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Full cell glyph (two columns) for snake body, walls and empty field.
pub const GLYPH_CELL: &str = "██";

/// Food glyph.
pub const GLYPH_FOOD: &str = "●●";

pub const GLYPH_SNAKE_HEAD_UP: &str = "▲▲";
pub const GLYPH_SNAKE_HEAD_DOWN: &str = "▼▼";
pub const GLYPH_SNAKE_HEAD_LEFT: &str = "◀◀";
pub const GLYPH_SNAKE_HEAD_RIGHT: &str = "▶▶";
