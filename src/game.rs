use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::config::{
    BASE_TICK_INTERVAL_MS, GRID_SIZE, GridSize, MAX_ACTIVE_FOOD, MIN_TICK_INTERVAL_MS,
    POINTS_PER_LEVEL, SNAKE_PALETTE_COUNT, TICK_INTERVAL_STEP_MS,
};
use crate::food::{Food, FoodKind};
use crate::input::{Direction, GameInput};
use crate::rng::RandomSource;
use crate::score::{ScoreEntry, ScoreHistory};
use crate::snake::{Collision, MoveOutcome, Snake};
use crate::wall::{Wall, generate_walls};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Score and level of a run that just ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GameOverReport {
    pub score: u32,
    pub level: u32,
    pub cause: Collision,
}

/// What one tick did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The game was not running.
    Skipped,
    Moved,
    AteFood { kind: FoodKind },
    /// Food eaten and the level went up; walls and food were regenerated.
    LeveledUp { kind: FoodKind, level: u32 },
    GameOver(GameOverReport),
}

/// Level reached with `score` points: `floor(score / 100) + 1`.
#[must_use]
pub fn level_for_score(score: u32) -> u32 {
    score / POINTS_PER_LEVEL + 1
}

/// Tick interval for `level`: `max(50, 150 - level * 5)` milliseconds.
#[must_use]
pub fn tick_interval_for_level(level: u32) -> Duration {
    let penalty_ms = u64::from(level) * TICK_INTERVAL_STEP_MS;
    let clamped_ms = BASE_TICK_INTERVAL_MS
        .saturating_sub(penalty_ms)
        .max(MIN_TICK_INTERVAL_MS);
    Duration::from_millis(clamped_ms)
}

/// Snake palette index for `level`: `min(level / 2, 4)`.
#[must_use]
pub fn palette_index_for_level(level: u32) -> usize {
    usize::try_from(level / 2)
        .unwrap_or(usize::MAX)
        .min(SNAKE_PALETTE_COUNT - 1)
}

/// Read-only snapshot handed to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct GameView<'a> {
    pub bounds: GridSize,
    pub snake: &'a Snake,
    pub foods: &'a [Food],
    pub walls: &'a [Wall],
    pub score: u32,
    pub level: u32,
    pub status: GameStatus,
    pub level_up_notice: Option<&'a str>,
    pub show_history: bool,
    pub history: &'a ScoreHistory,
    pub palette_index: usize,
    pub game_over: Option<GameOverReport>,
}

impl GameView<'_> {
    #[must_use]
    pub fn is_paused(&self) -> bool {
        self.status == GameStatus::Paused
    }
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState<R = StdRng> {
    pub snake: Snake,
    pub foods: Vec<Food>,
    pub walls: Vec<Wall>,
    pub score: u32,
    pub level: u32,
    pub status: GameStatus,
    pub show_history: bool,
    tick_interval: Duration,
    palette_index: usize,
    level_up_notice: Option<String>,
    game_over: Option<GameOverReport>,
    history: ScoreHistory,
    bounds: GridSize,
    rng: R,
}

impl GameState<StdRng> {
    /// Creates a deterministic state for tests and reproducible sessions.
    #[must_use]
    pub fn new_with_seed(seed: u64) -> Self {
        Self::new_with_rng(StdRng::seed_from_u64(seed))
    }
}

impl<R: RandomSource> GameState<R> {
    /// Creates a not-yet-started game on the standard grid.
    #[must_use]
    pub fn new_with_rng(rng: R) -> Self {
        Self {
            snake: Snake::default(),
            foods: Vec::new(),
            walls: Vec::new(),
            score: 0,
            level: 1,
            status: GameStatus::NotStarted,
            show_history: false,
            tick_interval: tick_interval_for_level(0),
            palette_index: palette_index_for_level(1),
            level_up_notice: None,
            game_over: None,
            history: ScoreHistory::default(),
            bounds: GRID_SIZE,
            rng,
        }
    }

    /// Lays out the current level and enters `Running`.
    ///
    /// Starting after a game over begins a fresh run.
    pub fn start(&mut self) {
        if self.status == GameStatus::GameOver {
            self.reset_run();
        }

        self.generate_walls();
        self.spawn_food();
        self.update_palette();
        self.status = GameStatus::Running;
        log::info!("run started at level {}", self.level);
    }

    /// Resets every per-run value and starts again. Score history is kept.
    pub fn restart(&mut self) {
        self.reset_run();
        self.start();
    }

    fn reset_run(&mut self) {
        self.snake = Snake::default();
        self.foods.clear();
        self.walls.clear();
        self.score = 0;
        self.level = 1;
        self.tick_interval = tick_interval_for_level(0);
        self.level_up_notice = None;
        self.game_over = None;
        self.status = GameStatus::NotStarted;
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.status != GameStatus::Running {
            return TickOutcome::Skipped;
        }

        if self.foods.is_empty() {
            self.spawn_food();
        }

        let target = self.foods.first().map(|food| food.position);
        match self.snake.step(target, &self.walls, self.bounds) {
            MoveOutcome::Moved => TickOutcome::Moved,
            MoveOutcome::Collided(cause) => TickOutcome::GameOver(self.finish_run(cause)),
            MoveOutcome::AteFood => self.consume_first_food(),
        }
    }

    fn consume_first_food(&mut self) -> TickOutcome {
        let food = self.foods.remove(0);
        self.score += food.points();

        let level = level_for_score(self.score);
        if level <= self.level {
            return TickOutcome::AteFood { kind: food.kind };
        }

        self.level = level;
        self.level_up();
        TickOutcome::LeveledUp {
            kind: food.kind,
            level,
        }
    }

    fn level_up(&mut self) {
        self.tick_interval = tick_interval_for_level(self.level);
        self.level_up_notice = Some(format!("Level {}!", self.level));
        self.foods.clear();
        self.generate_walls();
        self.spawn_food();
        self.update_palette();
        log::info!(
            "level {} reached at score {}, tick interval {:?}",
            self.level,
            self.score,
            self.tick_interval
        );
    }

    fn finish_run(&mut self, cause: Collision) -> GameOverReport {
        let report = GameOverReport {
            score: self.score,
            level: self.level,
            cause,
        };
        self.status = GameStatus::GameOver;
        self.game_over = Some(report);
        self.history.add_score(self.score, self.level);
        log::info!(
            "game over ({cause:?}) with score {} at level {}",
            self.score,
            self.level
        );
        report
    }

    /// Adds one food while fewer than three are active. Returns whether food was added.
    pub fn top_up_food(&mut self) -> bool {
        if self.status != GameStatus::Running || self.foods.len() >= MAX_ACTIVE_FOOD {
            return false;
        }
        self.spawn_food()
    }

    /// Spawns one food on a free cell; returns false when the board is full.
    pub fn spawn_food(&mut self) -> bool {
        let snake = &self.snake;
        let walls = &self.walls;
        let foods = &self.foods;
        let spawned = Food::spawn(&mut self.rng, self.bounds, |position| {
            snake.occupies(position)
                || walls.iter().any(|wall| wall.position == position)
                || foods.iter().any(|food| food.position == position)
        });

        match spawned {
            Some(food) => {
                log::debug!("spawned {:?} food at {:?}", food.kind, food.position);
                self.foods.push(food);
                true
            }
            None => {
                log::debug!("no free cell for food, skipping spawn");
                false
            }
        }
    }

    /// Replaces the wall set with the pattern for the current level.
    pub fn generate_walls(&mut self) {
        let snake = &self.snake;
        let foods = &self.foods;
        self.walls = generate_walls(&mut self.rng, self.bounds, self.level, |position| {
            snake.occupies(position) || foods.iter().any(|food| food.position == position)
        });
    }

    fn update_palette(&mut self) {
        self.palette_index = palette_index_for_level(self.level);
    }

    /// Applies a direction intent; only honoured while running.
    pub fn apply_input(&mut self, input: GameInput) {
        if let GameInput::Direction(direction) = input {
            self.steer(direction);
        }
    }

    fn steer(&mut self, direction: Direction) {
        if self.status == GameStatus::Running {
            let _ = self.snake.set_pending_heading(direction);
        }
    }

    /// Flips between `Running` and `Paused`. Returns true when the game was
    /// running or paused and the toggle took effect.
    pub fn toggle_pause(&mut self) -> bool {
        self.status = match self.status {
            GameStatus::Running => GameStatus::Paused,
            GameStatus::Paused => GameStatus::Running,
            _ => return false,
        };
        true
    }

    pub fn toggle_history(&mut self) {
        self.show_history = !self.show_history;
    }

    pub fn clear_level_up_notice(&mut self) {
        self.level_up_notice = None;
    }

    #[must_use]
    pub fn level_up_notice(&self) -> Option<&str> {
        self.level_up_notice.as_deref()
    }

    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    #[must_use]
    pub fn palette_index(&self) -> usize {
        self.palette_index
    }

    #[must_use]
    pub fn history(&self) -> &ScoreHistory {
        &self.history
    }

    /// Entries of the score history, newest first.
    pub fn scores(&self) -> impl Iterator<Item = &ScoreEntry> {
        self.history.scores()
    }

    #[must_use]
    pub fn game_over_report(&self) -> Option<GameOverReport> {
        self.game_over
    }

    #[must_use]
    pub fn bounds(&self) -> GridSize {
        self.bounds
    }

    #[must_use]
    pub fn view(&self) -> GameView<'_> {
        GameView {
            bounds: self.bounds,
            snake: &self.snake,
            foods: &self.foods,
            walls: &self.walls,
            score: self.score,
            level: self.level,
            status: self.status,
            level_up_notice: self.level_up_notice(),
            show_history: self.show_history,
            history: &self.history,
            palette_index: self.palette_index,
            game_over: self.game_over,
        }
    }
}
