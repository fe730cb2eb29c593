use std::io;
use std::time::{Duration, Instant};

use rand::rngs::StdRng;

use crate::config::{IDLE_POLL_INTERVAL, LEVEL_UP_NOTICE_DURATION};
use crate::game::{GameOverReport, GameState, GameStatus, GameView, TickOutcome};
use crate::input::GameInput;
use crate::rng::RandomSource;
use crate::timer::Timers;

/// Presentation hook the controller draws through.
pub trait Renderer {
    /// Draws the current state.
    fn render(&mut self, view: &GameView<'_>) -> io::Result<()>;

    /// Asks whether to restart after a game over; blocks until answered.
    fn confirm_restart(&mut self, view: &GameView<'_>, report: &GameOverReport)
    -> io::Result<bool>;
}

/// Source of player intents.
pub trait InputSource {
    /// Waits up to `timeout` for the next intent.
    fn next_intent(&mut self, timeout: Duration) -> io::Result<Option<GameInput>>;
}

/// Whether the run loop should keep going.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Owns the game state and its timers and drives them from wall-clock time.
#[derive(Debug)]
pub struct Controller<V, R = StdRng> {
    state: GameState<R>,
    timers: Timers,
    renderer: V,
}

impl<V: Renderer, R: RandomSource> Controller<V, R> {
    #[must_use]
    pub fn new(state: GameState<R>, renderer: V) -> Self {
        Self {
            state,
            timers: Timers::default(),
            renderer,
        }
    }

    /// Starts (or, after a game over, begins a new) run and arms both timers.
    pub fn start(&mut self, now: Instant) -> io::Result<()> {
        if matches!(self.state.status, GameStatus::Running | GameStatus::Paused) {
            return Ok(());
        }

        self.state.start();
        self.timers.reschedule_all(self.state.tick_interval(), now);
        self.render()
    }

    /// Throws away the current run and starts a fresh one.
    pub fn restart(&mut self, now: Instant) -> io::Result<()> {
        self.timers.cancel_all();
        self.timers.cancel_notice();
        self.state.restart();
        self.timers.reschedule_all(self.state.tick_interval(), now);
        log::info!("restarted");
        self.render()
    }

    /// Pauses or resumes. Pausing cancels both periodic timers; resuming
    /// recreates them at the current interval.
    pub fn toggle_pause(&mut self, now: Instant) -> io::Result<()> {
        if !self.state.toggle_pause() {
            return Ok(());
        }

        if self.state.status == GameStatus::Paused {
            self.timers.cancel_all();
        } else {
            self.timers.reschedule_all(self.state.tick_interval(), now);
        }
        self.render()
    }

    /// Applies one intent.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> io::Result<Flow> {
        match input {
            GameInput::Quit => return Ok(Flow::Quit),
            GameInput::Direction(_) => self.state.apply_input(input),
            GameInput::Pause => self.toggle_pause(now)?,
            GameInput::ToggleHistory => {
                self.state.toggle_history();
                self.render()?;
            }
            GameInput::Start => self.start(now)?,
            GameInput::Restart => self.restart(now)?,
        }
        Ok(Flow::Continue)
    }

    /// Fires every timer that is due at `now`.
    pub fn advance(&mut self, now: Instant) -> io::Result<()> {
        if self.timers.notice_expired(now) {
            self.state.clear_level_up_notice();
            self.render()?;
        }

        if self.timers.food_top_up_due(now) && self.state.top_up_food() {
            self.render()?;
        }

        if self.timers.tick_due(now) {
            self.run_tick(now)?;
        }

        Ok(())
    }

    fn run_tick(&mut self, now: Instant) -> io::Result<()> {
        match self.state.tick() {
            TickOutcome::Skipped => Ok(()),
            TickOutcome::Moved | TickOutcome::AteFood { .. } => self.render(),
            TickOutcome::LeveledUp { .. } => {
                self.timers.reschedule_tick(self.state.tick_interval(), now);
                self.timers.arm_notice(LEVEL_UP_NOTICE_DURATION, now);
                self.render()
            }
            TickOutcome::GameOver(report) => self.game_over(report),
        }
    }

    fn game_over(&mut self, report: GameOverReport) -> io::Result<()> {
        self.timers.cancel_all();
        self.render()?;

        let view = self.state.view();
        if self.renderer.confirm_restart(&view, &report)? {
            // The prompt blocks, so the new run is timed from the answer.
            return self.restart(Instant::now());
        }

        log::info!("restart declined, waiting for start");
        self.render()
    }

    /// How long the run loop may wait for input before a timer is due.
    #[must_use]
    pub fn time_until_next_deadline(&self, now: Instant) -> Duration {
        self.timers
            .next_deadline()
            .map_or(IDLE_POLL_INTERVAL, |deadline| {
                deadline.saturating_duration_since(now)
            })
    }

    fn render(&mut self) -> io::Result<()> {
        let view = self.state.view();
        self.renderer.render(&view)
    }

    #[must_use]
    pub fn state(&self) -> &GameState<R> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState<R> {
        &mut self.state
    }

    #[must_use]
    pub fn timers(&self) -> &Timers {
        &self.timers
    }

    #[must_use]
    pub fn renderer(&self) -> &V {
        &self.renderer
    }
}

/// Draws the first frame, then alternates between waiting for input and
/// firing due timers until a quit intent arrives.
pub fn run<V, R, I>(controller: &mut Controller<V, R>, input: &mut I) -> io::Result<()>
where
    V: Renderer,
    R: RandomSource,
    I: InputSource,
{
    controller.render()?;

    loop {
        let timeout = controller.time_until_next_deadline(Instant::now());
        if let Some(intent) = input.next_intent(timeout)? {
            if controller.handle_input(intent, Instant::now())? == Flow::Quit {
                log::info!("quit requested");
                return Ok(());
            }
        }

        controller.advance(Instant::now())?;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;
    use std::io;
    use std::time::{Duration, Instant};

    use crate::food::Food;
    use crate::game::{GameOverReport, GameState, GameStatus, GameView};
    use crate::grid::Position;
    use crate::input::{Direction, GameInput};
    use crate::wall::Wall;

    use super::{Controller, Flow, Renderer};

    const MS: Duration = Duration::from_millis(1);

    #[derive(Debug, Default)]
    struct RecordingRenderer {
        frames: usize,
        paused_frames: usize,
        prompts: Vec<GameOverReport>,
        answers: VecDeque<bool>,
    }

    impl Renderer for RecordingRenderer {
        fn render(&mut self, view: &GameView<'_>) -> io::Result<()> {
            self.frames += 1;
            if view.is_paused() {
                self.paused_frames += 1;
            }
            Ok(())
        }

        fn confirm_restart(
            &mut self,
            _view: &GameView<'_>,
            report: &GameOverReport,
        ) -> io::Result<bool> {
            self.prompts.push(*report);
            Ok(self.answers.pop_front().unwrap_or(false))
        }
    }

    fn started(seed: u64, now: Instant) -> Controller<RecordingRenderer> {
        let mut controller =
            Controller::new(GameState::new_with_seed(seed), RecordingRenderer::default());
        controller.start(now).expect("start renders");
        controller.state_mut().walls.clear();
        controller
    }

    #[test]
    fn start_arms_timers_and_renders() {
        let now = Instant::now();
        let controller = started(1, now);

        assert!(controller.timers().is_running());
        assert_eq!(controller.timers().tick_interval(), Some(150 * MS));
        assert_eq!(controller.renderer().frames, 1);
        assert_eq!(controller.state().status, GameStatus::Running);
    }

    #[test]
    fn ticks_follow_the_interval() {
        let now = Instant::now();
        let mut controller = started(2, now);
        controller.state_mut().foods = vec![Food::normal(Position::new(0, 19))];

        controller.advance(now + 149 * MS).expect("advance");
        assert_eq!(controller.state().snake.head(), Position::new(10, 10));

        controller.advance(now + 150 * MS).expect("advance");
        assert_eq!(controller.state().snake.head(), Position::new(11, 10));
    }

    #[test]
    fn pause_freezes_the_snake_and_resume_rearms() {
        let now = Instant::now();
        let mut controller = started(3, now);
        controller.state_mut().foods = vec![Food::normal(Position::new(0, 19))];

        controller
            .handle_input(GameInput::Pause, now + 10 * MS)
            .expect("pause");
        controller.advance(now + 1000 * MS).expect("advance");
        assert!(!controller.timers().is_running());
        assert_eq!(controller.state().snake.head(), Position::new(10, 10));
        assert_eq!(controller.renderer().paused_frames, 1);

        let resumed_at = now + 1000 * MS;
        controller
            .handle_input(GameInput::Pause, resumed_at)
            .expect("resume");
        controller.advance(resumed_at + 150 * MS).expect("advance");
        assert_eq!(controller.state().snake.head(), Position::new(11, 10));
    }

    #[test]
    fn level_up_reschedules_and_notice_self_clears() {
        let now = Instant::now();
        let mut controller = started(4, now);
        controller.state_mut().score = 90;
        controller.state_mut().foods = vec![Food::normal(Position::new(11, 10))];

        let leveled_at = now + 150 * MS;
        controller.advance(leveled_at).expect("advance");

        assert_eq!(controller.state().level, 2);
        assert_eq!(controller.timers().tick_interval(), Some(140 * MS));
        assert_eq!(controller.state().level_up_notice(), Some("Level 2!"));

        controller
            .advance(leveled_at + 1999 * MS)
            .expect("advance");
        assert_eq!(controller.state().level_up_notice(), Some("Level 2!"));

        controller
            .advance(leveled_at + 2000 * MS)
            .expect("advance");
        assert_eq!(controller.state().level_up_notice(), None);
    }

    #[test]
    fn level_up_keeps_the_food_top_up_cadence() {
        let now = Instant::now();
        let mut controller = started(11, now);
        controller.state_mut().score = 90;
        controller.state_mut().foods = vec![Food::normal(Position::new(11, 10))];

        controller.advance(now + 4950 * MS).expect("advance");
        assert_eq!(controller.state().level, 2);
        assert_eq!(controller.state().foods.len(), 1);

        controller.advance(now + 5000 * MS).expect("advance");
        assert_eq!(controller.state().foods.len(), 2);
        assert_eq!(controller.state().snake.head(), Position::new(11, 10));
    }

    #[test]
    fn game_over_prompts_and_declining_keeps_game_over() {
        let now = Instant::now();
        let mut controller = started(5, now);
        controller.state_mut().walls = vec![Wall::at(11, 10)];

        controller.advance(now + 150 * MS).expect("advance");

        assert_eq!(controller.state().status, GameStatus::GameOver);
        assert!(!controller.timers().is_running());
        assert_eq!(controller.renderer().prompts.len(), 1);
        assert_eq!(controller.state().history().len(), 1);

        controller
            .handle_input(GameInput::Start, now + 500 * MS)
            .expect("start");
        assert_eq!(controller.state().status, GameStatus::Running);
        assert_eq!(controller.state().score, 0);
    }

    #[test]
    fn accepting_restart_starts_a_new_run() {
        let now = Instant::now();
        let mut controller = started(6, now);
        controller.state_mut().walls = vec![Wall::at(11, 10)];
        controller.state_mut().score = 70;
        controller.renderer.answers.push_back(true);

        controller.advance(now + 150 * MS).expect("advance");

        assert_eq!(controller.state().status, GameStatus::Running);
        assert_eq!(controller.state().score, 0);
        assert_eq!(controller.state().snake.len(), 3);
        assert!(controller.timers().is_running());
        assert_eq!(
            controller.state().history().latest().map(|entry| entry.score),
            Some(70)
        );
    }

    #[test]
    fn accepted_restart_is_timed_from_the_answer() {
        let started_at = Instant::now()
            .checked_sub(Duration::from_secs(10))
            .expect("monotonic clock has ten seconds of history");
        let mut controller = started(12, started_at);
        controller.state_mut().walls = vec![Wall::at(11, 10)];
        controller.renderer.answers.push_back(true);

        let answered_no_earlier_than = Instant::now();
        controller.advance(started_at + 150 * MS).expect("advance");

        let deadline = controller.timers().next_deadline().expect("timers armed");
        assert!(deadline >= answered_no_earlier_than + 150 * MS);
    }

    #[test]
    fn food_top_up_runs_on_its_own_cadence() {
        let now = Instant::now();
        let mut controller = started(7, now);
        controller.state_mut().foods = vec![Food::normal(Position::new(0, 19))];

        // One advance fires the top-up and a single tick.
        controller.advance(now + 5000 * MS).expect("advance");

        assert_eq!(controller.state().foods.len(), 2);
    }

    #[test]
    fn quit_intent_stops_the_loop() {
        let now = Instant::now();
        let mut controller = started(8, now);

        let flow = controller
            .handle_input(GameInput::Quit, now)
            .expect("quit");

        assert_eq!(flow, Flow::Quit);
    }

    #[test]
    fn direction_intent_latches_heading() {
        let now = Instant::now();
        let mut controller = started(9, now);
        controller.state_mut().foods = vec![Food::normal(Position::new(0, 19))];

        controller
            .handle_input(GameInput::Direction(Direction::Down), now)
            .expect("steer");
        controller.advance(now + 150 * MS).expect("advance");

        assert_eq!(controller.state().snake.head(), Position::new(10, 11));
    }

    #[test]
    fn history_toggle_renders() {
        let now = Instant::now();
        let mut controller = started(10, now);
        let frames = controller.renderer().frames;

        controller
            .handle_input(GameInput::ToggleHistory, now)
            .expect("toggle");

        assert!(controller.state().show_history);
        assert_eq!(controller.renderer().frames, frames + 1);
    }
}
