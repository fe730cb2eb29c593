use std::time::Duration;

use grid_snake::food::{Food, FoodKind};
use grid_snake::game::{GameState, GameStatus, TickOutcome};
use grid_snake::grid::Position;
use grid_snake::input::{Direction, GameInput};
use grid_snake::snake::{Collision, Snake};
use grid_snake::wall::Wall;

fn segments(state: &GameState) -> Vec<Position> {
    state.snake.segments().copied().collect()
}

#[test]
fn eating_ahead_extends_the_snake() {
    let mut state = GameState::new_with_seed(42);
    state.start();
    state.walls.clear();
    state.foods = vec![Food::new(Position::new(11, 10), FoodKind::Golden)];

    assert_eq!(
        state.tick(),
        TickOutcome::AteFood {
            kind: FoodKind::Golden
        }
    );
    assert_eq!(
        segments(&state),
        vec![
            Position::new(11, 10),
            Position::new(10, 10),
            Position::new(9, 10),
            Position::new(8, 10),
        ]
    );
    assert_eq!(state.score, 50);
    assert_eq!(state.snake.len(), 4);
}

#[test]
fn wall_ahead_ends_the_run_with_history() {
    let mut state = GameState::new_with_seed(43);
    state.start();
    state.walls = vec![Wall::at(11, 10)];
    let before = segments(&state);

    let outcome = state.tick();

    assert!(matches!(
        outcome,
        TickOutcome::GameOver(report) if report.cause == Collision::Wall && report.level == 1
    ));
    assert_eq!(segments(&state), before);
    assert_eq!(state.status, GameStatus::GameOver);
    let entry = state.history().latest().expect("run recorded");
    assert_eq!((entry.score, entry.level), (0, 1));
}

#[test]
fn hundred_points_means_level_two() {
    let mut state = GameState::new_with_seed(44);
    state.start();
    state.walls.clear();
    state.score = 70;
    state.foods = vec![Food::new(Position::new(11, 10), FoodKind::Special)];

    let outcome = state.tick();

    assert_eq!(
        outcome,
        TickOutcome::LeveledUp {
            kind: FoodKind::Special,
            level: 2
        }
    );
    assert_eq!(state.score, 100);
    assert_eq!(state.tick_interval(), Duration::from_millis(140));
    let expected: Vec<Wall> = (5..15).map(|y| Wall::at(5, y)).collect();
    assert_eq!(state.walls, expected);
}

#[test]
fn stepwise_turns_and_edge_collision() {
    let mut state = GameState::new_with_seed(45);
    state.start();
    state.walls.clear();
    state.foods = vec![Food::normal(Position::new(0, 19))];
    state.snake = Snake::from_segments(
        vec![Position::new(2, 1), Position::new(1, 1)],
        Direction::Right,
    );

    state.apply_input(GameInput::Direction(Direction::Left));
    assert_eq!(state.tick(), TickOutcome::Moved);
    assert_eq!(state.snake.head(), Position::new(3, 1));

    state.apply_input(GameInput::Direction(Direction::Up));
    assert_eq!(state.tick(), TickOutcome::Moved);
    assert_eq!(state.snake.head(), Position::new(3, 0));

    let outcome = state.tick();
    assert!(matches!(
        outcome,
        TickOutcome::GameOver(report) if report.cause == Collision::OutOfBounds
    ));
}

#[test]
fn length_never_shrinks_across_a_seeded_session() {
    let mut state = GameState::new_with_seed(46);
    state.start();
    let turns = [Direction::Down, Direction::Left, Direction::Up, Direction::Right];

    for step in 0..400 {
        if state.status != GameStatus::Running {
            break;
        }
        if step % 7 == 0 {
            state.apply_input(GameInput::Direction(turns[(step / 7) % turns.len()]));
        }

        let before = state.snake.len();
        match state.tick() {
            TickOutcome::AteFood { .. } | TickOutcome::LeveledUp { .. } => {
                assert_eq!(state.snake.len(), before + 1);
            }
            TickOutcome::Moved | TickOutcome::GameOver(_) => {
                assert_eq!(state.snake.len(), before);
            }
            TickOutcome::Skipped => unreachable!("state was running"),
        }
        assert_eq!(state.level, state.score / 100 + 1);
    }
}

#[test]
fn history_keeps_five_newest_runs() {
    let mut state = GameState::new_with_seed(47);

    for run in 0..8u32 {
        state.restart();
        state.walls = vec![Wall::at(11, 10)];
        state.score = run * 10;
        let _ = state.tick();
    }

    let scores: Vec<u32> = state.scores().map(|entry| entry.score).collect();
    assert_eq!(scores, vec![70, 60, 50, 40, 30]);
}
