//! Snake engine driven through the public game contract

use grid_games::core::rng::SequenceRng;
use grid_games::core::{GameEngine, GameSnapshot, SnakeConfig, SnakeEngine, SnakeSnapshot, TickChange};
use grid_games::types::{Command, Direction, Point, Status, SNAKE_TICK_MS};

fn snake_of(game: &impl GameEngine) -> SnakeSnapshot {
    match game.snapshot() {
        GameSnapshot::Snake(s) => s,
        other => panic!("expected a Snake snapshot, got {other:?}"),
    }
}

#[test]
fn test_eat_then_keep_length() {
    // Food first at (7, 10), three cells left of the start, then (0, 0).
    let mut game = SnakeEngine::new(SnakeConfig::default(), SequenceRng::new(vec![7, 10, 0, 0]));
    game.start();
    assert_eq!(game.food(), Some(Point::new(7, 10)));

    let mut lengths = Vec::new();
    for _ in 0..5 {
        game.tick();
        lengths.push(game.body().len());
    }
    assert_eq!(lengths, vec![1, 1, 2, 2, 2]);
    assert_eq!(game.food(), Some(Point::new(0, 0)));
    assert_eq!(game.head(), Some(Point::new(5, 10)));
}

#[test]
fn test_reverse_press_is_ignored() {
    let mut game = SnakeEngine::new(SnakeConfig::default(), SequenceRng::new(vec![0, 0]));
    game.start();
    game.command(Command::MoveDown);
    game.command(Command::MoveRight);
    assert_eq!(game.direction(), Direction::Right);
    let before = snake_of(&game);

    let outcome = game.command(Command::MoveLeft);
    assert!(!outcome.changed);
    assert_eq!(snake_of(&game), before);
}

#[test]
fn test_running_into_wall_resets() {
    let mut game = SnakeEngine::new(SnakeConfig::default(), SequenceRng::new(vec![0, 0]));
    game.start();

    // Ten cells to the left edge, the eleventh tick leaves the grid.
    for _ in 0..10 {
        game.tick();
    }
    assert_eq!(game.head(), Some(Point::new(0, 10)));
    assert_eq!(game.deaths(), 0);

    let outcome = game.tick();
    assert_eq!(outcome.tick, Some(TickChange::Start(SNAKE_TICK_MS)));
    let snap = snake_of(&game);
    assert_eq!(snap.body, vec![Point::new(10, 10)]);
    assert_eq!(snap.deaths, 1);
    assert_eq!(snap.status, Status::Running);
    assert!(snap.food.is_some());
}

#[test]
fn test_pause_keeps_position_and_heading() {
    let mut game = SnakeEngine::new(SnakeConfig::default(), SequenceRng::new(vec![0, 0]));
    game.start();
    game.tick();
    let before = snake_of(&game);

    game.command(Command::Pause);
    for _ in 0..5 {
        game.tick();
    }
    game.command(Command::MoveUp);
    game.command(Command::Pause);

    let after = snake_of(&game);
    assert_eq!(after.body, before.body);
    assert_eq!(after.direction, before.direction);
    assert_eq!(after.food, before.food);
    assert_eq!(after.status, Status::Running);
}

#[test]
fn test_score_is_length_minus_one() {
    let mut game = SnakeEngine::new(SnakeConfig::default(), SequenceRng::new(vec![9, 10, 8, 10, 0, 0]));
    game.start();
    game.tick();
    game.tick();
    assert_eq!(game.body().len(), 3);
    assert_eq!(game.snapshot().score(), 2);
}
