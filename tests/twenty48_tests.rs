//! 2048 engine driven through the public game contract

use grid_games::core::rng::SequenceRng;
use grid_games::core::twenty48::{merge_adjacent, slide_left, Grid};
use grid_games::core::{build_engine, GameEngine, GameSnapshot, Twenty48Engine};
use grid_games::types::{Command, GameKind, Status, TetrisPreset};

fn board_of(game: &dyn GameEngine) -> Grid {
    match game.snapshot() {
        GameSnapshot::Twenty48(s) => s.board,
        other => panic!("expected a 2048 snapshot, got {other:?}"),
    }
}

fn sum(grid: &Grid) -> u32 {
    grid.iter().flatten().sum()
}

#[test]
fn test_row_examples() {
    let m = slide_left([2, 2, 0, 0]);
    assert_eq!(m.row, [4, 0, 0, 0]);
    assert!(m.merged);
    assert_eq!(m.gained, 4);

    let m = slide_left([2, 0, 0, 2]);
    assert_eq!(m.row, [4, 0, 0, 0]);

    let m = slide_left([0, 0, 0, 0]);
    assert_eq!(m.row, [0, 0, 0, 0]);
    assert!(!m.moved && !m.merged);
}

#[test]
fn test_merge_stops_at_first_empty_pair() {
    // Without compacting first, the scan ends at the gap.
    let (row, gained, merged) = merge_adjacent([2, 0, 0, 2]);
    assert_eq!(row, [2, 0, 0, 2]);
    assert_eq!(gained, 0);
    assert!(!merged);
}

#[test]
fn test_scripted_game() {
    // Every spawn takes the first empty cell in row-major order.
    let mut game = Twenty48Engine::new(SequenceRng::new(vec![0]));
    game.start();
    assert_eq!(game.board()[0], [2, 0, 0, 0]);

    game.command(Command::MoveRight);
    assert_eq!(game.board()[0], [2, 0, 0, 2]);

    game.command(Command::MoveLeft);
    assert_eq!(game.board()[0], [4, 2, 0, 0]);
    assert_eq!(game.score(), 4);

    game.command(Command::MoveDown);
    assert_eq!(game.board()[3], [4, 2, 0, 0]);
    assert_eq!(game.board()[0], [2, 0, 0, 0]);

    // Nothing can move left any more: no spawn, no score.
    let before = *game.board();
    assert!(!game.command(Command::MoveLeft).changed);
    assert_eq!(*game.board(), before);
    assert_eq!(game.score(), 4);
}

#[test]
fn test_effective_moves_conserve_value_plus_spawn() {
    let mut game = build_engine(GameKind::Twenty48, TetrisPreset::Classic, 77);
    game.start();
    let moves = [Command::MoveLeft, Command::MoveUp, Command::MoveRight, Command::MoveDown];

    let mut score = game.snapshot().score();
    for i in 0..400 {
        if game.status() != Status::Running {
            break;
        }
        let before = board_of(&*game);
        let outcome = game.command(moves[(i * 7 + i / 3) % moves.len()]);
        let after = board_of(&*game);

        if outcome.changed && before != after {
            assert_eq!(sum(&after), sum(&before) + 2);
        } else {
            assert_eq!(sum(&after), sum(&before));
        }

        let now = game.snapshot().score();
        assert!(now >= score);
        score = now;
        for v in after.iter().flatten() {
            assert!(*v == 0 || v.is_power_of_two());
        }
    }
}

#[test]
fn test_full_board_without_merges_ends_game() {
    let mut game = Twenty48Engine::new(SequenceRng::new(vec![0]));
    game.start();
    game.set_board([[2, 4, 2, 4], [4, 2, 4, 2], [2, 4, 2, 4], [4, 2, 4, 2]]);

    let outcome = game.command(Command::MoveUp);
    assert!(outcome.changed);
    assert_eq!(game.status(), Status::GameOver);

    // Further input is ignored until restart.
    assert!(!game.command(Command::MoveLeft).changed);
    game.command(Command::Restart);
    assert_eq!(game.status(), Status::Running);
    assert_eq!(sum(game.board()), 2);
}

#[test]
fn test_paused_game_ignores_moves() {
    let mut game = Twenty48Engine::new(SequenceRng::new(vec![0]));
    game.start();
    game.command(Command::Pause);
    assert_eq!(game.status(), Status::Paused);

    let before = *game.board();
    assert!(!game.command(Command::MoveRight).changed);
    assert_eq!(*game.board(), before);

    game.command(Command::Pause);
    assert_eq!(game.status(), Status::Running);
    assert!(game.command(Command::MoveRight).changed);
}

#[test]
fn test_ticks_do_nothing() {
    let mut game = Twenty48Engine::new(SequenceRng::new(vec![0]));
    game.start();
    let before = *game.board();
    for _ in 0..10 {
        assert!(!game.tick().changed);
    }
    assert_eq!(*game.board(), before);
}
