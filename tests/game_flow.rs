//! End-to-end runs through the public `Game` facade

use pac_snake::platform::{MemoryStore, RecordStore};
use pac_snake::sim::{Cell, Direction, GameOverCause, GamePhase, Grid, ItemKind, PerKind};
use pac_snake::{Command, Game, ScoringMode, Tuning};

/// 3x1 board with a 3-long snake: full from the start, so the first tick ends
/// the run with `BoardFilled`.
fn instant_fill(scoring: ScoringMode) -> Tuning {
    Tuning {
        grid: Grid::new(3, 1),
        initial_length: 3,
        scoring,
        ..Tuning::survival()
    }
}

/// 5x5 board, no items, a snake that fills its row
fn coil_board() -> Tuning {
    Tuning {
        grid: Grid::new(5, 5),
        initial_length: 5,
        initial_items: PerKind::new(0, 0, 0),
        spawn_chances: PerKind::new(0.0, 0.0, 0.0),
        ..Tuning::survival()
    }
}

/// 2x2 board, 2-long snake on the bottom row, a burger on each top cell
fn two_burgers() -> Tuning {
    Tuning {
        grid: Grid::new(2, 2),
        initial_length: 2,
        initial_items: PerKind::new(0, 0, 2),
        spawn_chances: PerKind::new(0.0, 0.0, 0.0),
        ..Tuning::score_attack()
    }
}

/// Play one run that lasts `duration_ms` of playing time
fn play_instant_run(game: &mut Game, start_ms: f64, duration_ms: f64) {
    game.toggle_running();
    assert!(game.frame(start_ms).is_none());
    let outcome = game.frame(start_ms + duration_ms).expect("tick due");
    assert_eq!(outcome.game_over, Some(GameOverCause::BoardFilled));
}

#[test]
fn initial_layout_matches_centered_segment() {
    let game = Game::new(Tuning::survival(), 5, MemoryStore::new()).unwrap();
    let snap = game.snapshot();
    assert_eq!(
        snap.snake,
        vec![
            Cell::new(12, 9),
            Cell::new(13, 9),
            Cell::new(14, 9),
            Cell::new(15, 9),
            Cell::new(16, 9),
        ]
    );
    assert_eq!(snap.direction, Direction::Right);
    assert_eq!(snap.phase, GamePhase::Idle);
    assert_eq!(snap.items.len(), 12);
}

#[test]
fn best_time_recorded_and_survives_reset() {
    let tuning = instant_fill(ScoringMode::Survival);
    let key = tuning.record_key.clone();
    let mut game = Game::new(tuning, 9, MemoryStore::new()).unwrap();

    play_instant_run(&mut game, 0.0, 2000.0);
    let snap = game.snapshot();
    assert!(snap.over);
    assert!(!snap.running);
    assert_eq!(snap.cause, Some(GameOverCause::BoardFilled));
    assert_eq!(snap.message.as_deref(), Some("Burgers win!"));
    assert_eq!(snap.best, 2.0);
    assert_eq!(game.store().load(&key), 2.0);

    // Game over is terminal until reset
    assert_eq!(game.toggle_running(), GamePhase::GameOver);

    game.reset();
    let snap = game.snapshot();
    assert_eq!(snap.phase, GamePhase::Idle);
    assert_eq!(snap.metric, 0.0);
    assert_eq!(snap.best, 2.0);
    assert_eq!(snap.message, None);

    // A shorter run leaves the record alone
    play_instant_run(&mut game, 10_000.0, 1000.0);
    assert_eq!(game.snapshot().best, 2.0);
    assert_eq!(game.store().load(&key), 2.0);

    // A longer one replaces it
    game.apply(Command::Reset);
    play_instant_run(&mut game, 20_000.0, 3000.0);
    assert_eq!(game.snapshot().best, 3.0);
    assert_eq!(game.store().load(&key), 3.0);
}

#[test]
fn best_record_loaded_from_store() {
    let tuning = instant_fill(ScoringMode::Survival);
    let store = MemoryStore::new().with_raw(&tuning.record_key, "42.5");
    let mut game = Game::new(tuning, 1, store).unwrap();
    assert_eq!(game.snapshot().best, 42.5);

    play_instant_run(&mut game, 0.0, 500.0);
    assert_eq!(game.snapshot().best, 42.5);
}

#[test]
fn equal_score_is_not_a_record() {
    let tuning = instant_fill(ScoringMode::Score);
    let key = tuning.record_key.clone();
    let mut game = Game::new(tuning, 1, MemoryStore::new()).unwrap();

    play_instant_run(&mut game, 0.0, 500.0);
    let snap = game.snapshot();
    assert_eq!(snap.scoring, ScoringMode::Score);
    assert_eq!(snap.metric, 0.0);
    assert_eq!(snap.best, 0.0);
    assert_eq!(game.store().load(&key), 0.0);
}

#[test]
fn filled_board_ends_the_run_without_self_collision() {
    let tuning = Tuning {
        self_collision: false,
        ..instant_fill(ScoringMode::Survival)
    };
    let mut game = Game::new(tuning, 4, MemoryStore::new()).unwrap();

    play_instant_run(&mut game, 0.0, 1000.0);
    let snap = game.snapshot();
    assert!(snap.over);
    assert_eq!(snap.cause, Some(GameOverCause::BoardFilled));
    assert_eq!(snap.best, 1.0);
}

#[test]
fn best_score_recorded_and_survives_reset() {
    let tuning = two_burgers();
    let key = tuning.record_key.clone();
    let food_reward = tuning.rewards.food as f64;
    let mut game = Game::new(tuning, 3, MemoryStore::new()).unwrap();
    assert_eq!(game.snapshot().items.len(), 2);

    game.toggle_running();
    game.frame(0.0);

    // Up onto a burger: one segment owed, so the tail stays put
    game.set_queued_direction(Direction::Up);
    let outcome = game.frame(200.0).expect("tick due");
    assert_eq!(outcome.pickup, Some(ItemKind::Food));
    assert_eq!(game.snapshot().length(), 3);
    assert_eq!(game.snapshot().metric, food_reward);

    // Up again wraps onto the body
    let outcome = game.frame(400.0).expect("tick due");
    assert_eq!(outcome.game_over, Some(GameOverCause::SelfCollision));

    let snap = game.snapshot();
    assert_eq!(snap.scoring, ScoringMode::Score);
    assert_eq!(snap.metric, food_reward);
    assert_eq!(snap.best, food_reward);
    assert_eq!(game.store().load(&key), food_reward);

    game.reset();
    let snap = game.snapshot();
    assert_eq!(snap.metric, 0.0);
    assert_eq!(snap.best, food_reward);
    assert_eq!(game.store().load(&key), food_reward);
}

#[test]
fn timed_toggle_counts_time_before_first_frame() {
    let tuning = instant_fill(ScoringMode::Survival);
    let mut game = Game::new(tuning, 2, MemoryStore::new()).unwrap();
    game.apply_at(Command::ToggleRunning, 5000.0);
    let outcome = game.frame(5500.0).expect("tick due");
    assert_eq!(outcome.game_over, Some(GameOverCause::BoardFilled));
    assert_eq!(game.snapshot().best, 0.5);
}

#[test]
fn self_collision_through_public_api() {
    let mut game = Game::new(coil_board(), 1, MemoryStore::new()).unwrap();
    game.toggle_running();
    game.frame(0.0);

    let mut now = 0.0;
    let mut last = None;
    for dir in [Direction::Up, Direction::Left, Direction::Down] {
        game.set_queued_direction(dir);
        now += 200.0;
        last = game.frame(now);
        assert!(last.is_some(), "each 200ms frame should tick");
    }

    let outcome = last.unwrap();
    assert_eq!(outcome.game_over, Some(GameOverCause::SelfCollision));
    let snap = game.snapshot();
    assert!(snap.over);
    assert_eq!(snap.cause, Some(GameOverCause::SelfCollision));
    assert!((snap.best - 0.6).abs() < 1e-9);

    // No more ticks after game over
    assert!(game.frame(now + 1000.0).is_none());
}

#[test]
fn zen_board_keeps_going_after_crossing_itself() {
    let tuning = Tuning {
        self_collision: false,
        ..coil_board()
    };
    let mut game = Game::new(tuning, 1, MemoryStore::new()).unwrap();
    game.toggle_running();
    game.frame(0.0);

    let mut now = 0.0;
    for dir in [Direction::Up, Direction::Left, Direction::Down, Direction::Down] {
        game.set_queued_direction(dir);
        now += 200.0;
        let outcome = game.frame(now).unwrap();
        assert_eq!(outcome.game_over, None);
    }
    assert!(game.snapshot().running);
}

#[test]
fn reversal_request_does_not_turn_the_snake() {
    let mut game = Game::new(coil_board(), 1, MemoryStore::new()).unwrap();
    game.apply(Command::ToggleRunning);
    game.frame(0.0);
    game.apply(Command::Steer(Direction::Left));
    game.frame(200.0);
    let snap = game.snapshot();
    assert_eq!(snap.direction, Direction::Right);
    assert_eq!(snap.head(), Some(Cell::new(3, 2)));
}

#[test]
fn paused_time_does_not_count() {
    let mut game = Game::new(coil_board(), 1, MemoryStore::new()).unwrap();
    game.toggle_running();
    game.frame(0.0);
    game.frame(100.0);
    game.toggle_running();
    assert_eq!(game.snapshot().phase, GamePhase::Paused);
    assert!(game.frame(60_000.0).is_none());

    game.toggle_running();
    game.frame(60_000.0);
    game.frame(60_100.0);
    assert!((game.snapshot().metric - 0.2).abs() < 1e-9);
}

#[test]
fn speed_controls_tick_interval() {
    let mut game = Game::new(Tuning::survival(), 1, MemoryStore::new()).unwrap();
    game.apply(Command::AdjustSpeed(1.0));
    assert!((game.snapshot().tick_interval_ms - 1000.0 / 12.0).abs() < 1e-9);

    for _ in 0..50 {
        game.apply(Command::AdjustSpeed(0.1));
    }
    assert_eq!(game.snapshot().speed, 3.0);

    for _ in 0..50 {
        game.apply(Command::AdjustSpeed(-0.1));
    }
    assert_eq!(game.snapshot().speed, 0.5);
}

#[test]
fn same_seed_same_commands_same_game() {
    let script = [
        Command::ToggleRunning,
        Command::Steer(Direction::Up),
        Command::Steer(Direction::Left),
        Command::AdjustSpeed(0.5),
        Command::Steer(Direction::Down),
        Command::Steer(Direction::Right),
    ];
    let mut a = Game::new(Tuning::score_attack(), 77, MemoryStore::new()).unwrap();
    let mut b = Game::new(Tuning::score_attack(), 77, MemoryStore::new()).unwrap();

    let mut now = 0.0;
    for round in 0..40 {
        let command = script[round % script.len()];
        if round == 0 || command != Command::ToggleRunning {
            a.apply(command);
            b.apply(command);
        }
        for _ in 0..3 {
            now += 100.0;
            assert_eq!(a.frame(now), b.frame(now));
        }
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn snapshot_serializes_for_the_presentation_layer() {
    let game = Game::new(Tuning::zen(), 3, MemoryStore::new()).unwrap();
    let json = serde_json::to_value(game.snapshot()).unwrap();
    assert_eq!(json["phase"], "Idle");
    assert_eq!(json["snake"].as_array().map(Vec::len), Some(5));
    assert_eq!(json["grid"]["width"], 32);
}
