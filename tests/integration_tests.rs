//! Integration tests for the engine's tic loop, driven through the facade.

use std::collections::VecDeque;

use tetrino::core::{GameState, SPAWN_POSITION};
use tetrino::types::{Command, InputEvent, Phase, FRAME_PERIOD_US};

const FRAME: u64 = FRAME_PERIOD_US as u64;

fn tap(inputs: &mut VecDeque<InputEvent>, command: Command, frame: i64) {
    inputs.push_back(InputEvent::pressed(command, frame));
    inputs.push_back(InputEvent::released(command, frame));
}

/// Tap `command` on the next frame and advance exactly one frame.
fn tap_next_frame(game: &mut GameState, command: Command) -> bool {
    let mut inputs = VecDeque::new();
    tap(&mut inputs, command, game.current_frame() + 1);
    let alive = game.tic(FRAME, &mut inputs);
    assert!(inputs.is_empty());
    alive
}

#[test]
fn test_welcome_screen_waits_for_hard_drop() {
    let mut game = GameState::new(0);
    let mut inputs = VecDeque::new();
    for _ in 0..120 {
        assert!(game.tic(FRAME, &mut inputs));
    }
    let snap = game.snapshot();
    assert_eq!(snap.phase, Phase::Welcome);
    assert!(snap.active.is_none());
    assert!(snap.ghost.is_none());
    assert!(snap.next.is_none());

    assert!(tap_next_frame(&mut game, Command::HardDrop));
    assert_eq!(game.phase(), Phase::Play);
    assert_eq!(game.clock(), 0, "a new game restarts the clock");
    assert_eq!(game.active().map(|p| p.pos), Some(SPAWN_POSITION));
}

#[test]
fn test_hard_drop_on_empty_board_scores_two_per_row() {
    let mut game = GameState::new(0);
    game.new_game(1);
    let first = game.active().map(|p| p.kind);
    let next = game.next();

    let mut inputs = VecDeque::new();
    tap(&mut inputs, Command::HardDrop, 1);
    assert!(game.tic(FRAME, &mut inputs));

    assert_eq!(game.score(), 40);
    assert_eq!(game.phase(), Phase::Play);
    assert_eq!(game.lines(), 0);
    assert_eq!(game.matrix().filled().count(), 4);
    assert!(first.is_some());

    let active = game.active().copied().unwrap();
    assert_eq!(Some(active.kind), next);
    assert_eq!(active.pos, SPAWN_POSITION);
    assert!(game.messages().is_empty(), "drops do not log messages");
}

#[test]
fn test_future_events_stay_queued() {
    let mut game = GameState::new(3);
    game.new_game(1);

    let mut inputs = VecDeque::new();
    tap(&mut inputs, Command::MoveLeft, 5);
    assert!(game.tic(FRAME, &mut inputs));
    assert_eq!(inputs.len(), 2);
    assert_eq!(game.active().map(|p| p.pos), Some(SPAWN_POSITION));

    assert!(game.tic(4 * FRAME, &mut inputs));
    assert!(inputs.is_empty());
    assert_eq!(game.active().map(|p| p.pos.x), Some(SPAWN_POSITION.x - 1));
}

#[test]
fn test_result_does_not_depend_on_tic_granularity() {
    let script = [
        (3, Command::MoveLeft),
        (10, Command::RotateRight),
        (25, Command::HardDrop),
        (40, Command::Hold),
        (41, Command::MoveRight),
        (60, Command::SoftDrop),
        (90, Command::HardDrop),
        (95, Command::RotateLeft),
        (150, Command::HardDrop),
    ];
    let run = |chunk_frames: u64| {
        let mut game = GameState::new(42);
        game.new_game(3);
        let mut inputs = VecDeque::new();
        for (frame, command) in script {
            tap(&mut inputs, command, frame);
        }
        let total = 300;
        let mut done = 0;
        while done < total {
            let step = chunk_frames.min(total - done);
            game.tic(step * FRAME, &mut inputs);
            done += step;
        }
        game.snapshot()
    };

    let per_frame = run(1);
    assert_eq!(per_frame, run(7));
    assert_eq!(per_frame, run(300));
    assert!(per_frame.score > 0);
}

#[test]
fn test_gravity_runs_without_input() {
    let mut game = GameState::new(0);
    game.new_game(1);
    let (normal, _) = game.fall_periods();

    let mut inputs = VecDeque::new();
    assert!(game.tic(normal as u64, &mut inputs));
    assert_eq!(game.active().map(|p| p.pos.y), Some(SPAWN_POSITION.y + 1));
}

#[test]
fn test_stacking_ends_in_game_over_then_welcome() {
    let mut game = GameState::new(7);
    game.new_game(1);

    let mut drops = 0;
    while game.phase() == Phase::Play {
        assert!(drops < 200, "stack never topped out");
        assert!(tap_next_frame(&mut game, Command::HardDrop));
        drops += 1;
    }
    assert_eq!(game.phase(), Phase::GameOver);
    let snap = game.snapshot();
    assert!(snap.active.is_none());
    assert!(snap.next.is_some());
    assert!(snap.score > 0);

    assert!(tap_next_frame(&mut game, Command::HardDrop));
    assert_eq!(game.phase(), Phase::Welcome);

    assert!(tap_next_frame(&mut game, Command::HardDrop));
    assert_eq!(game.phase(), Phase::Play);
    assert_eq!(game.score(), 0);
    assert_eq!(game.matrix().filled().count(), 0);
}

#[test]
fn test_quit_acts_on_release_during_play() {
    let mut game = GameState::new(0);
    game.new_game(1);

    let mut inputs = VecDeque::from([InputEvent::pressed(Command::Quit, 1)]);
    assert!(game.tic(FRAME, &mut inputs));
    assert!(game.is_alive());

    inputs.push_back(InputEvent::released(Command::Quit, 2));
    assert!(!game.tic(FRAME, &mut inputs));
    assert!(!game.snapshot().alive);
}

#[test]
fn test_quit_from_welcome() {
    let mut game = GameState::new(0);
    let mut inputs = VecDeque::from([InputEvent::pressed(Command::Quit, 1)]);
    assert!(!game.tic(FRAME, &mut inputs));
}

#[test]
fn test_configured_start_level_is_used_from_welcome() {
    let mut game = GameState::new(0).with_start_level(5);
    assert!(tap_next_frame(&mut game, Command::HardDrop));
    assert_eq!(game.phase(), Phase::Play);
    assert_eq!(game.level(), 5);
    assert_eq!(game.snapshot().level, 5);
}
