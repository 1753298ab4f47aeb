//! End-to-end game scenarios through the public API.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use tictactwo_engine::{
    Cell, ClockEvent, Coord, Direction, GameConfig, Move, MoveClock, MoveError, Outcome, Player,
    RulesEngine, UnlockPolicy,
};

#[test]
fn test_row_inside_window_wins() {
    let mut engine = RulesEngine::new(GameConfig::default()).unwrap();
    assert_eq!(engine.window().origin(), Coord::new(1, 1));

    // X builds row 1; O answers elsewhere inside the window.
    engine.place(1, 1).unwrap();
    engine.place(2, 1).unwrap();
    engine.place(1, 2).unwrap();
    engine.place(3, 3).unwrap();
    let applied = engine.place(1, 3).unwrap();

    assert_eq!(applied.outcome, Outcome::Won(Player::X));
    assert!(engine.turn().is_game_over());
    assert_eq!(engine.turn().winner(), Some(Player::X));
    assert_eq!(applied.to_string(), "X: place at (1, 3) (X wins)");
}

#[test]
fn test_window_shift_respects_board_edge() {
    let mut engine = RulesEngine::new(GameConfig {
        window_origin: Some(Coord::new(0, 0)),
        unlock: UnlockPolicy::MoveCount { threshold: 0 },
        ..GameConfig::default()
    })
    .unwrap();

    let before = engine.clone();
    assert_eq!(
        engine.shift_window(Direction::Left),
        Err(MoveError::OutOfBounds {
            direction: Direction::Left
        })
    );
    assert_eq!(engine, before);

    let applied = engine.shift_window(Direction::Right).unwrap();
    assert_eq!(applied.outcome, Outcome::Continue { next: Player::O });
    assert_eq!(engine.window().origin(), Coord::new(0, 1));
    assert_eq!(engine.turn().current_player(), Player::O);
}

#[test]
fn test_out_of_pieces_player_can_relocate() {
    let mut engine = RulesEngine::new(GameConfig {
        pieces_per_player: 2,
        unlock: UnlockPolicy::PiecesPlaced { per_player: 2 },
        ..GameConfig::default()
    })
    .unwrap();
    engine.place(1, 1).unwrap();
    engine.place(3, 3).unwrap();
    engine.place(2, 1).unwrap();
    engine.place(3, 2).unwrap();
    assert_eq!(engine.turn().pieces_left(Player::X), 0);

    assert_eq!(
        engine.place(1, 3),
        Err(MoveError::NoPiecesLeft { player: Player::X })
    );
    engine.relocate(2, 1, 1, 3).unwrap();
    assert_eq!(engine.board().get(2, 1), Ok(Cell::Empty));
    assert_eq!(engine.board().get(1, 3), Ok(Cell::Occupied(Player::X)));
    assert_eq!(engine.turn().current_player(), Player::O);
}

#[test]
fn test_clock_expiry_fires_once() {
    let fired = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&fired);
    let mut clock = MoveClock::new(4);
    clock.on_expire(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });

    clock.start();
    let events: Vec<ClockEvent> = (0..8).map(|_| clock.tick()).collect();

    assert_eq!(fired.load(Ordering::SeqCst), 1);
    assert_eq!(
        events.iter().filter(|e| **e == ClockEvent::Expired).count(),
        1
    );
    assert_eq!(events[3], ClockEvent::Expired);
    assert!(events[4..].iter().all(|e| *e == ClockEvent::Idle));
}

#[test]
fn test_line_outside_window_does_not_win() {
    let mut engine = RulesEngine::new(GameConfig {
        unlock: UnlockPolicy::MoveCount { threshold: 0 },
        ..GameConfig::default()
    })
    .unwrap();
    engine.place(1, 1).unwrap();
    engine.place(3, 1).unwrap();
    engine.place(1, 2).unwrap();
    engine.place(3, 2).unwrap();
    // Move the window right; X's pieces at column 1 drop out of it.
    engine.shift_window(Direction::Right).unwrap();
    assert_eq!(engine.window().origin(), Coord::new(1, 2));
    // O completes row 3 only as far as the window allows.
    let applied = engine.place(3, 3).unwrap();
    assert_eq!(applied.outcome, Outcome::Continue { next: Player::X });
}

#[test]
fn test_relocation_locked_until_threshold() {
    let mut engine = RulesEngine::new(GameConfig::default()).unwrap();
    for (row, col) in [(1, 1), (3, 3), (1, 3)] {
        engine.place(row, col).unwrap();
    }
    let mv = Move::Relocate {
        from: Coord::new(3, 3),
        to: Coord::new(2, 2),
    };
    assert_eq!(engine.apply(mv), Err(MoveError::PhaseLocked));
    engine.place(3, 1).unwrap();
    assert_eq!(engine.turn().move_count(), 4);
    assert!(engine.relocation_unlocked());
    let mv = Move::Relocate {
        from: Coord::new(1, 3),
        to: Coord::new(2, 2),
    };
    assert!(engine.apply(mv).is_ok());
}

#[test]
fn test_move_error_messages_are_specific() {
    let mut engine = RulesEngine::new(GameConfig::default()).unwrap();
    engine.place(2, 2).unwrap();
    let err = engine.place(2, 2).unwrap_err();
    assert!(err.to_string().contains("occupied"));
    let err = engine.place(0, 0).unwrap_err();
    assert!(matches!(err, MoveError::OutOfWindow { row: 0, col: 0 }));
}
