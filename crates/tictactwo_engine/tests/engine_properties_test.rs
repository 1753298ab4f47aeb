//! Properties that hold over long stretches of random legal play.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tictactwo_engine::{
    Contract, Coord, Direction, EngineInvariants, GameConfig, InvariantSet, Move, MoveContract,
    Player, RulesEngine, UnlockPolicy,
};

fn configs() -> Vec<GameConfig> {
    vec![
        GameConfig::default(),
        GameConfig {
            unlock: UnlockPolicy::PiecesPlaced { per_player: 2 },
            diagonal_shifts: false,
            pieces_per_player: 4,
            ..GameConfig::default()
        },
        GameConfig {
            board_width: 7,
            board_height: 6,
            window_width: 4,
            window_height: 4,
            win_length: 4,
            pieces_per_player: 8,
            first_player: Player::O,
            ..GameConfig::default()
        },
    ]
}

/// Every candidate the engine could be asked to play, legal or not.
fn all_moves(engine: &RulesEngine) -> Vec<Move> {
    let coords: Vec<Coord> = engine.board().coords().collect();
    let mut moves: Vec<Move> = coords.iter().map(|&at| Move::Place { at }).collect();
    for &from in &coords {
        for &to in &coords {
            moves.push(Move::Relocate { from, to });
        }
    }
    moves.extend(
        [
            Direction::Up,
            Direction::Down,
            Direction::Left,
            Direction::Right,
            Direction::UpLeft,
            Direction::UpRight,
            Direction::DownLeft,
            Direction::DownRight,
        ]
        .map(|direction| Move::ShiftWindow { direction }),
    );
    moves
}

#[test]
fn test_legal_moves_match_preconditions() {
    for config in configs() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut engine = RulesEngine::new(config).unwrap();
        for _ in 0..40 {
            let legal = engine.legal_moves();
            for mv in all_moves(&engine) {
                assert_eq!(
                    legal.contains(&mv),
                    MoveContract::pre(&engine, &mv).is_ok(),
                    "{mv}"
                );
            }
            if legal.is_empty() {
                break;
            }
            let mv = legal[rng.random_range(0..legal.len())];
            engine.apply(mv).unwrap();
        }
    }
}

#[test]
fn test_random_play_keeps_invariants() {
    for (index, config) in configs().into_iter().enumerate() {
        for seed in 0..20u64 {
            let mut rng = StdRng::seed_from_u64(seed * 31 + index as u64);
            let mut engine = RulesEngine::new(config.clone()).unwrap();

            for _ in 0..200 {
                let legal = engine.legal_moves();
                if legal.is_empty() {
                    break;
                }
                let mover = engine.turn().current_player();
                let count = engine.turn().move_count();
                let applied = engine.apply(legal[rng.random_range(0..legal.len())]).unwrap();

                assert_eq!(applied.player, mover);
                assert!(EngineInvariants::check_all(&engine).is_ok());
                if engine.turn().is_game_over() {
                    assert_eq!(engine.turn().winner(), Some(applied.outcome.winner().unwrap()));
                    assert_eq!(engine.turn().move_count(), count);
                    break;
                }
                assert_eq!(engine.turn().current_player(), mover.opponent());
                assert_eq!(engine.turn().move_count(), count + 1);
            }
        }
    }
}

#[test]
fn test_rejected_moves_never_change_state() {
    for config in configs() {
        let mut rng = StdRng::seed_from_u64(99);
        let mut engine = RulesEngine::new(config).unwrap();
        for _ in 0..30 {
            let candidates = all_moves(&engine);
            for mv in &candidates {
                if engine.is_legal(mv) {
                    continue;
                }
                let before = engine.clone();
                assert!(engine.apply(*mv).is_err());
                assert_eq!(engine, before);
            }
            let legal = engine.legal_moves();
            if legal.is_empty() {
                break;
            }
            engine.apply(legal[rng.random_range(0..legal.len())]).unwrap();
        }
    }
}

#[test]
fn test_window_stays_on_board_under_random_shifts() {
    let mut engine = RulesEngine::new(GameConfig {
        unlock: UnlockPolicy::MoveCount { threshold: 0 },
        ..GameConfig::default()
    })
    .unwrap();
    let mut rng = StdRng::seed_from_u64(5);
    let directions = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];
    for _ in 0..300 {
        let direction = directions[rng.random_range(0..directions.len())];
        let mover = engine.turn().current_player();
        let origin = engine.window().origin();
        match engine.shift_window(direction) {
            Ok(_) => assert_eq!(engine.turn().current_player(), mover.opponent()),
            Err(_) => {
                assert_eq!(engine.window().origin(), origin);
                assert_eq!(engine.turn().current_player(), mover);
            }
        }
        let window = engine.window();
        assert!(window.right() <= 5 && window.bottom() <= 5);
    }
}

#[test]
fn test_pieces_counter_matches_board() {
    let mut engine = RulesEngine::new(GameConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    for _ in 0..12 {
        let legal = engine.legal_moves();
        if legal.is_empty() {
            break;
        }
        engine.apply(legal[rng.random_range(0..legal.len())]).unwrap();
        for player in [Player::X, Player::O] {
            let on_board = engine.board().count(player) as u32;
            assert_eq!(on_board + engine.turn().pieces_left(player), 6);
            assert_eq!(engine.placed(player), on_board);
        }
    }
}
