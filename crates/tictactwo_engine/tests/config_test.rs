//! Configuration loading and serialized forms.

use std::io::Write;
use tictactwo_engine::{
    Coord, Direction, GameConfig, Move, Player, RulesEngine, Stage, UnlockPolicy,
};

#[test]
fn test_default_rules() {
    let config = GameConfig::default();
    assert_eq!((config.board_width, config.board_height), (5, 5));
    assert_eq!((config.window_width, config.window_height), (3, 3));
    assert_eq!(config.win_length, 3);
    assert_eq!(config.pieces_per_player, 6);
    assert_eq!(config.unlock, UnlockPolicy::MoveCount { threshold: 4 });
    assert!(config.diagonal_shifts);
    assert_eq!(config.first_player, Player::X);
    assert_eq!(config.clock_ticks, 15);
}

#[test]
fn test_load_from_file() {
    let path = std::env::temp_dir().join(format!("tictactwo-config-{}.toml", std::process::id()));
    let mut file = std::fs::File::create(&path).unwrap();
    writeln!(
        file,
        r#"
name = "wide"
board_width = 7
window_width = 4
win_length = 4
first_player = "O"

[unlock]
policy = "move-count"
threshold = 2
"#
    )
    .unwrap();
    drop(file);

    let config = GameConfig::from_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(config.name, "wide");
    assert_eq!(config.board_width, 7);
    assert_eq!(config.board_height, 5);
    assert_eq!(config.unlock, UnlockPolicy::MoveCount { threshold: 2 });
    let engine = RulesEngine::new(config).unwrap();
    assert_eq!(engine.window().origin(), Coord::new(1, 1));
    assert_eq!(engine.turn().current_player(), Player::O);
}

#[test]
fn test_missing_file_is_config_error() {
    let err = GameConfig::from_file("/definitely/not/here.toml").unwrap_err();
    assert!(!err.message.is_empty());
}

#[test]
fn test_invalid_config_refuses_engine() {
    let config = GameConfig {
        window_width: 6,
        ..GameConfig::default()
    };
    assert!(RulesEngine::new(config).is_err());
}

#[test]
fn test_pieces_placed_gate_above_supply_is_rejected() {
    let config = GameConfig {
        unlock: UnlockPolicy::PiecesPlaced { per_player: 7 },
        ..GameConfig::default()
    };
    assert!(config.validate().is_err());
    assert!(RulesEngine::new(config).is_err());
}

#[test]
fn test_move_count_gate_past_full_window_is_rejected() {
    let config = GameConfig {
        unlock: UnlockPolicy::MoveCount { threshold: 20 },
        ..GameConfig::default()
    };
    let err = config.validate().unwrap_err();
    assert!(err.message.contains("never reached"));
}

#[test]
fn test_move_count_gate_limited_by_pieces() {
    let config = GameConfig {
        board_width: 7,
        board_height: 7,
        window_width: 5,
        window_height: 5,
        pieces_per_player: 3,
        unlock: UnlockPolicy::MoveCount { threshold: 7 },
        ..GameConfig::default()
    };
    assert!(config.validate().is_err());
    let config = GameConfig {
        unlock: UnlockPolicy::MoveCount { threshold: 6 },
        ..config
    };
    assert!(config.validate().is_ok());
}

#[test]
fn test_reachable_gate_always_leaves_a_move() {
    // Fill the window without a line right up to the gate.
    let mut engine = RulesEngine::new(GameConfig {
        unlock: UnlockPolicy::MoveCount { threshold: 9 },
        ..GameConfig::default()
    })
    .unwrap();
    let draw = [(1, 1), (1, 2), (1, 3), (2, 1), (2, 3), (2, 2), (3, 1), (3, 3), (3, 2)];
    for (row, col) in draw {
        assert!(!engine.legal_moves().is_empty());
        engine.place(row, col).unwrap();
    }
    assert!(!engine.turn().is_game_over());
    assert!(engine.relocation_unlocked());
    assert!(!engine.legal_moves().is_empty());
}

#[test]
fn test_move_json_shape() {
    let mv = Move::ShiftWindow {
        direction: Direction::UpLeft,
    };
    let json = serde_json::to_value(mv).unwrap();
    assert_eq!(
        json,
        serde_json::json!({ "type": "shift-window", "direction": "up-left" })
    );
    let back: Move = serde_json::from_value(json).unwrap();
    assert_eq!(back, mv);

    assert_eq!(serde_json::to_value(Stage::ImmediateWin).unwrap(), "immediate-win");
}

#[test]
fn test_direction_names_parse() {
    assert_eq!("up-left".parse::<Direction>(), Ok(Direction::UpLeft));
    assert_eq!("DOWN".parse::<Direction>(), Ok(Direction::Down));
    assert!("sideways".parse::<Direction>().is_err());
}
