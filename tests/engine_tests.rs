//! End-to-end tests through the engine handle.

use std::time::{Duration, Instant};

use magic_chess::board::{MoveError, PositionError, START_FEN};
use magic_chess::{
    Color, ConfigError, Engine, EngineConfig, EngineError, PieceKind, Position, Square,
};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn engine(config: EngineConfig) -> Engine {
    Engine::new(config).expect("engine")
}

#[test]
fn starts_at_the_initial_position() {
    let engine = engine(EngineConfig::default());
    assert_eq!(engine.fen(Color::White), START_FEN);
    assert_eq!(engine.side_to_move(), Color::White);
    assert_eq!(engine.last_move(), None);
    assert_eq!(
        engine.board_string(),
        "RNBQKBNRPPPPPPPP................................pppppppprnbqkbnr"
    );
}

#[test]
fn rejects_invalid_config() {
    let err = Engine::new(EngineConfig::default().with_threads(0)).err().unwrap();
    assert!(matches!(err, EngineError::Config(ConfigError::ZeroThreads)));
}

#[test]
fn searches_to_fixed_depth_and_reports_progress() {
    let mut engine = engine(EngineConfig::default().with_time_budget_ms(0).with_max_depth(3));
    engine.start_search(Color::White).unwrap();
    engine.wait_for_search();

    let info = engine.search_info();
    assert!(info.done);
    assert_eq!(info.depth, 3);
    assert!(info.nodes > 0);
    assert!(!info.pv.is_empty());
    assert_eq!(info.time_remaining_ms, 0);

    let best = engine.best_move().unwrap();
    assert!(engine.position().legal_moves(Color::White).contains(best));
    assert!(info.pv.starts_with(&best.to_string()));
}

#[test]
fn time_budget_ends_the_search() {
    let mut engine = engine(EngineConfig::default().with_time_budget_ms(150));
    let start = Instant::now();
    engine.start_search(Color::White).unwrap();
    while !engine.search_info().done {
        assert!(start.elapsed() < Duration::from_secs(30), "search ignored its budget");
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(engine.best_move().is_ok());
}

#[test]
fn stop_search_interrupts_an_unbounded_search() {
    let mut engine = engine(EngineConfig::default().with_time_budget_ms(0));
    engine.start_search(Color::White).unwrap();
    assert!(matches!(engine.start_search(Color::White), Err(EngineError::SearchRunning)));

    std::thread::sleep(Duration::from_millis(50));
    engine.stop_search();
    engine.stop_search();
    assert!(engine.search_info().done);
    assert!(engine.best_move().is_ok());
}

#[test]
fn best_move_is_unavailable_while_searching() {
    let mut engine = engine(EngineConfig::default().with_time_budget_ms(0));
    engine.start_search(Color::White).unwrap();
    if !engine.search_info().done {
        assert!(matches!(engine.best_move(), Err(EngineError::SearchRunning)));
    }
    engine.stop_search();
}

#[test]
fn mated_side_has_no_best_move() {
    let mut engine = engine(EngineConfig::default().with_max_depth(3));
    engine
        .set_position_from_fen("R5k1/5ppp/8/8/8/8/8/7K b - - 0 1")
        .unwrap();
    engine.start_search(Color::Black).unwrap();
    engine.wait_for_search();
    assert!(matches!(engine.best_move(), Err(EngineError::NoBestMove)));
    assert!(engine.search_info().score_cp < -900_000);
}

#[test]
fn parallel_engine_finds_the_mate() {
    let config = EngineConfig::default()
        .with_time_budget_ms(0)
        .with_max_depth(3)
        .with_threads(4);
    let mut engine = engine(config);
    engine
        .set_position_from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1")
        .unwrap();
    engine.start_search(Color::White).unwrap();
    engine.wait_for_search();
    assert_eq!(engine.best_move().unwrap().to_string(), "e1e8");
}

#[test]
fn apply_move_updates_position_and_last_move() {
    let mut engine = engine(EngineConfig::default());
    let mv = engine.apply_move(Color::White, sq("e2"), sq("e4")).unwrap();
    assert!(mv.is_double_push());
    assert_eq!(engine.last_move(), Some((sq("e2"), sq("e4"))));
    assert_eq!(engine.side_to_move(), Color::Black);
    assert_eq!(
        engine.fen(Color::Black),
        "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1"
    );
}

#[test]
fn illegal_move_leaves_position_unchanged() {
    let mut engine = engine(EngineConfig::default());
    let before = *engine.position();
    let err = engine.apply_move(Color::White, sq("e2"), sq("e5")).unwrap_err();
    assert!(matches!(err, EngineError::Move(MoveError::IllegalMove { .. })));
    // black piece moved by white
    assert!(engine.apply_move(Color::White, sq("e7"), sq("e5")).is_err());
    assert_eq!(*engine.position(), before);
    assert_eq!(engine.last_move(), None);
}

#[test]
fn promotion_defaults_to_queen() {
    let mut engine = engine(EngineConfig::default());
    engine.set_position_from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let mv = engine.apply_move(Color::White, sq("a7"), sq("a8")).unwrap();
    assert_eq!(mv.promoted().kind(), Some(PieceKind::Queen));

    engine.set_position_from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").unwrap();
    let mv = engine
        .apply_move_promoting(Color::White, sq("a7"), sq("a8"), PieceKind::Knight)
        .unwrap();
    assert_eq!(mv.promoted().kind(), Some(PieceKind::Knight));
}

#[test]
fn castling_is_applied_by_king_squares() {
    let mut engine = engine(EngineConfig::default());
    engine
        .set_position_from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1")
        .unwrap();
    let mv = engine.apply_move(Color::White, sq("e1"), sq("g1")).unwrap();
    assert!(mv.is_castle());
    assert_eq!(engine.fen(Color::Black), "r3k2r/8/8/8/8/8/8/R4RK1 b kq - 0 1");
}

#[test]
fn board_string_round_trips() {
    let mut engine = engine(EngineConfig::default());
    let board = format!("....K..R{}p.............k.", ".".repeat(40));
    assert_eq!(board.len(), 64);
    engine.set_position_from_board_string(&board).unwrap();
    assert_eq!(engine.board_string(), board);
    assert_eq!(engine.side_to_move(), Color::White);
}

#[test]
fn bad_positions_are_rejected_and_keep_the_old_one() {
    let mut engine = engine(EngineConfig::default());
    let err = engine.set_position_from_board_string("KQ").unwrap_err();
    assert!(matches!(err, EngineError::Position(PositionError::BadLength { found: 2 })));

    let err = engine.set_position_from_fen("8/8/8/8/8/8/8/8 w - - 0 1").unwrap_err();
    assert!(matches!(err, EngineError::Position(PositionError::KingCount { .. })));

    let err = engine.set_position_from_fen("rnbqkbnr/pppppppp w").unwrap_err();
    assert!(matches!(err, EngineError::Position(PositionError::BadRankCount { found: 2 })));

    assert_eq!(engine.fen(Color::White), START_FEN);
}

#[test]
fn independent_engines_do_not_interfere() {
    let mut first = engine(EngineConfig::default().with_time_budget_ms(0).with_max_depth(2));
    let mut second = engine(EngineConfig::default().with_time_budget_ms(0).with_max_depth(2));
    second
        .set_position_from_fen("6k1/5ppp/8/8/8/8/8/4Q2K w - - 0 1")
        .unwrap();
    first.start_search(Color::White).unwrap();
    second.start_search(Color::White).unwrap();
    first.wait_for_search();
    second.wait_for_search();
    assert_eq!(second.best_move().unwrap().to_string(), "e1e8");
    assert!(Position::start().legal_moves(Color::White).contains(first.best_move().unwrap()));
}

#[test]
fn shutdown_is_idempotent() {
    let mut engine = engine(EngineConfig::default().with_threads(2).with_time_budget_ms(0));
    engine.start_search(Color::White).unwrap();
    engine.shutdown();
    engine.shutdown();
    assert!(engine.search_info().done);
}
