use super::*;
use std::collections::HashSet;

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

#[test]
fn random_engine_returns_legal_move() {
    let mut engine = RandomEngine::with_seed(7);
    engine.set_position(START_FEN).unwrap();

    let mv = engine.best_move().unwrap();

    let board = BoardState::new();
    assert!(board.legal_moves().contains(&mv));
}

#[test]
fn random_engine_handles_checkmate() {
    let mut engine = RandomEngine::with_seed(7);
    engine
        .set_position("r1bqkbnr/pppp1Qpp/2n5/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 1")
        .unwrap();

    assert_eq!(engine.best_move().unwrap(), "0000");
}

#[test]
fn random_engine_requires_a_position() {
    let mut engine = RandomEngine::new();
    assert!(matches!(engine.best_move(), Err(AgentError::Protocol(_))));

    engine.set_position(START_FEN).unwrap();
    engine.new_game().unwrap();
    assert!(engine.best_move().is_err());
}

#[test]
fn random_engine_rejects_bad_fen() {
    let mut engine = RandomEngine::new();
    assert!(engine.set_position("garbage").is_err());
}

#[test]
fn choose_random_move_covers_all_moves() {
    let moves: Vec<String> = BoardState::new().legal_moves();
    let mut rng = StdRng::seed_from_u64(42);

    let seen: HashSet<String> = (0..2000)
        .filter_map(|_| choose_random_move(&moves, &mut rng))
        .collect();

    assert_eq!(seen.len(), moves.len());
}

#[test]
fn choose_random_move_on_empty_list() {
    let mut rng = StdRng::seed_from_u64(1);
    assert_eq!(choose_random_move(&[], &mut rng), None);
}

#[test]
fn seeded_engines_agree() {
    let mut a = RandomEngine::with_seed(99);
    let mut b = RandomEngine::with_seed(99);
    a.set_position(START_FEN).unwrap();
    b.set_position(START_FEN).unwrap();

    for _ in 0..5 {
        assert_eq!(a.best_move().unwrap(), b.best_move().unwrap());
    }
}
