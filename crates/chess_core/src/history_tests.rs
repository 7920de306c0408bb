use super::*;
use crate::BoardState;

fn play(board: &mut BoardState, history: &mut GameHistory, mv: &str, mover: &str) {
    let turn = board.fullmove_number();
    let side = board.side_to_move();
    let applied = board.apply(mv).unwrap();
    history.push(turn, side, mover, applied, false, board.fen());
}

#[test]
fn test_snapshots_stay_one_ahead_of_records() {
    let mut board = BoardState::new();
    let mut history = GameHistory::new(board.fen());
    assert_eq!(history.snapshots().len(), 1);

    play(&mut board, &mut history, "e2e4", "engine");
    play(&mut board, &mut history, "e7e5", "model");

    assert_eq!(history.plies(), 2);
    assert_eq!(history.snapshots().len(), history.plies() + 1);
    assert_eq!(history.snapshots()[2], board.fen());
}

#[test]
fn test_move_texts_are_turn_indexed() {
    let mut board = BoardState::new();
    let mut history = GameHistory::new(board.fen());

    play(&mut board, &mut history, "e2e4", "engine");
    play(&mut board, &mut history, "e7e5", "model");
    play(&mut board, &mut history, "Nf3", "engine");

    assert_eq!(history.move_texts(), vec!["1. e2e4", "1. e7e5", "2. g1f3"]);
    assert_eq!(history.last().unwrap().san, "Nf3");
    assert_eq!(history.records()[1].side, Color::Black);
}

#[test]
fn test_fallback_moves_are_counted() {
    let mut board = BoardState::new();
    let mut history = GameHistory::new(board.fen());

    let applied = board.apply("e2e4").unwrap();
    history.push(1, Color::White, "engine", applied, false, board.fen());
    let applied = board.apply("a7a6").unwrap();
    history.push(1, Color::Black, "model", applied, true, board.fen());

    assert_eq!(history.fallback_count(), 1);
}

#[test]
fn test_clear_restarts_from_new_position() {
    let mut board = BoardState::new();
    let mut history = GameHistory::new(board.fen());
    play(&mut board, &mut history, "d2d4", "engine");

    board.reset();
    history.clear(board.fen());

    assert!(history.is_empty());
    assert_eq!(history.snapshots(), &[board.fen()]);
}

#[test]
fn test_record_serializes_side_by_name() {
    let record = MoveRecord {
        turn: 1,
        side: Color::Black,
        mover: "model".to_string(),
        uci: "e7e5".to_string(),
        san: "e5".to_string(),
        fallback: false,
    };
    let json = serde_json::to_string(&record).unwrap();
    assert!(json.contains("\"side\":\"Black\""));

    let back: MoveRecord = serde_json::from_str(&json).unwrap();
    assert_eq!(back, record);
}
