//! Rule-consistency checks across many reachable positions
//!
//! Positions are reached by deterministic walks from a few seeds so the
//! walk covers castling, en passant and promotion without randomness.

use chess_core::BoardState;
use std::collections::BTreeSet;

const SEEDS: &[&str] = &[
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    // Kiwipete
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    // En passant available on d6
    "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3",
    // Promotions on both sides
    "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
];

fn legal_set(board: &BoardState) -> BTreeSet<String> {
    board.legal_moves().into_iter().collect()
}

/// Walk `plies` moves from `fen`, calling `visit` on every position reached.
fn walk(fen: &str, plies: usize, mut visit: impl FnMut(&BoardState)) {
    let mut board = BoardState::from_fen(fen).unwrap();
    for ply in 0..plies {
        visit(&board);
        let moves = board.legal_moves();
        if moves.is_empty() || board.is_terminal().0 {
            break;
        }
        let pick = (ply * 7 + 3) % moves.len();
        board.apply(&moves[pick]).unwrap();
    }
}

#[test]
fn every_listed_move_applies() {
    for fen in SEEDS {
        walk(fen, 40, |board| {
            for mv in board.legal_moves() {
                let mut copy = board.clone();
                let applied = copy
                    .apply(&mv)
                    .unwrap_or_else(|e| panic!("{mv} listed but rejected in {}: {e}", board.fen()));
                assert_eq!(applied.uci, mv);
                assert_ne!(copy.side_to_move(), board.side_to_move());
            }
        });
    }
}

#[test]
fn every_listed_move_is_legal_and_san_resolves_to_it() {
    for fen in SEEDS {
        walk(fen, 25, |board| {
            for mv in board.legal_moves() {
                assert!(board.is_legal(&mv));
                let san = board.clone().apply(&mv).unwrap().san;
                let via_san = board.clone().apply(&san).unwrap();
                assert_eq!(via_san.uci, mv, "SAN {san} resolved differently");
            }
        });
    }
}

#[test]
fn fen_round_trip_preserves_legal_moves() {
    for fen in SEEDS {
        walk(fen, 40, |board| {
            let rebuilt = BoardState::from_fen(&board.fen()).unwrap();
            assert_eq!(rebuilt.fen(), board.fen());
            assert_eq!(legal_set(&rebuilt), legal_set(board));
        });
    }
}

#[test]
fn en_passant_capture_is_listed() {
    let board = BoardState::from_fen(SEEDS[2]).unwrap();
    assert!(board.legal_moves().contains(&"e5f6".to_string()));
}

#[test]
fn promotion_moves_list_all_four_pieces() {
    let board = BoardState::from_fen(SEEDS[3]).unwrap();
    let moves = legal_set(&board);
    for promo in ["g2g1q", "g2g1r", "g2g1b", "g2g1n"] {
        assert!(moves.contains(promo), "missing {promo}");
    }
}
