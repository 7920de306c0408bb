//! Authoritative board state for a single game
//!
//! Wraps a `shakmaty` position and adds what the rules library leaves to the
//! caller: lenient move-text parsing (UCI or SAN), fivefold repetition
//! tracking and a plain-text board diagram.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::uci::UciMove;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, File, Move, Position, Rank, Square};
use std::collections::HashMap;

use crate::error::BoardError;
use crate::types::{EndReason, GameOutcome};

/// Halfmove clock value at which the game is drawn without a claim
pub const SEVENTY_FIVE_MOVE_HALFMOVES: u32 = 150;

/// Occurrences of the same position at which the game is drawn without a claim
pub const FIVEFOLD: u32 = 5;

/// A move that was validated and played, in both notations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMove {
    pub uci: String,
    pub san: String,
}

/// Current position plus the repetition table needed for draw detection
#[derive(Debug, Clone)]
pub struct BoardState {
    position: Chess,
    repetitions: HashMap<String, u32>,
}

impl Default for BoardState {
    fn default() -> Self {
        Self::new()
    }
}

impl BoardState {
    /// Standard starting position
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let invalid = |reason: String| BoardError::InvalidFen {
            fen: fen.to_string(),
            reason,
        };
        let parsed: Fen = fen.trim().parse().map_err(|e| invalid(format!("{e}")))?;
        let position: Chess = parsed
            .into_position(CastlingMode::Standard)
            .map_err(|e| invalid(format!("{e}")))?;
        Ok(Self::from_position(position))
    }

    fn from_position(position: Chess) -> Self {
        let mut state = Self {
            position,
            repetitions: HashMap::new(),
        };
        state.record_repetition();
        state
    }

    /// Back to the standard starting position, forgetting repetitions
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    pub fn side_to_move(&self) -> Color {
        self.position.turn()
    }

    pub fn fullmove_number(&self) -> u32 {
        self.position.fullmoves().get()
    }

    pub fn halfmove_clock(&self) -> u32 {
        self.position.halfmoves()
    }

    /// All legal moves in UCI notation, in generation order
    pub fn legal_moves(&self) -> Vec<String> {
        self.position
            .legal_moves()
            .iter()
            .map(|m| m.to_uci(CastlingMode::Standard).to_string())
            .collect()
    }

    pub fn is_legal(&self, candidate: &str) -> bool {
        self.parse_move(candidate).is_ok()
    }

    /// Resolve move text against the current position.
    ///
    /// UCI is tried first, then SAN. Text that is neither is
    /// [`BoardError::InvalidFormat`]; text that parses but names no legal
    /// move is [`BoardError::IllegalMove`].
    pub fn parse_move(&self, candidate: &str) -> Result<Move, BoardError> {
        let text = candidate.trim();

        if let Ok(uci) = text.parse::<UciMove>() {
            return uci
                .to_move(&self.position)
                .map_err(|_| BoardError::IllegalMove(text.to_string()));
        }

        match text.parse::<SanPlus>() {
            Ok(san_plus) => san_plus
                .san
                .to_move(&self.position)
                .map_err(|_| BoardError::IllegalMove(text.to_string())),
            Err(_) => Err(BoardError::InvalidFormat(text.to_string())),
        }
    }

    /// Validate and play a move. On error the position is left untouched.
    pub fn apply(&mut self, candidate: &str) -> Result<AppliedMove, BoardError> {
        let m = self.parse_move(candidate)?;
        let applied = AppliedMove {
            uci: m.to_uci(CastlingMode::Standard).to_string(),
            san: SanPlus::from_move(self.position.clone(), &m).to_string(),
        };
        self.position.play_unchecked(&m);
        self.record_repetition();
        Ok(applied)
    }

    /// `(true, outcome)` once the game is over, `(false, InProgress)` before
    pub fn is_terminal(&self) -> (bool, GameOutcome) {
        let outcome = self.outcome();
        (outcome.is_decided(), outcome)
    }

    /// Terminal flag, outcome and the rule that ended the game
    pub fn status(&self) -> (bool, GameOutcome, Option<EndReason>) {
        let reason = self.end_reason();
        let outcome = Self::outcome_for(reason, self.position.turn());
        (reason.is_some(), outcome, reason)
    }

    pub fn outcome(&self) -> GameOutcome {
        Self::outcome_for(self.end_reason(), self.position.turn())
    }

    fn outcome_for(reason: Option<EndReason>, to_move: Color) -> GameOutcome {
        match reason {
            None => GameOutcome::InProgress,
            Some(EndReason::Checkmate) => GameOutcome::won_by(to_move.other()),
            Some(_) => GameOutcome::Draw,
        }
    }

    /// Automatic game-over rules only; draws that must be claimed are ignored
    pub fn end_reason(&self) -> Option<EndReason> {
        if self.position.is_checkmate() {
            Some(EndReason::Checkmate)
        } else if self.position.is_stalemate() {
            Some(EndReason::Stalemate)
        } else if self.position.is_insufficient_material() {
            Some(EndReason::InsufficientMaterial)
        } else if self.position.halfmoves() >= SEVENTY_FIVE_MOVE_HALFMOVES {
            Some(EndReason::SeventyFiveMoves)
        } else if self.repetition_count() >= FIVEFOLD {
            Some(EndReason::FivefoldRepetition)
        } else {
            None
        }
    }

    /// How many times the current position has occurred in this game
    pub fn repetition_count(&self) -> u32 {
        self.repetitions
            .get(&self.position_key())
            .copied()
            .unwrap_or(0)
    }

    /// Text diagram, rank 8 at the top, with coordinates.
    ///
    /// White pieces are uppercase, black pieces lowercase, empty squares `.`.
    pub fn diagram(&self) -> String {
        let board = self.position.board();
        let mut out = String::from("  a b c d e f g h\n");
        for &rank in Rank::ALL.iter().rev() {
            out.push(rank.char());
            for &file in File::ALL.iter() {
                out.push(' ');
                match board.piece_at(Square::from_coords(file, rank)) {
                    Some(piece) => out.push(piece.char()),
                    None => out.push('.'),
                }
            }
            out.push('\n');
        }
        out
    }

    // Repetition identity ignores the move counters.
    fn position_key(&self) -> String {
        let fen = self.fen();
        fen.split_whitespace().take(4).collect::<Vec<_>>().join(" ")
    }

    fn record_repetition(&mut self) {
        *self.repetitions.entry(self.position_key()).or_insert(0) += 1;
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
