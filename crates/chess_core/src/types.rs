use serde::{Deserialize, Serialize};
use shakmaty::Color;
use std::fmt;

/// Result of a game as derived from the current position
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    InProgress,
    WhiteWins,
    BlackWins,
    Draw,
}

impl GameOutcome {
    /// Outcome of a game won by `winner`
    pub fn won_by(winner: Color) -> Self {
        match winner {
            Color::White => GameOutcome::WhiteWins,
            Color::Black => GameOutcome::BlackWins,
        }
    }

    pub fn winner(self) -> Option<Color> {
        match self {
            GameOutcome::WhiteWins => Some(Color::White),
            GameOutcome::BlackWins => Some(Color::Black),
            GameOutcome::InProgress | GameOutcome::Draw => None,
        }
    }

    pub fn is_decided(self) -> bool {
        self != GameOutcome::InProgress
    }

    /// PGN-style result token
    pub fn result_str(self) -> &'static str {
        match self {
            GameOutcome::InProgress => "*",
            GameOutcome::WhiteWins => "1-0",
            GameOutcome::BlackWins => "0-1",
            GameOutcome::Draw => "1/2-1/2",
        }
    }
}

impl fmt::Display for GameOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameOutcome::InProgress => write!(f, "In progress"),
            GameOutcome::WhiteWins => write!(f, "White wins"),
            GameOutcome::BlackWins => write!(f, "Black wins"),
            GameOutcome::Draw => write!(f, "Draw"),
        }
    }
}

/// Why a position is terminal
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    Checkmate,
    Stalemate,
    InsufficientMaterial,
    /// 150 halfmoves without a capture or pawn move
    SeventyFiveMoves,
    FivefoldRepetition,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            EndReason::Checkmate => "checkmate",
            EndReason::Stalemate => "stalemate",
            EndReason::InsufficientMaterial => "insufficient material",
            EndReason::SeventyFiveMoves => "seventy-five-move rule",
            EndReason::FivefoldRepetition => "fivefold repetition",
        };
        f.write_str(s)
    }
}

pub fn side_name(color: Color) -> &'static str {
    match color {
        Color::White => "White",
        Color::Black => "Black",
    }
}
