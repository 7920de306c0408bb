//! Move-selection prompt
//!
//! The prompt is rebuilt from a [`TurnContext`] on every turn; nothing about
//! the game is remembered between calls.

use chess_core::{side_name, TurnContext};
use serde::Serialize;

use crate::schema::MAX_CANDIDATES;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

/// One chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Chat-style request for a language model
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Prompt {
    pub messages: Vec<Message>,
}

impl Prompt {
    /// Build the request for one turn
    pub fn for_turn(ctx: &TurnContext<'_>) -> Self {
        Self {
            messages: vec![
                Message {
                    role: Role::System,
                    content: system_message(ctx),
                },
                Message {
                    role: Role::User,
                    content: user_message(ctx),
                },
            ],
        }
    }

    /// Text of the first message with `role`
    pub fn text(&self, role: Role) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.role == role)
            .map(|m| m.content.as_str())
    }
}

fn system_message(ctx: &TurnContext<'_>) -> String {
    format!(
        "You are a chess grandmaster advising the {side} player. \
         Pick the strongest move for {side} from the list of legal moves you are given.\n\
         \n\
         Notation rules:\n\
         - Write every move as start square followed by end square, e.g. e7e5, g8f6.\n\
         - No dashes, spaces, capture marks or piece letters.\n\
         - Castling is the king's move, e.g. e8g8.\n\
         - For a promotion append the lowercase piece letter, e.g. e2e1q.\n\
         - Only choose moves that appear in the legal move list.\n\
         \n\
         {format}",
        side = side_name(ctx.side),
        format = format_instructions(),
    )
}

fn user_message(ctx: &TurnContext<'_>) -> String {
    let history = if ctx.history.is_empty() {
        "[]".to_string()
    } else {
        ctx.history.join(" ")
    };

    format!(
        "You play {side}. Moves so far: {history}\n\
         \n\
         FEN: {fen}\n\
         \n\
         Board (uppercase = White, lowercase = Black, . = empty):\n\
         {board}\n\
         Legal moves: [{legal}]\n\
         \n\
         Which move from the legal move list is best?",
        side = side_name(ctx.side),
        fen = ctx.fen,
        board = ctx.board,
        legal = ctx.legal_moves.join(" "),
    )
}

/// Output contract the response parser enforces
pub fn format_instructions() -> String {
    format!(
        "Answer with a single JSON object and nothing else, in exactly this shape:\n\
         {{\n  \
           \"candidate_moves\": [{{\"move\": \"<uci>\", \"explanation\": \"<why>\"}}],\n  \
           \"best_move\": {{\"move\": \"<uci>\", \"explanation\": \"<why>\"}}\n\
         }}\n\
         List between 1 and {MAX_CANDIDATES} candidate moves and exactly one best_move."
    )
}

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod prompt_tests;
