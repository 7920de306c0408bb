//! Stub agents for driving the game loop without external processes

use chess_core::{AgentError, AgentResult, EngineAgent, MoveSelector, Selection, TurnContext};

/// Plays `moves` in order, cycling, without looking at the position
pub struct ScriptedEngine {
    moves: Vec<&'static str>,
    next: usize,
    pub positions: Vec<String>,
    pub configured: Option<(u32, u8)>,
    pub new_games: u32,
}

impl ScriptedEngine {
    pub fn new(moves: &[&'static str]) -> Self {
        Self {
            moves: moves.to_vec(),
            next: 0,
            positions: Vec::new(),
            configured: None,
            new_games: 0,
        }
    }
}

impl EngineAgent for ScriptedEngine {
    fn name(&self) -> &str {
        "scripted-engine"
    }

    fn configure(&mut self, strength: u32, depth: u8) -> AgentResult<()> {
        self.configured = Some((strength, depth));
        Ok(())
    }

    fn set_position(&mut self, fen: &str) -> AgentResult<()> {
        self.positions.push(fen.to_string());
        Ok(())
    }

    fn best_move(&mut self) -> AgentResult<String> {
        let mv = self.moves[self.next % self.moves.len()];
        self.next += 1;
        Ok(mv.to_string())
    }

    fn new_game(&mut self) -> AgentResult<()> {
        self.new_games += 1;
        self.next = 0;
        Ok(())
    }
}

/// An engine whose process has gone away
pub struct DeadEngine;

impl EngineAgent for DeadEngine {
    fn name(&self) -> &str {
        "dead-engine"
    }

    fn configure(&mut self, _strength: u32, _depth: u8) -> AgentResult<()> {
        Ok(())
    }

    fn set_position(&mut self, _fen: &str) -> AgentResult<()> {
        Ok(())
    }

    fn best_move(&mut self) -> AgentResult<String> {
        Err(AgentError::Unavailable("engine closed its output".to_string()))
    }
}

/// An engine that answers, but with nothing usable
pub struct GarbledEngine;

impl EngineAgent for GarbledEngine {
    fn name(&self) -> &str {
        "garbled-engine"
    }

    fn configure(&mut self, _strength: u32, _depth: u8) -> AgentResult<()> {
        Ok(())
    }

    fn set_position(&mut self, _fen: &str) -> AgentResult<()> {
        Ok(())
    }

    fn best_move(&mut self) -> AgentResult<String> {
        Err(AgentError::Protocol("malformed reply \"bestmove\"".to_string()))
    }
}

/// Model side that plays `moves` in order, cycling, and trusts them blindly
pub struct ScriptedSelector {
    moves: Vec<&'static str>,
    next: usize,
    pub contexts: Vec<(usize, Vec<String>)>,
}

impl ScriptedSelector {
    pub fn new(moves: &[&'static str]) -> Self {
        Self {
            moves: moves.to_vec(),
            next: 0,
            contexts: Vec::new(),
        }
    }
}

impl MoveSelector for ScriptedSelector {
    fn name(&self) -> &str {
        "scripted-model"
    }

    fn select_move(&mut self, ctx: &TurnContext<'_>) -> Selection {
        self.contexts.push((ctx.ply, ctx.history.to_vec()));
        let mv = self.moves[self.next % self.moves.len()];
        self.next += 1;
        Selection {
            mv: mv.to_string(),
            attempts: 1,
            fallback: false,
        }
    }

    fn new_game(&mut self) {
        self.next = 0;
    }
}
