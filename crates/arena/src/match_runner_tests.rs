use super::*;
use crate::game::Termination;
use crate::results::read_replay;
use crate::test_support::{GarbledEngine, ScriptedEngine, ScriptedSelector};
use chess_core::GameOutcome;
use std::fs;

fn quiet(games: u32, max_plies: usize) -> MatchConfig {
    MatchConfig {
        games,
        max_plies,
        engine_elo: 1350,
        engine_depth: 6,
        verbose: false,
        ..MatchConfig::default()
    }
}

#[test]
fn test_engine_is_configured_once_and_reset_per_game() {
    let mut engine = ScriptedEngine::new(&["g1f3", "f3g1"]);
    let mut model = ScriptedSelector::new(&["g8f6", "f6g8"]);

    let summary = MatchRunner::new(quiet(3, 4))
        .run_match(&mut engine, &mut model)
        .unwrap();

    assert_eq!(engine.configured, Some((1350, 6)));
    assert_eq!(engine.new_games, 3);
    assert_eq!(summary.games.len(), 3);
    assert_eq!(summary.result.unfinished, 3);
    assert_eq!(summary.result.total_games(), 3);
    assert_eq!(summary.performance_rating(1350), None);
}

#[test]
fn test_unreadable_engine_replies_leave_the_match_running() {
    let mut engine = GarbledEngine;
    let mut model = ScriptedSelector::new(&["e7e5"]);

    let summary = MatchRunner::new(quiet(3, 100))
        .run_match(&mut engine, &mut model)
        .unwrap();

    assert_eq!(summary.games.len(), 3);
    assert_eq!(summary.result.unfinished, 3);
    assert!(summary
        .games
        .iter()
        .all(|g| matches!(g.termination, Termination::EngineIllegalMove { .. })));
}

#[test]
fn test_model_wins_are_counted_for_the_model() {
    let mut engine = ScriptedEngine::new(&["f2f3", "g2g4"]);
    let mut model = ScriptedSelector::new(&["e7e5", "d8h4"]);

    let summary = MatchRunner::new(quiet(2, 100))
        .run_match(&mut engine, &mut model)
        .unwrap();

    assert_eq!(summary.result.wins, 2);
    assert!(summary
        .games
        .iter()
        .all(|g| g.outcome == GameOutcome::BlackWins));
    let rating = summary.performance_rating(1350).unwrap();
    assert!(rating > 2000.0);
    assert_eq!(summary.fallback_count(), 0);
}

#[test]
fn test_games_are_logged_and_replays_written() {
    let dir = std::env::temp_dir().join(format!("arena-match-{}", std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    let config = MatchConfig {
        log_path: Some(dir.join("games.jsonl")),
        replay_dir: Some(dir.join("replays")),
        ..quiet(2, 4)
    };
    let mut engine = ScriptedEngine::new(&["g1f3", "f3g1"]);
    let mut model = ScriptedSelector::new(&["g8f6", "f6g8"]);

    MatchRunner::new(config)
        .run_match(&mut engine, &mut model)
        .unwrap();

    let entries = ResultsLog::new(dir.join("games.jsonl")).load().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].engine.name, "scripted-engine");
    assert_eq!(entries[0].engine.elo, 1350);
    assert_eq!(entries[0].model, "scripted-model");
    assert_eq!(entries[0].termination, "turn limit reached");
    assert_eq!(entries[0].plies, 4);

    let replay = read_replay(&dir.join("replays").join("game-2.fen")).unwrap();
    assert_eq!(replay.len(), 5);
    // The knights are back home, only the counters moved on
    assert_eq!(replay[0].split(' ').next(), replay[4].split(' ').next());
    assert_ne!(replay[0], replay[4]);
    fs::remove_dir_all(dir).unwrap();
}
