use super::*;

#[test]
fn test_empty_file_uses_defaults() {
    let config = ArenaConfig::parse("").unwrap();

    assert_eq!(config, ArenaConfig::default());
    assert_eq!(config.engine.elo, 1000);
    assert_eq!(config.engine.depth, 15);
    assert_eq!(config.model.base_url, "http://localhost:11434");
    assert_eq!(config.model.max_attempts, 3);
    assert_eq!(config.game.max_plies, 100);
    assert!(config.game.verbose);
    assert!(config.uci_engine().is_none());
}

#[test]
fn test_partial_sections_keep_other_defaults() {
    let config = ArenaConfig::parse(
        r#"
        [engine]
        path = "/usr/games/stockfish"
        elo = 1500

        [model]
        name = "llama3"
        seed = 42

        [game]
        games = 4
        log_path = "results/games.jsonl"
        "#,
    )
    .unwrap();

    assert_eq!(config.engine.elo, 1500);
    assert_eq!(config.engine.depth, 15);
    assert_eq!(config.model.name, "llama3");
    assert_eq!(config.model.temperature, 0.9);
    assert_eq!(config.game.games, 4);
    assert_eq!(config.game.replay_dir, None);

    let uci = config.uci_engine().unwrap();
    assert_eq!(uci.path, PathBuf::from("/usr/games/stockfish"));
    assert_eq!(uci.timeout, Duration::from_secs(30));

    let agent = config.model_agent();
    assert_eq!(agent.seed, Some(42));
    assert_eq!(agent.fallback_pause, Duration::from_secs(5));

    let matches = config.match_config();
    assert_eq!(matches.engine_elo, 1500);
    assert_eq!(matches.log_path, Some(PathBuf::from("results/games.jsonl")));
}

#[test]
fn test_unknown_types_are_rejected() {
    assert!(ArenaConfig::parse("[engine]\nelo = \"strong\"").is_err());
}

#[test]
fn test_missing_file_is_read_error() {
    let err = ArenaConfig::load(Path::new("/nonexistent/arena.toml")).unwrap_err();
    assert!(matches!(err, ConfigError::Read { .. }));
}

#[test]
fn test_validation() {
    assert!(ArenaConfig::default().validate().is_ok());

    let mut config = ArenaConfig::default();
    config.game.games = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));

    let mut config = ArenaConfig::default();
    config.model.temperature = 3.5;
    assert!(config.validate().is_err());

    let mut config = ArenaConfig::default();
    config.model.max_attempts = 0;
    assert!(config.validate().is_err());
}
