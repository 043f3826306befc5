// tests/api_tests.rs
//
// Внешний слой: команды, снимок игры для фронта, загрузка конфигурации.

use setara_engine::api::{execute, game_view, parse_command, ApiError, Command, CommandResult};
use setara_engine::domain::difficulty::Difficulty;
use setara_engine::domain::player::Player;
use setara_engine::engine::ClickOutcome;
use setara_engine::infra::{headless, load_config_file, load_config_str, ConfigError, GameConfig};
use setara_engine::lobby::{Game, GamePhase};
use setara_engine::time_ctrl::ScoringRules;

fn new_game(config: GameConfig, num_players: usize) -> Game {
    let (collaborators, _probe) = headless(5);
    let players = (0..num_players)
        .map(|id| Player::new(id, format!("p{id}")))
        .collect();
    Game::new(config, collaborators, players).unwrap()
}

//
// commands.rs
//
#[test]
fn commands_parse_from_json() {
    assert_eq!(
        parse_command(r#"{"PlayerAction":{"player":0}}"#).unwrap(),
        Command::PlayerAction { player: 0 }
    );
    assert_eq!(parse_command(r#""MainAction""#).unwrap(), Command::MainAction);
    assert_eq!(
        parse_command(r#"{"SelectDifficulty":{"difficulty":"Expert"}}"#).unwrap(),
        Command::SelectDifficulty {
            difficulty: Difficulty::Expert
        }
    );
    assert_eq!(
        parse_command(r#"{"AdvanceTime":{"millis":1500}}"#).unwrap(),
        Command::AdvanceTime { millis: 1500 }
    );

    assert!(matches!(
        parse_command("{not json"),
        Err(ApiError::BadRequest(_))
    ));
}

#[test]
fn execute_drives_a_full_claim() {
    let mut game = new_game(GameConfig::instant(), 2);

    execute(&mut game, Command::PlayerAction { player: 0 }).unwrap();
    execute(&mut game, Command::MainAction).unwrap();
    assert_eq!(game.phase(), GamePhase::Search);

    execute(&mut game, Command::PlayerAction { player: 0 }).unwrap();
    let set = game.round().unwrap().find_sets()[0].clone();

    let mut last = CommandResult::Done;
    for card in set {
        last = execute(&mut game, Command::ClickCard { card }).unwrap();
    }
    assert_eq!(
        last,
        CommandResult::Click(ClickOutcome::Evaluated {
            is_set: true,
            game_over: false
        })
    );
    assert_eq!(game.player(0).unwrap().score, 1000);
}

#[test]
fn execute_maps_unknown_player() {
    let mut game = new_game(GameConfig::instant(), 2);
    let err = execute(&mut game, Command::PlayerAction { player: 5 }).unwrap_err();
    assert_eq!(err, ApiError::UnknownPlayer(5));
}

#[test]
fn show_hint_command_returns_cards() {
    let mut game = new_game(GameConfig::instant(), 1);
    assert_eq!(
        execute(&mut game, Command::ShowHint).unwrap(),
        CommandResult::Hint(None)
    );

    execute(&mut game, Command::PlayerAction { player: 0 }).unwrap();
    execute(&mut game, Command::MainAction).unwrap();
    match execute(&mut game, Command::ShowHint).unwrap() {
        CommandResult::Hint(Some(cards)) => assert_eq!(cards.len(), 3),
        other => panic!("unexpected result: {other:?}"),
    }
}

//
// queries.rs
//
#[test]
fn game_view_describes_the_table() {
    let mut game = new_game(GameConfig::instant(), 3);
    let lobby = game_view(&game);
    assert_eq!(lobby.phase, GamePhase::WaitForPlayers);
    assert_eq!(lobby.cards_left, 81);
    assert!(lobby.table.is_empty());
    assert_eq!(lobby.players.len(), 3);

    game.on_player_action(1).unwrap();
    game.on_main_action().unwrap();
    let view = game_view(&game);
    let round = game.round().unwrap();

    assert_eq!(view.phase, GamePhase::Search);
    assert_eq!(view.table.len(), round.cards_on_table());
    assert_eq!(view.cards_left, round.available());
    assert_eq!(view.sets_on_table, round.find_sets().len());
    assert_eq!(view.available_points, Some(1000));
    assert!(view.table.iter().all(|c| c.row.is_some_and(|r| r < 3)));
    assert!(view.table.iter().all(|c| !c.selected));
    assert_eq!(view.table[0].key, round.table().cards()[0].serialize());

    let json = serde_json::to_string(&view).unwrap();
    assert!(json.contains(r#""phase":"Search""#));
}

//
// infra/config.rs
//
#[test]
fn empty_config_is_standard() {
    assert_eq!(load_config_str("{}").unwrap(), GameConfig::standard());
}

#[test]
fn partial_config_keeps_defaults() {
    let config = load_config_str(
        r#"{ "scoring": { "max_points": 10, "min_points": 1 }, "timing": { "selection_secs_multi": 8 } }"#,
    )
    .unwrap();
    assert_eq!(config.scoring.max_points, 10);
    assert_eq!(config.scoring.min_points, 1);
    assert_eq!(config.scoring.decay_step, ScoringRules::standard().decay_step);
    assert_eq!(config.timing.selection_secs(2), 8);
    assert_eq!(config.timing.selection_secs(1), 30);
    assert_eq!(config.num_features, 4);
}

#[test]
fn bad_configs_are_rejected() {
    assert!(matches!(
        load_config_str(r#"{ "num_features": 0 }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        load_config_str(r#"{ "scoring": { "max_points": 1, "min_points": 5 } }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        load_config_str(r#"{ "scoring": { "decay_step": -100 } }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        load_config_str(r#"{ "scoring": { "decay_step": 0 } }"#),
        Err(ConfigError::Invalid(_))
    ));
    assert!(matches!(
        load_config_str(r#"{ "scoring": { "decay_interval_ms": 0 } }"#),
        Err(ConfigError::Invalid(_))
    ));
    // без убывания шаг не важен
    assert!(load_config_str(r#"{ "scoring": { "decay_enabled": false, "decay_step": 0 } }"#).is_ok());
    assert!(matches!(load_config_str("[1, 2"), Err(ConfigError::Json(_))));
    assert!(matches!(
        load_config_file("/definitely/not/here/setara.json"),
        Err(ConfigError::Io { .. })
    ));
}

#[test]
fn classic_scoring_gives_one_point() {
    let config = GameConfig {
        scoring: ScoringRules::classic(),
        ..GameConfig::instant()
    };
    let mut game = new_game(config, 1);
    execute(&mut game, Command::PlayerAction { player: 0 }).unwrap();
    execute(&mut game, Command::MainAction).unwrap();
    assert_eq!(game.available_points(), Some(1));

    execute(&mut game, Command::PlayerAction { player: 0 }).unwrap();
    execute(&mut game, Command::AutoSolve).unwrap();
    assert_eq!(game.player(0).unwrap().score, 1);

    // без убывания время ничего не меняет
    execute(&mut game, Command::AdvanceTime { millis: 120_000 }).unwrap();
    assert_eq!(game.available_points(), Some(1));
}
