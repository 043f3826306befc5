// tests/lobby_tests.rs
//
// Игровой автомат верхнего уровня:
// лобби -> старт -> поиск <-> выбор -> конец игры -> лобби.

use setara_engine::domain::card::Card;
use setara_engine::domain::difficulty::Difficulty;
use setara_engine::domain::player::{Player, PlayerState};
use setara_engine::engine::{CardMarker, ClickOutcome, Sound};
use setara_engine::eval::without_repetitions;
use setara_engine::infra::{headless, GameConfig, HeadlessProbe};
use setara_engine::lobby::{Game, GameError, GamePhase};

fn new_game(num_players: usize) -> (Game, HeadlessProbe) {
    let (collaborators, probe) = headless(21);
    let players = (0..num_players)
        .map(|id| Player::new(id, format!("p{id}")))
        .collect();
    let game = Game::new(GameConfig::instant(), collaborators, players).unwrap();
    (game, probe)
}

/// Игра в фазе поиска с заданными участниками.
fn game_in_search(num_players: usize, participants: &[usize]) -> (Game, HeadlessProbe) {
    let (mut game, probe) = new_game(num_players);
    for &p in participants {
        game.on_player_action(p).unwrap();
    }
    game.on_main_action().unwrap();
    assert_eq!(game.phase(), GamePhase::Search);
    (game, probe)
}

fn first_set(game: &Game) -> Vec<Card> {
    game.round().unwrap().find_sets()[0].clone()
}

fn first_non_set(game: &Game) -> Vec<Card> {
    let round = game.round().unwrap();
    let cards = round.table().cards();
    without_repetitions(cards.len(), 3)
        .into_iter()
        .map(|combo| combo.into_iter().map(|i| cards[i].clone()).collect::<Vec<_>>())
        .find(|candidate| !round.rules().is_set(candidate))
        .unwrap()
}

fn click_all(game: &mut Game, cards: &[Card]) -> ClickOutcome {
    let mut last = ClickOutcome::Ignored;
    for card in cards {
        last = game.click_card(card).unwrap();
    }
    last
}

//
// лобби
//
#[test]
fn new_game_starts_in_lobby() {
    let (game, _probe) = new_game(3);
    assert_eq!(game.phase(), GamePhase::WaitForPlayers);
    assert!(game.round().is_none());
    for player in game.players() {
        assert_eq!(player.state, PlayerState::WaitingToJoin);
        assert_eq!(player.action_name, "join");
        assert_eq!(player.cards_left, 81);
    }
}

#[test]
fn game_without_players_is_an_error() {
    let (collaborators, _probe) = headless(1);
    let result = Game::<Player>::new(GameConfig::instant(), collaborators, Vec::new());
    assert!(matches!(result, Err(GameError::NoPlayers)));
}

#[test]
fn invalid_config_is_rejected() {
    let (collaborators, _probe) = headless(1);
    let mut config = GameConfig::instant();
    config.num_features = 0;
    let result = Game::new(config, collaborators, vec![Player::new(0, "solo")]);
    assert!(matches!(result, Err(GameError::Config(_))));
}

#[test]
fn join_toggles() {
    let (mut game, probe) = new_game(2);

    game.on_player_action(1).unwrap();
    assert_eq!(game.player(1).unwrap().state, PlayerState::RequestingToJoin);
    assert_eq!(game.participants(), &[1]);
    assert_eq!(probe.count(Sound::Join), 1);

    game.on_player_action(1).unwrap();
    assert_eq!(game.player(1).unwrap().state, PlayerState::WaitingToJoin);
    assert!(game.participants().is_empty());
    assert_eq!(probe.count(Sound::Cancel), 1);
}

#[test]
fn unknown_player_is_an_error() {
    let (mut game, _probe) = new_game(2);
    assert!(matches!(
        game.on_player_action(9),
        Err(GameError::UnknownPlayer(9))
    ));
}

#[test]
fn start_without_joined_players_stays_in_lobby() {
    let (mut game, probe) = new_game(2);
    game.on_main_action().unwrap();
    assert_eq!(game.phase(), GamePhase::WaitForPlayers);
    assert_eq!(probe.count(Sound::Click), 1);
}

#[test]
fn difficulty_changes_cards_left() {
    let (mut game, _probe) = new_game(2);
    game.select_difficulty(Difficulty::Expert);
    assert_eq!(game.difficulty(), Difficulty::Expert);
    for player in game.players() {
        assert_eq!(player.cards_left, 256);
    }

    game.select_difficulty(Difficulty::Normal);
    assert_eq!(game.player(0).unwrap().cards_left, 81);
}

#[test]
fn expert_game_uses_four_card_sets() {
    let (mut game, _probe) = new_game(1);
    game.select_difficulty(Difficulty::Expert);
    game.on_player_action(0).unwrap();
    game.on_main_action().unwrap();

    let round = game.round().unwrap();
    assert_eq!(round.rules().set_size(), 4);
    assert_eq!(round.cards_on_table() + round.available(), 256);

    // в игре сложность не меняется
    game.select_difficulty(Difficulty::Normal);
    assert_eq!(game.difficulty(), Difficulty::Expert);
}

//
// старт / поиск
//
#[test]
fn start_moves_to_search_with_sorted_participants() {
    let (game, _probe) = game_in_search(3, &[2, 0]);

    assert_eq!(game.participants(), &[0, 2]);
    assert_eq!(game.available_points(), Some(1000));

    let round = game.round().unwrap();
    assert!(round.has_sets());
    for &id in &[0, 2] {
        let player = game.player(id).unwrap();
        assert_eq!(player.state, PlayerState::Playing);
        assert_eq!(player.action_name, "Set!");
        assert_eq!(player.available_points, 1000);
        assert_eq!(player.cards_left, round.available());
    }
    assert_eq!(game.player(1).unwrap().state, PlayerState::Hiding);
}

#[test]
fn clicks_during_search_are_rejected() {
    let (mut game, probe) = game_in_search(1, &[0]);
    let card = game.round().unwrap().table().cards()[0].clone();

    assert_eq!(game.click_card(&card).unwrap(), ClickOutcome::Rejected);
    assert_eq!(probe.count(Sound::Reject), 1);
    assert_eq!(game.phase(), GamePhase::Search);
}

#[test]
fn non_participant_cannot_claim() {
    let (mut game, _probe) = game_in_search(3, &[0, 2]);
    game.on_player_action(1).unwrap();
    assert_eq!(game.phase(), GamePhase::Search);
}

#[test]
fn decay_lowers_available_points() {
    let (mut game, probe) = game_in_search(2, &[0, 1]);

    game.advance(20_000).unwrap();
    assert_eq!(game.available_points(), Some(800));
    assert_eq!(game.player(1).unwrap().available_points, 800);
    assert_eq!(probe.count(Sound::PointDecay), 2);
}

#[test]
fn decay_floor_shows_a_hint() {
    let (mut game, probe) = game_in_search(2, &[0, 1]);
    let hinted = first_set(&game)[0].clone();

    game.advance(90_000).unwrap();
    assert_eq!(game.available_points(), Some(100));

    let handle = game.round().unwrap().table().handle_of(&hinted).unwrap();
    assert!(probe.has_marker(handle, CardMarker::Hint));
}

//
// выбор
//
#[test]
fn claim_moves_to_selection() {
    let (mut game, probe) = game_in_search(2, &[0, 1]);
    game.on_player_action(1).unwrap();

    assert_eq!(game.phase(), GamePhase::Selection);
    assert_eq!(game.selecting_player(), Some(1));
    let selecting = game.player(1).unwrap();
    assert_eq!(selecting.state, PlayerState::Selecting);
    assert_eq!(selecting.count_down, 1.0);
    assert_eq!(game.player(0).unwrap().state, PlayerState::Hiding);
    assert_eq!(probe.count(Sound::Select), 1);

    // второй игрок не может перебить заявку
    game.on_player_action(0).unwrap();
    assert_eq!(game.selecting_player(), Some(1));
}

#[test]
fn valid_set_awards_current_points() {
    let (mut game, _probe) = game_in_search(2, &[0, 1]);
    game.advance(20_000).unwrap();
    game.on_player_action(0).unwrap();
    assert_eq!(game.available_points(), Some(800));

    let set = first_set(&game);
    let outcome = click_all(&mut game, &set);
    assert_eq!(
        outcome,
        ClickOutcome::Evaluated {
            is_set: true,
            game_over: false
        }
    );

    assert_eq!(game.player(0).unwrap().score, 800);
    assert_eq!(game.phase(), GamePhase::Search);
    assert_eq!(game.player(0).unwrap().state, PlayerState::Playing);
    assert_eq!(game.player(1).unwrap().state, PlayerState::Playing);

    // новый поиск снова начинается с максимума
    assert_eq!(game.available_points(), Some(1000));
}

#[test]
fn invalid_claim_deducts_points() {
    let (mut game, _probe) = game_in_search(2, &[0, 1]);
    game.on_player_action(1).unwrap();

    let wrong = first_non_set(&game);
    click_all(&mut game, &wrong);

    assert_eq!(game.player(1).unwrap().score, -1000);
    assert_eq!(game.phase(), GamePhase::Search);
}

#[test]
fn expired_selection_deducts_points() {
    let (mut game, probe) = game_in_search(2, &[0, 1]);
    game.on_player_action(0).unwrap();

    for _ in 0..4 {
        game.advance(1_000).unwrap();
        assert_eq!(game.phase(), GamePhase::Selection);
    }
    assert_eq!(probe.count(Sound::Countdown), 4);
    assert_eq!(game.player(0).unwrap().count_down_flashes, 4);
    let progress = game.player(0).unwrap().count_down;
    assert!((progress - 0.2).abs() < 1e-6);

    game.advance(1_000).unwrap();
    assert_eq!(game.phase(), GamePhase::Search);
    assert_eq!(game.player(0).unwrap().score, -1000);
    assert_eq!(probe.count(Sound::Cancel), 1);
    assert!(!game.round().unwrap().has_turn());
}

#[test]
fn solo_player_gets_thirty_seconds() {
    let (mut game, _probe) = game_in_search(1, &[0]);
    game.on_player_action(0).unwrap();

    game.advance(29_000).unwrap();
    assert_eq!(game.phase(), GamePhase::Selection);
    game.advance(1_000).unwrap();
    assert_eq!(game.phase(), GamePhase::Search);
}

#[test]
fn hint_cycles_only_while_playing() {
    let (mut game, _probe) = new_game(1);
    assert!(game.show_hint().is_none());

    game.on_player_action(0).unwrap();
    game.on_main_action().unwrap();
    let sets = game.round().unwrap().find_sets();
    assert_eq!(game.show_hint(), Some(sets[0].clone()));
}

//
// конец игры
//
#[test]
fn solo_game_runs_to_game_over_and_restarts() {
    let (mut game, probe) = game_in_search(1, &[0]);

    for _ in 0..40 {
        if game.phase() == GamePhase::GameOver {
            break;
        }
        game.on_player_action(0).unwrap();
        game.auto_solve().unwrap();
    }

    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.winner(), Some(0));
    assert_eq!(game.player(0).unwrap().state, PlayerState::Winner);
    assert_eq!(probe.count(Sound::GameOver), 1);

    let sets_found = game.round().unwrap().history().sets_found() as i64;
    assert_eq!(game.player(0).unwrap().score, sets_found * 1000);

    game.on_main_action().unwrap();
    assert_eq!(game.phase(), GamePhase::WaitForPlayers);
    assert!(game.round().is_none());
    assert_eq!(game.player(0).unwrap().score, 0);
    assert_eq!(game.player(0).unwrap().state, PlayerState::WaitingToJoin);
}

#[test]
fn winner_is_highest_scoring_participant() {
    let (mut game, _probe) = game_in_search(3, &[0, 1]);

    // игрок 0 ошибается, игрок 1 собирает всё остальное
    game.on_player_action(0).unwrap();
    let wrong = first_non_set(&game);
    click_all(&mut game, &wrong);

    for _ in 0..40 {
        if game.phase() == GamePhase::GameOver {
            break;
        }
        game.on_player_action(1).unwrap();
        game.auto_solve().unwrap();
    }

    assert_eq!(game.phase(), GamePhase::GameOver);
    assert_eq!(game.winner(), Some(1));
    assert_eq!(game.player(1).unwrap().state, PlayerState::Winner);
    assert_eq!(game.player(2).unwrap().state, PlayerState::Hiding);
}
