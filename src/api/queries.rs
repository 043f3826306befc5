use crate::domain::player::Player;
use crate::engine::Round;
use crate::lobby::Game;

use super::dto::{CardDto, GameViewDto, PlayerDto};

/// Карты на столе в порядке выкладки.
pub fn build_table_view(round: &Round) -> Vec<CardDto> {
    let table = round.table();
    table
        .entries()
        .iter()
        .map(|entry| CardDto {
            key: entry.card.serialize(),
            indices: entry.card.indices().to_vec(),
            row: table.row_of(&entry.card),
            selected: round.selection().contains(&entry.card),
        })
        .collect()
}

pub fn build_players_view(players: &[Player]) -> Vec<PlayerDto> {
    players
        .iter()
        .map(|p| PlayerDto {
            player_id: p.id,
            display_name: p.name.clone(),
            state: p.state,
            score: p.score,
            cards_left: p.cards_left,
            available_points: p.available_points,
            action_name: p.action_name.clone(),
            count_down: p.count_down,
        })
        .collect()
}

/// Полный снимок игры с headless-игроками.
pub fn game_view(game: &Game<Player>) -> GameViewDto {
    let round = game.round();
    GameViewDto {
        phase: game.phase(),
        difficulty: game.difficulty(),
        cards_left: round.map_or_else(|| game.context().deck_size(), Round::available),
        table: round.map(build_table_view).unwrap_or_default(),
        sets_on_table: round.map_or(0, |r| r.find_sets().len()),
        available_points: game.available_points(),
        selecting_player: game.selecting_player(),
        winner: game.winner(),
        players: build_players_view(game.players()),
    }
}
