use serde::{Deserialize, Serialize};

use crate::domain::difficulty::Difficulty;
use crate::domain::player::PlayerState;
use crate::domain::PlayerId;
use crate::lobby::GamePhase;

/// DTO карты на столе.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct CardDto {
    /// Ключ вида "0,1,2,0".
    pub key: String,
    pub indices: Vec<u8>,
    pub row: Option<usize>,
    pub selected: bool,
}

/// DTO игрока.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct PlayerDto {
    pub player_id: PlayerId,
    pub display_name: String,
    pub state: PlayerState,
    pub score: i64,
    pub cards_left: usize,
    pub available_points: i64,
    pub action_name: String,
    pub count_down: f32,
}

/// Снимок игры для фронта.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct GameViewDto {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    /// Карт в колоде (в лобби - размер колоды выбранной сложности).
    pub cards_left: usize,
    pub table: Vec<CardDto>,
    pub sets_on_table: usize,
    pub available_points: Option<i64>,
    pub selecting_player: Option<PlayerId>,
    pub winner: Option<PlayerId>,
    pub players: Vec<PlayerDto>,
}
