use thiserror::Error;

use crate::domain::PlayerId;
use crate::engine::RoundError;
use crate::infra::config::ConfigError;

/// Ошибки игрового автомата.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("Игрок {0} не найден")]
    UnknownPlayer(PlayerId),

    #[error("Игре нужен хотя бы один игрок")]
    NoPlayers,

    #[error(transparent)]
    Round(#[from] RoundError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}
