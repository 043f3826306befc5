use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::PlayerId;
use crate::lobby::GameError;

/// Ошибки внешнего API (то, что отдаём фронту / клиенту).
#[derive(Clone, Debug, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Такого игрока нет.
    #[error("unknown player {0}")]
    UnknownPlayer(PlayerId),

    /// Ошибка игрового автомата / раунда.
    #[error("game error: {0}")]
    GameError(String),
}

impl From<GameError> for ApiError {
    fn from(err: GameError) -> Self {
        match err {
            GameError::UnknownPlayer(id) => ApiError::UnknownPlayer(id),
            other => ApiError::GameError(other.to_string()),
        }
    }
}
