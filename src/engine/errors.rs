use thiserror::Error;

use crate::domain::deck::DeckError;

/// Ошибки раунда. Все они - нарушение контракта вызывающей стороной.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RoundError {
    #[error("Раунд уже запущен")]
    AlreadyStarted,

    #[error("Раунд ещё не запущен")]
    NotStarted,

    #[error("Уже есть незавершённый ход")]
    TurnOutstanding,

    #[error("Раунд уже завершён")]
    Terminated,

    #[error(transparent)]
    Deck(#[from] DeckError),
}
