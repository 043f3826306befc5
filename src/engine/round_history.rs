use serde::{Deserialize, Serialize};

use crate::domain::card::Card;

/// Тип события в раунде.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundEventKind {
    /// Раунд начался.
    RoundStarted {
        deck_size: usize,
        num_variations: usize,
    },

    /// Карты выложены на стол.
    CardsDealt { cards: Vec<Card> },

    /// Найден сет, карты убраны со стола.
    SetFound { cards: Vec<Card> },

    /// Выбранные карты не образуют сет.
    WrongClaim { cards: Vec<Card> },

    /// Ход отменён снаружи (например, вышло время).
    TurnCancelled,

    /// Подсказка.
    HintShown { cards: Vec<Card> },

    /// Сетов больше нет, а колода кончилась.
    GameOver { cards_left: usize, on_table: usize },
}

/// Событие в раунде с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundEvent {
    pub index: u32,
    pub kind: RoundEventKind,
}

/// Полная история раунда.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RoundHistory {
    pub events: Vec<RoundEvent>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: RoundEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(RoundEvent { index: idx, kind });
    }

    /// Сколько сетов найдено за раунд.
    pub fn sets_found(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, RoundEventKind::SetFound { .. }))
            .count()
    }
}
