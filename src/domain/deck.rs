use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::Card;
use crate::engine::RandomSource;
use crate::eval::combinations::with_repetitions;

/// Ошибки колоды.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeckError {
    #[error("Нельзя взять {requested} карт: в колоде осталось {available}")]
    OutOfRange { requested: usize, available: usize },
}

/// Колода: все `V^F` различных карт + курсор выдачи.
///
/// Инвариант: `0 <= position <= cards.len()`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
    position: usize,
}

impl Deck {
    /// Полная колода для `num_features` признаков по `num_variations` вариаций,
    /// в порядке перечисления комбинаций с повторениями (ещё не перемешана).
    pub fn create(num_features: usize, num_variations: usize) -> Self {
        let cards = with_repetitions(num_variations, num_features)
            .iter()
            .map(|combination| Card::from_combination(combination))
            .collect();
        Deck { cards, position: 0 }
    }

    /// Перемешивание за один проход: для каждой позиции `i` берём случайный индекс
    /// из ВСЕГО диапазона `[0, len)` и меняем местами.
    ///
    /// Это не классический Фишер–Йейтс: распределение слегка смещено.
    /// От этого порядка зависят раздачи для заданного seed.
    pub fn shuffle(&mut self, rng: &mut dyn RandomSource) {
        let len = self.cards.len();
        for i in 0..len {
            let j = rng.next_index(len);
            self.cards.swap(i, j);
        }
    }

    /// Взять `count` карт начиная с курсора и сдвинуть курсор.
    pub fn take(&mut self, count: usize) -> Result<Vec<Card>, DeckError> {
        if self.position + count > self.cards.len() {
            return Err(DeckError::OutOfRange {
                requested: count,
                available: self.available(),
            });
        }
        let taken = self.cards[self.position..self.position + count].to_vec();
        self.position += count;
        Ok(taken)
    }

    /// Сколько карт ещё не выдано.
    pub fn available(&self) -> usize {
        self.cards.len() - self.position
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}
