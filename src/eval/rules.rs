use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::eval::combinations::without_repetitions;

/// Правила сета: число признаков и число вариаций.
///
/// Размер сета равен `num_variations` (3 в обычном режиме, 4 в экспертном).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Rules {
    pub num_features: usize,
    pub num_variations: usize,
}

impl Default for Rules {
    fn default() -> Self {
        Self::new(4, 3)
    }
}

impl Rules {
    pub const fn new(num_features: usize, num_variations: usize) -> Self {
        Self {
            num_features,
            num_variations,
        }
    }

    /// Размер сета (сколько карт нужно выбрать).
    pub const fn set_size(&self) -> usize {
        self.num_variations
    }

    /// Сколько карт лежит на столе в начале раунда (например, 12).
    pub const fn opening_hand(&self) -> usize {
        self.num_features * self.num_variations
    }

    /// Является ли набор карт сетом.
    ///
    /// По каждому признаку значения должны быть либо все одинаковые,
    /// либо все разные. Набор не того размера - сразу `false`.
    pub fn is_set(&self, cards: &[Card]) -> bool {
        if cards.len() != self.num_variations {
            return false;
        }
        (0..self.num_features).all(|feature| {
            let variations: Vec<usize> = cards.iter().map(|card| card.index_at(feature)).collect();
            validate_feature(&variations)
        })
    }

    /// Все сеты среди `cards`, в лексикографическом порядке индексов.
    ///
    /// Полный перебор `C(|cards|, num_variations)` подмножеств - на столе 12–20 карт,
    /// так что это дёшево.
    pub fn find_sets(&self, cards: &[Card]) -> Vec<Vec<Card>> {
        without_repetitions(cards.len(), self.num_variations)
            .into_iter()
            .map(|combination| {
                combination
                    .into_iter()
                    .map(|index| cards[index].clone())
                    .collect::<Vec<_>>()
            })
            .filter(|candidate| self.is_set(candidate))
            .collect()
    }

    pub fn has_set(&self, cards: &[Card]) -> bool {
        !self.find_sets(cards).is_empty()
    }
}

/// Проверка одного признака через битовую маску.
///
/// `bits` - какие вариации встретились, `all` - по одному биту на карту.
///
/// ```text
/// X00 / X00 / X00 -> X00 = 0b001  ок (все одинаковые)
/// X00 / 0X0 / 00X -> XXX = 0b111  ок (все разные)
/// X00 / 0X0 / 0X0 -> XX0 = 0b011  нет
/// ```
fn validate_feature(variations: &[usize]) -> bool {
    let mut bits: u64 = 0;
    let mut all: u64 = 0;
    for (i, &variation) in variations.iter().enumerate() {
        bits |= 1 << variation;
        all |= 1 << i;
    }
    bits == all || bits.count_ones() == 1
}

#[cfg(test)]
mod tests {
    use super::validate_feature;

    #[test]
    fn feature_mask_accepts_same_and_distinct() {
        assert!(validate_feature(&[1, 1, 1]));
        assert!(validate_feature(&[2, 0, 1]));
        assert!(validate_feature(&[3, 1, 0, 2]));
    }

    #[test]
    fn feature_mask_rejects_mixed() {
        assert!(!validate_feature(&[0, 1, 1]));
        assert!(!validate_feature(&[2, 2, 0]));
        assert!(!validate_feature(&[0, 0, 1, 2]));
    }
}
