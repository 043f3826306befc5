use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Признак карты. Порядок индексов - контракт: по нему строятся ключи
/// сериализации и отображение.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Feature {
    Count = 0,
    Shape = 1,
    Shading = 2,
    Color = 3,
}

impl Feature {
    pub const ALL: [Feature; 4] = [Feature::Count, Feature::Shape, Feature::Shading, Feature::Color];

    pub const fn index(self) -> usize {
        self as usize
    }
}

/// Карта Setara: упорядоченный вектор индексов вариаций, по одному на признак.
///
/// У карты нет собственной идентичности кроме значений признаков:
/// две карты с одинаковым вектором взаимозаменяемы.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub struct Card {
    indices: Vec<u8>,
}

impl Card {
    pub fn new(indices: Vec<u8>) -> Self {
        Self { indices }
    }

    /// Построить карту из комбинации (индексы в `usize`).
    ///
    /// Индексы больше 255 в карту не помещаются: для непроверенных данных
    /// есть `try_from_combination`.
    pub fn from_combination(combination: &[usize]) -> Self {
        debug_assert!(
            combination.iter().all(|&i| i <= usize::from(u8::MAX)),
            "индекс вариации не помещается в u8: {combination:?}"
        );
        Self {
            indices: combination
                .iter()
                .map(|&i| u8::try_from(i).unwrap_or(u8::MAX))
                .collect(),
        }
    }

    /// Как `from_combination`, но `None`, если какой-то индекс больше 255.
    pub fn try_from_combination(combination: &[usize]) -> Option<Self> {
        let indices = combination
            .iter()
            .map(|&i| u8::try_from(i).ok())
            .collect::<Option<Vec<u8>>>()?;
        Some(Self { indices })
    }

    /// Индекс вариации для признака с номером `feature_index`.
    ///
    /// Паникует при выходе за число признаков - это ошибка вызывающего кода.
    pub fn index_at(&self, feature_index: usize) -> usize {
        self.indices[feature_index] as usize
    }

    pub fn feature(&self, feature: Feature) -> usize {
        self.index_at(feature.index())
    }

    pub fn num_features(&self) -> usize {
        self.indices.len()
    }

    pub fn indices(&self) -> &[u8] {
        &self.indices
    }

    /// Ключ карты вида `0,1,2,0` (используется слоем отображения).
    pub fn serialize(&self) -> String {
        self.indices
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Card {
    /// Формат вида `Card(0 1 2 0)`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .indices
            .iter()
            .map(|i| i.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "Card({joined})")
    }
}

/// Парсинг ключа вида "0,1,2,0".
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Err("Card key must not be empty".into());
        }
        let indices = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u8>()
                    .map_err(|_| format!("Invalid variation index: {part}"))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Card { indices })
    }
}
