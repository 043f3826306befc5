use serde::{Deserialize, Serialize};

use crate::eval::rules::Rules;

/// Сложность: определяет число вариаций, а значит размер колоды и размер сета.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Difficulty {
    /// 3 вариации: колода 3^4 = 81, сет из 3 карт.
    #[default]
    Normal,
    /// 4 вариации: колода 4^4 = 256, сет из 4 карт.
    Expert,
}

impl Difficulty {
    pub const fn num_variations(self) -> usize {
        match self {
            Difficulty::Normal => 3,
            Difficulty::Expert => 4,
        }
    }

    pub const fn rules(self, num_features: usize) -> Rules {
        Rules::new(num_features, self.num_variations())
    }

    /// Сколько карт в колоде при данной сложности.
    pub fn deck_size(self, num_features: usize) -> usize {
        self.num_variations().pow(num_features as u32)
    }
}
