//! Правила Setara и комбинаторика под ними.
//!
//! Основные функции:
//!   `Rules::is_set(cards) -> bool`
//!   `Rules::find_sets(table) -> Vec<Vec<Card>>`

pub mod combinations;
pub mod rules;

pub use combinations::{binomial, with_repetitions, without_repetitions};
pub use rules::Rules;
