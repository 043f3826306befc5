//! Доменная модель Setara: карты, колода, стол, игроки, сложность.

pub mod card;
pub mod deck;
pub mod difficulty;
pub mod player;
pub mod table;

/// Игрок адресуется своим местом (индексом) в списке игроков игры.
pub type PlayerId = usize;

pub use card::*;
pub use deck::*;
pub use difficulty::*;
pub use player::*;
pub use table::*;
