//! Игровой автомат верхнего уровня (лобби → старт → поиск → выбор → конец игры).
//!
//! Одно активное состояние за раз; переход - через `Game::switch`, который
//! сначала завершает старое состояние (таймеры), потом входит в новое.

pub mod errors;
pub mod game;
pub mod states;

pub use errors::GameError;
pub use game::{Game, GameContext};
pub use states::{GamePhase, GameOverPhase, GameState, Search, Selection, StartPhase, WaitForPlayers};
