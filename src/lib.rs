//! Движок карточной игры Setara (вариант игры "Set").
//!
//! Слои:
//! - `domain` - карты, колода, стол, игроки, сложность;
//! - `eval` - комбинаторика и правила сета;
//! - `engine` - раунд, протокол хода, история раунда;
//! - `time_ctrl` - отсчёт на выбор и убывание стоимости сета;
//! - `lobby` - игровой автомат верхнего уровня;
//! - `infra` - RNG, headless-соавторы, конфиг;
//! - `api` - команды, запросы и DTO для фронта.

pub mod api;
pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod lobby;
pub mod time_ctrl;
