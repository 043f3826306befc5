use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::difficulty::Difficulty;
use crate::domain::player::PlayerCapability;
use crate::domain::PlayerId;
use crate::engine::ClickOutcome;
use crate::lobby::Game;

use super::errors::ApiError;

/// Команда верхнего уровня: всё, что фронт (или бот) может сделать с игрой.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum Command {
    /// Кнопка игрока: "join" в лобби, "Set!" во время поиска.
    PlayerAction { player: PlayerId },

    /// Главная кнопка: старт / рестарт.
    MainAction,

    /// Выбор сложности в лобби.
    SelectDifficulty { difficulty: Difficulty },

    /// Клик по карте на столе.
    ClickCard { card: Card },

    /// Клик мимо карт.
    ClickBackground,

    /// Подсветить следующий сет.
    ShowHint,

    /// Собрать сет за выбирающего игрока.
    AutoSolve,

    /// Протекание времени (драйвер таймеров).
    AdvanceTime { millis: u64 },
}

/// Результат выполнения команды.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum CommandResult {
    Done,
    Click(ClickOutcome),
    Hint(Option<Vec<Card>>),
}

/// Разобрать команду из JSON.
pub fn parse_command(json: &str) -> Result<Command, ApiError> {
    serde_json::from_str(json).map_err(|e| ApiError::BadRequest(e.to_string()))
}

/// Применить команду к игре.
pub fn execute<P: PlayerCapability>(
    game: &mut Game<P>,
    command: Command,
) -> Result<CommandResult, ApiError> {
    let result = match command {
        Command::PlayerAction { player } => {
            game.on_player_action(player)?;
            CommandResult::Done
        }
        Command::MainAction => {
            game.on_main_action()?;
            CommandResult::Done
        }
        Command::SelectDifficulty { difficulty } => {
            game.select_difficulty(difficulty);
            CommandResult::Done
        }
        Command::ClickCard { card } => CommandResult::Click(game.click_card(&card)?),
        Command::ClickBackground => {
            game.click_background();
            CommandResult::Done
        }
        Command::ShowHint => CommandResult::Hint(game.show_hint()),
        Command::AutoSolve => match game.auto_solve()? {
            Some(outcome) => CommandResult::Click(outcome),
            None => CommandResult::Done,
        },
        Command::AdvanceTime { millis } => {
            game.advance(millis)?;
            CommandResult::Done
        }
    };
    Ok(result)
}
