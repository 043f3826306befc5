use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;
use crate::engine::TurnTicket;
use crate::time_ctrl::{Countdown, ScoreDecay};

/// Фаза игры для внешнего кода (без внутренних данных состояния).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum GamePhase {
    WaitForPlayers,
    Start,
    Search,
    Selection,
    GameOver,
}

impl fmt::Display for GamePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GamePhase::WaitForPlayers => "WaitForPlayers",
            GamePhase::Start => "Start",
            GamePhase::Search => "Search",
            GamePhase::Selection => "Selection",
            GamePhase::GameOver => "GameOver",
        };
        f.write_str(name)
    }
}

/// Лобби: кто нажал "join".
#[derive(Debug, Default)]
pub struct WaitForPlayers {
    pub joined: Vec<PlayerId>,
}

/// Раздача стартовых карт.
#[derive(Debug)]
pub struct StartPhase {
    pub participants: Vec<PlayerId>,
}

/// Все ищут сет; стоимость сета может убывать.
#[derive(Debug)]
pub struct Search {
    pub participants: Vec<PlayerId>,
    pub decay: Option<ScoreDecay>,
}

impl Search {
    /// Текущая стоимость сета (`max_points`, если убывание выключено).
    pub fn points(&self, max_points: i64) -> i64 {
        self.decay.as_ref().map_or(max_points, ScoreDecay::points)
    }
}

/// Игрок заявил сет и выбирает карты под отсчёт.
#[derive(Debug)]
pub struct Selection {
    pub participants: Vec<PlayerId>,
    pub player: PlayerId,
    /// Стоимость сета на момент заявки.
    pub points: i64,
    pub countdown: Countdown,
    pub ticket: TurnTicket,
}

/// Конец раунда: победитель определён, ждём "restart".
#[derive(Debug)]
pub struct GameOverPhase {
    pub participants: Vec<PlayerId>,
    pub winner: Option<PlayerId>,
}

/// Активное состояние игры. Одновременно ровно одно.
#[derive(Debug)]
pub enum GameState {
    WaitForPlayers(WaitForPlayers),
    Start(StartPhase),
    Search(Search),
    Selection(Selection),
    GameOver(GameOverPhase),
}

impl Default for GameState {
    fn default() -> Self {
        GameState::WaitForPlayers(WaitForPlayers::default())
    }
}

impl GameState {
    pub fn phase(&self) -> GamePhase {
        match self {
            GameState::WaitForPlayers(_) => GamePhase::WaitForPlayers,
            GameState::Start(_) => GamePhase::Start,
            GameState::Search(_) => GamePhase::Search,
            GameState::Selection(_) => GamePhase::Selection,
            GameState::GameOver(_) => GamePhase::GameOver,
        }
    }

    /// Участники текущего раунда (в лобби - те, кто уже нажал "join").
    pub fn participants(&self) -> &[PlayerId] {
        match self {
            GameState::WaitForPlayers(s) => &s.joined,
            GameState::Start(s) => &s.participants,
            GameState::Search(s) => &s.participants,
            GameState::Selection(s) => &s.participants,
            GameState::GameOver(s) => &s.participants,
        }
    }

    /// Освободить ресурсы состояния перед переходом: остановить таймеры.
    pub fn terminate(&mut self) {
        match self {
            GameState::Search(search) => {
                if let Some(decay) = search.decay.as_mut() {
                    decay.cancel();
                }
            }
            GameState::Selection(selection) => selection.countdown.cancel(),
            GameState::WaitForPlayers(_) | GameState::Start(_) | GameState::GameOver(_) => {}
        }
    }
}
