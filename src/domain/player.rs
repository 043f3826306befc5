use serde::{Deserialize, Serialize};

use crate::domain::PlayerId;

/// Состояние игрока с точки зрения отображения/взаимодействия.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PlayerState {
    /// Ждёт, нажмёт ли "join".
    WaitingToJoin,
    /// Нажал "join" и войдёт в следующий раунд.
    RequestingToJoin,
    /// Участвует в раунде, может заявить сет.
    Playing,
    /// Заявил сет и сейчас выбирает карты.
    Selecting,
    /// Скрыт (не участвует или ждёт, пока выбирает другой).
    Hiding,
    /// Победитель раунда.
    Winner,
}

/// Возможности игрока, которыми пользуется игровой автомат.
///
/// Реализация может рисовать кнопки, полоски и т.п. - движку это не важно.
pub trait PlayerCapability {
    fn set_state(&mut self, state: PlayerState);
    fn set_cards_left(&mut self, count: usize);
    fn set_available_points(&mut self, points: i64);
    fn set_action_name(&mut self, text: &str);
    /// Прогресс обратного отсчёта в диапазоне `[0, 1]`.
    fn set_count_down(&mut self, progress: f32);
    fn flash_count_down(&mut self);
    fn add_score(&mut self, delta: i64);
    fn score(&self) -> i64;
    /// Обнулить счёт между раундами.
    fn reset(&mut self);
}

/// Игрок без UI: просто запоминает всё, что ему сообщили.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub state: PlayerState,
    pub score: i64,
    pub cards_left: usize,
    pub available_points: i64,
    pub action_name: String,
    pub count_down: f32,
    /// Сколько раз мигал счётчик (по разу на каждую секунду отсчёта).
    pub count_down_flashes: u32,
}

impl Player {
    pub fn new(id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            state: PlayerState::WaitingToJoin,
            score: 0,
            cards_left: 0,
            available_points: 0,
            action_name: String::new(),
            count_down: 0.0,
            count_down_flashes: 0,
        }
    }
}

impl PlayerCapability for Player {
    fn set_state(&mut self, state: PlayerState) {
        self.state = state;
    }

    fn set_cards_left(&mut self, count: usize) {
        self.cards_left = count;
    }

    fn set_available_points(&mut self, points: i64) {
        self.available_points = points;
    }

    fn set_action_name(&mut self, text: &str) {
        self.action_name = text.to_string();
    }

    fn set_count_down(&mut self, progress: f32) {
        self.count_down = progress.clamp(0.0, 1.0);
    }

    fn flash_count_down(&mut self) {
        self.count_down_flashes += 1;
    }

    fn add_score(&mut self, delta: i64) {
        self.score += delta;
    }

    fn score(&self) -> i64 {
        self.score
    }

    fn reset(&mut self) {
        self.score = 0;
    }
}
