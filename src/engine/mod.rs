//! Движок раунда Setara: стол, выбор карт, протокол хода.
//!
//! Высокоуровневый объект: `Round`
//! Основные операции:
//!   - `start` – сдать стартовые карты (и докладывать, пока нет сета)
//!   - `wait_for_turn_complete` – открыть ход, вернуть `TurnTicket`
//!   - `click_card` – выбрать/снять карту, на K-й карте оценить сет
//!   - `cancel_turn` – отменить ход (например, по истечении таймера)
//!
//! Всё внешнее (отрисовка, звук, ожидание кадров, RNG) приходит через `Collaborators`.

pub mod errors;
pub mod round;
pub mod round_history;
pub mod turn;

pub use errors::RoundError;
pub use round::{ClickOutcome, Round};
pub use round_history::{RoundEvent, RoundEventKind, RoundHistory};
pub use turn::{Turn, TurnSlot, TurnTicket};

use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::table::CardHandle;

/// RNG интерфейс для движка.
/// Реализации лежат в infra (обёртки над `rand`).
pub trait RandomSource {
    /// Случайный индекс в `[0, bound)`.
    fn next_index(&mut self, bound: usize) -> usize;

    /// Случайное число в `[lo, hi)`; при `hi <= lo` возвращает `lo`.
    fn next_in_range(&mut self, lo: u32, hi: u32) -> u32;
}

/// Именованные звуковые события.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Sound {
    Appearance,
    Fly,
    Join,
    Docked,
    Click,
    Select,
    PointDecay,
    Countdown,
    Success,
    Failure,
    Cancel,
    Reject,
    GameOver,
}

/// Пометки, которые движок ставит/снимает на отрисованных картах.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum CardMarker {
    Selected,
    Invalid,
    Hint,
    Appearing,
    Solved,
}

/// Отрисовка карт.
pub trait CardRenderer {
    fn render(&mut self, card: &Card) -> CardHandle;
    /// Пустое место, которое держит раскладку, пока найденный сет улетает.
    fn render_placeholder(&mut self) -> CardHandle;
    fn set_marker(&mut self, handle: CardHandle, marker: CardMarker, on: bool);
    fn discard(&mut self, handle: CardHandle);
}

/// Проигрывание звуков (fire-and-forget).
pub trait SoundSink {
    fn play(&mut self, sound: Sound);
}

/// Точки приостановки для визуального темпа.
///
/// Каждый вызов возвращается, когда условие выполнено; корректность правил
/// от них не зависит.
pub trait FramePacer {
    fn wait_frame(&mut self);
    fn wait_frames(&mut self, frames: u32);
    fn wait_for_animation(&mut self, handle: CardHandle);
}

/// Все внешние соавторы движка, передаются явно.
pub struct Collaborators {
    pub renderer: Box<dyn CardRenderer>,
    pub sound: Box<dyn SoundSink>,
    pub pacer: Box<dyn FramePacer>,
    pub rng: Box<dyn RandomSource>,
}

impl Collaborators {
    pub fn new(
        renderer: Box<dyn CardRenderer>,
        sound: Box<dyn SoundSink>,
        pacer: Box<dyn FramePacer>,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        Self {
            renderer,
            sound,
            pacer,
            rng,
        }
    }

    pub fn play(&mut self, sound: Sound) {
        self.sound.play(sound);
    }
}
