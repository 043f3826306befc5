//! Обратный отсчёт на выбор карт после заявки "Set!".

use serde::{Deserialize, Serialize};

/// Что произошло за очередной шаг времени.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum CountdownEvent {
    /// Сколько времени осталось, доля в `[0, 1]`.
    Progress(f32),
    /// Прошла очередная целая секунда (номер с нуля).
    Second(u32),
    /// Время вышло.
    Expired,
}

/// Таймер выбора. Управляется снаружи через `advance`.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Countdown {
    total_ms: u64,
    elapsed_ms: u64,
    current_second: u32,
    running: bool,
}

impl Countdown {
    pub fn new(total_secs: u32) -> Self {
        Self {
            total_ms: u64::from(total_secs) * 1000,
            elapsed_ms: 0,
            current_second: 0,
            running: true,
        }
    }

    /// Симулируем протекание `delta_ms` миллисекунд.
    ///
    /// После `Expired` и после `cancel` больше никаких событий не будет.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<CountdownEvent> {
        let mut events = Vec::new();
        if !self.running {
            return events;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);

        if self.elapsed_ms < self.total_ms {
            while self.elapsed_ms >= u64::from(self.current_second + 1) * 1000 {
                events.push(CountdownEvent::Second(self.current_second));
                self.current_second += 1;
            }
            events.push(CountdownEvent::Progress(self.progress()));
        } else {
            self.running = false;
            events.push(CountdownEvent::Progress(0.0));
            events.push(CountdownEvent::Expired);
        }
        events
    }

    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_ms(&self) -> u64 {
        self.total_ms.saturating_sub(self.elapsed_ms)
    }

    /// Оставшаяся доля времени.
    pub fn progress(&self) -> f32 {
        if self.total_ms == 0 {
            return 0.0;
        }
        1.0 - self.elapsed_ms.min(self.total_ms) as f32 / self.total_ms as f32
    }
}
