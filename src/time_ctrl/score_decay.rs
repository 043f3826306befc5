//! Убывание стоимости сета, пока игроки ищут.

use serde::{Deserialize, Serialize};

use super::ScoringRules;

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum DecayEvent {
    /// Стоимость упала до нового значения.
    Decayed(i64),
    /// Достигнут минимум - пора показать подсказку.
    FloorReached,
}

/// Тикер убывания очков.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScoreDecay {
    rules: ScoringRules,
    points: i64,
    accumulated_ms: u64,
    running: bool,
}

impl ScoreDecay {
    /// Стартуем с `max_points`. Если убывание выключено (или шаг не уменьшает
    /// очки) - тикер сразу стоит.
    pub fn new(rules: ScoringRules) -> Self {
        let running = rules.decay_enabled
            && rules.decay_step > 0
            && rules.decay_interval_ms > 0
            && rules.max_points > rules.min_points;
        Self {
            rules,
            points: rules.max_points,
            accumulated_ms: 0,
            running,
        }
    }

    pub fn advance(&mut self, delta_ms: u64) -> Vec<DecayEvent> {
        let mut events = Vec::new();
        if !self.running {
            return events;
        }
        self.accumulated_ms = self.accumulated_ms.saturating_add(delta_ms);
        while self.running && self.accumulated_ms >= self.rules.decay_interval_ms {
            self.accumulated_ms -= self.rules.decay_interval_ms;
            self.points = (self.points - self.rules.decay_step).max(self.rules.min_points);
            events.push(DecayEvent::Decayed(self.points));
            if self.points <= self.rules.min_points {
                self.running = false;
                events.push(DecayEvent::FloorReached);
            }
        }
        events
    }

    pub fn cancel(&mut self) {
        self.running = false;
    }

    pub fn points(&self) -> i64 {
        self.points
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}
