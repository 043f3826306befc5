//! Контроль времени: отсчёт на выбор карт и убывание стоимости сета.
//!
//! Здесь собираем:
//! - правила (`TimeRules`, `PacingRules`, `ScoringRules`);
//! - таймер выбора (`Countdown`);
//! - тикер очков (`ScoreDecay`).
//!
//! Реального времени тут нет: всё двигается вызовами `advance(delta_ms)`.

pub mod countdown;
pub mod score_decay;
pub mod time_rules;

pub use countdown::{Countdown, CountdownEvent};
pub use score_decay::{DecayEvent, ScoreDecay};
pub use time_rules::{FrameRange, PacingRules, ScoringRules, TimeProfile, TimeRules};
