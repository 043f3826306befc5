//! Конфигурация тайминга и очков.
//!
//! Здесь описываем только "правила", без состояния и без привязки к конкретному раунду.

use serde::{Deserialize, Serialize};

/// Профиль тайминга.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TimeProfile {
    /// Как в живой игре: 5 сек на выбор (30 в одиночку), ступенчатая раздача.
    Standard,
    /// Без пауз на анимацию - для симуляций и ботов.
    Instant,
}

/// Диапазон кадров `[min, max)` для случайной паузы.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FrameRange {
    pub min: u32,
    pub max: u32,
}

impl FrameRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Темп визуальных последовательностей (раздача, уборка сета).
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PacingRules {
    /// Пауза перед появлением каждой сданной карты.
    pub deal_frames: FrameRange,
    /// Пауза между улетающими картами найденного сета.
    pub remove_frames: FrameRange,
    /// Пауза после того, как сет улетел.
    pub settle_frames: u32,
    /// Пауза между "кликами" автоподбора сета.
    pub auto_click_frames: u32,
}

impl PacingRules {
    pub const fn standard() -> Self {
        Self {
            deal_frames: FrameRange::new(4, 12),
            remove_frames: FrameRange::new(4, 16),
            settle_frames: 30,
            auto_click_frames: 3,
        }
    }

    pub const fn instant() -> Self {
        Self {
            deal_frames: FrameRange::new(0, 0),
            remove_frames: FrameRange::new(0, 0),
            settle_frames: 0,
            auto_click_frames: 0,
        }
    }
}

impl Default for PacingRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Правила тайминга для одной игры.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct TimeRules {
    /// Сколько секунд на выбор карт, если играют несколько человек.
    pub selection_secs_multi: u32,
    /// Сколько секунд на выбор карт в одиночной игре.
    pub selection_secs_solo: u32,
    pub pacing: PacingRules,
}

impl TimeRules {
    pub const fn standard() -> Self {
        Self {
            selection_secs_multi: 5,
            selection_secs_solo: 30,
            pacing: PacingRules::standard(),
        }
    }

    pub const fn from_profile(profile: TimeProfile) -> Self {
        match profile {
            TimeProfile::Standard => Self::standard(),
            TimeProfile::Instant => Self {
                selection_secs_multi: 5,
                selection_secs_solo: 30,
                pacing: PacingRules::instant(),
            },
        }
    }

    /// Длительность отсчёта на выбор при данном числе участников.
    pub const fn selection_secs(&self, participants: usize) -> u32 {
        if participants > 1 {
            self.selection_secs_multi
        } else {
            self.selection_secs_solo
        }
    }
}

impl Default for TimeRules {
    fn default() -> Self {
        Self::standard()
    }
}

/// Политика очков за найденный сет.
///
/// Стоимость сета падает со временем от `max_points` до `min_points`
/// шагами по `decay_step` каждые `decay_interval_ms`.
/// Эту же стоимость игрок теряет за ошибку или просроченный выбор.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ScoringRules {
    pub max_points: i64,
    pub min_points: i64,
    pub decay_step: i64,
    pub decay_interval_ms: u64,
    pub decay_enabled: bool,
}

impl ScoringRules {
    pub const fn standard() -> Self {
        Self {
            max_points: 1000,
            min_points: 100,
            decay_step: 100,
            decay_interval_ms: 10_000,
            decay_enabled: true,
        }
    }

    /// Старая схема: +1 за сет, -1 за ошибку, без убывания.
    pub const fn classic() -> Self {
        Self {
            max_points: 1,
            min_points: 1,
            decay_step: 0,
            decay_interval_ms: 10_000,
            decay_enabled: false,
        }
    }
}

impl Default for ScoringRules {
    fn default() -> Self {
        Self::standard()
    }
}
