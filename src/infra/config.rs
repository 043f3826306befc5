use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::time_ctrl::{ScoringRules, TimeProfile, TimeRules};

/// Ошибки загрузки конфигурации.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось прочитать {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Битый JSON конфигурации: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Некорректная конфигурация: {0}")]
    Invalid(String),
}

/// Конфигурация игры. Всё, что не указано в JSON, берётся из стандартного профиля.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct GameConfig {
    /// Число признаков у карты (4: количество, форма, заливка, цвет).
    pub num_features: usize,
    pub scoring: ScoringRules,
    pub timing: TimeRules,
}

impl GameConfig {
    pub const fn standard() -> Self {
        Self {
            num_features: 4,
            scoring: ScoringRules::standard(),
            timing: TimeRules::standard(),
        }
    }

    /// Конфиг без пауз на анимацию.
    pub const fn instant() -> Self {
        Self {
            num_features: 4,
            scoring: ScoringRules::standard(),
            timing: TimeRules::from_profile(TimeProfile::Instant),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_features == 0 || self.num_features > 8 {
            return Err(ConfigError::Invalid(format!(
                "num_features должно быть в 1..=8, получено {}",
                self.num_features
            )));
        }
        if self.scoring.min_points > self.scoring.max_points {
            return Err(ConfigError::Invalid(
                "min_points больше max_points".to_string(),
            ));
        }
        if self.scoring.decay_enabled {
            if self.scoring.decay_step <= 0 {
                return Err(ConfigError::Invalid(format!(
                    "decay_step должен быть положительным, получено {}",
                    self.scoring.decay_step
                )));
            }
            if self.scoring.decay_interval_ms == 0 {
                return Err(ConfigError::Invalid(
                    "decay_interval_ms не может быть 0".to_string(),
                ));
            }
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

/// Разобрать конфигурацию из JSON-строки.
pub fn load_config_str(json: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Прочитать конфигурацию из JSON-файла.
pub fn load_config_file(path: impl AsRef<Path>) -> Result<GameConfig, ConfigError> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_config_str(&raw)
}
