//! Инфраструктурный слой вокруг движка:
//! - RNG-реализации;
//! - headless-соавторы (рендер/звук/кадры без UI);
//! - загрузка конфигурации.

pub mod config;
pub mod headless;
pub mod rng;

pub use config::*;
pub use headless::*;
pub use rng::*;
