pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::{ConvertTool, LocalStorage, MedetDecoder};
pub use crate::core::{
    engine::CaptureEngine,
    pipeline::{MeteorPipeline, StationPipeline},
};
pub use crate::domain::model::{Pass, RunSummary, SatelliteId, SoftBitCapture};
pub use crate::utils::error::{DecodeError, Result};
