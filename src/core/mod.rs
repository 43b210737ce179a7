pub mod discovery;
pub mod engine;
pub mod pipeline;
pub mod tle;
pub mod workspace;

pub use crate::domain::model::{
    CaptureReport, DecodedCapture, RunSummary, SatelliteId, SoftBitCapture,
};
pub use crate::domain::ports::{ConfigProvider, Decoder, ImageConverter, Pipeline, Storage};
pub use crate::utils::error::Result;
