use crate::domain::model::{CaptureReport, DecodedCapture, SatelliteId, SoftBitCapture, ToolExit};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub trait Storage: Send + Sync {
    /// Move a file, creating the destination's parent directory if needed.
    fn move_file(
        &self,
        from: &Path,
        to: &Path,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait Decoder: Send + Sync {
    fn decode(
        &self,
        input: &Path,
        output_base: &Path,
        args: &[String],
        satellite: SatelliteId,
    ) -> impl std::future::Future<Output = Result<ToolExit>> + Send;
}

pub trait ImageConverter: Send + Sync {
    /// Returns the PNG path if one exists after the conversion ran.
    fn convert(
        &self,
        bitmap: &Path,
        png: &Path,
    ) -> impl std::future::Future<Output = Result<Option<PathBuf>>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn source_pattern(&self) -> &str;
    fn destination_dir(&self) -> &str;
    fn raw_destination_dir(&self) -> &str;
    fn temp_dir(&self) -> &str;
    fn temp_filename(&self) -> &str;
    fn medet_path(&self) -> &str;
    fn convert_path(&self) -> &str;
    fn composite_args(&self) -> &[String];
    fn thermal_args(&self) -> &[String];
    fn thermal_enabled(&self) -> bool;
    fn diff_norad_ids(&self) -> &[i64];
    fn wait_time(&self) -> Duration;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    fn satellite(&self) -> SatelliteId;
    /// How long to wait before each decode.
    fn settle_time(&self) -> Duration;
    async fn discover(&self) -> Result<Vec<SoftBitCapture>>;
    /// Clear temp artifacts left by earlier runs.
    async fn prepare(&self) -> Result<()>;
    async fn decode(&self, capture: &SoftBitCapture) -> Result<DecodedCapture>;
    async fn file(
        &self,
        capture: &SoftBitCapture,
        decoded: DecodedCapture,
    ) -> Result<CaptureReport>;
    async fn finish(&self) -> Result<()>;
}
