use crate::utils::error::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// NORAD catalogue number of the satellite being processed. Serialized as
/// the number, or `-1` when unknown, matching the log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum SatelliteId {
    Norad(i64),
    Unknown,
}

impl SatelliteId {
    pub fn norad_id(&self) -> Option<i64> {
        match self {
            SatelliteId::Norad(id) => Some(*id),
            SatelliteId::Unknown => None,
        }
    }
}

impl From<i64> for SatelliteId {
    fn from(id: i64) -> Self {
        if id < 0 {
            SatelliteId::Unknown
        } else {
            SatelliteId::Norad(id)
        }
    }
}

impl From<SatelliteId> for i64 {
    fn from(satellite: SatelliteId) -> Self {
        satellite.norad_id().unwrap_or(-1)
    }
}

impl fmt::Display for SatelliteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SatelliteId::Norad(id) => write!(f, "{}", id),
            SatelliteId::Unknown => write!(f, "-1"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pass {
    Visible,
    Thermal,
}

impl Pass {
    pub fn suffix(&self) -> &'static str {
        match self {
            Pass::Visible => "_vis",
            Pass::Thermal => "_ir",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Pass::Visible => "VIS",
            Pass::Thermal => "IR",
        }
    }
}

/// A soft-bit recording waiting to be decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoftBitCapture {
    path: PathBuf,
}

impl SoftBitCapture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// File name up to the first dot: `data_2024.01.s` becomes `data_2024`.
    pub fn stem(&self) -> String {
        let name = self.file_name();
        match name.split_once('.') {
            Some((stem, _)) => stem.to_string(),
            None => name,
        }
    }

    /// Destination file name for the image a pass produced.
    pub fn image_name(&self, pass: Pass) -> String {
        format!("{}{}.png", self.stem(), pass.suffix())
    }
}

/// Exit status of an external tool. Recorded, never acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolExit {
    pub code: Option<i32>,
    pub success: bool,
}

/// Artifacts a pass left in the workspace, before anything is filed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassResult {
    pub pass: Pass,
    pub decoder_exit: ToolExit,
    pub image: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct DecodedCapture {
    pub started_at: DateTime<Utc>,
    pub visible: PassResult,
    pub thermal: Option<PassResult>,
}

/// Command lines one pass would run, for dry runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPass {
    pub pass: Pass,
    pub decoder: Vec<String>,
    pub converter: Vec<String>,
    pub destination: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturePlan {
    pub capture: PathBuf,
    pub passes: Vec<PlannedPass>,
    pub archive_to: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PassOutcome {
    pub pass: Pass,
    pub decoder_exit: ToolExit,
    pub image: Option<PathBuf>,
}

impl PassOutcome {
    pub fn succeeded(&self) -> bool {
        self.image.is_some()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureReport {
    pub capture: PathBuf,
    pub archived_to: PathBuf,
    pub visible: PassOutcome,
    pub thermal: Option<PassOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl CaptureReport {
    pub fn images_produced(&self) -> usize {
        let thermal = self.thermal.as_ref().map_or(0, |t| t.succeeded() as usize);
        self.visible.succeeded() as usize + thermal
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub satellite: SatelliteId,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub captures: Vec<CaptureReport>,
}

impl RunSummary {
    pub fn images_produced(&self) -> usize {
        self.captures.iter().map(CaptureReport::images_produced).sum()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stem_stops_at_first_dot() {
        let capture = SoftBitCapture::new("/datadrive/meteor/data_2024.01.s");
        assert_eq!(capture.file_name(), "data_2024.01.s");
        assert_eq!(capture.stem(), "data_2024");
        assert_eq!(capture.image_name(Pass::Thermal), "data_2024_ir.png");
    }

    #[test]
    fn test_stem_without_extension() {
        let capture = SoftBitCapture::new("/datadrive/meteor/data_1234");
        assert_eq!(capture.stem(), "data_1234");
        assert_eq!(capture.image_name(Pass::Visible), "data_1234_vis.png");
    }

    #[test]
    fn test_unknown_satellite_displays_sentinel() {
        assert_eq!(SatelliteId::Unknown.to_string(), "-1");
        assert_eq!(SatelliteId::Norad(44387).to_string(), "44387");
        assert_eq!(SatelliteId::Unknown.norad_id(), None);
    }

    #[test]
    fn test_satellite_serializes_like_the_log_line() {
        assert_eq!(serde_json::to_string(&SatelliteId::Norad(44387)).unwrap(), "44387");
        assert_eq!(serde_json::to_string(&SatelliteId::Unknown).unwrap(), "-1");

        let parsed: SatelliteId = serde_json::from_str("-1").unwrap();
        assert_eq!(parsed, SatelliteId::Unknown);
        let parsed: SatelliteId = serde_json::from_str("57166").unwrap();
        assert_eq!(parsed, SatelliteId::Norad(57166));
    }
}
