use crate::core::Decoder;
use crate::domain::model::{SatelliteId, ToolExit};
use crate::utils::error::{DecodeError, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// Runs the external `medet` METEOR decoder.
#[derive(Debug, Clone)]
pub struct MedetDecoder {
    program: PathBuf,
    diff_norad_ids: Vec<i64>,
}

impl MedetDecoder {
    pub fn new(program: impl Into<PathBuf>, diff_norad_ids: Vec<i64>) -> Self {
        Self {
            program: program.into(),
            diff_norad_ids,
        }
    }

    /// Satellites whose downlink is differentially coded need `-diff`.
    pub fn needs_diff(&self, satellite: SatelliteId) -> bool {
        satellite
            .norad_id()
            .is_some_and(|id| self.diff_norad_ids.contains(&id))
    }

    pub fn arguments(
        &self,
        input: &Path,
        output_base: &Path,
        args: &[String],
        satellite: SatelliteId,
    ) -> Vec<OsString> {
        let mut argv: Vec<OsString> = vec![input.into(), output_base.into()];
        argv.extend(args.iter().map(OsString::from));
        if self.needs_diff(satellite) {
            argv.push("-diff".into());
        }
        argv
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Decoder for MedetDecoder {
    async fn decode(
        &self,
        input: &Path,
        output_base: &Path,
        args: &[String],
        satellite: SatelliteId,
    ) -> Result<ToolExit> {
        let argv = self.arguments(input, output_base, args, satellite);
        tracing::debug!("Running {} {:?}", self.program.display(), argv);

        let status = Command::new(&self.program)
            .args(&argv)
            .status()
            .await
            .map_err(|source| DecodeError::ProcessError {
                program: self.program.display().to_string(),
                source,
            })?;

        tracing::debug!("medet exited with {}", status);
        Ok(ToolExit {
            code: status.code(),
            success: status.success(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arguments_for_regular_satellite() {
        let decoder = MedetDecoder::new("/datadrive/medet_arm", vec![44387]);
        let args: Vec<String> = ["-q", "-cd", "-r", "65"].iter().map(|s| s.to_string()).collect();

        let argv = decoder.arguments(
            Path::new("/datadrive/meteor/data_1.s"),
            Path::new("/datadrive/meteor/meteor_image_temp_vis"),
            &args,
            SatelliteId::Norad(40069),
        );

        let argv: Vec<String> = argv.iter().map(|a| a.to_string_lossy().into_owned()).collect();
        assert_eq!(
            argv,
            vec![
                "/datadrive/meteor/data_1.s",
                "/datadrive/meteor/meteor_image_temp_vis",
                "-q",
                "-cd",
                "-r",
                "65"
            ]
        );
    }

    #[test]
    fn test_diff_flag_appended_last() {
        let decoder = MedetDecoder::new("medet", vec![44387]);
        let args = vec!["-q".to_string()];

        let argv = decoder.arguments(
            Path::new("in.s"),
            Path::new("out"),
            &args,
            SatelliteId::Norad(44387),
        );
        assert_eq!(argv.last().map(|a| a.to_string_lossy().into_owned()), Some("-diff".into()));

        assert!(!decoder.needs_diff(SatelliteId::Unknown));
    }

    #[tokio::test]
    async fn test_missing_binary_is_process_error() {
        let decoder = MedetDecoder::new("/definitely/not/here/medet", vec![]);
        let err = decoder
            .decode(Path::new("in.s"), Path::new("out"), &[], SatelliteId::Unknown)
            .await
            .unwrap_err();
        assert!(matches!(err, DecodeError::ProcessError { .. }));
    }
}
