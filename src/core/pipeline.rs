use crate::adapters::{ConvertTool, LocalStorage, MedetDecoder};
use crate::core::discovery::SourcePattern;
use crate::core::workspace::Workspace;
use crate::core::{ConfigProvider, Decoder, ImageConverter, Pipeline, Storage};
use crate::domain::model::{
    CapturePlan, CaptureReport, DecodedCapture, Pass, PassOutcome, PassResult, PlannedPass,
    SatelliteId, SoftBitCapture,
};
use crate::utils::error::Result;
use chrono::Utc;
use std::path::{Path, PathBuf};

/// Decodes captures with an external decoder and converter, then files the
/// results into the configured destination directories.
pub struct MeteorPipeline<S, D, V, C> {
    storage: S,
    decoder: D,
    converter: V,
    config: C,
    source: SourcePattern,
    workspace: Workspace,
    satellite: SatelliteId,
}

/// The pipeline as deployed on a station: real medet, real convert, local disk.
pub type StationPipeline<C> = MeteorPipeline<LocalStorage, MedetDecoder, ConvertTool, C>;

impl<C: ConfigProvider> StationPipeline<C> {
    pub fn for_station(config: C, satellite: SatelliteId) -> Result<Self> {
        let decoder = MedetDecoder::new(config.medet_path(), config.diff_norad_ids().to_vec());
        let converter = ConvertTool::new(config.convert_path());
        MeteorPipeline::new(LocalStorage::new(), decoder, converter, config, satellite)
    }

    /// The commands a run would execute for one capture, without running them.
    pub fn plan(&self, capture: &SoftBitCapture) -> CapturePlan {
        let mut passes = vec![Pass::Visible];
        if self.config.thermal_enabled() {
            passes.push(Pass::Thermal);
        }

        let passes = passes
            .into_iter()
            .map(|pass| {
                let input = self.pass_input(capture, pass);
                let args = self.pass_args(pass);

                let mut decoder = vec![self.decoder.program().display().to_string()];
                decoder.extend(
                    self.decoder
                        .arguments(&input, &self.workspace.base(pass), args, self.satellite)
                        .iter()
                        .map(|arg| arg.to_string_lossy().into_owned()),
                );

                let converter = vec![
                    self.converter.program().display().to_string(),
                    self.workspace.bitmap(pass).display().to_string(),
                    self.workspace.png(pass).display().to_string(),
                ];

                PlannedPass {
                    pass,
                    decoder,
                    converter,
                    destination: self.image_path(capture, pass),
                }
            })
            .collect();

        CapturePlan {
            capture: capture.path().to_path_buf(),
            passes,
            archive_to: self.archive_path(capture),
        }
    }
}

impl<S, D, V, C> MeteorPipeline<S, D, V, C>
where
    S: Storage,
    D: Decoder,
    V: ImageConverter,
    C: ConfigProvider,
{
    pub fn new(
        storage: S,
        decoder: D,
        converter: V,
        config: C,
        satellite: SatelliteId,
    ) -> Result<Self> {
        let source = SourcePattern::parse(config.source_pattern())?;
        let workspace = Workspace::new(config.temp_dir(), config.temp_filename());

        Ok(Self {
            storage,
            decoder,
            converter,
            config,
            source,
            workspace,
            satellite,
        })
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    /// The thermal pass decodes the `.dec` dump the visible pass left behind.
    fn pass_input(&self, capture: &SoftBitCapture, pass: Pass) -> PathBuf {
        match pass {
            Pass::Visible => capture.path().to_path_buf(),
            Pass::Thermal => self.workspace.dec(Pass::Visible),
        }
    }

    fn pass_args(&self, pass: Pass) -> &[String] {
        match pass {
            Pass::Visible => self.config.composite_args(),
            Pass::Thermal => self.config.thermal_args(),
        }
    }

    fn image_path(&self, capture: &SoftBitCapture, pass: Pass) -> PathBuf {
        Path::new(self.config.destination_dir()).join(capture.image_name(pass))
    }

    async fn run_pass(&self, capture: &SoftBitCapture, pass: Pass) -> Result<PassResult> {
        let input = self.pass_input(capture, pass);
        let args = self.pass_args(pass);

        let decoder_exit = self
            .decoder
            .decode(&input, &self.workspace.base(pass), args, self.satellite)
            .await?;

        if !decoder_exit.success {
            tracing::debug!("{} decoder exit code {:?}", pass.label(), decoder_exit.code);
        }

        let image = self
            .converter
            .convert(&self.workspace.bitmap(pass), &self.workspace.png(pass))
            .await?;

        Ok(PassResult {
            pass,
            decoder_exit,
            image,
        })
    }

    async fn file_image(
        &self,
        capture: &SoftBitCapture,
        result: PassResult,
    ) -> Result<PassOutcome> {
        let image = match result.image {
            Some(produced) => {
                tracing::info!("{} processing successful!", result.pass.label());
                let destination = self.image_path(capture, result.pass);
                self.storage.move_file(&produced, &destination).await?;
                Some(destination)
            }
            None => {
                tracing::warn!("{} Processing unsuccessful.", result.pass.label());
                None
            }
        };

        Ok(PassOutcome {
            pass: result.pass,
            decoder_exit: result.decoder_exit,
            image,
        })
    }

    fn archive_path(&self, capture: &SoftBitCapture) -> PathBuf {
        Path::new(self.config.raw_destination_dir()).join(capture.file_name())
    }
}

#[async_trait::async_trait]
impl<S, D, V, C> Pipeline for MeteorPipeline<S, D, V, C>
where
    S: Storage,
    D: Decoder,
    V: ImageConverter,
    C: ConfigProvider,
{
    fn satellite(&self) -> SatelliteId {
        self.satellite
    }

    fn settle_time(&self) -> std::time::Duration {
        self.config.wait_time()
    }

    async fn discover(&self) -> Result<Vec<SoftBitCapture>> {
        tracing::debug!("Searching {} for soft-bit files", self.source.directory().display());
        self.source.discover()
    }

    async fn prepare(&self) -> Result<()> {
        self.workspace.cleanup()?;
        Ok(())
    }

    async fn decode(&self, capture: &SoftBitCapture) -> Result<DecodedCapture> {
        let started_at = Utc::now();
        tracing::info!("Attempting to process: {}", capture.path().display());

        let visible = self.run_pass(capture, Pass::Visible).await?;

        let thermal = if self.config.thermal_enabled() {
            Some(self.run_pass(capture, Pass::Thermal).await?)
        } else {
            None
        };

        Ok(DecodedCapture {
            started_at,
            visible,
            thermal,
        })
    }

    async fn file(
        &self,
        capture: &SoftBitCapture,
        decoded: DecodedCapture,
    ) -> Result<CaptureReport> {
        let visible = self.file_image(capture, decoded.visible).await?;
        let thermal = match decoded.thermal {
            Some(result) => Some(self.file_image(capture, result).await?),
            None => None,
        };

        let archived_to = self.archive_path(capture);
        self.storage.move_file(capture.path(), &archived_to).await?;
        tracing::debug!("Archived {} to {}", capture.path().display(), archived_to.display());

        Ok(CaptureReport {
            capture: capture.path().to_path_buf(),
            archived_to,
            visible,
            thermal,
            started_at: decoded.started_at,
            finished_at: Utc::now(),
        })
    }

    async fn finish(&self) -> Result<()> {
        self.workspace.cleanup()?;
        Ok(())
    }
}
