use crate::core::Pipeline;
use crate::domain::model::RunSummary;
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;
use chrono::Utc;

/// Drives a pipeline over every discovered capture, one at a time.
pub struct CaptureEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> CaptureEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<RunSummary> {
        let started_at = Utc::now();
        let satellite = self.pipeline.satellite();
        tracing::info!("Satellite #{}# being processed", satellite);

        let captures = self.pipeline.discover().await?;
        tracing::info!("Found {} soft-bit file(s)", captures.len());

        let wait = self.pipeline.settle_time();
        let mut reports = Vec::with_capacity(captures.len());

        for capture in captures {
            self.pipeline.prepare().await?;

            tracing::info!("Waiting for {} seconds before processing.", wait.as_secs());
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }

            self.monitor.log_stats("Before decode");
            let decoded = self.pipeline.decode(&capture).await?;
            self.monitor.log_stats("After decode");

            let report = self.pipeline.file(&capture, decoded).await?;
            self.pipeline.finish().await?;

            tracing::debug!(
                "{}: {} image(s) in {}ms",
                capture.file_name(),
                report.images_produced(),
                (report.finished_at - report.started_at).num_milliseconds()
            );
            reports.push(report);
        }

        self.monitor.log_final_stats();

        let summary = RunSummary {
            satellite,
            started_at,
            finished_at: Utc::now(),
            captures: reports,
        };
        tracing::info!(
            "Processed {} capture(s), produced {} image(s)",
            summary.captures.len(),
            summary.images_produced()
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{
        CaptureReport, DecodedCapture, Pass, PassOutcome, PassResult, SatelliteId, SoftBitCapture,
        ToolExit,
    };
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Default)]
    struct ScriptedPipeline {
        captures: Vec<&'static str>,
        events: Arc<Mutex<Vec<String>>>,
        settle: Duration,
    }

    impl ScriptedPipeline {
        fn log(&self, event: String) {
            self.events.lock().unwrap().push(event);
        }
    }

    fn exit_ok() -> ToolExit {
        ToolExit {
            code: Some(0),
            success: true,
        }
    }

    #[async_trait::async_trait]
    impl Pipeline for ScriptedPipeline {
        fn satellite(&self) -> SatelliteId {
            SatelliteId::Norad(44387)
        }

        fn settle_time(&self) -> Duration {
            self.settle
        }

        async fn discover(&self) -> Result<Vec<SoftBitCapture>> {
            Ok(self.captures.iter().map(|c| SoftBitCapture::new(*c)).collect())
        }

        async fn prepare(&self) -> Result<()> {
            self.log("prepare".to_string());
            Ok(())
        }

        async fn decode(&self, capture: &SoftBitCapture) -> Result<DecodedCapture> {
            self.log(format!("decode {}", capture.file_name()));
            Ok(DecodedCapture {
                started_at: Utc::now(),
                visible: PassResult {
                    pass: Pass::Visible,
                    decoder_exit: exit_ok(),
                    image: Some("vis.png".into()),
                },
                thermal: None,
            })
        }

        async fn file(
            &self,
            capture: &SoftBitCapture,
            decoded: DecodedCapture,
        ) -> Result<CaptureReport> {
            self.log(format!("file {}", capture.file_name()));
            Ok(CaptureReport {
                capture: capture.path().to_path_buf(),
                archived_to: capture.path().to_path_buf(),
                visible: PassOutcome {
                    pass: Pass::Visible,
                    decoder_exit: decoded.visible.decoder_exit,
                    image: decoded.visible.image,
                },
                thermal: None,
                started_at: decoded.started_at,
                finished_at: Utc::now(),
            })
        }

        async fn finish(&self) -> Result<()> {
            self.log("finish".to_string());
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_each_capture_is_bracketed_by_cleanup() {
        let pipeline = ScriptedPipeline {
            captures: vec!["data_1.s", "data_2.s"],
            ..Default::default()
        };
        let events = pipeline.events.clone();

        let summary = CaptureEngine::new(pipeline).run().await.unwrap();

        assert_eq!(summary.satellite, SatelliteId::Norad(44387));
        assert_eq!(summary.captures.len(), 2);
        assert_eq!(summary.images_produced(), 2);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                "prepare",
                "decode data_1.s",
                "file data_1.s",
                "finish",
                "prepare",
                "decode data_2.s",
                "file data_2.s",
                "finish"
            ]
        );
    }

    #[tokio::test]
    async fn test_no_captures_skips_cleanup() {
        let pipeline = ScriptedPipeline::default();
        let events = pipeline.events.clone();

        let summary = CaptureEngine::new(pipeline).run().await.unwrap();

        assert!(summary.captures.is_empty());
        assert!(events.lock().unwrap().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settle_wait_before_each_decode() {
        let pipeline = ScriptedPipeline {
            captures: vec!["data_1.s", "data_2.s"],
            settle: Duration::from_secs(120),
            ..Default::default()
        };

        let start = tokio::time::Instant::now();
        CaptureEngine::new(pipeline).run().await.unwrap();

        assert!(start.elapsed() >= Duration::from_secs(240));
    }
}
