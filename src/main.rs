use anyhow::Context;
use clap::Parser;
use meteor_decode::core::{ConfigProvider, Pipeline};
use meteor_decode::utils::error::ErrorSeverity;
use meteor_decode::utils::{logger, validation::Validate};
use meteor_decode::{CaptureEngine, CliConfig, RunSummary, SatelliteId, StationPipeline, TomlConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting meteor-decode");

    let mut config = match &args.config {
        Some(path) => {
            tracing::info!("📁 Loading configuration from: {}", path.display());
            TomlConfig::from_file(path)
                .with_context(|| format!("Failed to load config file '{}'", path.display()))?
        }
        None => TomlConfig::default(),
    };
    args.apply_overrides(&mut config);

    if args.verbose {
        tracing::debug!("Effective config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let satellite = SatelliteId::from_tle(&args.tle);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(config, satellite).await?;
        return Ok(());
    }

    let monitor_enabled = config.monitoring_enabled();
    if monitor_enabled {
        tracing::info!("🔍 System monitoring enabled");
    }

    let pipeline = StationPipeline::for_station(config, satellite)?;
    let engine = CaptureEngine::new_with_monitoring(pipeline, monitor_enabled);

    match engine.run().await {
        Ok(summary) => {
            if let Some(path) = &args.summary {
                write_summary(&summary, path)?;
                tracing::info!("📁 Run summary saved to: {}", path.display());
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Processing failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());

            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}

fn write_summary(summary: &RunSummary, path: &std::path::Path) -> anyhow::Result<()> {
    let json = summary.to_json()?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write summary to '{}'", path.display()))?;
    Ok(())
}

async fn perform_dry_run(config: TomlConfig, satellite: SatelliteId) -> anyhow::Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!("  Satellite: {}", satellite);
    println!("  Source: {}", config.source_pattern());
    println!("  Images: {}", config.destination_dir());
    println!("  Archive: {}", config.raw_destination_dir());
    println!("  Wait: {}s per capture", config.wait_time().as_secs());

    let pipeline = StationPipeline::for_station(config, satellite)?;
    let captures = pipeline.discover().await?;
    println!("  Captures found: {}", captures.len());

    for capture in &captures {
        let plan = pipeline.plan(capture);
        println!();
        println!("📡 {}", plan.capture.display());

        for pass in &plan.passes {
            println!("  {}", pass.decoder.join(" "));
            println!("  {}", pass.converter.join(" "));
            println!("  -> {}", pass.destination.display());
        }
        println!("  -> {}", plan.archive_to.display());
    }

    println!();
    println!("✅ Dry run analysis complete.");
    Ok(())
}
