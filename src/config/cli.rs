use crate::config::toml_config::TomlConfig;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "meteor-decode")]
#[command(about = "Decode METEOR LRPT soft-bit captures into PNG images with medet")]
pub struct CliConfig {
    /// TLE of the observed satellite, as passed by the post-observation hook
    pub tle: String,

    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Wildcard pattern used to find soft-bit files
    #[arg(long)]
    pub source: Option<String>,

    /// Directory receiving the finished PNG images
    #[arg(long)]
    pub destination_dir: Option<String>,

    /// Directory receiving processed soft-bit files
    #[arg(long)]
    pub raw_destination_dir: Option<String>,

    /// Directory for medet and convert intermediates
    #[arg(long)]
    pub temp_dir: Option<String>,

    /// Path to the medet binary
    #[arg(long)]
    pub medet: Option<String>,

    /// Path to ImageMagick convert
    #[arg(long)]
    pub convert: Option<String>,

    /// Seconds to wait before decoding each capture
    #[arg(long, value_name = "SECONDS")]
    pub wait: Option<u64>,

    /// Skip the thermal IR pass
    #[arg(long)]
    pub no_thermal: bool,

    /// Write a JSON summary of the run to this file
    #[arg(long, value_name = "FILE")]
    pub summary: Option<PathBuf>,

    /// Show what would be processed without executing
    #[arg(long)]
    pub dry_run: bool,

    /// Log process memory and CPU around each decode
    #[arg(long)]
    pub monitor: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliConfig {
    /// Layer the command line overrides on top of a file or default config.
    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(source) = &self.source {
            config.source.pattern = source.clone();
        }
        if let Some(dir) = &self.destination_dir {
            config.paths.destination_dir = dir.clone();
        }
        if let Some(dir) = &self.raw_destination_dir {
            config.paths.raw_destination_dir = dir.clone();
        }
        if let Some(dir) = &self.temp_dir {
            config.paths.temp_dir = dir.clone();
        }
        if let Some(medet) = &self.medet {
            config.tools.medet_path = medet.clone();
        }
        if let Some(convert) = &self.convert {
            config.tools.convert_path = convert.clone();
        }
        if let Some(wait) = self.wait {
            config.schedule.wait_seconds = wait;
        }
        if self.no_thermal {
            config.decoder.enable_thermal = false;
        }
        if self.monitor {
            config.monitoring.enabled = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::time::Duration;

    #[test]
    fn test_tle_is_the_only_required_argument() {
        let cli = CliConfig::try_parse_from(["meteor-decode", "METEOR-M2 2 44387"]).unwrap();
        assert_eq!(cli.tle, "METEOR-M2 2 44387");
        assert!(cli.config.is_none());
        assert!(!cli.dry_run);

        assert!(CliConfig::try_parse_from(["meteor-decode"]).is_err());
    }

    #[test]
    fn test_overrides_win_over_file_values() {
        let cli = CliConfig::try_parse_from([
            "meteor-decode",
            "--wait",
            "0",
            "--no-thermal",
            "--medet",
            "/usr/local/bin/medet",
            "--source",
            "/srv/meteor/*.s",
            "tle",
        ])
        .unwrap();

        let mut config = TomlConfig::default();
        cli.apply_overrides(&mut config);

        assert_eq!(config.wait_time(), Duration::ZERO);
        assert!(!config.thermal_enabled());
        assert_eq!(config.medet_path(), "/usr/local/bin/medet");
        assert_eq!(config.source_pattern(), "/srv/meteor/*.s");
        assert_eq!(config.convert_path(), "/usr/bin/convert");
    }
}
