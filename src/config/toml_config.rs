use crate::core::ConfigProvider;
use crate::core::discovery::SourcePattern;
use crate::utils::error::{DecodeError, Result};
use crate::utils::validation::{self, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;
use std::time::Duration;

/// Longest settle wait we accept before a decode.
pub const MAX_WAIT_SECONDS: u64 = 3600;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub source: SourceConfig,
    pub paths: PathsConfig,
    pub tools: ToolsConfig,
    pub decoder: DecoderConfig,
    pub schedule: ScheduleConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub pattern: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            pattern: "/datadrive/meteor/data_*.s".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    /// Where finished images go; the station uploads from here.
    pub destination_dir: String,
    /// Where processed soft-bit files are archived.
    pub raw_destination_dir: String,
    pub temp_dir: String,
    pub temp_filename: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            destination_dir: "/tmp/.satnogs/data/".to_string(),
            raw_destination_dir: "/datadrive/meteor/complete/".to_string(),
            temp_dir: "/datadrive/meteor/".to_string(),
            temp_filename: "meteor_image_temp".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolsConfig {
    pub medet_path: String,
    pub convert_path: String,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            medet_path: "/datadrive/medet_arm".to_string(),
            convert_path: "/usr/bin/convert".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoderConfig {
    /// RGB composite from APIDs 65/65/64, plus a `.dec` dump for later passes.
    pub composite_args: Vec<String>,
    /// Thermal IR (APID 68) read back from the `.dec` dump.
    pub thermal_args: Vec<String>,
    pub enable_thermal: bool,
    pub diff_norad_ids: Vec<i64>,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            composite_args: to_args(&["-q", "-cd", "-r", "65", "-g", "65", "-b", "64"]),
            thermal_args: to_args(&["-q", "-d", "-r", "68", "-g", "68", "-b", "68"]),
            enable_thermal: true,
            // METEOR-M N2-2
            diff_norad_ids: vec![44387],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleConfig {
    pub wait_seconds: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self { wait_seconds: 120 }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub enabled: bool,
}

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|arg| arg.to_string()).collect()
}

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("static pattern is valid"))
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DecodeError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content);

        toml::from_str(&processed_content).map_err(|e| DecodeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replace `${VAR}` with the environment value; unset variables stay verbatim.
    fn substitute_env_vars(content: &str) -> String {
        env_var_pattern()
            .replace_all(content, |caps: &regex::Captures| {
                let var_name = &caps[1];
                std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
            })
            .into_owned()
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_path("source.pattern", &self.source.pattern)?;
        SourcePattern::parse(&self.source.pattern)?;

        validation::validate_path("paths.destination_dir", &self.paths.destination_dir)?;
        validation::validate_path("paths.raw_destination_dir", &self.paths.raw_destination_dir)?;
        validation::validate_path("paths.temp_dir", &self.paths.temp_dir)?;
        validation::validate_file_prefix("paths.temp_filename", &self.paths.temp_filename)?;

        validation::validate_path("tools.medet_path", &self.tools.medet_path)?;
        validation::validate_path("tools.convert_path", &self.tools.convert_path)?;

        if self.decoder.composite_args.is_empty() {
            return Err(DecodeError::ConfigValidationError {
                field: "decoder.composite_args".to_string(),
                message: "medet needs at least one channel argument".to_string(),
            });
        }
        if self.decoder.enable_thermal && self.decoder.thermal_args.is_empty() {
            return Err(DecodeError::ConfigValidationError {
                field: "decoder.thermal_args".to_string(),
                message: "Thermal pass is enabled but has no arguments".to_string(),
            });
        }

        validation::validate_range(
            "schedule.wait_seconds",
            self.schedule.wait_seconds,
            0,
            MAX_WAIT_SECONDS,
        )?;

        Ok(())
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.enabled
    }
}

impl ConfigProvider for TomlConfig {
    fn source_pattern(&self) -> &str {
        &self.source.pattern
    }

    fn destination_dir(&self) -> &str {
        &self.paths.destination_dir
    }

    fn raw_destination_dir(&self) -> &str {
        &self.paths.raw_destination_dir
    }

    fn temp_dir(&self) -> &str {
        &self.paths.temp_dir
    }

    fn temp_filename(&self) -> &str {
        &self.paths.temp_filename
    }

    fn medet_path(&self) -> &str {
        &self.tools.medet_path
    }

    fn convert_path(&self) -> &str {
        &self.tools.convert_path
    }

    fn composite_args(&self) -> &[String] {
        &self.decoder.composite_args
    }

    fn thermal_args(&self) -> &[String] {
        &self.decoder.thermal_args
    }

    fn thermal_enabled(&self) -> bool {
        self.decoder.enable_thermal
    }

    fn diff_norad_ids(&self) -> &[i64] {
        &self.decoder.diff_norad_ids
    }

    fn wait_time(&self) -> Duration {
        Duration::from_secs(self.schedule.wait_seconds)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
