use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Pattern error: {0}")]
    PatternError(#[from] regex::Error),

    #[error("Configuration error in {field}: {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Failed to launch {program}: {source}")]
    ProcessError {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to file {from} into {to}: {source}")]
    FilingError {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    ExternalTool,
    FileSystem,
    Data,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DecodeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DecodeError::ConfigValidationError { .. }
            | DecodeError::InvalidConfigValueError { .. }
            | DecodeError::PatternError(_) => ErrorCategory::Configuration,
            DecodeError::ProcessError { .. } => ErrorCategory::ExternalTool,
            DecodeError::IoError(_) | DecodeError::FilingError { .. } => ErrorCategory::FileSystem,
            DecodeError::SerializationError(_) => ErrorCategory::Data,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DecodeError::SerializationError(_) => ErrorSeverity::Low,
            DecodeError::ProcessError { .. } => ErrorSeverity::Medium,
            DecodeError::ConfigValidationError { .. }
            | DecodeError::InvalidConfigValueError { .. }
            | DecodeError::PatternError(_) => ErrorSeverity::High,
            DecodeError::IoError(_) | DecodeError::FilingError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DecodeError::ConfigValidationError { .. }
            | DecodeError::InvalidConfigValueError { .. } => {
                "Check the TOML config and command line overrides"
            }
            DecodeError::PatternError(_) => "Simplify the source wildcard pattern",
            DecodeError::ProcessError { .. } => {
                "Make sure medet and convert exist at the configured paths and are executable"
            }
            DecodeError::FilingError { .. } => {
                "Check that the destination directories exist and are writable"
            }
            DecodeError::IoError(_) => "Check permissions and free space on the data drive",
            DecodeError::SerializationError(_) => {
                "The run summary could not be written; images are unaffected"
            }
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DecodeError::ConfigValidationError { field, message } => {
                format!("Configuration problem with '{}': {}", field, message)
            }
            DecodeError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            DecodeError::ProcessError { program, .. } => {
                format!("Could not run '{}'", program)
            }
            DecodeError::FilingError { from, to, .. } => {
                format!("Could not move {} to {}", from.display(), to.display())
            }
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DecodeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_ordering_matches_exit_codes() {
        let config = DecodeError::InvalidConfigValueError {
            field: "schedule.wait_seconds".to_string(),
            value: "99999".to_string(),
            reason: "too long".to_string(),
        };
        let spawn = DecodeError::ProcessError {
            program: "/nope/medet".to_string(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };

        assert_eq!(config.category(), ErrorCategory::Configuration);
        assert_eq!(config.severity(), ErrorSeverity::High);
        assert_eq!(spawn.category(), ErrorCategory::ExternalTool);
        assert!(spawn.severity() < config.severity());
        assert!(spawn.user_friendly_message().contains("/nope/medet"));
    }
}
