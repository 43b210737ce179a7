use crate::domain::model::SoftBitCapture;
use crate::utils::error::{DecodeError, Result};
use regex::Regex;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Wildcard path such as `/datadrive/meteor/data_*.s`. `*` and `?` are
/// honoured in the file-name component only.
#[derive(Debug, Clone)]
pub struct SourcePattern {
    directory: PathBuf,
    file_pattern: String,
    matcher: Regex,
}

impl SourcePattern {
    pub fn parse(pattern: &str) -> Result<Self> {
        let last_segment = pattern
            .rsplit(|c: char| c == '/' || c == '\\')
            .next()
            .unwrap_or_default();
        if matches!(last_segment, "" | "." | "..") {
            return Err(DecodeError::InvalidConfigValueError {
                field: "source.pattern".to_string(),
                value: pattern.to_string(),
                reason: "Pattern must end in a file name, not a directory".to_string(),
            });
        }

        let path = Path::new(pattern);
        let file_pattern = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| DecodeError::InvalidConfigValueError {
                field: "source.pattern".to_string(),
                value: pattern.to_string(),
                reason: "Pattern must end in a file name".to_string(),
            })?
            .to_string();

        let directory = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        if directory.to_string_lossy().contains(['*', '?']) {
            return Err(DecodeError::InvalidConfigValueError {
                field: "source.pattern".to_string(),
                value: pattern.to_string(),
                reason: "Wildcards are only supported in the file name".to_string(),
            });
        }

        let matcher = Regex::new(&wildcard_to_regex(&file_pattern))?;

        Ok(Self {
            directory,
            file_pattern,
            matcher,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn matches(&self, file_name: &str) -> bool {
        // Like a shell glob, a leading wildcard does not pick up dotfiles.
        if file_name.starts_with('.') && !self.file_pattern.starts_with('.') {
            return false;
        }
        self.matcher.is_match(file_name)
    }

    /// Every matching regular file, sorted by path. A missing directory is
    /// treated as holding no captures.
    pub fn discover(&self) -> Result<Vec<SoftBitCapture>> {
        let entries = match std::fs::read_dir(&self.directory) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!("Source directory {} does not exist", self.directory.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name();
            if name.to_str().is_some_and(|name| self.matches(name)) {
                paths.push(entry.path());
            }
        }
        paths.sort();

        Ok(paths.into_iter().map(SoftBitCapture::new).collect())
    }
}

fn wildcard_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() + 8);
    regex.push_str("(?s)^");
    for c in pattern.chars() {
        match c {
            '*' => regex.push_str(".*"),
            '?' => regex.push('.'),
            other => regex.push_str(&regex::escape(&other.to_string())),
        }
    }
    regex.push('$');
    regex
}
