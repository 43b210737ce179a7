use crate::core::ImageConverter;
use crate::utils::error::{DecodeError, Result};
use std::path::{Path, PathBuf};
use tokio::process::Command;

/// ImageMagick `convert`, used to turn medet's bitmaps into PNGs.
#[derive(Debug, Clone)]
pub struct ConvertTool {
    program: PathBuf,
}

impl ConvertTool {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl ImageConverter for ConvertTool {
    async fn convert(&self, bitmap: &Path, png: &Path) -> Result<Option<PathBuf>> {
        let status = Command::new(&self.program)
            .arg(bitmap)
            .arg(png)
            .status()
            .await
            .map_err(|source| DecodeError::ProcessError {
                program: self.program.display().to_string(),
                source,
            })?;

        // A missing input bitmap makes convert fail; only the output decides.
        tracing::debug!("convert {} exited with {}", bitmap.display(), status);

        let produced = tokio::fs::metadata(png)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false);

        Ok(produced.then(|| png.to_path_buf()))
    }
}
