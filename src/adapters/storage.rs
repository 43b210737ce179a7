use crate::core::Storage;
use crate::utils::error::{DecodeError, Result};
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Storage for LocalStorage {
    async fn move_file(&self, from: &Path, to: &Path) -> Result<()> {
        let filing_error = |source| DecodeError::FilingError {
            from: from.to_path_buf(),
            to: to.to_path_buf(),
            source,
        };

        if let Some(parent) = to.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(filing_error)?;
        }

        if tokio::fs::rename(from, to).await.is_ok() {
            return Ok(());
        }

        // rename cannot cross filesystems (the data drive vs /tmp).
        copy_then_remove(from, to).await.map_err(filing_error)
    }
}

async fn copy_then_remove(from: &Path, to: &Path) -> std::io::Result<()> {
    tokio::fs::copy(from, to).await?;
    tokio::fs::remove_file(from).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_move_creates_destination_dir() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("meteor_image_temp_vis.png");
        std::fs::write(&from, b"png").unwrap();
        let to = dir.path().join("satnogs").join("data").join("data_1_vis.png");

        LocalStorage::new().move_file(&from, &to).await.unwrap();

        assert!(!from.exists());
        assert_eq!(std::fs::read(&to).unwrap(), b"png");
    }

    #[tokio::test]
    async fn test_copy_fallback_moves_contents() {
        let source_dir = TempDir::new().unwrap();
        let target_dir = TempDir::new().unwrap();
        let from = source_dir.path().join("data_1.s");
        std::fs::write(&from, b"soft bits").unwrap();
        let to = target_dir.path().join("data_1.s");

        copy_then_remove(&from, &to).await.unwrap();

        assert!(!from.exists());
        assert_eq!(std::fs::read(&to).unwrap(), b"soft bits");
    }

    #[tokio::test]
    async fn test_copy_fallback_keeps_source_when_copy_fails() {
        let dir = TempDir::new().unwrap();
        let from = dir.path().join("data_1.s");
        std::fs::write(&from, b"soft bits").unwrap();
        let to = dir.path().join("missing").join("data_1.s");

        assert!(copy_then_remove(&from, &to).await.is_err());
        assert!(from.exists());
    }

    #[tokio::test]
    async fn test_move_missing_source_is_filing_error() {
        let dir = TempDir::new().unwrap();
        let err = LocalStorage::new()
            .move_file(&dir.path().join("missing.s"), &dir.path().join("out.s"))
            .await
            .unwrap_err();
        assert!(matches!(err, DecodeError::FilingError { .. }));
    }
}
