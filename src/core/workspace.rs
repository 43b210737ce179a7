use crate::domain::model::Pass;
use crate::utils::error::Result;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Scratch location where medet and convert write their intermediate files.
/// Every artifact is named `<prefix><pass suffix>.<ext>`.
#[derive(Debug, Clone)]
pub struct Workspace {
    dir: PathBuf,
    prefix: String,
}

impl Workspace {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Output base handed to medet, which appends its own extensions.
    pub fn base(&self, pass: Pass) -> PathBuf {
        self.dir.join(format!("{}{}", self.prefix, pass.suffix()))
    }

    pub fn bitmap(&self, pass: Pass) -> PathBuf {
        self.artifact(pass, "bmp")
    }

    pub fn png(&self, pass: Pass) -> PathBuf {
        self.artifact(pass, "png")
    }

    /// Decoded symbol dump; the thermal pass reads the visible pass's copy.
    pub fn dec(&self, pass: Pass) -> PathBuf {
        self.artifact(pass, "dec")
    }

    fn artifact(&self, pass: Pass, ext: &str) -> PathBuf {
        self.dir.join(format!("{}{}.{}", self.prefix, pass.suffix(), ext))
    }

    /// Delete every file in the workspace directory starting with the prefix.
    pub fn cleanup(&self) -> Result<usize> {
        let entries = match std::fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let mut removed = 0;
        for entry in entries {
            let entry = entry?;
            let is_ours = entry
                .file_name()
                .to_str()
                .is_some_and(|name| name.starts_with(&self.prefix));
            if !is_ours || !entry.file_type()?.is_file() {
                continue;
            }

            match std::fs::remove_file(entry.path()) {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
        }

        if removed > 0 {
            tracing::debug!("Removed {} temporary files from {}", removed, self.dir.display());
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_artifact_paths() {
        let workspace = Workspace::new("/datadrive/meteor", "meteor_image_temp");
        assert_eq!(
            workspace.base(Pass::Visible),
            PathBuf::from("/datadrive/meteor/meteor_image_temp_vis")
        );
        assert_eq!(
            workspace.bitmap(Pass::Thermal),
            PathBuf::from("/datadrive/meteor/meteor_image_temp_ir.bmp")
        );
        assert_eq!(
            workspace.dec(Pass::Visible),
            PathBuf::from("/datadrive/meteor/meteor_image_temp_vis.dec")
        );
        assert_eq!(
            workspace.png(Pass::Visible),
            PathBuf::from("/datadrive/meteor/meteor_image_temp_vis.png")
        );
    }

    #[test]
    fn test_cleanup_only_touches_prefixed_files() {
        let dir = TempDir::new().unwrap();
        for name in [
            "meteor_image_temp_vis.bmp",
            "meteor_image_temp_vis.dec",
            "meteor_image_temp_ir.png",
            "data_1234.s",
        ] {
            std::fs::write(dir.path().join(name), b"x").unwrap();
        }

        let workspace = Workspace::new(dir.path(), "meteor_image_temp");
        assert_eq!(workspace.cleanup().unwrap(), 3);
        assert!(dir.path().join("data_1234.s").exists());
        assert_eq!(workspace.cleanup().unwrap(), 0);
    }

    #[test]
    fn test_cleanup_of_missing_dir() {
        let dir = TempDir::new().unwrap();
        let workspace = Workspace::new(dir.path().join("gone"), "meteor_image_temp");
        assert_eq!(workspace.cleanup().unwrap(), 0);
    }
}
