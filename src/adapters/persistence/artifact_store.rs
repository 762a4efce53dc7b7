//! Implements ArtifactPort with plain files in one output directory.
//!
//! Every write goes to a temp file first and is renamed into place.

use crate::domain::DomainError;
use crate::ports::ArtifactPort;
use crate::shared::atomic_file::write_atomic;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// File-system artifact store rooted at `base_dir`.
pub struct FsArtifactStore {
    base_dir: PathBuf,
}

impl FsArtifactStore {
    pub fn new(base_dir: impl AsRef<Path>) -> Self {
        Self {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    /// Resolve an artifact name inside the base directory. Only bare file names are accepted.
    fn artifact_path(&self, name: &str) -> Result<PathBuf, DomainError> {
        let file_name = Path::new(name)
            .file_name()
            .filter(|f| f.to_str() == Some(name))
            .ok_or_else(|| DomainError::Artifact(format!("invalid artifact name: {:?}", name)))?;
        Ok(self.base_dir.join(file_name))
    }

    async fn store(&self, name: &str, bytes: &[u8]) -> Result<PathBuf, DomainError> {
        let path = self.artifact_path(name)?;
        fs::create_dir_all(&self.base_dir)
            .await
            .map_err(|e| DomainError::Artifact(format!("create output dir: {}", e)))?;
        write_atomic(&path, bytes)
            .await
            .map_err(|e| DomainError::Artifact(format!("write {}: {}", name, e)))?;

        debug!(path = %path.display(), bytes = bytes.len(), "artifact written");
        Ok(path)
    }
}

#[async_trait::async_trait]
impl ArtifactPort for FsArtifactStore {
    async fn save_text(&self, name: &str, contents: &str) -> Result<PathBuf, DomainError> {
        self.store(name, contents.as_bytes()).await
    }

    async fn save_json(
        &self,
        name: &str,
        value: &serde_json::Value,
    ) -> Result<PathBuf, DomainError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| DomainError::Artifact(format!("serialize {}: {}", name, e)))?;
        self.store(name, json.as_bytes()).await
    }
}
