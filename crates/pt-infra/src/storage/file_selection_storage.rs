use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use tokio::fs;
use tracing::debug;

use pt_core::ports::{SelectionStoragePort, StorageError};

/// Record storage backed by one JSON file per key inside `dir`.
///
/// Writes go through a sibling temp file and a rename so a crash leaves
/// either the previous record or the new one, never a torn file.
pub struct FileSelectionStorage {
    dir: PathBuf,
}

impl FileSelectionStorage {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StorageError::Io(format!("invalid record name: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    async fn atomic_write(&self, path: &Path, content: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)
            .await
            .with_context(|| format!("create selection dir failed: {}", self.dir.display()))?;

        let tmp_path = path.with_extension("json.tmp");
        fs::write(&tmp_path, content)
            .await
            .with_context(|| format!("write temp record failed: {}", tmp_path.display()))?;

        fs::rename(&tmp_path, path).await.with_context(|| {
            format!(
                "rename temp record to target failed: {} -> {}",
                tmp_path.display(),
                path.display()
            )
        })?;

        Ok(())
    }
}

fn io_error(err: anyhow::Error) -> StorageError {
    StorageError::Io(format!("{err:#}"))
}

#[async_trait]
impl SelectionStoragePort for FileSelectionStorage {
    async fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.record_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(io_error(
                anyhow::Error::new(e).context(format!("read record failed: {}", path.display())),
            )),
        }
    }

    async fn write(&self, key: &str, payload: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        self.atomic_write(&path, payload).await.map_err(io_error)?;
        debug!(path = %path.display(), bytes = payload.len(), "Selection record written");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.record_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(io_error(
                anyhow::Error::new(e).context(format!("remove record failed: {}", path.display())),
            )),
        }
    }
}
