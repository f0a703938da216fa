//! Filesystem-based blob backend.
//!
//! Stores objects as files in a directory structure:
//! ```text
//! {base_path}/
//!   {container}/
//!     {hash[0:2]}/
//!       {hash}.blob
//! ```
//!
//! `hash` is the hex SHA-256 of the key, so every aggregate identifier
//! (any length, including ones with `/` or `..`) maps to a fixed-length
//! file name inside its container.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

use super::{BackendError, BackendKind, BlobBackend, Result};

const OBJECT_EXTENSION: &str = "blob";

/// Hex SHA-256 of an object key.
fn key_hash(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Filesystem-based blob backend.
///
/// Each container is a subdirectory of the base directory.
pub struct FilesystemBackend {
    base_path: PathBuf,
}

impl FilesystemBackend {
    /// Create a new filesystem backend.
    ///
    /// Creates the base directory if it doesn't exist. Containers are not
    /// created here.
    pub async fn new(base_path: impl AsRef<Path>) -> Result<Self> {
        let base_path = base_path.as_ref().to_path_buf();
        fs::create_dir_all(&base_path).await?;
        Ok(Self { base_path })
    }

    /// Get the directory for a container.
    fn container_path(&self, container: &str) -> Result<PathBuf> {
        if container.is_empty()
            || container == "."
            || container == ".."
            || container.contains(['/', '\\'])
        {
            return Err(BackendError::InvalidName(container.to_string()));
        }
        Ok(self.base_path.join(container))
    }

    /// Get the file path for a key within a container.
    fn object_path(&self, container: &str, key: &str) -> Result<PathBuf> {
        if key.is_empty() {
            return Err(BackendError::InvalidName(key.to_string()));
        }
        let hash = key_hash(key);
        // First 2 chars as subdirectory to avoid too many files in one dir
        let subdir = &hash[0..2];
        Ok(self
            .container_path(container)?
            .join(subdir)
            .join(format!("{}.{}", hash, OBJECT_EXTENSION)))
    }

    async fn require_container(&self, container: &str) -> Result<PathBuf> {
        let path = self.container_path(container)?;
        if !self.container_exists(container).await? {
            return Err(BackendError::ContainerNotFound(container.to_string()));
        }
        Ok(path)
    }
}

#[async_trait]
impl BlobBackend for FilesystemBackend {
    async fn get(&self, container: &str, key: &str) -> Result<Vec<u8>> {
        self.require_container(container).await?;
        let path = self.object_path(container, key)?;

        match fs::read(&path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(BackendError::NotFound {
                container: container.to_string(),
                key: key.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }

    async fn put(
        &self,
        container: &str,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<()> {
        self.require_container(container).await?;
        let path = self.object_path(container, key)?;
        let Some(dir) = path.parent() else {
            return Err(BackendError::InvalidName(key.to_string()));
        };
        fs::create_dir_all(dir).await?;

        // Write atomically using a unique temp file + rename
        let temp_path = dir.join(format!("{}.tmp", Uuid::new_v4().simple()));
        let size = bytes.len();
        let written = match fs::write(&temp_path, bytes).await {
            Ok(()) => fs::rename(&temp_path, &path).await,
            Err(e) => Err(e),
        };
        if let Err(e) = written {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        debug!(container, key, size, "Stored object");
        Ok(())
    }

    async fn container_exists(&self, container: &str) -> Result<bool> {
        let path = self.container_path(container)?;
        match fs::metadata(&path).await {
            Ok(metadata) => Ok(metadata.is_dir()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_container(&self, container: &str) -> Result<()> {
        let path = self.container_path(container)?;
        fs::create_dir_all(&path).await?;
        info!(path = %path.display(), "Created container directory");
        Ok(())
    }

    async fn delete_all(&self, container: &str) -> Result<()> {
        let path = self.require_container(container).await?;
        fs::remove_dir_all(&path).await?;
        debug!(path = %path.display(), "Deleted container directory");
        Ok(())
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Filesystem
    }
}
