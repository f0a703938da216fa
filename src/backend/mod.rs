//! Blob backends for event sequence objects.
//!
//! A backend is a durable `container/key -> bytes` store. The event store
//! uses one container and one key per aggregate.
//!
//! ## Backends
//!
//! - `MemoryBackend` - In-process maps, with failure injection for tests
//! - `FilesystemBackend` - Local directory tree
//! - `S3Backend` (feature: s3) - Amazon S3 or an S3-compatible endpoint
//!
//! Container lifecycle (create / reset) is driven by `crate::provision`,
//! never implicitly by a backend or store constructor.

mod filesystem;
mod memory;
#[cfg(feature = "s3")]
mod s3;

pub use filesystem::FilesystemBackend;
pub use memory::MemoryBackend;
#[cfg(feature = "s3")]
pub use s3::S3Backend;

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::{BackendType, StorageConfig};

/// Errors that can occur during blob backend operations.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Object not found: container={container}, key={key}")]
    NotFound { container: String, key: String },

    #[error("Container not found: {0}")]
    ContainerNotFound(String),

    #[error("Invalid name: {0}")]
    InvalidName(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend request failed: {0}")]
    Request(String),
}

impl BackendError {
    /// True when the requested object does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BackendError::NotFound { .. })
    }
}

/// Result type for backend operations.
pub type Result<T> = std::result::Result<T, BackendError>;

/// Backend implementation discriminator, used for logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Memory,
    Filesystem,
    S3,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Memory => write!(f, "memory"),
            BackendKind::Filesystem => write!(f, "filesystem"),
            BackendKind::S3 => write!(f, "s3"),
        }
    }
}

/// Durable key -> bytes object storage.
///
/// Implementations:
/// - `MemoryBackend`: in-process storage for tests and local runs
/// - `FilesystemBackend`: one directory per container
/// - `S3Backend`: one bucket per container
#[async_trait]
pub trait BlobBackend: Send + Sync {
    /// Read a whole object.
    ///
    /// Returns `BackendError::NotFound` when the key is absent.
    async fn get(&self, container: &str, key: &str) -> Result<Vec<u8>>;

    /// Write a whole object, replacing any previous content.
    async fn put(
        &self,
        container: &str,
        key: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<()>;

    /// Whether the container exists. A missing container is `Ok(false)`.
    async fn container_exists(&self, container: &str) -> Result<bool>;

    /// Create an empty container.
    async fn create_container(&self, container: &str) -> Result<()>;

    /// Delete every object in the container, then the container itself.
    async fn delete_all(&self, container: &str) -> Result<()>;

    /// Implementation kind for this backend.
    fn kind(&self) -> BackendKind;
}

// ============================================================================
// Factory
// ============================================================================

/// Initialize a blob backend based on configuration.
///
/// # Errors
///
/// Returns error if the backend cannot be constructed or the configured
/// type requires an unavailable feature.
pub async fn init_backend(
    config: &StorageConfig,
) -> std::result::Result<Arc<dyn BlobBackend>, Box<dyn std::error::Error>> {
    use tracing::info;

    match config.backend_type {
        BackendType::Memory => {
            info!("BlobBackend: memory");
            Ok(Arc::new(MemoryBackend::new()))
        }
        BackendType::Filesystem => {
            info!(
                path = %config.filesystem.base_path.display(),
                "BlobBackend: filesystem"
            );
            let backend = FilesystemBackend::new(&config.filesystem.base_path).await?;
            Ok(Arc::new(backend))
        }
        #[cfg(feature = "s3")]
        BackendType::S3 => {
            info!(
                region = ?config.s3.region,
                endpoint = ?config.s3.endpoint,
                "BlobBackend: s3"
            );
            let backend = match &config.s3.endpoint {
                Some(endpoint) => {
                    S3Backend::with_endpoint(endpoint, config.s3.region.as_deref()).await
                }
                None => S3Backend::new(config.s3.region.as_deref()).await,
            };
            Ok(Arc::new(backend))
        }
    }
}
