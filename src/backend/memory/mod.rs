//! In-memory blob backend.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::{BackendError, BackendKind, BlobBackend, Result};

type Objects = HashMap<String, Vec<u8>>;

/// Blob backend that keeps containers and objects in process memory.
///
/// Failure injection makes `get` / `put` return `BackendError::Request`
/// so callers can exercise their error paths.
#[derive(Default)]
pub struct MemoryBackend {
    containers: RwLock<HashMap<String, Objects>>,
    fail_on_get: RwLock<bool>,
    fail_on_put: RwLock<bool>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend with one empty container already present.
    pub fn with_container(container: &str) -> Self {
        let mut containers = HashMap::new();
        containers.insert(container.to_string(), Objects::new());
        Self {
            containers: RwLock::new(containers),
            ..Default::default()
        }
    }

    pub async fn set_fail_on_get(&self, fail: bool) {
        *self.fail_on_get.write().await = fail;
    }

    pub async fn set_fail_on_put(&self, fail: bool) {
        *self.fail_on_put.write().await = fail;
    }

    /// Number of objects stored in a container (0 if it does not exist).
    pub async fn object_count(&self, container: &str) -> usize {
        self.containers
            .read()
            .await
            .get(container)
            .map(|objects| objects.len())
            .unwrap_or_default()
    }
}

#[async_trait]
impl BlobBackend for MemoryBackend {
    async fn get(&self, container: &str, key: &str) -> Result<Vec<u8>> {
        if *self.fail_on_get.read().await {
            return Err(BackendError::Request(format!(
                "injected get failure for {}/{}",
                container, key
            )));
        }

        let containers = self.containers.read().await;
        let objects = containers
            .get(container)
            .ok_or_else(|| BackendError::ContainerNotFound(container.to_string()))?;

        objects
            .get(key)
            .cloned()
            .ok_or_else(|| BackendError::NotFound {
                container: container.to_string(),
                key: key.to_string(),
            })
    }

    async fn put(
        &self,
        container: &str,
        key: &str,
        bytes: Vec<u8>,
        _content_type: &str,
    ) -> Result<()> {
        if *self.fail_on_put.read().await {
            return Err(BackendError::Request(format!(
                "injected put failure for {}/{}",
                container, key
            )));
        }

        let mut containers = self.containers.write().await;
        let objects = containers
            .get_mut(container)
            .ok_or_else(|| BackendError::ContainerNotFound(container.to_string()))?;

        debug!(container, key, size = bytes.len(), "Stored object in memory");
        objects.insert(key.to_string(), bytes);
        Ok(())
    }

    async fn container_exists(&self, container: &str) -> Result<bool> {
        Ok(self.containers.read().await.contains_key(container))
    }

    async fn create_container(&self, container: &str) -> Result<()> {
        self.containers
            .write()
            .await
            .entry(container.to_string())
            .or_default();
        Ok(())
    }

    async fn delete_all(&self, container: &str) -> Result<()> {
        self.containers
            .write()
            .await
            .remove(container)
            .map(|_| ())
            .ok_or_else(|| BackendError::ContainerNotFound(container.to_string()))
    }

    fn kind(&self) -> BackendKind {
        BackendKind::Memory
    }
}
