//! Container provisioning.
//!
//! Creating and resetting the backing container is an administrative step,
//! kept apart from `EventStore` so that constructing a store never touches
//! stored data. Run it once at deploy time, from `init_event_store` per
//! `ProvisionConfig`, or from `eventz-admin`.

use tracing::{info, warn};

use crate::backend::{BlobBackend, Result};
use crate::config::ProvisionConfig;

/// Create the container if it does not exist.
///
/// Returns `true` if the container was created.
pub async fn ensure_container(backend: &dyn BlobBackend, container: &str) -> Result<bool> {
    if backend.container_exists(container).await? {
        return Ok(false);
    }

    backend.create_container(container).await?;
    info!(backend = %backend.kind(), container, "Created container");
    Ok(true)
}

/// Delete every stored object and recreate the container empty.
///
/// Destroys all event sequences in the container.
pub async fn reset_container(backend: &dyn BlobBackend, container: &str) -> Result<()> {
    warn!(
        backend = %backend.kind(),
        container,
        "Resetting container, all stored events will be deleted"
    );

    if backend.container_exists(container).await? {
        backend.delete_all(container).await?;
    }
    backend.create_container(container).await
}

/// Apply a provisioning policy.
///
/// `reset_on_startup` takes precedence over `ensure_container`.
pub async fn provision(
    backend: &dyn BlobBackend,
    container: &str,
    config: &ProvisionConfig,
) -> Result<()> {
    if config.reset_on_startup {
        reset_container(backend, container).await
    } else if config.ensure_container {
        ensure_container(backend, container).await.map(|_| ())
    } else {
        Ok(())
    }
}
