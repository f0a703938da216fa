//! Event store implementations.

use std::sync::Arc;

use tracing::info;

use crate::backend::init_backend;
use crate::config::StorageConfig;
use crate::provision::provision;

mod blob;
mod event_store;

pub use blob::BlobEventStore;
pub use event_store::{EventStore, Result, StoreError};

/// Initialize an event store based on configuration.
///
/// Builds the configured blob backend, applies the provisioning policy
/// (`storage.provision`), then wraps the backend in a `BlobEventStore`.
pub async fn init_event_store(
    config: &StorageConfig,
) -> std::result::Result<Arc<dyn EventStore>, Box<dyn std::error::Error>> {
    let backend = init_backend(config).await?;

    provision(backend.as_ref(), &config.container, &config.provision).await?;

    info!(
        backend = %backend.kind(),
        container = %config.container,
        "EventStore: blob"
    );

    Ok(Arc::new(BlobEventStore::new(backend, config.container.clone())))
}
