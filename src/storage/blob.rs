//! Event store backed by a blob backend.
//!
//! Layout: one object per aggregate, keyed by the aggregate id, holding the
//! whole encoded sequence.
//! ```text
//! {container}/{aggregate_id} -> codec.encode(events)
//! ```

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use super::{EventStore, Result, StoreError};
use crate::backend::BlobBackend;
use crate::codec::{EventCodec, JsonCodec};
use crate::event::Event;

/// Event store that keeps each aggregate's sequence as a single blob.
///
/// Assumes its container already exists; see `crate::provision`.
pub struct BlobEventStore {
    backend: Arc<dyn BlobBackend>,
    container: String,
    codec: Arc<dyn EventCodec>,
}

impl BlobEventStore {
    /// Create a store over `container` using the JSON codec.
    pub fn new(backend: Arc<dyn BlobBackend>, container: impl Into<String>) -> Self {
        Self::with_codec(backend, container, Arc::new(JsonCodec))
    }

    /// Create a store with an explicit codec.
    pub fn with_codec(
        backend: Arc<dyn BlobBackend>,
        container: impl Into<String>,
        codec: Arc<dyn EventCodec>,
    ) -> Self {
        Self {
            backend,
            container: container.into(),
            codec,
        }
    }

    /// Container this store reads and writes.
    pub fn container(&self) -> &str {
        &self.container
    }

    fn validate(aggregate_id: &str) -> Result<()> {
        if aggregate_id.is_empty() {
            return Err(StoreError::InvalidAggregateId(aggregate_id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EventStore for BlobEventStore {
    async fn fetch(&self, aggregate_id: &str) -> Result<Vec<Event>> {
        Self::validate(aggregate_id)?;

        let bytes = match self.backend.get(&self.container, aggregate_id).await {
            Ok(bytes) => bytes,
            Err(e) if e.is_not_found() => {
                debug!(
                    container = %self.container,
                    aggregate_id,
                    "No stored events, returning empty sequence"
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        let events = self.codec.decode(&bytes)?;

        debug!(
            container = %self.container,
            aggregate_id,
            count = events.len(),
            size = bytes.len(),
            "Fetched events"
        );
        Ok(events)
    }

    async fn persist(&self, aggregate_id: &str, events: &[Event]) -> Result<()> {
        Self::validate(aggregate_id)?;

        let bytes = self.codec.encode(events)?;
        let size = bytes.len();

        self.backend
            .put(
                &self.container,
                aggregate_id,
                bytes,
                self.codec.content_type(),
            )
            .await?;

        debug!(
            container = %self.container,
            aggregate_id,
            count = events.len(),
            size,
            "Persisted events"
        );
        Ok(())
    }
}
