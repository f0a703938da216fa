//! EventStore trait definition.

use async_trait::async_trait;
use thiserror::Error;

use crate::backend::BackendError;
use crate::codec::CodecError;
use crate::event::Event;

/// Errors surfaced by event store operations.
///
/// A missing object on fetch is not an error; it reads as an empty sequence.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Blob backend error: {0}")]
    Backend(#[from] BackendError),

    #[error("Event encoding error: {0}")]
    Encoding(#[from] CodecError),

    #[error("Invalid aggregate id: {0:?}")]
    InvalidAggregateId(String),
}

/// Result type for event store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Interface for per-aggregate event sequence persistence.
///
/// The aggregate id is the storage key. Each call is one round trip to the
/// backing storage; implementations hold no cache and no locks.
///
/// Concurrent `persist` calls for the same aggregate race and the last write
/// wins. Callers that need write exclusivity must serialize per aggregate.
///
/// Implementations:
/// - `BlobEventStore`: one encoded object per aggregate in a blob backend
#[async_trait]
pub trait EventStore: Send + Sync {
    /// Retrieve the full ordered event sequence for an aggregate.
    ///
    /// Returns an empty sequence if nothing has been persisted under the id.
    async fn fetch(&self, aggregate_id: &str) -> Result<Vec<Event>>;

    /// Replace the stored sequence for an aggregate with `events`.
    ///
    /// An empty slice still creates or overwrites the stored object.
    async fn persist(&self, aggregate_id: &str, events: &[Event]) -> Result<()>;
}
