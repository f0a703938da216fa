//! eventz-store - per-aggregate event persistence on object storage.
//!
//! Each aggregate's complete, ordered event sequence is encoded into one
//! object and stored under the aggregate id in a blob backend container.
//!
//! - **event**: the `Event` record
//! - **codec**: `EventCodec` trait and the JSON codec
//! - **backend**: `BlobBackend` trait with memory, filesystem and S3 backends
//! - **storage**: `EventStore` trait (fetch / persist) and `BlobEventStore`
//! - **provision**: explicit container create / reset operations
//! - **config**: YAML + environment configuration

pub mod backend;
pub mod codec;
pub mod config;
pub mod event;
pub mod provision;
pub mod storage;
pub mod utils;

pub use codec::{CodecError, EventCodec, JsonCodec};
pub use event::Event;
pub use storage::{BlobEventStore, EventStore, StoreError};
