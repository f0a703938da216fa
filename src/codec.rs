//! Event sequence codecs.
//!
//! A codec turns a whole event sequence into one blob and back. The store
//! treats the bytes as opaque.

use thiserror::Error;

use crate::event::Event;

/// Errors raised while encoding or decoding an event sequence.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("JSON codec error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Serializer for complete event sequences.
///
/// Implementations must round-trip: `decode(encode(s)) == s` for every
/// sequence, including the empty one.
pub trait EventCodec: Send + Sync {
    /// Encode the full ordered sequence into a single blob.
    fn encode(&self, events: &[Event]) -> Result<Vec<u8>, CodecError>;

    /// Decode a blob produced by `encode`.
    fn decode(&self, bytes: &[u8]) -> Result<Vec<Event>, CodecError>;

    /// MIME type recorded alongside stored objects.
    fn content_type(&self) -> &'static str;
}

/// Stores a sequence as a UTF-8 JSON array of event objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

impl EventCodec for JsonCodec {
    fn encode(&self, events: &[Event]) -> Result<Vec<u8>, CodecError> {
        Ok(serde_json::to_vec(events)?)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Vec<Event>, CodecError> {
        Ok(serde_json::from_slice(bytes)?)
    }

    fn content_type(&self) -> &'static str {
        "application/json"
    }
}
