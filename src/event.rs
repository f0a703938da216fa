//! Domain event record.
//!
//! An aggregate's history is an ordered `Vec<Event>`. The position of an
//! event is its index in that sequence; it is not stored on the event.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Default schema version for newly created events.
pub const DEFAULT_EVENT_VERSION: u32 = 1;

/// One immutable domain occurrence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    /// Type discriminator (e.g. `"Created"`, `"Renamed"`).
    #[serde(rename = "type")]
    pub event_type: String,
    /// Schema version of this event type.
    #[serde(default = "default_version")]
    pub version: u32,
    /// Unique message id.
    pub id: Uuid,
    /// When the event was recorded.
    pub created_at: DateTime<Utc>,
    /// Opaque event body.
    #[serde(default)]
    pub payload: Value,
}

fn default_version() -> u32 {
    DEFAULT_EVENT_VERSION
}

impl Event {
    /// Create an event with a fresh id and the current time.
    pub fn new(event_type: impl Into<String>, payload: Value) -> Self {
        Self {
            event_type: event_type.into(),
            version: DEFAULT_EVENT_VERSION,
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            payload,
        }
    }

    /// Override the schema version.
    pub fn with_version(mut self, version: u32) -> Self {
        self.version = version;
        self
    }
}
