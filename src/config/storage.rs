//! Storage configuration types.

use std::path::PathBuf;

use serde::Deserialize;

/// Default container (bucket) name.
pub const DEFAULT_CONTAINER: &str = "eventz-events";

/// Blob backend type discriminator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// In-process storage; contents are lost on exit.
    Memory,
    /// Filesystem-based storage (local or mounted).
    #[default]
    Filesystem,
    /// Amazon S3 or S3-compatible storage (requires `s3` feature).
    #[cfg(feature = "s3")]
    S3,
}

/// Storage configuration (discriminated union).
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Blob backend type.
    #[serde(rename = "type")]
    pub backend_type: BackendType,
    /// Container holding one object per aggregate.
    pub container: String,
    /// Filesystem backend configuration.
    pub filesystem: FilesystemBackendConfig,
    /// S3 backend configuration (requires `s3` feature).
    #[cfg(feature = "s3")]
    pub s3: S3BackendConfig,
    /// Container provisioning policy applied by `init_event_store`.
    pub provision: ProvisionConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend_type: BackendType::default(),
            container: DEFAULT_CONTAINER.to_string(),
            filesystem: FilesystemBackendConfig::default(),
            #[cfg(feature = "s3")]
            s3: S3BackendConfig::default(),
            provision: ProvisionConfig::default(),
        }
    }
}

/// Filesystem backend configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FilesystemBackendConfig {
    /// Base directory; each container is a subdirectory.
    pub base_path: PathBuf,
}

impl Default for FilesystemBackendConfig {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from("/var/eventz/blobs"),
        }
    }
}

/// S3 backend configuration.
#[cfg(feature = "s3")]
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct S3BackendConfig {
    /// AWS region; also used as the bucket LocationConstraint.
    pub region: Option<String>,
    /// Custom endpoint URL (for S3-compatible services like MinIO).
    pub endpoint: Option<String>,
}

/// Container provisioning policy.
///
/// `reset_on_startup` destroys all stored events. It is meant for tests and
/// ephemeral environments and is off by default.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ProvisionConfig {
    /// Create the container if it does not exist.
    pub ensure_container: bool,
    /// Delete and recreate the container before use.
    pub reset_on_startup: bool,
}

impl Default for ProvisionConfig {
    fn default() -> Self {
        Self {
            ensure_container: true,
            reset_on_startup: false,
        }
    }
}
