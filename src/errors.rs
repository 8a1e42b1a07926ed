//! Error types for inventory operations

use thiserror::Error;

/// Errors that can occur while building or serving the inventory
#[derive(Debug, Error)]
pub enum InventoryError {
    /// Authentication or data retrieval against the IPAM failed
    #[error("IPAM fetch error: {0}")]
    UpstreamFetch(String),

    /// An address references a location id with no matching location record
    #[error("Address '{hostname}' references unknown location id {location}")]
    UnresolvedLocation {
        /// Hostname of the offending address record
        hostname: String,
        /// Location id that could not be resolved
        location: String,
    },

    /// A location or group name collides with the `_meta` section
    #[error("Group name '{0}' is reserved for host variables")]
    ReservedGroupName(String),

    /// Cache file could not be read or written
    #[error("Cache I/O error: {0}")]
    CacheIo(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for inventory operations
pub type InventoryResult<T> = Result<T, InventoryError>;

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Serialization(err.to_string())
    }
}
