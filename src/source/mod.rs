// Copyright (c) 2025 - Cowboy AI, Inc.
//! IPAM Data Sources
//!
//! [`IpamSource`] is the seam between the inventory and the system of record.
//! Implementations return fully materialized collections; the builder never
//! talks to the network itself.

use async_trait::async_trait;

use crate::domain::{AddressRecord, LocationRecord};
use crate::errors::InventoryResult;

#[cfg(feature = "phpipam")]
pub mod phpipam;

#[cfg(feature = "phpipam")]
pub use phpipam::PhpIpamClient;

/// Read access to address, location and reachability data
#[async_trait]
pub trait IpamSource: Send + Sync {
    /// All address records
    async fn addresses(&self) -> InventoryResult<Vec<AddressRecord>>;

    /// All location records
    async fn locations(&self) -> InventoryResult<Vec<LocationRecord>>;

    /// Ping exit code for one address (`0` means reachable)
    async fn online_state(&self, address_id: &str) -> InventoryResult<i64>;

    /// Name of this source, for logging
    fn name(&self) -> &str;
}
