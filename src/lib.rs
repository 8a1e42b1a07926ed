// Copyright (c) 2025 - Cowboy AI, Inc.
//! Ansible dynamic inventory built from phpIPAM
//!
//! Flat IPAM address and location records are folded into a group hierarchy
//! (location → criticality → custom group → parent group) with per-host
//! variables, and cached on disk between runs.
//!
//! - [`builder`] - the inventory graph builder
//! - [`staleness`] - when the cache must be rebuilt
//! - [`snapshot`] - the serialized inventory
//! - [`service`] - cache-or-rebuild orchestration over a [`source::IpamSource`]
//!   and a [`cache::CacheStore`]

pub mod builder;
pub mod cache;
pub mod config;
pub mod domain;
pub mod errors;
pub mod service;
pub mod snapshot;
pub mod source;
pub mod staleness;

// Re-export commonly used types
pub use builder::GraphBuilder;
pub use cache::{CacheStore, FileCache, MemoryCache};
pub use config::{InventoryConfig, InventorySettings, IpamConnection};
pub use domain::{AddressRecord, GroupNode, GroupRegistry, HostVars, LocationRecord};
pub use errors::{InventoryError, InventoryResult};
pub use service::InventoryService;
pub use snapshot::InventorySnapshot;
pub use source::IpamSource;
pub use staleness::{is_stale, CacheState, StalenessPolicy};
