// Copyright (c) 2025 - Cowboy AI, Inc.
//! Test Fixtures for phpipam-inventory
//!
//! Deterministic IPAM records and an in-memory [`IpamSource`] for builder and
//! service tests. Timestamps are fixed constants so staleness decisions are
//! reproducible.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use phpipam_inventory::{AddressRecord, InventoryError, InventoryResult, IpamSource, LocationRecord};

// Fixed test timestamp (2026-01-19T12:00:00Z)
pub const FIXED_TIMESTAMP: &str = "2026-01-19T12:00:00Z";

/// Parse the fixed timestamp
pub fn fixed_timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(FIXED_TIMESTAMP)
        .expect("Invalid timestamp in test fixture")
        .with_timezone(&Utc)
}

pub fn location(id: &str, name: &str) -> LocationRecord {
    LocationRecord::new(id, name)
}

/// A participating address record, online unless tagged otherwise
pub fn address(id: &str, hostname: &str, ip: &str) -> AddressRecord {
    AddressRecord {
        id: id.to_string(),
        hostname: hostname.to_string(),
        ip: ip.to_string(),
        custom_criticality: "high".to_string(),
        custom_group: Some("web".to_string()),
        location: Some("1".to_string()),
        tag: "0".to_string(),
        ..Default::default()
    }
}

/// The `h1` / `DC1` record used throughout the scenario tests
pub fn web_h1() -> AddressRecord {
    address("42", "h1", "10.0.0.5")
}

pub fn dc1() -> LocationRecord {
    location("1", "DC1")
}

/// Canned IPAM data served from memory
#[derive(Default)]
pub struct StaticSource {
    pub addresses: Vec<AddressRecord>,
    pub locations: Vec<LocationRecord>,
    pub exit_codes: HashMap<String, i64>,
    pub fail_fetch: bool,
    pub probes: AtomicUsize,
    pub fetches: AtomicUsize,
}

impl StaticSource {
    pub fn new(addresses: Vec<AddressRecord>, locations: Vec<LocationRecord>) -> Self {
        Self {
            addresses,
            locations,
            ..Default::default()
        }
    }

    pub fn with_exit_code(mut self, id: &str, code: i64) -> Self {
        self.exit_codes.insert(id.to_string(), code);
        self
    }

    pub fn failing() -> Self {
        Self {
            fail_fetch: true,
            ..Default::default()
        }
    }

    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }

    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IpamSource for StaticSource {
    async fn addresses(&self) -> InventoryResult<Vec<AddressRecord>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.fail_fetch {
            return Err(InventoryError::UpstreamFetch("connection refused".to_string()));
        }
        Ok(self.addresses.clone())
    }

    async fn locations(&self) -> InventoryResult<Vec<LocationRecord>> {
        Ok(self.locations.clone())
    }

    async fn online_state(&self, address_id: &str) -> InventoryResult<i64> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        self.exit_codes
            .get(address_id)
            .copied()
            .ok_or_else(|| InventoryError::UpstreamFetch(format!("ping {} timed out", address_id)))
    }

    fn name(&self) -> &str {
        "static"
    }
}
