// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Graph Builder
//!
//! Turns flat address and location records into the group hierarchy:
//!
//! ```text
//! dc1 ──────────┐            high ──────────┐
//!               ▼                           ▼
//! web ──> web_dc1 [hosts]    web ──> web_high [hosts]
//!           ▲                          ▲
//! backend_dc1 (custom_parent)   backend_high (custom_parent)
//! ```
//!
//! Every location and every criticality becomes a top-level group. A record
//! with a custom group and a non-zero location lands its host in two composite
//! groups, `<group>_<location>` and `<group>_<criticality>`. Each composite is
//! a child of the bare `<group>` node and of its suffix group, and, when the
//! record names a parent, a child of `<parent>_<suffix>` as well.
//!
//! The builder performs no I/O. Online state comes from a caller-supplied
//! probe; a probe error aborts the build.

use std::collections::HashMap;
use tracing::{debug, trace, warn};

use crate::domain::{
    composite_name, is_reserved_group_name, AddressRecord, GroupRegistry, HostVarsTable,
    LocationRecord,
};
use crate::errors::{InventoryError, InventoryResult};
use crate::snapshot::InventorySnapshot;

/// phpIPAM tag id marking an address as under maintenance
pub const DEFAULT_MAINTENANCE_TAG: &str = "5";

/// Accumulates groups and host variables for one build
#[derive(Debug, Clone)]
pub struct GraphBuilder {
    registry: GroupRegistry,
    hostvars: HostVarsTable,
    locations: HashMap<i64, String>,
    maintenance_tag: String,
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphBuilder {
    pub fn new() -> Self {
        Self {
            registry: GroupRegistry::new(),
            hostvars: HostVarsTable::new(),
            locations: HashMap::new(),
            maintenance_tag: DEFAULT_MAINTENANCE_TAG.to_string(),
        }
    }

    pub fn with_maintenance_tag(mut self, tag: impl Into<String>) -> Self {
        self.maintenance_tag = tag.into();
        self
    }

    /// Run a complete build and fold the result into a snapshot
    pub fn build<F>(
        mut self,
        addresses: &[AddressRecord],
        locations: &[LocationRecord],
        fetch_online_state: F,
    ) -> InventoryResult<InventorySnapshot>
    where
        F: FnMut(&str) -> InventoryResult<i64>,
    {
        self.add_locations(locations)?;
        self.add_addresses(addresses, fetch_online_state)?;

        debug!(
            groups = self.registry.len(),
            hosts = self.hostvars.len(),
            "Inventory graph built"
        );
        Ok(self.finish())
    }

    /// Seed one top-level group per location and index locations by id
    pub fn add_locations(&mut self, locations: &[LocationRecord]) -> InventoryResult<()> {
        for location in locations {
            unreserved(&location.name)?;
            self.registry.ensure_group(&location.name);
            if let Some(id) = location.numeric_id() {
                self.locations.entry(id).or_insert_with(|| location.name.clone());
            }
        }
        Ok(())
    }

    pub fn add_addresses<F>(
        &mut self,
        addresses: &[AddressRecord],
        mut fetch_online_state: F,
    ) -> InventoryResult<()>
    where
        F: FnMut(&str) -> InventoryResult<i64>,
    {
        for address in addresses {
            self.add_address(address, &mut fetch_online_state)?;
        }
        Ok(())
    }

    /// Process one address record
    ///
    /// Locations must have been added first; a reference to an unknown
    /// location id is an [`InventoryError::UnresolvedLocation`]. A group
    /// name equal to `_meta` is an [`InventoryError::ReservedGroupName`].
    pub fn add_address<F>(
        &mut self,
        address: &AddressRecord,
        fetch_online_state: &mut F,
    ) -> InventoryResult<()>
    where
        F: FnMut(&str) -> InventoryResult<i64>,
    {
        let criticality = address.custom_criticality.to_lowercase();
        unreserved(&criticality)?;
        self.registry.ensure_group(&criticality);

        let (Some(group_base), Some(location_ref)) = (address.group_base(), address.location_ref())
        else {
            trace!(hostname = %address.hostname, "Address not grouped");
            return Ok(());
        };

        let location_name = address
            .location_id()
            .and_then(|id| self.locations.get(&id))
            .map(|name| name.to_lowercase())
            .ok_or_else(|| InventoryError::UnresolvedLocation {
                hostname: address.hostname.clone(),
                location: location_ref.to_string(),
            })?;

        let parent_base = address.custom_parent.as_deref();
        unreserved(group_base)?;
        for suffix in [location_name.as_str(), criticality.as_str()] {
            unreserved(&composite_name(group_base, suffix))?;
            if let Some(parent_base) = parent_base {
                unreserved(parent_base)?;
                unreserved(&composite_name(parent_base, suffix))?;
            }
        }

        let hostname = address.hostname.as_str();
        self.hostvars.set_ansible_host(hostname, address.ip.as_str());

        if address.is_in_maintenance(&self.maintenance_tag) {
            debug!(hostname, "Host in maintenance, marking enabled");
            self.hostvars.set_enabled(hostname, true);
        } else {
            let exit_code = fetch_online_state(&address.id)?;
            self.hostvars.set_online_state(hostname, exit_code);
        }

        self.link_group(group_base, parent_base, &location_name, hostname);
        self.link_group(group_base, parent_base, &criticality, hostname);

        if let Some(cname) = &address.custom_cname {
            self.hostvars.set_cname(hostname, cname.as_str());
        }
        if let Some(service) = &address.custom_service {
            self.hostvars.set_service(hostname, service.as_str());
        }

        Ok(())
    }

    /// Place `hostname` in `<group_base>_<suffix>` and wire up its parents
    fn link_group(
        &mut self,
        group_base: &str,
        parent_base: Option<&str>,
        suffix: &str,
        hostname: &str,
    ) {
        let composite = composite_name(group_base, suffix);
        if self.registry.ensure_leaf_group(&composite) {
            self.registry.add_child(group_base, &composite);
            self.registry.add_child(suffix, &composite);
        }
        self.registry.add_host(&composite, hostname);

        if let Some(parent_base) = parent_base {
            let composite_parent = composite_name(parent_base, suffix);
            if composite_parent == composite {
                warn!(group = %composite, "Group names itself as parent, ignoring");
                return;
            }
            if self.registry.ensure_leaf_group(&composite_parent) {
                self.registry.add_child(parent_base, &composite_parent);
                self.registry.add_child(suffix, &composite_parent);
            }
            self.registry.add_child(&composite_parent, &composite);
        }
    }

    pub fn registry(&self) -> &GroupRegistry {
        &self.registry
    }

    pub fn hostvars(&self) -> &HostVarsTable {
        &self.hostvars
    }

    pub fn finish(self) -> InventorySnapshot {
        InventorySnapshot::assemble(self.registry, self.hostvars)
    }
}

fn unreserved(name: &str) -> InventoryResult<()> {
    if is_reserved_group_name(name) {
        return Err(InventoryError::ReservedGroupName(name.to_string()));
    }
    Ok(())
}
