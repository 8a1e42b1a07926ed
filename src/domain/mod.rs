// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Domain Models
//!
//! - [`AddressRecord`] / [`LocationRecord`] - flat IPAM input records
//! - [`GroupRegistry`] / [`GroupNode`] - the group hierarchy under construction
//! - [`HostVarsTable`] / [`HostVars`] - per-host variables for `_meta.hostvars`

pub mod group;
pub mod hostvars;
pub mod records;

pub use group::{
    composite_name, group_name, is_reserved_group_name, GroupNode, GroupRegistry,
    RESERVED_GROUP_NAME,
};
pub use hostvars::{HostStatus, HostVars, HostVarsTable};
pub use records::{AddressRecord, LocationRecord};
