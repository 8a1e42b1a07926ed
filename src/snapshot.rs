// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Snapshot
//!
//! The read-only result of one build, or of one cache load. Serializes to the
//! dynamic inventory JSON shape:
//!
//! ```text
//! {
//!   "_meta": { "hostvars": { "<host>": { "ansible_host": ..., "status": { "enabled": ... } } } },
//!   "<group>": { "children": [...], "hosts": [...] },
//!   ...
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::{GroupNode, GroupRegistry, HostVars, HostVarsTable};
use crate::errors::InventoryResult;

/// The `_meta` block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryMeta {
    #[serde(default)]
    pub hostvars: BTreeMap<String, HostVars>,
}

/// A complete inventory, ready to print or persist
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    #[serde(rename = "_meta", default)]
    meta: InventoryMeta,

    #[serde(flatten)]
    groups: BTreeMap<String, GroupNode>,
}

impl InventorySnapshot {
    /// `{"_meta": {"hostvars": {}}}`, served for single-host queries
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fold a finished registry and host table into a snapshot
    pub fn assemble(registry: GroupRegistry, hostvars: HostVarsTable) -> Self {
        Self {
            meta: InventoryMeta {
                hostvars: hostvars.into_inner(),
            },
            groups: registry.into_inner(),
        }
    }

    pub fn group(&self, name: &str) -> Option<&GroupNode> {
        self.groups.get(name)
    }

    pub fn groups(&self) -> &BTreeMap<String, GroupNode> {
        &self.groups
    }

    pub fn hostvars(&self, hostname: &str) -> Option<&HostVars> {
        self.meta.hostvars.get(hostname)
    }

    pub fn meta(&self) -> &InventoryMeta {
        &self.meta
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.meta.hostvars.is_empty()
    }

    pub fn to_json(&self) -> InventoryResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn to_vec(&self) -> InventoryResult<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }

    pub fn from_slice(bytes: &[u8]) -> InventoryResult<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}
