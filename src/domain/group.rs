// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Groups
//!
//! [`GroupRegistry`] is a single flat namespace of lower-cased group names.
//! Location groups, criticality groups, bare custom groups and composite
//! `<group>_<suffix>` groups all live side by side; when two sources produce
//! the same name they share one node.
//!
//! # Invariants
//!
//! - Names are lower-cased on entry
//! - An existing node is never replaced, only extended
//! - `children` and `hosts` never contain duplicates
//! - Nothing is removed or renamed once created

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A group as it appears in the inventory output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupNode {
    #[serde(default)]
    pub children: Vec<String>,

    /// Present only on groups that directly hold hosts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hosts: Option<Vec<String>>,
}

impl GroupNode {
    /// A group that only nests other groups
    pub fn bare() -> Self {
        Self::default()
    }

    /// A group that can hold hosts directly
    pub fn leaf() -> Self {
        Self {
            children: Vec::new(),
            hosts: Some(Vec::new()),
        }
    }

    pub fn has_child(&self, child: &str) -> bool {
        self.children.iter().any(|c| c == child)
    }

    pub fn has_host(&self, hostname: &str) -> bool {
        self.hosts
            .as_ref()
            .is_some_and(|hosts| hosts.iter().any(|h| h == hostname))
    }
}

/// Top-level inventory key holding host variables; never a group name
pub const RESERVED_GROUP_NAME: &str = "_meta";

/// Whether `name` would collide with the host variable section
pub fn is_reserved_group_name(name: &str) -> bool {
    group_name(name) == RESERVED_GROUP_NAME
}

/// Canonical form of a group name
pub fn group_name(name: &str) -> String {
    name.to_lowercase()
}

/// Name of the composite group scoping `base` by `suffix`
pub fn composite_name(base: &str, suffix: &str) -> String {
    group_name(&format!("{}_{}", base, suffix))
}

/// In-memory group store mutated during a build
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupRegistry {
    groups: BTreeMap<String, GroupNode>,
}

impl GroupRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a bare group if absent; returns whether it was created
    pub fn ensure_group(&mut self, name: &str) -> bool {
        let name = group_name(name);
        if self.groups.contains_key(&name) {
            return false;
        }
        self.groups.insert(name, GroupNode::bare());
        true
    }

    /// Create a host-holding group if absent; returns whether it was created
    pub fn ensure_leaf_group(&mut self, name: &str) -> bool {
        let name = group_name(name);
        if self.groups.contains_key(&name) {
            return false;
        }
        self.groups.insert(name, GroupNode::leaf());
        true
    }

    /// Link `child` under `parent`, creating `parent` bare if needed
    pub fn add_child(&mut self, parent: &str, child: &str) {
        let child = group_name(child);
        let node = self.groups.entry(group_name(parent)).or_default();
        if !node.has_child(&child) {
            node.children.push(child);
        }
    }

    /// Attach `hostname` to `group`, creating the group or its host list if needed
    pub fn add_host(&mut self, group: &str, hostname: &str) {
        let node = self
            .groups
            .entry(group_name(group))
            .or_insert_with(GroupNode::leaf);
        let hosts = node.hosts.get_or_insert_with(Vec::new);
        if !hosts.iter().any(|h| h == hostname) {
            hosts.push(hostname.to_string());
        }
    }

    pub fn get(&self, name: &str) -> Option<&GroupNode> {
        self.groups.get(&group_name(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.groups.contains_key(&group_name(name))
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &GroupNode)> {
        self.groups.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, GroupNode> {
        self.groups
    }
}
