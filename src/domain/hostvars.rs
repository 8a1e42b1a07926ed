// Copyright (c) 2025 - Cowboy AI, Inc.
//! Per-Host Variables
//!
//! Host variables are merge-only: each setter overwrites exactly the field it
//! names and never removes anything else, so the four writes a build performs
//! for a host commute.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Reachability status exposed to playbooks as `status.enabled`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostStatus {
    pub enabled: bool,
}

/// Variables attached to one host under `_meta.hostvars`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostVars {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ansible_host: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<HostStatus>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cname: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<String>,
}

impl HostVars {
    /// Whether the host was reachable (or in maintenance) at build time
    pub fn is_enabled(&self) -> bool {
        self.status.map(|s| s.enabled).unwrap_or(false)
    }
}

/// Host variable table keyed by hostname
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostVarsTable {
    hosts: BTreeMap<String, HostVars>,
}

impl HostVarsTable {
    pub fn new() -> Self {
        Self::default()
    }

    fn entry(&mut self, hostname: &str) -> &mut HostVars {
        self.hosts.entry(hostname.to_string()).or_default()
    }

    pub fn set_ansible_host(&mut self, hostname: &str, ip: impl Into<String>) {
        self.entry(hostname).ansible_host = Some(ip.into());
    }

    pub fn set_enabled(&mut self, hostname: &str, enabled: bool) {
        self.entry(hostname).status = Some(HostStatus { enabled });
    }

    /// Record the online state from a ping exit code (`0` means reachable)
    pub fn set_online_state(&mut self, hostname: &str, exit_code: i64) {
        self.set_enabled(hostname, exit_code == 0);
    }

    pub fn set_cname(&mut self, hostname: &str, cname: impl Into<String>) {
        self.entry(hostname).cname = Some(cname.into());
    }

    pub fn set_service(&mut self, hostname: &str, service: impl Into<String>) {
        self.entry(hostname).service = Some(service.into());
    }

    pub fn get(&self, hostname: &str) -> Option<&HostVars> {
        self.hosts.get(hostname)
    }

    pub fn len(&self) -> usize {
        self.hosts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hosts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &HostVars)> {
        self.hosts.iter()
    }

    pub fn into_inner(self) -> BTreeMap<String, HostVars> {
        self.hosts
    }
}
