// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Configuration
//!
//! Loaded from the environment:
//!
//! | Variable                 | Meaning                              | Default                        |
//! |--------------------------|--------------------------------------|--------------------------------|
//! | `IPAM_ADDR`              | phpIPAM API base URL                 | required                       |
//! | `IPAM_API_USER`          | phpIPAM application id               | required                       |
//! | `IPAM_USER`              | API user name                        | required                       |
//! | `IPAM_PASS`              | API password                         | required                       |
//! | `IPAM_CACHE`             | cache expiration in seconds          | `600`                          |
//! | `IPAM_CACHE_PATH`        | cache file                           | `/tmp/ansible-inventory.cache` |
//! | `IPAM_TIMEOUT`           | HTTP request timeout in seconds      | `30`                           |
//! | `IPAM_PROBE_CONCURRENCY` | parallel online-state probes         | `8`                            |
//! | `IPAM_MAINTENANCE_TAG`   | tag id marking maintenance mode      | `5`                            |

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

use crate::builder::DEFAULT_MAINTENANCE_TAG;
use crate::cache::DEFAULT_CACHE_PATH;
use crate::errors::{InventoryError, InventoryResult};

/// Connection settings for the phpIPAM REST API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IpamConnection {
    /// API base URL (e.g., "https://ipam.example.com/api/")
    pub base_url: String,

    /// Application id configured in phpIPAM
    pub app_id: String,

    pub username: String,

    #[serde(skip_serializing)]
    pub password: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

fn default_timeout() -> u64 {
    30
}

/// Build and cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySettings {
    #[serde(default = "default_cache_path")]
    pub cache_path: PathBuf,

    #[serde(default = "default_cache_expiration")]
    pub cache_expiration_secs: u64,

    #[serde(default = "default_maintenance_tag")]
    pub maintenance_tag: String,

    #[serde(default = "default_probe_concurrency")]
    pub probe_concurrency: usize,
}

fn default_cache_path() -> PathBuf {
    PathBuf::from(DEFAULT_CACHE_PATH)
}

fn default_cache_expiration() -> u64 {
    600
}

fn default_maintenance_tag() -> String {
    DEFAULT_MAINTENANCE_TAG.to_string()
}

fn default_probe_concurrency() -> usize {
    8
}

impl Default for InventorySettings {
    fn default() -> Self {
        Self {
            cache_path: default_cache_path(),
            cache_expiration_secs: default_cache_expiration(),
            maintenance_tag: default_maintenance_tag(),
            probe_concurrency: default_probe_concurrency(),
        }
    }
}

/// Full configuration for one inventory run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryConfig {
    pub connection: IpamConnection,

    #[serde(default)]
    pub settings: InventorySettings,
}

impl InventoryConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> InventoryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> InventoryResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.is_empty())
                .ok_or_else(|| InventoryError::Configuration(format!("{} not set", key)))
        };

        let connection = IpamConnection {
            base_url: required("IPAM_ADDR")?,
            app_id: required("IPAM_API_USER")?,
            username: required("IPAM_USER")?,
            password: required("IPAM_PASS")?,
            timeout_secs: parse_or(&lookup, "IPAM_TIMEOUT", default_timeout())?,
        };

        let settings = InventorySettings {
            cache_path: lookup("IPAM_CACHE_PATH")
                .filter(|v| !v.is_empty())
                .map(PathBuf::from)
                .unwrap_or_else(default_cache_path),
            cache_expiration_secs: parse_or(&lookup, "IPAM_CACHE", default_cache_expiration())?,
            maintenance_tag: lookup("IPAM_MAINTENANCE_TAG")
                .filter(|v| !v.is_empty())
                .unwrap_or_else(default_maintenance_tag),
            probe_concurrency: parse_or(
                &lookup,
                "IPAM_PROBE_CONCURRENCY",
                default_probe_concurrency(),
            )?
            .max(1),
        };

        Ok(Self {
            connection,
            settings,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> InventoryResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw.trim().parse().map_err(|e| {
            InventoryError::Configuration(format!("{} has invalid value '{}': {}", key, raw, e))
        }),
        None => Ok(default),
    }
}
