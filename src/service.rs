// Copyright (c) 2025 - Cowboy AI, Inc.
//! Inventory Service
//!
//! Orchestrates one inventory run:
//!
//! ```text
//! list ─> staleness check ─┬─ fresh ─> cache read ─> snapshot
//!                          │             │ (unreadable / corrupt)
//!                          └─ stale ─────┴─> fetch ─> probe ─> build ─> cache write ─> snapshot
//! ```
//!
//! Cache failures never fail a run: an unreadable cache falls back to a
//! rebuild, and a failed cache write still returns the fresh snapshot.
//! Upstream and build failures abort without touching the cache.

use chrono::{DateTime, Utc};
use futures::{stream, StreamExt, TryStreamExt};
use std::collections::{BTreeSet, HashMap};
use tracing::{debug, info, warn};

use crate::builder::GraphBuilder;
use crate::cache::CacheStore;
use crate::config::InventorySettings;
use crate::domain::AddressRecord;
use crate::errors::{InventoryError, InventoryResult};
use crate::snapshot::InventorySnapshot;
use crate::source::IpamSource;
use crate::staleness::StalenessPolicy;

/// Owns the collaborators for one inventory run
pub struct InventoryService<S, C> {
    source: S,
    cache: C,
    settings: InventorySettings,
}

impl<S, C> InventoryService<S, C>
where
    S: IpamSource,
    C: CacheStore,
{
    pub fn new(source: S, cache: C, settings: InventorySettings) -> Self {
        Self {
            source,
            cache,
            settings,
        }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn settings(&self) -> &InventorySettings {
        &self.settings
    }

    /// Full inventory, served from cache when fresh enough
    pub async fn list(&self, force_refresh: bool) -> InventoryResult<InventorySnapshot> {
        self.list_at(force_refresh, Utc::now()).await
    }

    /// [`list`](Self::list) evaluated at a given instant
    pub async fn list_at(
        &self,
        force_refresh: bool,
        now: DateTime<Utc>,
    ) -> InventoryResult<InventorySnapshot> {
        let policy = StalenessPolicy::new(self.settings.cache_expiration_secs)
            .with_force_refresh(force_refresh);

        let stale = match self.cache.state() {
            Ok(state) => policy.is_stale(&state, now),
            Err(e) => {
                warn!("Cannot inspect inventory cache, rebuilding: {}", e);
                true
            }
        };

        if !stale {
            match self.load_cached() {
                Ok(snapshot) => {
                    debug!("Serving inventory from cache");
                    return Ok(snapshot);
                }
                Err(e) => warn!("Inventory cache unusable, rebuilding: {}", e),
            }
        }

        let snapshot = self.rebuild().await?;
        self.persist(&snapshot);
        Ok(snapshot)
    }

    /// Fetch everything from the source and build a fresh snapshot
    pub async fn rebuild(&self) -> InventoryResult<InventorySnapshot> {
        info!("Rebuilding inventory from {}", self.source.name());

        let addresses = self.source.addresses().await?;
        let locations = self.source.locations().await?;
        let online_states = self.probe_online_states(&addresses).await?;

        let snapshot = GraphBuilder::new()
            .with_maintenance_tag(self.settings.maintenance_tag.as_str())
            .build(&addresses, &locations, |id| {
                online_states.get(id).copied().ok_or_else(|| {
                    InventoryError::UpstreamFetch(format!("no online state for address {}", id))
                })
            })?;

        info!(
            groups = snapshot.groups().len(),
            hosts = snapshot.meta().hostvars.len(),
            "Inventory rebuilt"
        );
        Ok(snapshot)
    }

    /// Probe every address that needs it, bounded by `probe_concurrency`
    async fn probe_online_states(
        &self,
        addresses: &[AddressRecord],
    ) -> InventoryResult<HashMap<String, i64>> {
        let ids: BTreeSet<&str> = addresses
            .iter()
            .filter(|a| a.needs_online_probe(&self.settings.maintenance_tag))
            .map(|a| a.id.as_str())
            .collect();

        debug!(count = ids.len(), "Probing online state");

        let source = &self.source;
        stream::iter(ids)
            .map(|id| async move {
                let exit_code = source.online_state(id).await?;
                Ok::<_, InventoryError>((id.to_string(), exit_code))
            })
            .buffer_unordered(self.settings.probe_concurrency.max(1))
            .try_collect()
            .await
    }

    fn load_cached(&self) -> InventoryResult<InventorySnapshot> {
        let bytes = self
            .cache
            .read()?
            .ok_or_else(|| InventoryError::CacheIo("cache disappeared".to_string()))?;
        InventorySnapshot::from_slice(&bytes)
    }

    fn persist(&self, snapshot: &InventorySnapshot) {
        let written = snapshot.to_vec().and_then(|bytes| self.cache.write(&bytes));
        if let Err(e) = written {
            warn!("Failed to write inventory cache: {}", e);
        }
    }
}
