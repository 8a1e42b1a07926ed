// Copyright (c) 2025 - Cowboy AI, Inc.
//! Cache Staleness Policy
//!
//! Pure decision of whether a cached inventory can be served or must be
//! rebuilt. Rules, in order:
//!
//! 1. A forced refresh is always stale
//! 2. A missing or zero-length cache is stale
//! 3. `modified + expiration > now` is fresh
//! 4. Anything else is stale

use chrono::{DateTime, Duration, Utc};

/// What is known about the cache blob at decision time
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheState {
    pub exists: bool,
    pub size: u64,
    pub modified: Option<DateTime<Utc>>,
}

impl CacheState {
    pub fn missing() -> Self {
        Self::default()
    }

    pub fn present(size: u64, modified: DateTime<Utc>) -> Self {
        Self {
            exists: true,
            size,
            modified: Some(modified),
        }
    }

    /// Present and non-empty
    pub fn is_usable(&self) -> bool {
        self.exists && self.size > 0
    }
}

/// Whether a cache with the given properties must be rebuilt
///
/// `cache_exists` must already account for a zero-length blob. An existing
/// cache with no known modification time is stale.
pub fn is_stale(
    force_refresh: bool,
    cache_exists: bool,
    cache_mod_time: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
    expiration_secs: u64,
) -> bool {
    if force_refresh || !cache_exists {
        return true;
    }

    let Some(modified) = cache_mod_time else {
        return true;
    };

    // An expiration too large to represent never lapses
    let expires_at = i64::try_from(expiration_secs)
        .ok()
        .and_then(Duration::try_seconds)
        .and_then(|window| modified.checked_add_signed(window));

    match expires_at {
        Some(expires_at) => expires_at <= now,
        None => false,
    }
}

/// Expiration window plus the force-refresh switch for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StalenessPolicy {
    pub expiration_secs: u64,
    pub force_refresh: bool,
}

impl StalenessPolicy {
    pub fn new(expiration_secs: u64) -> Self {
        Self {
            expiration_secs,
            force_refresh: false,
        }
    }

    pub fn with_force_refresh(mut self, force_refresh: bool) -> Self {
        self.force_refresh = force_refresh;
        self
    }

    pub fn is_stale(&self, cache: &CacheState, now: DateTime<Utc>) -> bool {
        is_stale(
            self.force_refresh,
            cache.is_usable(),
            cache.modified,
            now,
            self.expiration_secs,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use test_case::test_case;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    #[test_case(0, false ; "just written")]
    #[test_case(599, false ; "one second before expiry")]
    #[test_case(600, true ; "at expiry")]
    #[test_case(3600, true ; "long expired")]
    fn test_expiration_window(elapsed: i64, expected: bool) {
        assert_eq!(is_stale(false, true, Some(at(0)), at(elapsed), 600), expected);
    }

    #[test]
    fn test_force_refresh_wins() {
        assert!(is_stale(true, true, Some(at(0)), at(0), 600));
    }

    #[test]
    fn test_missing_cache_is_stale() {
        assert!(is_stale(false, false, Some(at(0)), at(0), 600));
        assert!(is_stale(false, true, None, at(0), 600));
    }

    #[test]
    fn test_zero_expiration() {
        assert!(is_stale(false, true, Some(at(0)), at(0), 0));
        assert!(!is_stale(false, true, Some(at(1)), at(0), 0));
    }

    #[test]
    fn test_unrepresentable_expiration_never_lapses() {
        assert!(!is_stale(false, true, Some(at(0)), at(10_000_000), u64::MAX));
    }

    #[test]
    fn test_policy_treats_empty_blob_as_missing() {
        let policy = StalenessPolicy::new(600);
        assert!(policy.is_stale(&CacheState::present(0, at(0)), at(1)));
        assert!(!policy.is_stale(&CacheState::present(12, at(0)), at(1)));
        assert!(policy.is_stale(&CacheState::missing(), at(1)));
        assert!(policy
            .with_force_refresh(true)
            .is_stale(&CacheState::present(12, at(0)), at(1)));
    }
}
