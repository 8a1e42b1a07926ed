// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Cache Staleness Policy

use chrono::{DateTime, Duration, TimeZone, Utc};
use phpipam_inventory::is_stale;
use proptest::prelude::*;

fn mod_time() -> impl Strategy<Value = DateTime<Utc>> {
    (1_500_000_000i64..2_000_000_000).prop_map(|secs| Utc.timestamp_opt(secs, 0).unwrap())
}

proptest! {
    /// Property: Fresh for the whole window, stale from its end onwards
    #[test]
    fn prop_staleness_is_monotonic(
        modified in mod_time(),
        expiration in 1u64..86_400,
        offset in 0i64..172_800,
    ) {
        let now = modified + Duration::seconds(offset);
        let stale = is_stale(false, true, Some(modified), now, expiration);

        prop_assert_eq!(stale, offset >= expiration as i64);
    }

    /// Property: Once stale, a later instant is never fresh again
    #[test]
    fn prop_stale_stays_stale(
        modified in mod_time(),
        expiration in 0u64..3_600,
        offset in 0i64..7_200,
        later in 0i64..7_200,
    ) {
        let now = modified + Duration::seconds(offset);
        if is_stale(false, true, Some(modified), now, expiration) {
            let after = now + Duration::seconds(later);
            prop_assert!(is_stale(false, true, Some(modified), after, expiration));
        }
    }

    /// Property: Forcing a refresh always rebuilds
    #[test]
    fn prop_force_refresh_overrides(
        exists in any::<bool>(),
        modified in proptest::option::of(mod_time()),
        now in mod_time(),
        expiration in any::<u64>(),
    ) {
        prop_assert!(is_stale(true, exists, modified, now, expiration));
    }

    /// Property: A missing cache is always stale
    #[test]
    fn prop_missing_cache_is_stale(
        modified in mod_time(),
        now in mod_time(),
        expiration in any::<u64>(),
    ) {
        prop_assert!(is_stale(false, false, Some(modified), now, expiration));
    }
}
