// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Inventory Graph Builder

use std::collections::HashSet;

use phpipam_inventory::{AddressRecord, GraphBuilder, InventoryResult, LocationRecord};
use proptest::prelude::*;

use crate::fixtures::location;

fn locations() -> Vec<LocationRecord> {
    vec![location("1", "DC1"), location("2", "Lab")]
}

fn online(_: &str) -> InventoryResult<i64> {
    Ok(0)
}

/// Records drawn from small name pools so collisions are common
fn address_record() -> impl Strategy<Value = AddressRecord> {
    (
        0u32..20,
        prop::sample::select(vec!["High", "low", "DC1"]),
        proptest::option::of(prop::sample::select(vec!["web", "db", "Cache", ""])),
        proptest::option::of(prop::sample::select(vec!["0", "1", "2"])),
        proptest::option::of(prop::sample::select(vec!["backend", "web"])),
        prop::sample::select(vec!["0", "5"]),
    )
        .prop_map(|(n, criticality, group, location, parent, tag)| AddressRecord {
            id: n.to_string(),
            hostname: format!("host{}", n % 8),
            ip: format!("10.0.0.{}", n),
            custom_criticality: criticality.to_string(),
            custom_group: group.map(str::to_string),
            location: location.map(str::to_string),
            custom_parent: parent.map(str::to_string),
            tag: tag.to_string(),
            ..Default::default()
        })
}

fn address_records() -> impl Strategy<Value = Vec<AddressRecord>> {
    prop::collection::vec(address_record(), 0..30)
}

proptest! {
    /// Property: Processing the same records twice adds nothing
    #[test]
    fn prop_group_creation_is_idempotent(records in address_records()) {
        let once = GraphBuilder::new()
            .build(&records, &locations(), online)
            .unwrap();

        let mut twice = GraphBuilder::new();
        twice.add_locations(&locations()).unwrap();
        twice.add_addresses(&records, online).unwrap();
        twice.add_addresses(&records, online).unwrap();

        prop_assert_eq!(twice.finish(), once);
    }

    /// Property: No group lists a child or host twice, and every child exists
    #[test]
    fn prop_groups_are_duplicate_free(records in address_records()) {
        let snapshot = GraphBuilder::new()
            .build(&records, &locations(), online)
            .unwrap();

        for (name, node) in snapshot.groups() {
            prop_assert_eq!(name.clone(), name.to_lowercase());

            let children: HashSet<_> = node.children.iter().collect();
            prop_assert_eq!(children.len(), node.children.len());
            for child in &node.children {
                prop_assert!(snapshot.group(child).is_some(), "dangling child {}", child);
            }

            if let Some(hosts) = &node.hosts {
                let unique: HashSet<_> = hosts.iter().collect();
                prop_assert_eq!(unique.len(), hosts.len());
            }
        }
    }

    /// Property: Only participating records produce host variables
    #[test]
    fn prop_hostvars_only_for_participants(records in address_records()) {
        let snapshot = GraphBuilder::new()
            .build(&records, &locations(), online)
            .unwrap();

        let participants: HashSet<&str> = records
            .iter()
            .filter(|r| r.participates())
            .map(|r| r.hostname.as_str())
            .collect();
        let with_vars: HashSet<&str> = snapshot
            .meta()
            .hostvars
            .keys()
            .map(String::as_str)
            .collect();

        prop_assert_eq!(with_vars, participants);
    }
}
