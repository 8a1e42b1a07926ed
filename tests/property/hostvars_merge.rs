// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Host Variable Merging
//!
//! The four writes a build performs for one host (address, online state,
//! cname, service) must produce the same record in any order.

use phpipam_inventory::domain::HostVarsTable;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum HostWrite {
    Address(String),
    OnlineState(i64),
    Cname(String),
    Service(String),
}

fn apply(table: &mut HostVarsTable, hostname: &str, write: &HostWrite) {
    match write {
        HostWrite::Address(ip) => table.set_ansible_host(hostname, ip.as_str()),
        HostWrite::OnlineState(code) => table.set_online_state(hostname, *code),
        HostWrite::Cname(cname) => table.set_cname(hostname, cname.as_str()),
        HostWrite::Service(service) => table.set_service(hostname, service.as_str()),
    }
}

fn one_of_each() -> impl Strategy<Value = Vec<HostWrite>> {
    (
        "10\\.[0-9]{1,3}\\.[0-9]{1,3}\\.[0-9]{1,3}",
        0i64..3,
        "[a-z]{1,12}",
        "[a-z]{1,12}",
    )
        .prop_map(|(ip, code, cname, service)| {
            vec![
                HostWrite::Address(ip),
                HostWrite::OnlineState(code),
                HostWrite::Cname(cname),
                HostWrite::Service(service),
            ]
        })
}

proptest! {
    /// Property: Field writes commute
    #[test]
    fn prop_hostvar_writes_commute(
        (writes, shuffled) in one_of_each()
            .prop_flat_map(|writes| (Just(writes.clone()), Just(writes).prop_shuffle()))
    ) {
        let mut ordered = HostVarsTable::new();
        for write in &writes {
            apply(&mut ordered, "h1", write);
        }

        let mut reordered = HostVarsTable::new();
        for write in &shuffled {
            apply(&mut reordered, "h1", write);
        }

        prop_assert_eq!(ordered, reordered);
    }

    /// Property: A later write never removes an earlier field
    #[test]
    fn prop_writes_never_delete(writes in one_of_each(), extra in "[a-z]{1,12}") {
        let mut table = HostVarsTable::new();
        for write in &writes {
            apply(&mut table, "h1", write);
        }
        table.set_cname("h1", extra.as_str());

        let vars = table.get("h1").unwrap();
        prop_assert!(vars.ansible_host.is_some());
        prop_assert!(vars.status.is_some());
        prop_assert!(vars.service.is_some());
        prop_assert_eq!(vars.cname.as_deref(), Some(extra.as_str()));
    }
}
