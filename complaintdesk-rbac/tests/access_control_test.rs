//! Access control behaviour over the built-in role table

use complaintdesk_api_types::{Complaint, Region, UserRole};
use complaintdesk_rbac::{AccessEnforcer, ActionType, RegionAccess, ResourceType};
use proptest::prelude::*;
use serde_json::{json, Value};

use ActionType::{Create, Delete, Read, Update};
use ResourceType::{Complaints, Reports, Settings, Users};
use UserRole::{Admin, CallAttendant, Foreman, Manager, Technician};

/// (role, resource, [create, read, update, delete])
const EXPECTED_MATRIX: [(UserRole, ResourceType, [bool; 4]); 20] = [
    (Admin, Complaints, [true, true, true, true]),
    (Admin, Users, [true, true, true, true]),
    (Admin, Reports, [true, true, true, true]),
    (Admin, Settings, [true, true, true, true]),
    (Manager, Complaints, [true, true, true, false]),
    (Manager, Users, [true, true, true, false]),
    (Manager, Reports, [true, true, false, false]),
    (Manager, Settings, [false, true, false, false]),
    (Foreman, Complaints, [true, true, true, false]),
    (Foreman, Users, [false, true, false, false]),
    (Foreman, Reports, [false, true, false, false]),
    (Foreman, Settings, [false, false, false, false]),
    (CallAttendant, Complaints, [true, true, true, false]),
    (CallAttendant, Users, [false, false, false, false]),
    (CallAttendant, Reports, [false, false, false, false]),
    (CallAttendant, Settings, [false, false, false, false]),
    (Technician, Complaints, [false, true, true, false]),
    (Technician, Users, [false, false, false, false]),
    (Technician, Reports, [false, false, false, false]),
    (Technician, Settings, [false, false, false, false]),
];

#[test]
fn test_full_permission_matrix() {
    let enforcer = AccessEnforcer::builtin();
    let mut checked = 0;

    for (role, resource, expected) in EXPECTED_MATRIX {
        for (action, allowed) in [Create, Read, Update, Delete].into_iter().zip(expected) {
            assert_eq!(
                enforcer.has_permission(role, resource, action),
                allowed,
                "{} {} {}",
                role,
                action,
                resource
            );
            assert_eq!(
                enforcer
                    .has_permission_str(role.as_str(), resource.as_str(), action.as_str())
                    .unwrap(),
                allowed
            );
            checked += 1;
        }
    }

    assert_eq!(checked, 80);
}

#[test]
fn test_documented_fixtures() {
    let enforcer = AccessEnforcer::builtin();
    assert!(!enforcer.has_permission_str("technician", "users", "delete").unwrap());
    assert!(enforcer.has_permission_str("admin", "users", "delete").unwrap());
}

#[test]
fn test_region_table() {
    let enforcer = AccessEnforcer::builtin();
    assert_eq!(enforcer.accessible_regions(Admin), &RegionAccess::All);
    assert_eq!(enforcer.accessible_regions(Manager), &RegionAccess::All);
    assert_eq!(enforcer.accessible_regions(CallAttendant), &RegionAccess::All);

    for role in [Foreman, Technician] {
        let regions = enforcer.accessible_regions(role).regions().unwrap();
        assert_eq!(regions.iter().collect::<Vec<_>>(), vec![Region::AddisAbaba]);
    }
}

#[test]
fn test_restricted_roles_exact_membership() {
    let enforcer = AccessEnforcer::builtin();

    for role in [Foreman, Technician] {
        assert!(enforcer.can_access_region(role, Some("Addis Ababa")));
        assert!(!enforcer.can_access_region(role, Some("ADDIS ABABA")));
        assert!(!enforcer.can_access_region(role, Some("")));
        assert!(!enforcer.can_access_region(role, None));
        assert!(!enforcer.can_access_region(role, Some("Nowhereland")));

        for region in Region::ALL {
            if region != Region::AddisAbaba {
                assert!(!enforcer.can_access_region(role, Some(region.as_str())), "{}", region);
            }
        }
    }
}

proptest! {
    #[test]
    fn prop_unrestricted_roles_accept_any_string(region in ".*") {
        let enforcer = AccessEnforcer::builtin();
        for role in [Admin, Manager, CallAttendant] {
            prop_assert!(enforcer.can_access_region(role, Some(region.as_str())));
        }
    }

    #[test]
    fn prop_restricted_roles_accept_only_members(region in ".*") {
        let enforcer = AccessEnforcer::builtin();
        let expected = region == "Addis Ababa";
        for role in [Foreman, Technician] {
            prop_assert_eq!(enforcer.can_access_region(role, Some(region.as_str())), expected);
        }
    }

    #[test]
    fn prop_filter_is_idempotent_and_ordered(
        regions in proptest::collection::vec(
            prop_oneof![
                Just(Some("Addis Ababa".to_string())),
                Just(Some("Amhara".to_string())),
                Just(None),
                ".*".prop_map(Some),
            ],
            0..40,
        )
    ) {
        let enforcer = AccessEnforcer::builtin();
        let records: Vec<Value> = regions
            .iter()
            .enumerate()
            .map(|(idx, region)| match region {
                Some(name) => json!({ "idx": idx, "region": name }),
                None => json!({ "idx": idx }),
            })
            .collect();

        for role in UserRole::ALL {
            let first = enforcer.filter_by_region_access(role, &records);
            let second = enforcer.filter_by_region_access(role, &records);
            prop_assert_eq!(&first, &second);

            let indices: Vec<u64> = first.iter().map(|r| r["idx"].as_u64().unwrap()).collect();
            prop_assert!(indices.windows(2).all(|pair| pair[0] < pair[1]));
            prop_assert!(first.iter().all(|r| enforcer.can_access_region(role, r["region"].as_str())));
        }
    }
}

#[test]
fn test_order_preserved_and_excluded() {
    let enforcer = AccessEnforcer::builtin();
    let records = vec![
        json!({ "name": "A", "region": "Addis Ababa" }),
        json!({ "name": "B", "region": "Oromia" }),
        json!({ "name": "C", "region": "Addis Ababa" }),
    ];

    let filtered = enforcer.filter_by_region_access(Foreman, &records);
    assert_eq!(filtered, vec![records[0].clone(), records[2].clone()]);
}

#[test]
fn test_malformed_records_are_dropped_without_error() {
    let enforcer = AccessEnforcer::builtin();
    let records = vec![json!({ "region": null }), json!({}), json!({ "region": 123 })];

    for role in [Foreman, Technician] {
        assert!(enforcer.filter_by_region_access(role, &records).is_empty());
    }
    for role in [Admin, Manager, CallAttendant] {
        assert!(enforcer.filter_by_region_access(role, &records).is_empty());
    }
}

fn three_complaints() -> Vec<Complaint> {
    ["Addis Ababa", "Amhara", "Addis Ababa"]
        .iter()
        .enumerate()
        .map(|(idx, region)| {
            serde_json::from_value(json!({
                "ID": format!("CMP-{}", idx + 1),
                "Title": "No power",
                "Region": region,
            }))
            .unwrap()
        })
        .collect()
}

#[test]
fn test_technician_scenario() {
    let enforcer = AccessEnforcer::builtin();
    let complaints = three_complaints();

    let filtered = enforcer.filter_by_region_access(Technician, &complaints);
    let ids: Vec<_> = filtered.iter().map(|c| c.id_or_unknown()).collect();
    assert_eq!(ids, vec!["CMP-1", "CMP-3"]);
    assert_eq!(complaints.len(), 3);
}

#[test]
fn test_admin_scenario() {
    let enforcer = AccessEnforcer::builtin();
    let complaints = three_complaints();

    let filtered = enforcer.filter_by_region_access(Admin, &complaints);
    assert_eq!(filtered, complaints);
}

#[test]
fn test_enforcer_is_shareable_across_threads() {
    let enforcer = AccessEnforcer::builtin();
    let complaints = three_complaints();

    let handles: Vec<_> = UserRole::ALL
        .into_iter()
        .map(|role| {
            let enforcer = enforcer.clone();
            let complaints = complaints.clone();
            std::thread::spawn(move || enforcer.filter_by_region_access(role, &complaints).len())
        })
        .collect();

    let counts: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(counts, vec![3, 3, 2, 3, 2]);
}
