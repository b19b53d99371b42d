//! Wire format and permission check tests

use chrono::{DateTime, Utc};
use crit_acl::*;
use serde_json::json;

fn sample_store() -> AccessControlStore {
    AccessControlStore {
        list: vec![
            AccessControlEntry {
                permissions: READ,
                principals: vec!["u_alice".into(), "g_qa".into()],
                scope: None,
            },
            AccessControlEntry {
                permissions: WRITE,
                principals: vec!["g_platform".into()],
                scope: Some("task".into()),
            },
        ],
        last_mod_date: Utc::now(),
    }
}

// === JSON shape ===

#[test]
fn store_json_round_trip() {
    let store = sample_store();
    let value = serde_json::to_value(&store).unwrap();
    let back: AccessControlStore = serde_json::from_value(value).unwrap();

    assert_eq!(back.list, store.list);
    assert_eq!(back.last_mod_date, store.last_mod_date);
}

#[test]
fn scope_is_omitted_when_absent() {
    let value = serde_json::to_value(&sample_store()).unwrap();
    assert!(value["list"][0].get("scope").is_none());
    assert_eq!(value["list"][1]["scope"], "task");
}

#[test]
fn last_mod_date_is_an_rfc3339_string() {
    let value = serde_json::to_value(&sample_store()).unwrap();
    let raw = value["last_mod_date"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(raw).is_ok());
}

#[test]
fn deserializes_backend_payload() {
    let payload = json!({
        "list": [
            { "permissions": 7, "principals": ["u_alice"] },
            { "permissions": 99, "principals": [], "scope": "page" }
        ],
        "last_mod_date": "2026-01-15T10:00:00Z"
    });

    let store: AccessControlStore = serde_json::from_value(payload).unwrap();
    assert_eq!(store.list[0].permissions, READ);
    assert_eq!(store.list[0].scope, None);
    // Unknown masks and empty principal sets survive deserialization
    assert_eq!(store.list[1].permissions, 99);
    assert!(store.list[1].principals.is_empty());
}

#[test]
fn empty_store_serializes_with_empty_list() {
    let value = serde_json::to_value(AccessControlStore::default()).unwrap();
    assert_eq!(value["list"], json!([]));
    assert!(value["last_mod_date"].is_string());
}

// === Permission checks ===

#[test]
fn open_store_admits_everyone() {
    let store = AccessControlStore::default();
    assert!(store.check_permission(&["u_nobody".into()], ROOT));
}

#[test]
fn check_requires_all_bits() {
    let store = sample_store();
    let alice = vec!["u_alice".to_string()];

    assert!(store.check_permission(&alice, READ));
    assert!(store.check_permission(&alice, FETCH));
    assert!(!store.check_permission(&alice, WRITE));
}

#[test]
fn check_matches_any_held_principal() {
    let store = sample_store();
    // u_dave is only covered through group membership
    let dave = vec!["u_dave".to_string(), "g_platform".to_string()];

    assert!(store.check_permission(&dave, WRITE));
    assert!(!store.check_permission(&["u_dave".into()], WRITE));
}

#[test]
fn check_denies_unknown_principals() {
    let store = sample_store();
    assert!(!store.check_permission(&["u_mallory".into()], FETCH));
}
