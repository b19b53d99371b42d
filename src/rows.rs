//! Editor rows and the flatten/group transforms.
//!
//! The backend stores ACLs grouped by permission mask; the editor works on
//! one row per (principal, permissions, scope). `flatten` and `group` are
//! the two inverse transforms between those shapes.

use chrono::Utc;

use crate::store::{AccessControlEntry, AccessControlStore};

/// One editable row: a single principal at a single permission level.
#[derive(Debug, Clone, PartialEq)]
pub struct AclRow {
    pub principal: String,
    pub permissions: u8,
    pub scope: Option<String>,
    /// UI identity token, unique within a session. Never serialized.
    pub local_id: String,
}

impl AclRow {
    pub fn new(principal: impl Into<String>, permissions: u8, scope: Option<String>) -> Self {
        AclRow {
            principal: principal.into(),
            permissions,
            scope,
            local_id: new_local_id(),
        }
    }
}

/// Generate a random row token (8 bytes, hex encoded)
pub fn new_local_id() -> String {
    let mut bytes = [0u8; 8];
    getrandom::getrandom(&mut bytes).expect("Failed to generate random bytes");
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Expand a grouped store into one row per (principal, permissions, scope).
///
/// Pure expansion, entry order then principal order; the store is not
/// touched. Duplicate triples in a malformed store collapse to one row.
pub fn flatten(store: &AccessControlStore) -> Vec<AclRow> {
    let mut rows: Vec<AclRow> = Vec::new();
    for entry in &store.list {
        for principal in &entry.principals {
            let dup = rows.iter().any(|r| {
                r.principal == *principal
                    && r.permissions == entry.permissions
                    && r.scope == entry.scope
            });
            if !dup {
                rows.push(AclRow::new(
                    principal.clone(),
                    entry.permissions,
                    entry.scope.clone(),
                ));
            }
        }
    }
    rows
}

/// Collapse rows back into the grouped wire format.
///
/// Entries come out keyed by (permissions, scope), in insertion order of
/// the first row carrying each key; principals keep set semantics. Masks
/// and principals are passed through unvalidated, and `last_mod_date` is
/// stamped with the current time.
pub fn group(rows: &[AclRow]) -> AccessControlStore {
    let mut entries: Vec<AccessControlEntry> = Vec::new();
    for row in rows {
        match entries
            .iter_mut()
            .find(|e| e.permissions == row.permissions && e.scope == row.scope)
        {
            Some(entry) => {
                if !entry.principals.contains(&row.principal) {
                    entry.principals.push(row.principal.clone());
                }
            }
            None => entries.push(AccessControlEntry {
                permissions: row.permissions,
                principals: vec![row.principal.clone()],
                scope: row.scope.clone(),
            }),
        }
    }
    AccessControlStore {
        list: entries,
        last_mod_date: Utc::now(),
    }
}
