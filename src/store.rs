//! Wire-format ACL types shared with the Critical backend

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One grouped access rule: a permission mask shared by a set of principals.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct AccessControlEntry {
    pub permissions: u8,
    pub principals: Vec<String>,
    /// Optional resource-kind qualifier. Entries with different scopes are
    /// never merged even when their permissions match.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
}

/// The whole ACL of one resource as the backend stores it.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AccessControlStore {
    pub list: Vec<AccessControlEntry>,
    pub last_mod_date: DateTime<Utc>,
}

impl AccessControlStore {
    /// An empty list means "open to all authenticated principals",
    /// not "no access".
    pub fn is_open(&self) -> bool {
        self.list.is_empty()
    }

    /// Check whether any of the given principals holds all required bits.
    /// An open store admits everyone.
    pub fn check_permission(&self, principals: &[String], required: u8) -> bool {
        if self.is_open() {
            return true;
        }
        self.list.iter().any(|entry| {
            entry.permissions & required == required
                && entry.principals.iter().any(|p| principals.contains(p))
        })
    }
}
