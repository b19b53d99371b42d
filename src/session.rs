//! Editing session: the Open state of the editor's two-state machine.
//!
//! Closed -> Open on [`EditSession::open`] (flattens the store);
//! Open -> Closed on [`EditSession::save`] (groups the rows) or
//! [`EditSession::cancel`]. Both consume the session, so a closed session
//! cannot be touched again and there is no partial save.

use log::debug;

use crate::perms::READ;
use crate::rows::{flatten, group, AclRow};
use crate::store::AccessControlStore;

/// An open ACL editing session over one resource's store.
#[derive(Debug, Clone)]
pub struct EditSession {
    rows: Vec<AclRow>,
    /// Permission level applied by `select_principal`
    level: u8,
}

impl EditSession {
    /// Begin editing: flatten the store into rows. The level starts at Read.
    pub fn open(store: &AccessControlStore) -> Self {
        let rows = flatten(store);
        debug!("[ACL] session open: {} rows", rows.len());
        EditSession { rows, level: READ }
    }

    /// Rows currently in the session, in display order.
    pub fn rows(&self) -> &[AclRow] {
        &self.rows
    }

    /// Permission level applied to subsequently selected principals.
    pub fn level(&self) -> u8 {
        self.level
    }

    pub fn set_level(&mut self, mask: u8) {
        self.level = mask;
    }

    /// Add a row for `principal` at the current level, unscoped.
    ///
    /// Idempotent: an existing row with the same (principal, permissions,
    /// scope) is left alone and `false` comes back. A principal may hold
    /// rows at several levels at once; selecting it at a new level never
    /// removes the old rows.
    pub fn select_principal(&mut self, principal: &str) -> bool {
        self.select_principal_scoped(principal, None)
    }

    /// Same as [`EditSession::select_principal`] for a specific entry scope.
    pub fn select_principal_scoped(&mut self, principal: &str, scope: Option<&str>) -> bool {
        let exists = self.rows.iter().any(|r| {
            r.principal == principal && r.permissions == self.level && r.scope.as_deref() == scope
        });
        if exists {
            return false;
        }
        debug!("[ACL] add row: {} at {:#04x}", principal, self.level);
        self.rows
            .push(AclRow::new(principal, self.level, scope.map(str::to_string)));
        true
    }

    /// Delete the row with this local id. Unknown ids are a no-op.
    pub fn remove_row(&mut self, local_id: &str) -> bool {
        let before = self.rows.len();
        self.rows.retain(|r| r.local_id != local_id);
        before != self.rows.len()
    }

    /// Close the session, rebuilding the grouped store with a fresh
    /// `last_mod_date`. The caller hands the result to the persistence
    /// boundary; the session is gone either way.
    pub fn save(self) -> AccessControlStore {
        let store = group(&self.rows);
        debug!(
            "[ACL] session save: {} rows -> {} entries",
            self.rows.len(),
            store.list.len()
        );
        store
    }

    /// Discard all edits. Nothing is emitted.
    pub fn cancel(self) {
        debug!("[ACL] session cancel: {} rows discarded", self.rows.len());
    }
}
