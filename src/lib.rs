//! crit-acl - ACL editing model for Critical
//!
//! Bidirectional mapping between the grouped wire format the backend
//! stores ([`AccessControlStore`]) and the per-row representation an
//! interactive editor works on ([`AclRow`]), plus the permission preset
//! vocabulary and the editing-session state machine.

pub mod error;
pub mod perms;
pub mod principal;
pub mod rows;
pub mod session;
pub mod store;

pub use error::{AclError, Result};
pub use perms::{
    label, names_to_perms, perms_to_names, Preset, CREATE, CUSTOM1, CUSTOM2, FETCH, LIST, MODIFY,
    NOTIFY, READ, ROOT, WRITE,
};
pub use principal::{qualify, validate_id, PrincipalHit, PrincipalKind};
pub use rows::{flatten, group, new_local_id, AclRow};
pub use session::EditSession;
pub use store::{AccessControlEntry, AccessControlStore};
