//! Principal id conventions: kind prefixes, qualification, validation.
//!
//! Ids follow the `{prefix}{name}` convention used across Critical:
//! `u_alice`, `g_platform`, `svc_backup`, `pl_deploy`.

use serde::{Deserialize, Serialize};

use crate::error::{AclError, Result};

/// Length bounds for the name part (without prefix)
pub const MIN_NAME_LEN: usize = 2;
pub const MAX_NAME_LEN: usize = 63;

/// The kinds of identity that can hold permissions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    User,
    Group,
    ServiceAccount,
    PipelineAccount,
}

impl PrincipalKind {
    pub const ALL: [PrincipalKind; 4] = [
        PrincipalKind::User,
        PrincipalKind::Group,
        PrincipalKind::ServiceAccount,
        PrincipalKind::PipelineAccount,
    ];

    /// Id prefix for this kind
    pub fn prefix(self) -> &'static str {
        match self {
            PrincipalKind::User => "u_",
            PrincipalKind::Group => "g_",
            PrincipalKind::ServiceAccount => "svc_",
            PrincipalKind::PipelineAccount => "pl_",
        }
    }

    /// Determine the kind of a prefixed id
    pub fn of(id: &str) -> Option<PrincipalKind> {
        PrincipalKind::ALL.into_iter().find(|k| id.starts_with(k.prefix()))
    }
}

/// Prepend the kind prefix unless already present. Search queries arrive
/// unprefixed; stored ids never do.
pub fn qualify(kind: PrincipalKind, raw: &str) -> String {
    if raw.starts_with(kind.prefix()) {
        raw.to_string()
    } else {
        format!("{}{}", kind.prefix(), raw)
    }
}

/// Validate a principal name and return the prefixed, lowercased id.
///
/// Accepts the name with or without its kind prefix. Groups may contain
/// hyphens; every other kind is alphanumerics and underscores only.
pub fn validate_id(kind: PrincipalKind, raw: &str) -> Result<String> {
    let name = raw.strip_prefix(kind.prefix()).unwrap_or(raw);
    let name = name.to_lowercase();
    if name.len() < MIN_NAME_LEN {
        return Err(AclError(format!(
            "Id too short: {} chars (min {})",
            name.len(),
            MIN_NAME_LEN
        )));
    }
    if name.len() > MAX_NAME_LEN {
        return Err(AclError(format!(
            "Id too long: {} chars (max {})",
            name.len(),
            MAX_NAME_LEN
        )));
    }
    let hyphen_ok = kind == PrincipalKind::Group;
    if let Some(c) = name
        .chars()
        .find(|&c| !(c.is_ascii_alphanumeric() || c == '_' || (hyphen_ok && c == '-')))
    {
        return Err(AclError(format!("Invalid character '{}' in id", c)));
    }
    match name.chars().next() {
        Some(c) if c.is_ascii_digit() => {
            return Err(AclError("Id cannot start with a digit".into()))
        }
        Some('-') => return Err(AclError("Id cannot start with '-'".into())),
        _ => {}
    }
    Ok(format!("{}{}", kind.prefix(), name))
}

/// One result from the principal directory search. The editor only
/// consumes `id`; `name` is display sugar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PrincipalHit {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
