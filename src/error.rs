//! Error types for crit-acl

/// The main error type for ACL model operations
#[derive(Debug, Clone)]
pub struct AclError(pub String);

impl std::fmt::Display for AclError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for AclError {}

/// Result type alias for ACL model operations
pub type Result<T> = std::result::Result<T, AclError>;
