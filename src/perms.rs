//! Permission bitmask constants and the preset level vocabulary

// Permission bit constants
pub const FETCH: u8 = 1;
pub const LIST: u8 = 1 << 1;
pub const NOTIFY: u8 = 1 << 2;
pub const CREATE: u8 = 1 << 3;
pub const MODIFY: u8 = 1 << 4; // also covers deletion
pub const CUSTOM1: u8 = 1 << 5;
pub const CUSTOM2: u8 = 1 << 6;

// Composite masks backing the preset levels
pub const READ: u8 = FETCH | LIST | NOTIFY;
pub const WRITE: u8 = READ | CREATE | MODIFY;
pub const ROOT: u8 = WRITE | CUSTOM1 | CUSTOM2;

// Bit name mappings
const BITS: &[(&str, u8)] = &[
    ("fetch", FETCH),
    ("list", LIST),
    ("notify", NOTIFY),
    ("create", CREATE),
    ("modify", MODIFY),
    ("custom1", CUSTOM1),
    ("custom2", CUSTOM2),
];

/// Convert a permission mask to the list of set bit names
pub fn perms_to_names(mask: u8) -> Vec<&'static str> {
    BITS.iter()
        .filter(|(_, b)| mask & b == *b)
        .map(|(n, _)| *n)
        .collect()
}

/// Convert a list of bit names to a mask
pub fn names_to_perms(names: &[&str]) -> u8 {
    names
        .iter()
        .filter_map(|n| BITS.iter().find(|(k, _)| k == n).map(|(_, v)| v))
        .fold(0, |a, b| a | b)
}

/// Named permission level a user can pick when adding an ACL row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Read,
    Write,
    Root,
}

impl Preset {
    /// Picker display order, weakest first
    pub const ALL: [Preset; 3] = [Preset::Read, Preset::Write, Preset::Root];

    pub fn mask(self) -> u8 {
        match self {
            Preset::Read => READ,
            Preset::Write => WRITE,
            Preset::Root => ROOT,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Read => "Read",
            Preset::Write => "Write",
            Preset::Root => "Root",
        }
    }

    /// Exact-match lookup; anything outside the three preset masks is None
    pub fn from_mask(mask: u8) -> Option<Preset> {
        Preset::ALL.into_iter().find(|p| p.mask() == mask)
    }
}

/// Display label for an arbitrary mask. Total: non-preset masks come back
/// as `Custom(N)` with the raw value.
pub fn label(mask: u8) -> String {
    match Preset::from_mask(mask) {
        Some(p) => p.name().to_string(),
        None => format!("Custom({})", mask),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preset_masks() {
        assert_eq!(Preset::Read.mask(), 7);
        assert_eq!(Preset::Write.mask(), 31);
        assert_eq!(Preset::Root.mask(), 127);
    }

    #[test]
    fn label_is_total() {
        assert_eq!(label(7), "Read");
        assert_eq!(label(31), "Write");
        assert_eq!(label(127), "Root");
        assert_eq!(label(99), "Custom(99)");
        assert_eq!(label(0), "Custom(0)");
        assert_eq!(label(255), "Custom(255)");
    }

    #[test]
    fn from_mask_rejects_near_misses() {
        assert_eq!(Preset::from_mask(7), Some(Preset::Read));
        assert_eq!(Preset::from_mask(6), None);
        assert_eq!(Preset::from_mask(30), None);
    }

    #[test]
    fn names_round_trip() {
        assert_eq!(perms_to_names(READ), vec!["fetch", "list", "notify"]);
        assert_eq!(names_to_perms(&["fetch", "list", "notify"]), READ);
        assert_eq!(names_to_perms(&["bogus"]), 0);
    }
}
