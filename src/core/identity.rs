//! Entity identity conventions
//!
//! Ids are plain strings with a type prefix: seed records use short
//! suffixes ("asset-001"), imported records carry the external contact id
//! ("asset-c014-fire-station"), and records created locally get a ULID
//! suffix. The prefix is a convention, not a parse contract.

use ulid::Ulid;

/// The four store-owned entity kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Asset,
    Link,
    Satellite,
    Frequency,
}

impl EntityKind {
    /// Id prefix for this kind
    pub fn prefix(&self) -> &'static str {
        match self {
            EntityKind::Asset => "asset",
            EntityKind::Link => "link",
            EntityKind::Satellite => "sat",
            EntityKind::Frequency => "freq",
        }
    }

    /// Generate a fresh id for a locally created record
    pub fn new_id(&self) -> String {
        format!("{}-{}", self.prefix(), Ulid::new().to_string().to_lowercase())
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.prefix())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_id_carries_prefix() {
        let id = EntityKind::Link.new_id();
        assert!(id.starts_with("link-"));
        // link- (5) + ULID (26)
        assert_eq!(id.len(), 31);
    }

    #[test]
    fn test_new_ids_are_unique() {
        let a = EntityKind::Asset.new_id();
        let b = EntityKind::Asset.new_id();
        assert_ne!(a, b);
    }
}
