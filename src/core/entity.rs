//! Entity trait - common interface for all store-owned entity types

use serde::{de::DeserializeOwned, Serialize};

/// Common trait for the four store-owned entity types.
///
/// `STORE_KEY` names the persistence blob a collection of this type lives
/// under; `id` is the unique key the store resolves lookups by.
pub trait Entity: Serialize + DeserializeOwned {
    /// Persistence key suffix for the whole collection (e.g. "assets")
    const STORE_KEY: &'static str;

    /// The entity's unique ID
    fn id(&self) -> &str;
}

/// Resolve an entity in a collection by id
pub fn find_by_id<'a, T: Entity>(items: &'a [T], id: &str) -> Option<&'a T> {
    items.iter().find(|item| item.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{Asset, CommLink, Frequency, Satellite};

    #[test]
    fn test_store_keys_are_distinct() {
        let keys = [
            Asset::STORE_KEY,
            CommLink::STORE_KEY,
            Satellite::STORE_KEY,
            Frequency::STORE_KEY,
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }
}
