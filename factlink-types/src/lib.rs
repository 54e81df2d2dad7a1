//! Shared types for factlink
//!
//! This crate provides common types used across the factlink ecosystem,
//! including entity and page identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an external, centrally maintained entity
///
/// The wrapped string is the entity's canonical serialization (e.g. `Q64`)
/// and is used as a map key throughout the usage-tracking layer. It never
/// contains `#`, which is reserved as the usage identity separator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Page identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PageId(pub u64);

impl PageId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl From<u64> for PageId {
    fn from(id: u64) -> Self {
        PageId(id)
    }
}

impl From<PageId> for u64 {
    fn from(id: PageId) -> Self {
        id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_id() {
        let id = EntityId::new("Q64");
        assert_eq!(id.as_str(), "Q64");
        assert_eq!(id.to_string(), "Q64");
        assert_eq!(id, EntityId::new(String::from("Q64")));
    }

    #[test]
    fn test_page_id() {
        let id1 = PageId(23);
        let id2: PageId = 23.into();

        assert_eq!(id1, id2);
        assert_eq!(u64::from(id1), 23);
    }
}
