//! The usage value type
//!
//! An [`EntityUsage`] records that page content depended on one aspect of
//! one entity. Its identity string is the deduplication key and the
//! recommended sort/primary key for persisted usage records.

use crate::aspect::{Aspect, AspectKey, UsageError};
use factlink_types::EntityId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator between the entity serialization and the aspect key in an
/// identity string. Guaranteed absent from both components.
pub const IDENTITY_SEPARATOR: char = '#';

/// The fact that page content depended on one aspect of one entity
///
/// Two usages are identical iff entity, aspect, and modifier are all equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityUsage {
    entity_id: EntityId,
    aspect_key: AspectKey,
}

impl EntityUsage {
    /// A usage of `aspect_key` on the entity `entity_id`
    pub fn new(entity_id: EntityId, aspect_key: AspectKey) -> Self {
        EntityUsage {
            entity_id,
            aspect_key,
        }
    }

    /// The entity whose aspect was used
    pub fn entity_id(&self) -> &EntityId {
        &self.entity_id
    }

    /// The aspect key that was used
    pub fn aspect_key(&self) -> &AspectKey {
        &self.aspect_key
    }

    /// The aspect, without its modifier
    pub fn aspect(&self) -> Aspect {
        self.aspect_key.aspect()
    }

    /// The modifier, if any
    pub fn modifier(&self) -> Option<&str> {
        self.aspect_key.modifier()
    }

    /// Canonical, collision-free encoding of this usage, e.g. `Q3#L.de`
    pub fn identity_string(&self) -> String {
        format!(
            "{}{}{}",
            self.entity_id,
            IDENTITY_SEPARATOR,
            self.aspect_key.encode()
        )
    }

    /// Exact inverse of [`EntityUsage::identity_string`]
    pub fn parse_identity(identity: &str) -> Result<Self, UsageError> {
        let (entity, key) = identity
            .split_once(IDENTITY_SEPARATOR)
            .ok_or_else(|| UsageError::MalformedKey(identity.to_string()))?;

        if entity.is_empty() {
            return Err(UsageError::MalformedKey(identity.to_string()));
        }

        Ok(EntityUsage::new(EntityId::new(entity), AspectKey::parse(key)?))
    }
}

impl fmt::Display for EntityUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}",
            self.entity_id, IDENTITY_SEPARATOR, self.aspect_key
        )
    }
}
