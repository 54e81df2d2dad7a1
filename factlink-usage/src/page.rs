//! Per-page aggregation of entity usages
//!
//! A [`PageEntityUsages`] groups everything one page depended on by entity.
//! It is the unit of persistence and of comparison between production runs,
//! and the input to the aspect transformer.

use crate::aspect::{AspectKey, UsageError};
use crate::usage::EntityUsage;
use factlink_types::{EntityId, PageId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// All entity usages recorded for one page
///
/// Invariants: aspect keys are deduplicated per entity, and an entity
/// present in the aggregate has at least one key. No removal primitive is
/// exposed, so the latter holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntityUsages {
    page_id: PageId,
    usages: BTreeMap<EntityId, BTreeSet<AspectKey>>,
}

impl PageEntityUsages {
    /// An aggregate for `page_id` holding the given initial usages
    pub fn new(page_id: PageId, usages: impl IntoIterator<Item = EntityUsage>) -> Self {
        let mut page = PageEntityUsages {
            page_id,
            usages: BTreeMap::new(),
        };
        page.add_usages(usages);
        page
    }

    /// The page these usages were recorded for
    pub fn page_id(&self) -> PageId {
        self.page_id
    }

    /// Entities with at least one recorded usage, in canonical order
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.usages.keys().cloned().collect()
    }

    /// Aspect keys recorded for `entity_id`, in canonical order
    ///
    /// Empty if the entity is unknown to this page.
    pub fn usage_aspect_keys(&self, entity_id: &EntityId) -> Vec<AspectKey> {
        self.usages
            .get(entity_id)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Merge usages into the per-entity key sets
    ///
    /// Union semantics: re-adding an existing key is a no-op.
    pub fn add_usages(&mut self, usages: impl IntoIterator<Item = EntityUsage>) {
        for usage in usages {
            self.usages
                .entry(usage.entity_id().clone())
                .or_default()
                .insert(usage.aspect_key().clone());
        }
    }

    /// Flat enumeration of all usages, in identity-string order
    pub fn usages(&self) -> Vec<EntityUsage> {
        let mut by_identity = BTreeMap::new();

        for (entity_id, keys) in &self.usages {
            for key in keys {
                let usage = EntityUsage::new(entity_id.clone(), key.clone());
                by_identity.insert(usage.identity_string(), usage);
            }
        }

        by_identity.into_values().collect()
    }

    /// Whether no usage has been recorded
    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }

    /// Serialized form: one record per usage, in identity-string order
    pub fn to_records(&self) -> Vec<UsageRecord> {
        self.usages()
            .into_iter()
            .map(|usage| UsageRecord {
                entity_id: usage.entity_id().clone(),
                aspect_key: usage.aspect_key().encode(),
            })
            .collect()
    }

    /// Rebuild an aggregate from its serialized form
    ///
    /// Fails with [`UsageError::MalformedKey`] when a record's aspect key
    /// does not parse; this is the validation boundary for persisted data.
    pub fn from_records(page_id: PageId, records: &[UsageRecord]) -> Result<Self, UsageError> {
        let mut page = PageEntityUsages {
            page_id,
            usages: BTreeMap::new(),
        };

        for record in records {
            let key = AspectKey::parse(&record.aspect_key)?;
            page.usages
                .entry(record.entity_id.clone())
                .or_default()
                .insert(key);
        }

        Ok(page)
    }
}

/// One `(entity, aspect key)` pair of a persisted page usage record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageRecord {
    /// The used entity
    pub entity_id: EntityId,
    /// The encoded aspect key, e.g. `L.de`
    pub aspect_key: String,
}
