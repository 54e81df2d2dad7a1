//! Usage accumulation during content production
//!
//! A [`UsageAccumulator`] is the write-only sink that a content pipeline
//! feeds whenever it consults a facet of an external entity. One
//! accumulator exists per production pass; recording is idempotent and the
//! expected cardinality is small (tens to low hundreds of usages per page).

use crate::aspect::{Aspect, AspectKey};
use crate::usage::EntityUsage;
use factlink_types::EntityId;
use std::collections::HashMap;

/// Write-only sink for entity usages seen during one production pass
pub trait UsageAccumulator {
    /// Record a usage. Recording an equal usage again is a no-op.
    fn add_usage(&mut self, usage: EntityUsage);

    /// Owned snapshot of everything recorded so far, keyed by identity
    /// string
    ///
    /// Iteration order is unspecified. Mutating the snapshot does not
    /// affect the accumulator.
    fn usages(&self) -> HashMap<String, EntityUsage>;

    /// Record a label usage, optionally narrowed to one language
    fn add_label_usage(&mut self, entity_id: EntityId, language: Option<&str>) {
        self.add_usage(qualified_usage(entity_id, Aspect::Label, language));
    }

    /// Record a description usage, optionally narrowed to one language
    fn add_description_usage(&mut self, entity_id: EntityId, language: Option<&str>) {
        self.add_usage(qualified_usage(entity_id, Aspect::Description, language));
    }

    /// Record a statement-data usage, optionally narrowed to one sub-key
    fn add_statement_usage(&mut self, entity_id: EntityId, modifier: Option<&str>) {
        self.add_usage(qualified_usage(entity_id, Aspect::Statement, modifier));
    }

    /// Record a title usage
    fn add_title_usage(&mut self, entity_id: EntityId) {
        self.add_usage(EntityUsage::new(entity_id, AspectKey::new(Aspect::Title)));
    }

    /// Record a sitelink usage
    fn add_sitelink_usage(&mut self, entity_id: EntityId) {
        self.add_usage(EntityUsage::new(entity_id, AspectKey::new(Aspect::Sitelink)));
    }

    /// Record a usage of everything about the entity
    fn add_all_usage(&mut self, entity_id: EntityId) {
        self.add_usage(EntityUsage::new(entity_id, AspectKey::new(Aspect::All)));
    }
}

// Absent and empty modifiers both record the whole aspect.
fn qualified_usage(entity_id: EntityId, aspect: Aspect, modifier: Option<&str>) -> EntityUsage {
    let key = AspectKey::from_parts(aspect, modifier.map(str::to_owned));
    EntityUsage::new(entity_id, key)
}

/// [`UsageAccumulator`] implementation wrapping a hash map keyed by the
/// usage identity string
///
/// No eviction and no size bound; the accumulator is scoped to a single
/// production pass.
#[derive(Debug, Clone, Default)]
pub struct HashUsageAccumulator {
    usages: HashMap<String, EntityUsage>,
}

impl HashUsageAccumulator {
    /// An empty accumulator
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct usages recorded so far
    pub fn len(&self) -> usize {
        self.usages.len()
    }

    /// Whether nothing has been recorded yet
    pub fn is_empty(&self) -> bool {
        self.usages.is_empty()
    }
}

impl UsageAccumulator for HashUsageAccumulator {
    fn add_usage(&mut self, usage: EntityUsage) {
        let key = usage.identity_string();
        tracing::trace!(usage = %key, "recording entity usage");
        self.usages.insert(key, usage);
    }

    fn usages(&self) -> HashMap<String, EntityUsage> {
        self.usages.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn usage(entity: &str, key: &str) -> EntityUsage {
        EntityUsage::new(EntityId::new(entity), AspectKey::parse(key).unwrap())
    }

    #[test]
    fn test_add_usage_is_idempotent() {
        let mut acc = HashUsageAccumulator::new();

        acc.add_usage(usage("Q1", "L.de"));
        acc.add_usage(usage("Q1", "L.de"));

        assert_eq!(acc.len(), 1);
        assert_eq!(
            acc.usages().into_keys().collect::<Vec<_>>(),
            ["Q1#L.de"]
        );
    }

    #[test]
    fn test_distinct_usages_accumulate() {
        let mut acc = HashUsageAccumulator::new();

        acc.add_usage(usage("Q1", "L.de"));
        acc.add_usage(usage("Q1", "L.en"));
        acc.add_usage(usage("Q2", "S"));

        let usages = acc.usages();
        assert_eq!(usages.len(), 3);
        assert!(usages.contains_key("Q1#L.de"));
        assert!(usages.contains_key("Q1#L.en"));
        assert!(usages.contains_key("Q2#S"));
    }

    #[test]
    fn test_snapshot_is_detached() {
        let mut acc = HashUsageAccumulator::new();
        acc.add_usage(usage("Q1", "T"));

        let mut snapshot = acc.usages();
        snapshot.clear();

        assert_eq!(acc.len(), 1);
    }

    #[test]
    fn test_convenience_recorders() {
        let mut acc = HashUsageAccumulator::new();
        let q1 = EntityId::new("Q1");

        acc.add_label_usage(q1.clone(), Some("de"));
        acc.add_description_usage(q1.clone(), Some("en"));
        acc.add_statement_usage(q1.clone(), Some("P18"));
        acc.add_title_usage(q1.clone());
        acc.add_sitelink_usage(q1.clone());
        acc.add_all_usage(q1);

        let mut keys: Vec<String> = acc.usages().into_keys().collect();
        keys.sort();
        assert_eq!(
            keys,
            ["Q1#C.P18", "Q1#D.en", "Q1#L.de", "Q1#S", "Q1#T", "Q1#X"]
        );
    }

    #[test]
    fn test_unqualified_label_usage() {
        let mut acc = HashUsageAccumulator::new();

        acc.add_label_usage(EntityId::new("Q1"), None);
        acc.add_label_usage(EntityId::new("Q2"), Some(""));

        let usages = acc.usages();
        assert!(usages.contains_key("Q1#L"));
        assert!(usages.contains_key("Q2#L"));
    }
}
