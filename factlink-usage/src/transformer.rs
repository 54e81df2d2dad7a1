//! The aspect algebra
//!
//! Transforms recorded usage aspects based on a filter of aspects relevant
//! in some context. Relevant aspects for each entity are collected with
//! [`UsageAspectTransformer::set_relevant_aspects`].
//!
//! If a page used the label (`L`) and title (`T`) aspects of entity Q1, a
//! transformer set up to consider the label aspect of Q1 relevant will
//! transform the usage `Q1#L` + `Q1#T` to the relevant usage `Q1#L`.
//!
//! The wildcard (`X`) is treated specially. If a page used the `X` aspect,
//! a transformer that considers e.g. the label and title aspects of Q1
//! relevant will transform `Q1#X` to `Q1#L` + `Q1#T`. Conversely, if a page
//! used the sitelink (`S`) aspect, a transformer that considers all (`X`)
//! usages relevant will keep `Q1#S`.

use crate::aspect::{Aspect, AspectKey};
use crate::page::PageEntityUsages;
use crate::usage::EntityUsage;
use factlink_types::EntityId;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::iter;

/// Filters recorded usages down to the aspects a consumer declared relevant
///
/// One transformer is constructed per transformation session; the relevance
/// table is configured first and read afterwards.
#[derive(Debug, Clone, Default)]
pub struct UsageAspectTransformer {
    relevant_aspects_per_entity: HashMap<EntityId, BTreeSet<AspectKey>>,
}

impl UsageAspectTransformer {
    /// A transformer with an empty relevance table
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the relevant aspects for `entity_id`
    pub fn set_relevant_aspects(
        &mut self,
        entity_id: EntityId,
        aspects: impl IntoIterator<Item = AspectKey>,
    ) {
        self.relevant_aspects_per_entity
            .insert(entity_id, aspects.into_iter().collect());
    }

    /// The configured relevant aspects in canonical order
    ///
    /// Empty for entities never configured.
    pub fn relevant_aspects(&self, entity_id: &EntityId) -> Vec<AspectKey> {
        self.relevant_aspects_per_entity
            .get(entity_id)
            .map(|keys| keys.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Usages for each key in `aspects` that is relevant for `entity_id`,
    /// in identity-string order
    ///
    /// If the transformer was configured with relevant aspects `T`, `L.de`,
    /// `L.en` for Q3, filtering `S` + `L` yields `Q3#L.de` + `Q3#L.en`,
    /// while filtering `X` yields `Q3#L.de` + `Q3#L.en` + `Q3#T`.
    pub fn filtered_usages(&self, entity_id: &EntityId, aspects: &[AspectKey]) -> Vec<EntityUsage> {
        let aspect_keys: BTreeSet<AspectKey> = aspects.iter().cloned().collect();
        let empty = BTreeSet::new();
        let relevant = self
            .relevant_aspects_per_entity
            .get(entity_id)
            .unwrap_or(&empty);

        let effective = filtered_aspect_keys(&aspect_keys, relevant);
        build_entity_usages(entity_id, effective)
    }

    /// Transform every entity's usages in `page` according to the
    /// configured relevance table
    ///
    /// Returns a new aggregate carrying the same page id. Entities with no
    /// surviving usages are absent from the output.
    pub fn transform_page_entity_usages(&self, page: &PageEntityUsages) -> PageEntityUsages {
        let mut transformed = PageEntityUsages::new(page.page_id(), iter::empty());

        for entity_id in page.entity_ids() {
            let aspects = page.usage_aspect_keys(&entity_id);
            let usages = self.filtered_usages(&entity_id, &aspects);
            transformed.add_usages(usages);
        }

        tracing::debug!(
            page = page.page_id().as_u64(),
            recorded = page.usages().len(),
            relevant = transformed.usages().len(),
            "transformed page entity usages"
        );

        transformed
    }
}

// Materializes aspect keys as usages of one entity, in identity-string order.
fn build_entity_usages(entity_id: &EntityId, aspects: BTreeSet<AspectKey>) -> Vec<EntityUsage> {
    let mut usages = BTreeMap::new();

    for aspect in aspects {
        let usage = EntityUsage::new(entity_id.clone(), aspect);
        usages.insert(usage.identity_string(), usage);
    }

    usages.into_values().collect()
}

// The intersection of `aspect_keys` and `relevant`, except for the special
// treatment of the wildcard and of modified keys:
//
// - If `X` is in `aspect_keys`, the result is `relevant` (a usage of
//   everything is narrowed down to exactly the relevant aspects).
// - If `X` is in `relevant`, the result is `aspect_keys` (nothing is
//   filtered out).
// - If a modified key `A.xx` is in `relevant` and the unmodified `A` is in
//   `aspect_keys`, `A.xx` is included in the result.
// - If a modified key `A.xx` is in `aspect_keys` and the unmodified `A` is
//   in `relevant`, `A.xx` is included in the result.
fn filtered_aspect_keys(
    aspect_keys: &BTreeSet<AspectKey>,
    relevant: &BTreeSet<AspectKey>,
) -> BTreeSet<AspectKey> {
    if aspect_keys.is_empty() || relevant.is_empty() {
        return BTreeSet::new();
    }

    let all = AspectKey::new(Aspect::All);
    if aspect_keys.contains(&all) {
        tracing::trace!("wildcard usage recorded, keeping the relevant set");
        return relevant.clone();
    }
    if relevant.contains(&all) {
        tracing::trace!("everything relevant, keeping the recorded set");
        return aspect_keys.clone();
    }

    // Direct matches.
    let mut aspects: BTreeSet<AspectKey> = aspect_keys.intersection(relevant).cloned().collect();

    // Matches `L.xx` in `aspect_keys` to `L` in `relevant`.
    intersect_modified_keys(aspect_keys, relevant, &mut aspects);

    // Matches `L.xx` in `relevant` to `L` in `aspect_keys`.
    intersect_modified_keys(relevant, aspect_keys, &mut aspects);

    aspects
}

// Includes every modified key from `candidates` whose unmodified aspect is
// present in `other`.
fn intersect_modified_keys(
    candidates: &BTreeSet<AspectKey>,
    other: &BTreeSet<AspectKey>,
    aspects: &mut BTreeSet<AspectKey>,
) {
    for key in candidates {
        if key.is_modified() && other.contains(&AspectKey::new(key.strip_modifier())) {
            aspects.insert(key.clone());
        }
    }
}
