//! Entity usage tracking for incremental invalidation
//!
//! This crate records, at fine granularity, which facets ("aspects") of
//! which external entities a rendered page depended on, so that when an
//! entity changes, only the pages that depended on the changed facet need
//! to be invalidated.
//!
//! # Architecture
//!
//! - [`EntityUsage`] — one `(entity, aspect, modifier)` fact, with a
//!   canonical identity string used for deduplication and persistence.
//! - [`UsageAccumulator`] / [`HashUsageAccumulator`] — the sink a content
//!   pipeline feeds while producing a page.
//! - [`PageEntityUsages`] — the per-page aggregate, grouped by entity.
//! - [`UsageAspectTransformer`] — filters recorded usages against a
//!   consumer's declaration of relevant aspects, implementing the wildcard
//!   and modifier matching rules.
//!
//! # Example
//!
//! ```rust
//! use factlink_usage::prelude::*;
//!
//! let q1 = EntityId::new("Q1");
//!
//! // Producer side: record usages while rendering a page.
//! let mut accumulator = HashUsageAccumulator::new();
//! accumulator.add_label_usage(q1.clone(), Some("de"));
//! accumulator.add_title_usage(q1.clone());
//! let page = PageEntityUsages::new(PageId(7), accumulator.usages().into_values());
//!
//! // Consumer side: only the label aspect of Q1 matters here.
//! let mut transformer = UsageAspectTransformer::new();
//! transformer.set_relevant_aspects(q1.clone(), [AspectKey::new(Aspect::Label)]);
//!
//! let relevant = transformer.transform_page_entity_usages(&page);
//! let keys: Vec<String> = relevant
//!     .usage_aspect_keys(&q1)
//!     .iter()
//!     .map(AspectKey::encode)
//!     .collect();
//! assert_eq!(keys, ["L.de"]);
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod accumulator;
pub mod aspect;
pub mod page;
pub mod transformer;
pub mod usage;

pub use accumulator::{HashUsageAccumulator, UsageAccumulator};
pub use aspect::{Aspect, AspectKey, UsageError};
pub use factlink_types::{EntityId, PageId};
pub use page::{PageEntityUsages, UsageRecord};
pub use transformer::UsageAspectTransformer;
pub use usage::EntityUsage;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::accumulator::{HashUsageAccumulator, UsageAccumulator};
    pub use crate::aspect::{Aspect, AspectKey, UsageError};
    pub use crate::page::{PageEntityUsages, UsageRecord};
    pub use crate::transformer::UsageAspectTransformer;
    pub use crate::usage::EntityUsage;
    pub use factlink_types::{EntityId, PageId};
}
