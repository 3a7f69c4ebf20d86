//! caseload: hierarchical metrics rollup, classification and ranking for
//! consulting operations analytics.
//!
//! The crate is the pure core behind a dashboard that renders timesheet,
//! fee and case data for a hierarchy of Account Managers, Clients,
//! Sponsors, Cases and Projects. Query results arrive as nested
//! JSON-shaped records; everything here is a synchronous, allocation-only
//! transformation over those trees:
//!
//! - [`rollup::rollup`] sums measures bottom-up and establishes the
//!   branch-equals-sum-of-children invariant.
//! - [`filter::filter_by_kind`] prunes by work category and re-rolls the
//!   survivors, so filtered totals never double count.
//! - [`classify`] turns approved/actual pairs and contract terms into
//!   derived hour buckets, and submission timestamps into timeliness
//!   buckets.
//! - [`rank::rank`] produces deterministic top-N projections with
//!   share-of-total percentages.
//! - [`view::ExpansionState`] tracks expand/collapse state keyed by stable
//!   entity paths, independent of any data refetch.
//!
//! There is no I/O, caching or global state anywhere in the crate; the
//! engine is cheap enough to re-run in full on every interaction.

pub mod classify;
pub mod errors;
pub mod filter;
pub mod model;
pub mod rank;
pub mod rollup;
pub mod summary;
pub mod view;

// Re-export commonly used types
pub use crate::classify::{
    classify_leaves, classify_timeliness, contract_pace, variance, PaceBuckets, Timeliness,
    TimelinessThresholds, VarianceBuckets,
};
pub use crate::errors::HierarchyError;
pub use crate::filter::{
    filter_by_kind, filter_by_kind_with_metrics, FilterMetrics, KindSelector,
};
pub use crate::model::{ContractTerms, Kind, Measures, Node};
pub use crate::rank::{rank, RankedEntry, Ranking};
pub use crate::rollup::rollup;
pub use crate::summary::{grand_total, totals_by_kind};
pub use crate::view::{path_id, ExpansionState};
