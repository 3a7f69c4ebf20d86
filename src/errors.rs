//! Error types for hierarchy validation.
//!
//! Only ill-formed input errors exist here. Missing measure keys read as
//! zero, an empty filter result is a defined `None`, and zero-total
//! percentages are `0.0`; none of those conditions surface as errors.

use thiserror::Error;

/// Maximum hierarchy depth accepted by validation.
///
/// The dashboard hierarchy is five levels deep; an owned tree cannot alias
/// an ancestor, so runaway depth is the observable symptom of cycle-shaped
/// upstream construction and fails fast instead of recursing forever.
pub const MAX_DEPTH: usize = 32;

/// Fatal hierarchy shape errors.
///
/// These indicate a programming error in the boundary layer that shapes
/// query results; a correctly shaped upstream response can never trigger
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HierarchyError {
    #[error("duplicate sibling name `{name}` under `{parent}`")]
    DuplicateSibling { parent: String, name: String },

    #[error("hierarchy exceeds {limit} levels below `{root}`")]
    DepthExceeded { root: String, limit: usize },
}
