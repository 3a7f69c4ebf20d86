//! Bottom-up measure aggregation.
//!
//! [`rollup`] establishes the structural invariant the rest of the crate
//! relies on: every non-leaf's measures equal the keywise sum of its
//! children's measures, recursively from leaves to root. Leaves pass
//! through unchanged; whatever measures a branch carried before the pass
//! are replaced, which makes the operation idempotent and lets
//! [`crate::filter`] re-derive ancestor totals after pruning.
//!
//! Derived buckets attached by [`crate::classify::classify_leaves`] are
//! ordinary measure keys by the time they reach this module, so they ride
//! the same pass and are never recomputed at branch level.

use std::collections::BTreeSet;

use crate::errors::{HierarchyError, MAX_DEPTH};
use crate::model::{Measures, Node};

/// Returns a new tree in which every branch's measures are the sum of its
/// children's, for every measure key present in any descendant.
///
/// The input is not mutated. Fails fast on duplicate sibling names or a
/// tree deeper than [`MAX_DEPTH`].
pub fn rollup(node: &Node) -> Result<Node, HierarchyError> {
    validate(node)?;
    Ok(roll(node))
}

/// Shape validation shared by [`rollup`] and [`crate::filter`].
pub(crate) fn validate(node: &Node) -> Result<(), HierarchyError> {
    validate_at(node, node, 0)
}

fn validate_at(root: &Node, node: &Node, depth: usize) -> Result<(), HierarchyError> {
    if depth > MAX_DEPTH {
        log::debug!("depth limit hit while validating `{}`", root.name);
        return Err(HierarchyError::DepthExceeded {
            root: root.name.clone(),
            limit: MAX_DEPTH,
        });
    }
    let mut seen = BTreeSet::new();
    for child in &node.children {
        if !seen.insert(child.name.as_str()) {
            return Err(HierarchyError::DuplicateSibling {
                parent: node.name.clone(),
                name: child.name.clone(),
            });
        }
        validate_at(root, child, depth + 1)?;
    }
    Ok(())
}

/// Aggregation pass proper; assumes a validated tree.
pub(crate) fn roll(node: &Node) -> Node {
    if node.is_leaf() {
        return node.clone();
    }
    let children: Vec<Node> = node.children.iter().map(roll).collect();
    let mut measures = Measures::new();
    for child in &children {
        measures.accumulate(&child.measures);
    }
    Node {
        name: node.name.clone(),
        kind: node.kind,
        measures,
        children,
        contract: node.contract.clone(),
    }
}
