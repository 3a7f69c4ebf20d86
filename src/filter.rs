//! Kind-based pruning with re-derived totals.
//!
//! Pruning happens before aggregation: surviving ancestors are re-rolled
//! from their filtered children, never by adjusting previously rolled
//! numbers. Reusing a stored rolled total after pruning double counts the
//! excluded branches, which is exactly the bug class this module exists to
//! retire.
//!
//! [`FilterMetrics`] records what was pruned and why, so the rendering
//! layer can say "12 of 40 line-items match" instead of silently shrinking
//! a table.

use serde::{Deserialize, Serialize};

use crate::errors::HierarchyError;
use crate::model::{Kind, Measures, Node};
use crate::rollup::{roll, validate};

/// Filter selector: everything, or a single work category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KindSelector {
    Total,
    Only(Kind),
}

/// Counts of filtering decisions for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterMetrics {
    /// Leaves in the input tree.
    pub total_leaves: usize,
    /// Leaves whose kind matched the selector.
    pub leaves_kept: usize,
    /// Leaves dropped by the selector.
    pub leaves_pruned: usize,
    /// Branches dropped because no descendant leaf matched.
    pub branches_pruned: usize,
}

impl FilterMetrics {
    /// Percentage of leaves kept; `0.0` for an empty input.
    pub fn inclusion_rate(&self) -> f64 {
        if self.total_leaves == 0 {
            0.0
        } else {
            (self.leaves_kept as f64 / self.total_leaves as f64) * 100.0
        }
    }
}

/// Prunes the tree to leaves of the selected kind and re-rolls surviving
/// ancestors from the filtered children.
///
/// `KindSelector::Total` returns the rolled input unchanged. `Ok(None)`
/// means no leaf anywhere matched; callers render that as "no data", not
/// as a zero-filled tree.
pub fn filter_by_kind(
    node: &Node,
    selector: KindSelector,
) -> Result<Option<Node>, HierarchyError> {
    filter_by_kind_with_metrics(node, selector).map(|(tree, _)| tree)
}

/// Same as [`filter_by_kind`], also reporting what was pruned.
pub fn filter_by_kind_with_metrics(
    node: &Node,
    selector: KindSelector,
) -> Result<(Option<Node>, FilterMetrics), HierarchyError> {
    validate(node)?;
    let mut metrics = FilterMetrics {
        total_leaves: node.leaves().count(),
        ..FilterMetrics::default()
    };
    let filtered = match selector {
        KindSelector::Total => {
            metrics.leaves_kept = metrics.total_leaves;
            Some(roll(node))
        }
        KindSelector::Only(kind) => prune(node, kind, &mut metrics).map(|pruned| roll(&pruned)),
    };
    log::debug!(
        "kind filter kept {}/{} leaves, pruned {} branches",
        metrics.leaves_kept,
        metrics.total_leaves,
        metrics.branches_pruned
    );
    Ok((filtered, metrics))
}

fn prune(node: &Node, kind: Kind, metrics: &mut FilterMetrics) -> Option<Node> {
    if node.is_leaf() {
        if node.kind == Some(kind) {
            metrics.leaves_kept += 1;
            return Some(node.clone());
        }
        metrics.leaves_pruned += 1;
        return None;
    }
    let children: Vec<Node> = node
        .children
        .iter()
        .filter_map(|child| prune(child, kind, metrics))
        .collect();
    if children.is_empty() {
        metrics.branches_pruned += 1;
        return None;
    }
    Some(Node {
        name: node.name.clone(),
        kind: node.kind,
        // Totals are re-derived by the roll pass over filtered children.
        measures: Measures::new(),
        children,
        contract: node.contract.clone(),
    })
}
