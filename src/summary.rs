//! Scalar totals for summary stat cards.

use std::collections::BTreeMap;

use crate::model::{Kind, Node};

/// Sum of `measure` over every leaf descendant.
///
/// Works on rolled and unrolled trees alike, since it never reads branch
/// measures.
pub fn grand_total(node: &Node, measure: &str) -> f64 {
    node.leaves().map(|leaf| leaf.measures.get(measure)).sum()
}

/// Per-kind totals of `measure` over all leaves; kinds with no leaves are
/// absent from the map. Untagged leaves are skipped.
pub fn totals_by_kind(node: &Node, measure: &str) -> BTreeMap<Kind, f64> {
    let mut totals = BTreeMap::new();
    for leaf in node.leaves() {
        if let Some(kind) = leaf.kind {
            *totals.entry(kind).or_insert(0.0) += leaf.measures.get(measure);
        }
    }
    totals
}
