//! Top-N ranking with share-of-total percentages.

use serde::Serialize;
use std::cmp::Ordering;

use crate::model::Node;

/// One row of a ranked projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedEntry {
    pub name: String,
    pub value: f64,
    pub percentage_of_total: f64,
}

/// A ranked projection plus the pre-truncation count.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Ranking {
    pub entries: Vec<RankedEntry>,
    /// Entries before the limit was applied, so callers can label the view
    /// "Top N" vs "All".
    pub total_count: usize,
}

impl Ranking {
    pub fn is_truncated(&self) -> bool {
        self.total_count > self.entries.len()
    }
}

/// Ranks `nodes` descending by `measures[measure]`, ties broken by name
/// ascending.
///
/// Percentages are shares of the sum over all input nodes, `0.0` for every
/// entry when that sum is zero. The input slice is never reordered; a
/// `limit` of `None` keeps every entry.
pub fn rank(nodes: &[Node], measure: &str, limit: Option<usize>) -> Ranking {
    let total: f64 = nodes.iter().map(|n| n.measures.get(measure)).sum();
    let mut entries: Vec<RankedEntry> = nodes
        .iter()
        .map(|node| {
            let value = node.measures.get(measure);
            RankedEntry {
                name: node.name.clone(),
                value,
                percentage_of_total: if total == 0.0 {
                    0.0
                } else {
                    value / total * 100.0
                },
            }
        })
        .collect();
    entries.sort_by(|a, b| {
        b.value
            .partial_cmp(&a.value)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
    let total_count = entries.len();
    if let Some(limit) = limit {
        entries.truncate(limit);
    }
    Ranking {
        entries,
        total_count,
    }
}
