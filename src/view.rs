//! Expand/collapse state for tree tables.
//!
//! The state is a persistent set of slash-joined path identifiers, not a
//! view over any particular [`crate::model::Node`] instance. Names are only
//! unique among siblings, so callers key entries by full ancestor path
//! ([`path_id`]); that way the state survives a data refetch as long as the
//! same entities still exist.

use im::HashSet;

/// Set of currently expanded branch paths.
///
/// `toggle` returns a new state; `im`'s structural sharing keeps that cheap
/// no matter how often the view re-renders.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    expanded: HashSet<String>,
}

impl ExpansionState {
    /// Fresh state with every branch collapsed.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flips membership of `path` in the expanded set.
    pub fn toggle(&self, path: &str) -> Self {
        let mut expanded = self.expanded.clone();
        if expanded.remove(path).is_none() {
            expanded.insert(path.to_string());
        }
        Self { expanded }
    }

    pub fn is_expanded(&self, path: &str) -> bool {
        self.expanded.contains(path)
    }

    /// Collapses everything.
    pub fn reset(&self) -> Self {
        Self::new()
    }

    pub fn expanded_count(&self) -> usize {
        self.expanded.len()
    }
}

/// Joins path segments into a stable identifier, e.g.
/// `manager/client/sponsor`.
pub fn path_id<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    segments
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join("/")
}
