//! Core data model for the operational hierarchy.
//!
//! A [`Node`] is one level of the Account Manager -> Client -> Sponsor ->
//! Case -> Project hierarchy the dashboard renders. Measures form an open,
//! string-keyed vocabulary ([`Measures`]); the work category is a closed
//! enum ([`Kind`]) so that adding a category is a compile-time event rather
//! than a dynamic-property lookup that fails at render time.
//!
//! The model carries no logic beyond accessors; aggregation lives in
//! [`crate::rollup`], pruning in [`crate::filter`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Raw measure keys produced by the upstream query layer.
pub const FEE: &str = "fee";
pub const HOURS: &str = "hours";
pub const APPROVED_HOURS: &str = "approvedHours";
pub const ACTUAL_HOURS: &str = "actualHours";

/// Derived bucket keys attached by [`crate::classify`].
pub const WASTED_HOURS: &str = "wastedHours";
pub const OVER_APPROVED_HOURS: &str = "overApprovedHours";
pub const POSSIBLE_IDLE_HOURS: &str = "possibleIdleHours";
pub const POSSIBLE_UNPAID_HOURS: &str = "possibleUnpaidHours";

/// Category of a unit of work.
///
/// Present only on leaf-level nodes in source data; branches derive their
/// per-kind totals through [`crate::summary::totals_by_kind`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Kind {
    Consulting,
    HandsOn,
    Squad,
    Internal,
}

impl Kind {
    /// Display label for stat cards and table headers.
    pub fn label(&self) -> &'static str {
        match self {
            Kind::Consulting => "Consulting",
            Kind::HandsOn => "Hands-on",
            Kind::Squad => "Squad",
            Kind::Internal => "Internal",
        }
    }

    /// Short label for chips and narrow table columns.
    pub fn short_label(&self) -> &'static str {
        match self {
            Kind::Consulting => "C",
            Kind::HandsOn => "HO",
            Kind::Squad => "SQ",
            Kind::Internal => "INT",
        }
    }

    /// All kinds in display order.
    pub fn all() -> [Kind; 4] {
        [Kind::Consulting, Kind::HandsOn, Kind::Squad, Kind::Internal]
    }
}

/// String-keyed measure map with zero-default reads.
///
/// A missing key is `0.0` by definition, never an error; iteration order is
/// deterministic so that rollup results compare stably.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Measures(BTreeMap<String, f64>);

impl Measures {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `measure`, or `0.0` when the key is absent.
    pub fn get(&self, measure: &str) -> f64 {
        self.0.get(measure).copied().unwrap_or(0.0)
    }

    /// Whether `measure` is present, regardless of value.
    pub fn contains(&self, measure: &str) -> bool {
        self.0.contains_key(measure)
    }

    pub fn set(&mut self, measure: impl Into<String>, value: f64) {
        self.0.insert(measure.into(), value);
    }

    /// Keywise addition of `other` into `self`, treating absent keys as zero.
    pub fn accumulate(&mut self, other: &Measures) {
        for (key, value) in &other.0 {
            *self.0.entry(key.clone()).or_insert(0.0) += value;
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, f64)> for Measures {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<(&'a str, f64)> for Measures {
    fn from_iter<I: IntoIterator<Item = (&'a str, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.to_string(), v)).collect())
    }
}

/// Billing arrangement metadata attached to pre-contracted leaves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractTerms {
    pub start_of_contract: DateTime<Utc>,
    pub end_of_contract: DateTime<Utc>,
    pub weekly_approved_hours: f64,
    #[serde(default)]
    pub is_pre_contracted: bool,
}

/// One level of the hierarchy.
///
/// Names are unique among siblings only; callers needing stable identifiers
/// across the whole tree join ancestor names with [`crate::view::path_id`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<Kind>,
    #[serde(default, skip_serializing_if = "Measures::is_empty")]
    pub measures: Measures,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contract: Option<ContractTerms>,
}

impl Node {
    /// Leaf constructor for line-items carrying measures.
    pub fn leaf(name: impl Into<String>, kind: Kind, measures: Measures) -> Self {
        Self {
            name: name.into(),
            kind: Some(kind),
            measures,
            children: Vec::new(),
            contract: None,
        }
    }

    /// Branch constructor; measures are derived by [`crate::rollup::rollup`].
    pub fn branch(name: impl Into<String>, children: Vec<Node>) -> Self {
        Self {
            name: name.into(),
            kind: None,
            measures: Measures::new(),
            children,
            contract: None,
        }
    }

    pub fn with_contract(mut self, contract: ContractTerms) -> Self {
        self.contract = Some(contract);
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Depth-first iterator over leaf descendants (or `self` when a leaf).
    pub fn leaves(&self) -> Leaves<'_> {
        Leaves { stack: vec![self] }
    }
}

/// Iterator state for [`Node::leaves`].
pub struct Leaves<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Leaves<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if node.is_leaf() {
                return Some(node);
            }
            self.stack.extend(node.children.iter().rev());
        }
        None
    }
}
