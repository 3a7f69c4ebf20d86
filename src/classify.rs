//! Classification rules over rolled leaf measures.
//!
//! Three independent rule families, all pure functions:
//!
//! - **Variance** for regular (pay-per-hour) work: approved-but-unused
//!   hours vs actual hours beyond approval.
//! - **Contract pace** for pre-contracted work: shortfall or excess
//!   relative to the contracted weekly rate over elapsed contract time.
//! - **Timeliness** for submissions: one of four buckets relative to a due
//!   boundary, with the hour offsets supplied as configuration.
//!
//! Each family's two hour buckets are mutually exclusive per leaf by
//! construction. [`classify_leaves`] writes the buckets into leaf measures
//! only; a subsequent [`crate::rollup::rollup`] pass carries them upward,
//! which is the only correct way to total them (re-deriving buckets from
//! rolled raw measures at branch level would collapse the exclusivity).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{
    ContractTerms, Measures, Node, ACTUAL_HOURS, APPROVED_HOURS, HOURS, OVER_APPROVED_HOURS,
    POSSIBLE_IDLE_HOURS, POSSIBLE_UNPAID_HOURS, WASTED_HOURS,
};

const HOURS_PER_WEEK: f64 = 7.0 * 24.0;
const SECONDS_PER_WEEK: f64 = HOURS_PER_WEEK * 3600.0;

/// Variance buckets for regular work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VarianceBuckets {
    pub wasted_hours: f64,
    pub over_approved_hours: f64,
}

/// `wastedHours` and `overApprovedHours` from an approved/actual pair.
///
/// Exactly one bucket is non-zero unless the pair is balanced.
pub fn variance(approved_hours: f64, actual_hours: f64) -> VarianceBuckets {
    VarianceBuckets {
        wasted_hours: (approved_hours - actual_hours).max(0.0),
        over_approved_hours: (actual_hours - approved_hours).max(0.0),
    }
}

/// Pace buckets for pre-contracted work.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaceBuckets {
    pub possible_idle_hours: f64,
    pub possible_unpaid_hours: f64,
}

/// Compares hours actually worked against the contracted weekly pace.
///
/// Expected hours accrue at `weekly_approved_hours` per elapsed contract
/// week, with `now` clamped to the contract window. Work under pace leaves
/// contracted capacity unconsumed (`possibleIdleHours`); work beyond the
/// full contracted total is uncompensated (`possibleUnpaidHours`). The two
/// are never both positive.
pub fn contract_pace(terms: &ContractTerms, actual_hours: f64, now: DateTime<Utc>) -> PaceBuckets {
    let clamped = now
        .min(terms.end_of_contract)
        .max(terms.start_of_contract);
    let elapsed_weeks =
        (clamped - terms.start_of_contract).num_seconds() as f64 / SECONDS_PER_WEEK;
    let total_weeks = (terms.end_of_contract - terms.start_of_contract).num_seconds() as f64
        / SECONDS_PER_WEEK;

    let expected_to_date = elapsed_weeks * terms.weekly_approved_hours;
    let contracted_total = total_weeks * terms.weekly_approved_hours;

    if actual_hours > expected_to_date {
        PaceBuckets {
            possible_idle_hours: 0.0,
            possible_unpaid_hours: (actual_hours - contracted_total).max(0.0),
        }
    } else {
        PaceBuckets {
            possible_idle_hours: expected_to_date - actual_hours,
            possible_unpaid_hours: 0.0,
        }
    }
}

/// Submission timeliness bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Timeliness {
    Early,
    Ok,
    Acceptable,
    Late,
}

impl Timeliness {
    pub fn label(&self) -> &'static str {
        match self {
            Timeliness::Early => "Early",
            Timeliness::Ok => "On time",
            Timeliness::Acceptable => "Acceptable",
            Timeliness::Late => "Late",
        }
    }
}

/// Ordered hour offsets from the due boundary, inclusive upper bounds.
///
/// A submission at `due + offset` lands in the first bucket whose limit it
/// does not exceed; anything past `acceptable_limit` is late. Thresholds
/// come from caller configuration, never from process state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelinessThresholds {
    /// Offset at or below which a submission counts as early (hours,
    /// negative means before the boundary).
    #[serde(default = "default_early_limit")]
    pub early_limit: f64,
    /// Offset at or below which a submission is on time.
    #[serde(default = "default_ok_limit")]
    pub ok_limit: f64,
    /// Offset at or below which a submission is still acceptable.
    #[serde(default = "default_acceptable_limit")]
    pub acceptable_limit: f64,
}

fn default_early_limit() -> f64 {
    -24.0
}

fn default_ok_limit() -> f64 {
    0.0
}

fn default_acceptable_limit() -> f64 {
    24.0
}

impl Default for TimelinessThresholds {
    fn default() -> Self {
        Self {
            early_limit: default_early_limit(),
            ok_limit: default_ok_limit(),
            acceptable_limit: default_acceptable_limit(),
        }
    }
}

/// Buckets a submission relative to its due boundary.
pub fn classify_timeliness(
    submitted: DateTime<Utc>,
    due: DateTime<Utc>,
    thresholds: &TimelinessThresholds,
) -> Timeliness {
    let offset_hours = (submitted - due).num_seconds() as f64 / 3600.0;
    if offset_hours <= thresholds.early_limit {
        Timeliness::Early
    } else if offset_hours <= thresholds.ok_limit {
        Timeliness::Ok
    } else if offset_hours <= thresholds.acceptable_limit {
        Timeliness::Acceptable
    } else {
        Timeliness::Late
    }
}

/// Annotates every leaf with its derived hour buckets.
///
/// Pre-contracted leaves (per [`ContractTerms::is_pre_contracted`]) get
/// pace buckets; everything else gets variance buckets. Branch measures are
/// left untouched; run [`crate::rollup::rollup`] afterwards to carry the
/// buckets upward.
pub fn classify_leaves(node: &Node, now: DateTime<Utc>) -> Node {
    if !node.is_leaf() {
        let children = node.children.iter().map(|c| classify_leaves(c, now)).collect();
        return Node {
            name: node.name.clone(),
            kind: node.kind,
            measures: node.measures.clone(),
            children,
            contract: node.contract.clone(),
        };
    }

    let mut leaf = node.clone();
    let actual = actual_hours(&leaf.measures);
    match &leaf.contract {
        Some(terms) if terms.is_pre_contracted => {
            let pace = contract_pace(terms, actual, now);
            leaf.measures.set(POSSIBLE_IDLE_HOURS, pace.possible_idle_hours);
            leaf.measures
                .set(POSSIBLE_UNPAID_HOURS, pace.possible_unpaid_hours);
        }
        _ => {
            let buckets = variance(leaf.measures.get(APPROVED_HOURS), actual);
            leaf.measures.set(WASTED_HOURS, buckets.wasted_hours);
            leaf.measures
                .set(OVER_APPROVED_HOURS, buckets.over_approved_hours);
        }
    }
    leaf
}

/// Hours actually worked by a leaf: `actualHours` when the key is present,
/// otherwise the plain `hours` measure, which is how timesheet pages report
/// actuals.
fn actual_hours(measures: &Measures) -> f64 {
    if measures.contains(ACTUAL_HOURS) {
        measures.get(ACTUAL_HOURS)
    } else {
        measures.get(HOURS)
    }
}
