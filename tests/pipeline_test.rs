//! End-to-end pipeline over a query-shaped hierarchy: deserialize,
//! classify, roll up, filter, rank.

use caseload::{
    classify_leaves, filter_by_kind, grand_total, path_id, rank, rollup, totals_by_kind,
    ExpansionState, Kind, KindSelector, Node,
};
use caseload::model::{
    ACTUAL_HOURS, APPROVED_HOURS, HOURS, OVER_APPROVED_HOURS, WASTED_HOURS,
};
use chrono::{TimeZone, Utc};
use pretty_assertions::assert_eq;

/// One manager, one client, two sponsors: a consulting leaf with
/// hours=10/approved=8 under sponsor A, an internal leaf with hours=5
/// under sponsor B.
fn sample_hierarchy() -> Node {
    let raw = serde_json::json!({
        "name": "company",
        "children": [{
            "name": "ana",
            "children": [{
                "name": "acme",
                "children": [
                    {
                        "name": "sponsor-a",
                        "children": [{
                            "name": "checkout",
                            "kind": "consulting",
                            "measures": { "hours": 10.0, "approvedHours": 8.0 }
                        }]
                    },
                    {
                        "name": "sponsor-b",
                        "children": [{
                            "name": "chores",
                            "kind": "internal",
                            "measures": { "hours": 5.0 }
                        }]
                    }
                ]
            }]
        }]
    });
    serde_json::from_value(raw).expect("hierarchy fixture should deserialize")
}

#[test]
fn rollup_totals_reach_every_ancestor() {
    let rolled = rollup(&sample_hierarchy()).unwrap();
    let client = &rolled.children[0].children[0];
    assert_eq!(client.name, "acme");
    assert_eq!(client.measures.get(HOURS), 15.0);
    assert_eq!(client.measures.get(APPROVED_HOURS), 8.0);
    assert_eq!(rolled.measures.get(HOURS), 15.0);
}

#[test]
fn consulting_filter_prunes_sponsor_b_and_rerolls() {
    let rolled = rollup(&sample_hierarchy()).unwrap();
    let filtered = filter_by_kind(&rolled, KindSelector::Only(Kind::Consulting))
        .unwrap()
        .expect("a consulting leaf exists");
    let client = &filtered.children[0].children[0];
    assert_eq!(client.measures.get(HOURS), 10.0);
    assert_eq!(client.children.len(), 1);
    assert_eq!(client.children[0].name, "sponsor-a");
}

#[test]
fn classification_feeds_rollup_with_derived_buckets() {
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 12, 0, 0).unwrap();
    let classified = classify_leaves(&sample_hierarchy(), now);
    let rolled = rollup(&classified).unwrap();

    let leaf = &rolled.children[0].children[0].children[0].children[0];
    assert_eq!(leaf.measures.get(OVER_APPROVED_HOURS), 2.0);
    assert_eq!(leaf.measures.get(WASTED_HOURS), 0.0);

    // Buckets travel upward as ordinary measures.
    assert_eq!(rolled.measures.get(OVER_APPROVED_HOURS), 2.0);
}

#[test]
fn buckets_roll_up_without_being_recomputed_at_branch_level() {
    // One leaf wastes 3h, the other overruns by 2h. Summed raw measures at
    // the branch (11 approved vs 10 actual) would classify as 1h wasted;
    // rolling the per-leaf buckets keeps both numbers.
    let raw = serde_json::json!({
        "name": "sponsor",
        "children": [
            { "name": "p1", "kind": "consulting",
              "measures": { "approvedHours": 8.0, "actualHours": 5.0 } },
            { "name": "p2", "kind": "consulting",
              "measures": { "approvedHours": 3.0, "actualHours": 5.0 } }
        ]
    });
    let tree: Node = serde_json::from_value(raw).unwrap();
    let now = Utc.with_ymd_and_hms(2026, 3, 2, 0, 0, 0).unwrap();
    let rolled = rollup(&classify_leaves(&tree, now)).unwrap();
    assert_eq!(rolled.measures.get(WASTED_HOURS), 3.0);
    assert_eq!(rolled.measures.get(OVER_APPROVED_HOURS), 2.0);
    assert_eq!(rolled.measures.get(ACTUAL_HOURS), 10.0);
}

#[test]
fn summary_and_ranking_agree_with_rollup() {
    let tree = sample_hierarchy();
    assert_eq!(grand_total(&tree, HOURS), 15.0);

    let by_kind = totals_by_kind(&tree, HOURS);
    assert_eq!(by_kind[&Kind::Consulting], 10.0);
    assert_eq!(by_kind[&Kind::Internal], 5.0);

    let rolled = rollup(&tree).unwrap();
    let sponsors = &rolled.children[0].children[0].children;
    let ranking = rank(sponsors, HOURS, Some(10));
    assert_eq!(ranking.total_count, 2);
    assert_eq!(ranking.entries[0].name, "sponsor-a");
    assert!((ranking.entries[0].percentage_of_total - 66.666_666).abs() < 0.001);
    assert_eq!(ranking.entries[1].name, "sponsor-b");
}

#[test]
fn expansion_state_survives_a_refetch_of_the_same_entities() {
    let sponsor_path = path_id(["ana", "acme", "sponsor-a"]);
    let state = ExpansionState::new().toggle(&sponsor_path);

    // Refetch: a new tree instance with the same entity names.
    let refetched = rollup(&sample_hierarchy()).unwrap();
    let sponsor = &refetched.children[0].children[0].children[0];
    let path = path_id(["ana", "acme", sponsor.name.as_str()]);
    assert!(state.is_expanded(&path));
}

#[test]
fn empty_filter_result_is_distinct_from_zero_filled_tree() {
    let filtered = filter_by_kind(&sample_hierarchy(), KindSelector::Only(Kind::Squad)).unwrap();
    assert_eq!(filtered, None);
}
