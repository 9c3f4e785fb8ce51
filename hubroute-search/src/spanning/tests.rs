//! Unit tests for Prim spanning trees.

use hubroute_core::test_support::{sample_network, symmetric_network};
use hubroute_core::{Criterion, MemoryNetwork, RoutingError, UnknownNodeReason};
use rstest::{fixture, rstest};

use super::SpanningTrees;

#[fixture]
fn network() -> MemoryNetwork {
    sample_network()
}

fn ids(raw: &[&str]) -> Vec<String> {
    raw.iter().map(|id| (*id).to_owned()).collect()
}

#[expect(clippy::float_arithmetic, reason = "tolerance comparison")]
fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

fn pairs(tree: &hubroute_core::SpanningTree) -> Vec<(String, String)> {
    tree.edges
        .iter()
        .map(|edge| (edge.from.clone(), edge.to.clone()))
        .collect()
}

#[rstest]
fn spans_reachable_hubs_by_distance(network: MemoryNetwork) {
    let tree = SpanningTrees::new(&network)
        .build("DEP_1", &[], Criterion::Distance, 1.0)
        .expect("known start");
    assert_eq!(
        pairs(&tree),
        vec![
            ("DEP_1".to_owned(), "SUC_1".to_owned()),
            ("SUC_1".to_owned(), "SUC_2".to_owned()),
            ("SUC_2".to_owned(), "SUC_3".to_owned()),
        ]
    );
    assert!(close(tree.total, 9.0));
    assert_eq!(tree.nodes, ids(&["DEP_1", "SUC_1", "SUC_2", "SUC_3"]));
    assert_eq!(tree.edges.len(), tree.nodes.len() - 1);
}

#[rstest]
fn criterion_changes_tree(network: MemoryNetwork) {
    let tree = SpanningTrees::new(&network)
        .build("DEP_1", &[], Criterion::Time, 1.0)
        .expect("known start");
    assert_eq!(
        pairs(&tree),
        vec![
            ("DEP_1".to_owned(), "SUC_2".to_owned()),
            ("SUC_2".to_owned(), "SUC_3".to_owned()),
            ("DEP_1".to_owned(), "SUC_1".to_owned()),
        ]
    );
    assert!(close(tree.total, 22.0));
    assert_eq!(tree.criterion, Criterion::Time);
}

#[rstest]
#[case("SUC_1", 1, 8.0)]
#[case("SUC_3", 0, 0.0)]
fn zone_restricts_tree(
    network: MemoryNetwork,
    #[case] start: &str,
    #[case] edge_count: usize,
    #[case] total: f64,
) {
    let zone = ids(&["SUC_1", "SUC_3"]);
    let tree = SpanningTrees::new(&network)
        .build(start, &zone, Criterion::Distance, 1.0)
        .expect("start in zone");
    assert_eq!(tree.edges.len(), edge_count);
    assert!(close(tree.total, total));
    assert!(tree.nodes.iter().all(|node| zone.contains(node)));
}

#[rstest]
fn non_hub_zone_members_are_ignored(network: MemoryNetwork) {
    let zone = ids(&["SUC_1", "SUC_2", "CLI_1", "GHOST"]);
    let tree = SpanningTrees::new(&network)
        .build("SUC_1", &zone, Criterion::Distance, 1.0)
        .expect("start in zone");
    assert_eq!(tree.nodes, ids(&["SUC_1", "SUC_2"]));
}

#[rstest]
#[case("DEP_1", &["SUC_1"], UnknownNodeReason::OutsideZone)]
#[case("GHOST", &[], UnknownNodeReason::Missing)]
#[case("CLI_1", &[], UnknownNodeReason::NotAHub)]
fn rejects_invalid_start(
    network: MemoryNetwork,
    #[case] start: &str,
    #[case] zone: &[&str],
    #[case] expected: UnknownNodeReason,
) {
    let err = SpanningTrees::new(&network)
        .build(start, &ids(zone), Criterion::Distance, 1.0)
        .expect_err("invalid start");
    assert!(matches!(
        err,
        RoutingError::UnknownNode { reason, .. } if reason == expected
    ));
}

#[rstest]
fn symmetric_graph_picks_light_edges() {
    let network = symmetric_network(&[
        ("A", "B", 1.0),
        ("B", "C", 2.0),
        ("A", "C", 2.5),
        ("C", "D", 1.0),
        ("B", "D", 4.0),
    ]);
    let tree = SpanningTrees::new(&network)
        .build("D", &[], Criterion::Distance, 1.0)
        .expect("known start");
    assert!(close(tree.total, 4.0));
    assert_eq!(tree.nodes, ids(&["A", "B", "C", "D"]));
}

#[rstest]
fn building_twice_is_stable(network: MemoryNetwork) {
    let trees = SpanningTrees::new(&network);
    let first = trees
        .build("DEP_1", &[], Criterion::Cost, 2.0)
        .expect("known start");
    let second = trees
        .build("DEP_1", &[], Criterion::Cost, 2.0)
        .expect("known start");
    assert_eq!(first, second);
}

#[rstest]
#[case(-0.5)]
#[case(f64::NAN)]
fn rejects_unusable_toll_factor(network: MemoryNetwork, #[case] factor: f64) {
    let err = SpanningTrees::new(&network)
        .build("DEP_1", &[], Criterion::Cost, factor)
        .expect_err("unusable toll factor");
    assert!(matches!(err, RoutingError::InvalidTollFactor { .. }));
}
