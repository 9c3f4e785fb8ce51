//! End-to-end command tests: parse arguments, load a snapshot, print JSON.

use rstest::{fixture, rstest};
use serde_json::{Value, json};

use super::helpers::{NetworkFile, run_cli, sample_network};
use super::*;
use crate::load::{LoadConfig, Method, execute_load};
use crate::search::{Algorithm, SearchConfig, SearchOutput, execute_search};

#[fixture]
fn snapshot() -> NetworkFile {
    NetworkFile::sample()
}

fn run_json(argv: &[&str]) -> Value {
    let (outcome, stdout) = run_cli(argv);
    if let Err(err) = outcome {
        panic!("command failed: {err}");
    }
    serde_json::from_str(&stdout).expect("stdout is JSON")
}

#[rstest]
fn breadth_first_search_prints_hop_path(snapshot: NetworkFile) {
    let output = run_json(&[
        "hubroute",
        "search",
        "DEP_1",
        "SUC_3",
        "--network",
        snapshot.path().as_str(),
    ]);
    assert_eq!(output["path"], json!(["DEP_1", "SUC_3"]));
    assert_eq!(output["names"], json!(["Central Depot", "East Branch"]));
}

#[rstest]
fn depth_first_search_reports_visited_order(snapshot: NetworkFile) {
    let output = run_json(&[
        "hubroute",
        "search",
        "DEP_1",
        "CLI_1",
        "--algorithm",
        "dfs",
        "--include-clients",
        "--network",
        snapshot.path().as_str(),
    ]);
    assert_eq!(output["path"], json!(["DEP_1", "SUC_2", "CLI_1"]));
    assert_eq!(
        output["visited"],
        json!(["DEP_1", "SUC_1", "CLI_2", "SUC_2", "CLI_1"])
    );
}

#[rstest]
fn search_without_destination_traverses(snapshot: NetworkFile) {
    let output = run_json(&[
        "hubroute",
        "search",
        "SUC_2",
        "--depth",
        "1",
        "--include-clients",
        "--network",
        snapshot.path().as_str(),
    ]);
    assert_eq!(
        output["order"],
        json!(["SUC_2", "CLI_1", "DEP_1", "SUC_1", "SUC_3"])
    );
}

#[rstest]
fn via_branch_reaches_client() {
    let network = sample_network();
    let config = SearchConfig {
        network: "unused.json".into(),
        origin: "DEP_1".to_owned(),
        destination: Some("CLI_1".to_owned()),
        algorithm: Algorithm::BreadthFirst,
        depth: hubroute_core::DepthLimit::Unbounded,
        include_clients: false,
        via_branch: true,
    };
    match execute_search(&config, &network).expect("served client") {
        SearchOutput::Hops(found) => {
            assert_eq!(found.path, vec!["DEP_1", "SUC_2", "CLI_1"]);
        }
        other => panic!("expected a hop path, found {other:?}"),
    }
}

#[rstest]
#[case("distance", &["DEP_1", "SUC_1", "SUC_2", "SUC_3"], 9.0)]
#[case("time", &["DEP_1", "SUC_2", "SUC_3"], 12.0)]
#[case("cost", &["DEP_1", "SUC_1", "SUC_3"], 2.0)]
fn shortest_path_prints_total(
    snapshot: NetworkFile,
    #[case] criterion: &str,
    #[case] expected: &[&str],
    #[case] total: f64,
) {
    let output = run_json(&[
        "hubroute",
        "shortest-path",
        "DEP_1",
        "SUC_3",
        "--criterion",
        criterion,
        "--network",
        snapshot.path().as_str(),
    ]);
    assert_eq!(output["path"], json!(expected));
    assert_eq!(output["total"], json!(total));
}

#[rstest]
fn unreachable_destination_prints_null_total(snapshot: NetworkFile) {
    let output = run_json(&[
        "hubroute",
        "shortest-path",
        "DEP_1",
        "DEP_2",
        "--network",
        snapshot.path().as_str(),
    ]);
    assert_eq!(output["path"], json!([]));
    assert_eq!(output["total"], Value::Null);
}

#[rstest]
fn toll_factor_scales_cost(snapshot: NetworkFile) {
    let output = run_json(&[
        "hubroute",
        "shortest-path",
        "DEP_1",
        "SUC_3",
        "--criterion",
        "cost",
        "--toll-factor",
        "3",
        "--network",
        snapshot.path().as_str(),
    ]);
    assert_eq!(output["total"], json!(6.0));
}

#[rstest]
fn spanning_tree_prints_edges(snapshot: NetworkFile) {
    let output = run_json(&[
        "hubroute",
        "spanning-tree",
        "DEP_1",
        "--network",
        snapshot.path().as_str(),
    ]);
    assert_eq!(output["total"], json!(9.0));
    assert_eq!(output["nodes"], json!(["DEP_1", "SUC_1", "SUC_2", "SUC_3"]));
    assert_eq!(output["edges"].as_array().map(Vec::len), Some(3));
}

#[rstest]
#[case("backtracking")]
#[case("branch-and-bound")]
fn waypoints_print_route(snapshot: NetworkFile, #[case] strategy: &str) {
    let output = run_json(&[
        "hubroute",
        "waypoints",
        "DEP_1",
        "CLI_1",
        "--stops",
        "SUC_3",
        "--strategy",
        strategy,
        "--network",
        snapshot.path().as_str(),
    ]);
    assert_eq!(output["cost"], json!(9.0));
    assert_eq!(
        output["path"],
        json!(["DEP_1", "SUC_1", "SUC_2", "SUC_3", "CLI_1"])
    );
}

#[rstest]
fn waypoints_without_route_print_null(snapshot: NetworkFile) {
    let output = run_json(&[
        "hubroute",
        "waypoints",
        "DEP_2",
        "SUC_1",
        "--network",
        snapshot.path().as_str(),
    ]);
    assert_eq!(output, Value::Null);
}

#[rstest]
fn greedy_load_prints_plan(snapshot: NetworkFile) {
    let output = run_json(&[
        "hubroute",
        "load",
        "DEP_1",
        "--destination",
        "CLI_1",
        "--network",
        snapshot.path().as_str(),
    ]);
    assert_eq!(output["vehicle"], json!("VEH_1"));
    let assigned: Vec<&str> = output["assigned"]
        .as_array()
        .expect("assigned list")
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert_eq!(assigned, vec!["PKG_1", "PKG_3"]);
    assert_eq!(output["assigned"][0]["state"], json!("assigned"));
    assert_eq!(output["assigned"][0]["destination"], json!("CLI_1"));
}

#[rstest]
fn knapsack_load_prints_value(snapshot: NetworkFile) {
    let output = run_json(&[
        "hubroute",
        "load",
        "DEP_1",
        "--method",
        "knapsack",
        "--network",
        snapshot.path().as_str(),
    ]);
    assert_eq!(output["total_value"], json!(5000));
    assert_eq!(output["total_weight_kg"], json!(10));
}

#[rstest]
fn load_leaves_snapshot_untouched(snapshot: NetworkFile) {
    let before = std::fs::read_to_string(snapshot.path()).expect("read snapshot");
    run_json(&[
        "hubroute",
        "load",
        "DEP_1",
        "--network",
        snapshot.path().as_str(),
    ]);
    let after = std::fs::read_to_string(snapshot.path()).expect("read snapshot");
    assert_eq!(before, after);
}

#[rstest]
fn load_with_foreign_vehicle_fails() {
    let network = sample_network();
    let config = LoadConfig {
        network: "unused.json".into(),
        method: Method::Greedy,
        request: hubroute_load::LoadRequest::new("DEP_1").with_vehicle("VEH_9"),
    };
    let err = execute_load(&config, &network).expect_err("foreign vehicle");
    assert_eq!(
        err.to_string(),
        "vehicle VEH_9 does not belong to depot DEP_1"
    );
}

#[rstest]
fn packages_print_loading_order(snapshot: NetworkFile) {
    let output = run_json(&[
        "hubroute",
        "packages",
        "DEP_1",
        "--network",
        snapshot.path().as_str(),
    ]);
    let ids: Vec<&str> = output
        .as_array()
        .expect("package list")
        .iter()
        .filter_map(|p| p["id"].as_str())
        .collect();
    assert_eq!(ids, vec!["PKG_1", "PKG_2", "PKG_3"]);
}

#[rstest]
fn routing_errors_surface_unchanged(snapshot: NetworkFile) {
    let (outcome, stdout) = run_cli(&[
        "hubroute",
        "shortest-path",
        "DEP_1",
        "CLI_3",
        "--network",
        snapshot.path().as_str(),
    ]);
    let err = outcome.expect_err("unserved client");
    assert!(matches!(err, CliError::Routing(_)));
    assert_eq!(err.to_string(), "node CLI_3 is not served by any branch");
    assert!(stdout.is_empty());
}

#[rstest]
fn unknown_subcommand_is_an_argument_error() {
    let (outcome, _) = run_cli(&["hubroute", "teleport"]);
    assert!(matches!(outcome, Err(CliError::ArgumentParsing(_))));
}
