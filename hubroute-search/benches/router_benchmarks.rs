//! Criterion benchmarks for shortest paths and the waypoint routers.
//!
//! Networks are generated from a fixed seed so runs are comparable.
//!
//! Run benchmarks with:
//! ```bash
//! cargo bench --package hubroute-search
//! ```

// Criterion macros generate code that triggers missing_docs warnings.
#![allow(missing_docs, reason = "Criterion macros generate undocumented code")]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use hubroute_core::{
    Criterion as Weighing, MemoryNetwork, Node, RouteEdge, WaypointRequest, WaypointSolver,
};
use hubroute_search::{BacktrackingRouter, BranchAndBoundRouter, ShortestPaths};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Seed for deterministic network generation.
const BENCHMARK_SEED: u64 = 42;

/// Hubs in the generated network.
const HUB_COUNT: usize = 60;

/// Hub half way round the ring from `H000`.
const FAR_HUB: usize = 30;

/// Extra random routes per hub on top of the connecting ring.
const EXTRA_ROUTES_PER_HUB: usize = 3;

/// Mandatory stop counts to benchmark.
const STOP_COUNTS: &[usize] = &[3, 5, 7];

fn hub_id(index: usize) -> String {
    format!("H{index:03}")
}

/// Build a strongly connected network: a two-way ring plus random chords.
#[expect(clippy::expect_used, reason = "generated benchmark data is consistent")]
fn generate_network(seed: u64) -> MemoryNetwork {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut network = MemoryNetwork::new();
    for index in 0..HUB_COUNT {
        let id = hub_id(index);
        network
            .add_node(Node::branch(id.clone(), id, "Bench"))
            .expect("unique hub");
    }
    for index in 0..HUB_COUNT {
        let next = if index + 1 == HUB_COUNT { 0 } else { index + 1 };
        add_route(&mut network, index, next, &mut rng);
        add_route(&mut network, next, index, &mut rng);
        for _ in 0..EXTRA_ROUTES_PER_HUB {
            let to = rng.gen_range(0..HUB_COUNT);
            if to != index {
                add_route(&mut network, index, to, &mut rng);
            }
        }
    }
    network
}

#[expect(clippy::expect_used, reason = "generated benchmark data is consistent")]
fn add_route(network: &mut MemoryNetwork, from: usize, to: usize, rng: &mut ChaCha8Rng) {
    let edge = RouteEdge::new(
        hub_id(from),
        hub_id(to),
        rng.gen_range(1.0..50.0),
        rng.gen_range(5.0..90.0),
        rng.gen_range(0.0..10.0),
    )
    .expect("positive weights");
    network.add_route(edge).expect("hubs exist");
}

fn stops(count: usize) -> Vec<String> {
    (1..=count).map(|step| hub_id(step * 7)).collect()
}

fn bench_shortest_paths(c: &mut Criterion) {
    let network = generate_network(BENCHMARK_SEED);
    let paths = ShortestPaths::new(&network);
    let origin = hub_id(0);
    let destination = hub_id(FAR_HUB);
    let mut group = c.benchmark_group("shortest_path");
    for weighing in [Weighing::Distance, Weighing::Time, Weighing::Cost] {
        group.bench_with_input(
            BenchmarkId::from_parameter(weighing),
            &weighing,
            |b, &weighing| {
                b.iter(|| {
                    paths.find_path(black_box(&origin), black_box(&destination), weighing, 1.5)
                });
            },
        );
    }
    group.finish();
}

fn bench_waypoint_routers(c: &mut Criterion) {
    let network = generate_network(BENCHMARK_SEED);
    let backtracking = BacktrackingRouter::new(&network);
    let branch_and_bound = BranchAndBoundRouter::new(&network);
    let mut group = c.benchmark_group("waypoints");
    group.sample_size(20);
    for &count in STOP_COUNTS {
        let request = WaypointRequest::new(hub_id(0), hub_id(HUB_COUNT - 1), stops(count));
        group.bench_with_input(BenchmarkId::new("backtracking", count), &request, |b, request| {
            b.iter(|| backtracking.solve(black_box(request)));
        });
        group.bench_with_input(
            BenchmarkId::new("branch_and_bound", count),
            &request,
            |b, request| {
                b.iter(|| branch_and_bound.solve(black_box(request)));
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_shortest_paths, bench_waypoint_routers);
criterion_main!(benches);
