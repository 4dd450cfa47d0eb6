//! Shared fixtures and brute-force oracles for the integration tests.

#![allow(dead_code)]

use netlp_core::{Arc, ArcAttribute, ArcKey, Network, NodeId};
use petgraph::algo::{all_simple_paths, dijkstra};
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, VecDeque};

/// Install a subscriber once; respects RUST_LOG.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_test_writer()
        .try_init();
}

/// Complete digraph on `n` nodes with independent integer lengths in [1, 5].
pub fn random_biobjective(n: usize, seed: u64) -> Network {
    let mut rng = StdRng::seed_from_u64(seed);
    Network::complete_digraph(n, |arc| {
        let primary = rng.gen_range(1..=5) as f64;
        let secondary = rng.gen_range(1..=5) as f64;
        arc.with_lengths(primary, secondary)
    })
}

fn random_arc(rng: &mut StdRng, from: NodeId, to: NodeId, low: u32) -> Arc {
    Arc::new(from, to)
        .with_length(rng.gen_range(low..=5) as f64)
        .with_capacity(rng.gen_range(low..=4) as f64)
        .with_cost(rng.gen_range(low..=3) as f64)
}

/// Small interdiction instance: a chain 0 -> 1 -> ... -> n-1 guarantees the
/// sink is reachable, plus random extra arcs up to `max_arcs` in total.
///
/// Lengths lie in [1, 5], capacities in [1, 4] and costs in [1, 3]; with
/// `allow_zero` each range starts at 0 instead.
pub fn random_interdiction(n: usize, max_arcs: usize, allow_zero: bool, seed: u64) -> Network {
    let low = if allow_zero { 0 } else { 1 };
    let mut rng = StdRng::seed_from_u64(seed);
    let mut network = Network::new();
    let ids: Vec<NodeId> = (0..n).map(|i| network.add_node(format!("v{}", i))).collect();

    for pair in ids.windows(2) {
        let arc = random_arc(&mut rng, pair[0], pair[1], low);
        network.add_arc(arc).unwrap();
    }
    let mut attempts = 0;
    while network.arc_count() < max_arcs && attempts < 100 {
        attempts += 1;
        let from = ids[rng.gen_range(0..n)];
        let to = ids[rng.gen_range(0..n)];
        if from == to || network.arc(ArcKey::new(from, to)).is_some() {
            continue;
        }
        let arc = random_arc(&mut rng, from, to, low);
        network.add_arc(arc).unwrap();
    }
    network
}

pub fn first_and_last(network: &Network) -> (NodeId, NodeId) {
    (NodeId::new(0), NodeId::new(network.node_count() - 1))
}

/// Objective pairs of every simple `source`-`sink` path.
pub fn simple_path_objectives(network: &Network, source: NodeId, sink: NodeId) -> Vec<(f64, f64)> {
    let graph = network.graph();
    let from = NodeIndex::new(source.value());
    let to = NodeIndex::new(sink.value());
    all_simple_paths::<Vec<NodeIndex>, _>(graph, from, to, 0, None)
        .map(|nodes| {
            let keys: Vec<ArcKey> = nodes
                .windows(2)
                .map(|w| ArcKey::new(graph[w[0]].id, graph[w[1]].id))
                .collect();
            (
                network.sum_over(&keys, ArcAttribute::Length),
                network.sum_over(&keys, ArcAttribute::SecondaryLength),
            )
        })
        .collect()
}

/// Pairs no other pair dominates, sorted by primary value.
pub fn non_dominated(pairs: &[(f64, f64)]) -> Vec<(f64, f64)> {
    let mut result: Vec<(f64, f64)> = pairs
        .iter()
        .copied()
        .filter(|&(a, b)| {
            !pairs
                .iter()
                .any(|&(c, d)| c <= a && d <= b && (c < a || d < b))
        })
        .collect();
    result.sort_by(|x, y| x.0.total_cmp(&y.0).then(x.1.total_cmp(&y.1)));
    result.dedup();
    result
}

/// Maximum flow by Edmonds-Karp over a dense residual matrix.
pub fn edmonds_karp(network: &Network, source: NodeId, sink: NodeId) -> f64 {
    let n = network.node_count();
    let mut residual = vec![vec![0.0_f64; n]; n];
    for arc in network.arcs() {
        residual[arc.from.value()][arc.to.value()] += arc.capacity;
    }
    let (s, t) = (source.value(), sink.value());

    let mut total = 0.0;
    loop {
        let mut parent = vec![usize::MAX; n];
        parent[s] = s;
        let mut queue = VecDeque::from([s]);
        while let Some(u) = queue.pop_front() {
            for v in 0..n {
                if parent[v] == usize::MAX && residual[u][v] > 1e-12 {
                    parent[v] = u;
                    queue.push_back(v);
                }
            }
        }
        if parent[t] == usize::MAX {
            return total;
        }

        let mut bottleneck = f64::INFINITY;
        let mut v = t;
        while v != s {
            let u = parent[v];
            bottleneck = bottleneck.min(residual[u][v]);
            v = u;
        }
        let mut v = t;
        while v != s {
            let u = parent[v];
            residual[u][v] -= bottleneck;
            residual[v][u] += bottleneck;
            v = u;
        }
        total += bottleneck;
    }
}

/// Dijkstra on arc lengths; `None` when the sink is unreachable.
pub fn dijkstra_length(network: &Network, source: NodeId, sink: NodeId) -> Option<f64> {
    let goal = NodeIndex::new(sink.value());
    let distances = dijkstra(network.graph(), NodeIndex::new(source.value()), Some(goal), |e| {
        e.weight().length
    });
    distances.get(&goal).copied()
}

/// Every arc subset whose interdiction cost fits in `budget`.
pub fn subsets_within_budget(network: &Network, budget: f64) -> Vec<BTreeSet<ArcKey>> {
    let keys: Vec<ArcKey> = network.arcs().map(|a| a.key()).collect();
    assert!(keys.len() <= 16, "too many arcs for brute force");
    (0u32..(1 << keys.len()))
        .map(|mask| {
            keys.iter()
                .enumerate()
                .filter(|(i, _)| mask & (1 << i) != 0)
                .map(|(_, k)| *k)
                .collect::<BTreeSet<ArcKey>>()
        })
        .filter(|subset| network.sum_over(subset, ArcAttribute::Cost) <= budget + 1e-9)
        .collect()
}

/// Smallest max flow any affordable interdiction leaves.
pub fn brute_force_max_flow_interdiction(
    network: &Network,
    budget: f64,
    source: NodeId,
    sink: NodeId,
) -> f64 {
    subsets_within_budget(network, budget)
        .iter()
        .map(|subset| edmonds_karp(&network.without_arcs(subset), source, sink))
        .fold(f64::INFINITY, f64::min)
}

/// Longest follower shortest path any affordable interdiction forces;
/// `None` when some interdiction disconnects the sink.
pub fn brute_force_shortest_path_interdiction(
    network: &Network,
    budget: f64,
    source: NodeId,
    sink: NodeId,
) -> Option<f64> {
    let mut best = Some(0.0);
    for subset in subsets_within_budget(network, budget) {
        match dijkstra_length(&network.without_arcs(&subset), source, sink) {
            None => return None,
            Some(length) => best = best.map(|b: f64| b.max(length)),
        }
    }
    best
}
