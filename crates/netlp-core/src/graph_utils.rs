use crate::{ArcAttribute, ArcKey, NetlpError, NetlpResult, Network, NodeId};
use petgraph::algo::dijkstra;
use petgraph::visit::EdgeRef;
use std::collections::{BTreeSet, HashMap, VecDeque};

/// Breadth-first search from `from` to `to` over the arcs accepted by `allow`.
///
/// Returns the arcs of a path with the fewest arcs, in travel order. A path
/// found this way is always simple.
pub fn find_path<F>(network: &Network, from: NodeId, to: NodeId, allow: F) -> Option<Vec<ArcKey>>
where
    F: Fn(&ArcKey) -> bool,
{
    if !network.contains_node(from) || !network.contains_node(to) {
        return None;
    }
    if from == to {
        return Some(Vec::new());
    }

    let mut parent: HashMap<NodeId, ArcKey> = HashMap::new();
    let mut queue = VecDeque::from([from]);
    while let Some(node) = queue.pop_front() {
        for arc in network.out_arcs(node) {
            let key = arc.key();
            if key.to == from || parent.contains_key(&key.to) || !allow(&key) {
                continue;
            }
            parent.insert(key.to, key);
            if key.to == to {
                let mut path = vec![key];
                let mut cursor = key.from;
                while cursor != from {
                    let prev = parent[&cursor];
                    path.push(prev);
                    cursor = prev.from;
                }
                path.reverse();
                return Some(path);
            }
            queue.push_back(key.to);
        }
    }
    None
}

/// Whether `to` can be reached from `from` without using any arc in `blocked`.
pub fn is_reachable(network: &Network, from: NodeId, to: NodeId, blocked: &BTreeSet<ArcKey>) -> bool {
    find_path(network, from, to, |k| !blocked.contains(k)).is_some()
}

/// Length of a shortest `from`-`to` path under `attribute` (Dijkstra).
///
/// `None` when `to` is unreachable. Attribute values must be non-negative.
pub fn shortest_path_length(
    network: &Network,
    from: NodeId,
    to: NodeId,
    attribute: ArcAttribute,
) -> Option<f64> {
    let start = network.node_index(from).ok()?;
    let goal = network.node_index(to).ok()?;
    let distances = dijkstra(network.graph(), start, Some(goal), |e| {
        e.weight().attribute(attribute)
    });
    distances.get(&goal).copied()
}

/// Source and sink must both exist and be distinct.
pub fn validate_terminals(network: &Network, source: NodeId, sink: NodeId) -> NetlpResult<()> {
    network.node_index(source)?;
    network.node_index(sink)?;
    if source == sink {
        return Err(NetlpError::Validation(format!(
            "source and sink must differ (both are {})",
            source
        )));
    }
    Ok(())
}

/// Every arc must carry a finite, non-negative value for `attribute`.
pub fn validate_non_negative(network: &Network, attribute: ArcAttribute) -> NetlpResult<()> {
    for arc in network.arcs() {
        let value = arc.attribute(attribute);
        if !value.is_finite() || value < 0.0 {
            return Err(NetlpError::Validation(format!(
                "arc {} has invalid {} {}",
                arc.key(),
                attribute,
                value
            )));
        }
    }
    Ok(())
}

/// Whether every arc's `attribute` is a whole number.
pub fn is_integral(network: &Network, attribute: ArcAttribute) -> bool {
    network
        .arcs()
        .all(|a| a.attribute(attribute).fract() == 0.0)
}
