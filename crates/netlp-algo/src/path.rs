//! Resource-bounded shortest paths
//!
//! Both the epsilon-constraint enumerator and the weight-constrained shortest
//! path share one model: a binary selection variable per arc, unit flow from
//! source to sink, one objective attribute to minimize and an optional upper
//! bound on a second attribute.
//!
//! ```text
//! minimize    Σ_a c_a · x_a
//!
//! subject to:
//!   Σ_out(v) x - Σ_in(v) x = 1 (v = s), -1 (v = t), 0 otherwise
//!   Σ_a w_a · x_a ≤ W                              (optional resource bound)
//!   x_a ∈ {0,1}
//! ```

use good_lp::{constraint, Expression, Variable};
use netlp_core::{
    find_path, validate_non_negative, validate_terminals, ArcAttribute, ArcKey, LpSolverKind,
    MilpModel, NetlpError, NetlpResult, Network, NodeId, ObjectiveSense, Solution, VarDomain,
};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Upper bound on the total of one arc attribute along the path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResourceBound {
    pub attribute: ArcAttribute,
    pub limit: f64,
}

/// A path model together with its per-arc selection variables.
pub(crate) struct PathModel {
    pub model: MilpModel,
    pub selection: BTreeMap<ArcKey, Variable>,
}

pub(crate) fn build_path_model(
    name: &str,
    network: &Network,
    source: NodeId,
    sink: NodeId,
    objective: ArcAttribute,
    bound: Option<ResourceBound>,
) -> PathModel {
    let mut model = MilpModel::new(name);

    let selection: BTreeMap<ArcKey, Variable> = network
        .arcs()
        .map(|arc| (arc.key(), model.add_variable(VarDomain::Binary)))
        .collect();

    let mut total = Expression::from(0.0);
    for arc in network.arcs() {
        total.add_mul(arc.attribute(objective), selection[&arc.key()]);
    }
    model.set_objective(total, ObjectiveSense::Minimise);

    // One unit leaves the source and enters the sink.
    for node in network.node_ids() {
        let mut balance = Expression::from(0.0);
        for arc in network.out_arcs(node) {
            balance += selection[&arc.key()];
        }
        for arc in network.in_arcs(node) {
            balance -= selection[&arc.key()];
        }
        let supply = if node == source {
            1.0
        } else if node == sink {
            -1.0
        } else {
            0.0
        };
        model.add_constraint(constraint!(balance == supply));
    }

    if let Some(bound) = bound {
        let mut resource = Expression::from(0.0);
        for arc in network.arcs() {
            resource.add_mul(arc.attribute(bound.attribute), selection[&arc.key()]);
        }
        model.add_constraint(constraint!(resource <= bound.limit));
    }

    debug!(
        model = name,
        variables = model.num_variables(),
        constraints = model.num_constraints(),
        "built path model"
    );

    PathModel { model, selection }
}

/// Arcs whose selection variable is set in an optimal solution.
pub(crate) fn selected_arcs(
    solution: &Solution,
    selection: &BTreeMap<ArcKey, Variable>,
) -> BTreeSet<ArcKey> {
    selection
        .iter()
        .filter(|(_, var)| solution.is_selected(**var))
        .map(|(key, _)| *key)
        .collect()
}

/// Recover a simple source-sink path from the selected arcs.
///
/// With non-negative arc attributes the selection may still contain detached
/// zero-cost cycles; they are dropped here.
pub(crate) fn extract_path(
    network: &Network,
    source: NodeId,
    sink: NodeId,
    selected: &BTreeSet<ArcKey>,
) -> NetlpResult<Vec<ArcKey>> {
    find_path(network, source, sink, |k| selected.contains(k)).ok_or_else(|| {
        NetlpError::Solver(format!(
            "selected arcs do not connect {} to {}",
            source, sink
        ))
    })
}

/// Optimal path of the weight-constrained shortest path problem.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConstrainedPath {
    /// Arcs in travel order
    pub path: Vec<ArcKey>,
    pub length: f64,
    pub weight: f64,
}

/// Shortest path by `length` whose total `weight` does not exceed `max_weight`.
///
/// Returns `Ok(None)` when no source-sink path satisfies the weight limit.
///
/// # Example
///
/// ```
/// use netlp_algo::path::weight_constrained_shortest_path;
/// use netlp_core::{Arc, LpSolverKind, Network};
///
/// let mut network = Network::new();
/// let s = network.add_node("s");
/// let m = network.add_node("m");
/// let t = network.add_node("t");
/// network.add_arc(Arc::new(s, t).with_length(1.0).with_weight(10.0))?;
/// network.add_arc(Arc::new(s, m).with_length(2.0).with_weight(1.0))?;
/// network.add_arc(Arc::new(m, t).with_length(2.0).with_weight(1.0))?;
///
/// let best = weight_constrained_shortest_path(&network, s, t, 5.0, LpSolverKind::default())?
///     .expect("a light path exists");
/// assert_eq!(best.length, 4.0);
/// # Ok::<(), netlp_core::NetlpError>(())
/// ```
pub fn weight_constrained_shortest_path(
    network: &Network,
    source: NodeId,
    sink: NodeId,
    max_weight: f64,
    backend: LpSolverKind,
) -> NetlpResult<Option<ConstrainedPath>> {
    validate_terminals(network, source, sink)?;
    validate_non_negative(network, ArcAttribute::Length)?;
    validate_non_negative(network, ArcAttribute::Weight)?;
    if !max_weight.is_finite() {
        return Err(NetlpError::Validation(format!(
            "weight limit must be finite, got {}",
            max_weight
        )));
    }

    let PathModel { model, selection } = build_path_model(
        "weight_constrained_shortest_path",
        network,
        source,
        sink,
        ArcAttribute::Length,
        Some(ResourceBound {
            attribute: ArcAttribute::Weight,
            limit: max_weight,
        }),
    );

    let solution = model.solve(backend)?.ensure_bounded()?;
    if !solution.is_optimal() {
        info!(%source, %sink, max_weight, "no path within weight limit");
        return Ok(None);
    }

    let path = extract_path(network, source, sink, &selected_arcs(&solution, &selection))?;
    let length = network.sum_over(&path, ArcAttribute::Length);
    let weight = network.sum_over(&path, ArcAttribute::Weight);
    Ok(Some(ConstrainedPath {
        path,
        length,
        weight,
    }))
}
