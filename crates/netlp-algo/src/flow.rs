//! Maximum flow as a linear program
//!
//! ```text
//! maximize    B
//!
//! subject to:
//!   Σ_out(v) f - Σ_in(v) f = B (v = s), -B (v = t), 0 otherwise
//!   0 ≤ f_a ≤ capacity_a
//!   B ≥ 0
//! ```
//!
//! This is the primal of the min-cut model dualized by max-flow interdiction.

use good_lp::{constraint, Expression, Variable};
use netlp_core::{
    validate_non_negative, validate_terminals, ArcAttribute, ArcKey, LpSolverKind, MilpModel,
    NetlpError, NetlpResult, Network, NodeId, ObjectiveSense, VarDomain,
};
use serde::Serialize;
use std::collections::BTreeMap;
use tracing::debug;

/// Flows below this are reported as zero.
const FLOW_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MaxFlow {
    /// Total flow leaving the source
    pub value: f64,
    /// Arcs carrying positive flow
    pub flows: BTreeMap<ArcKey, f64>,
}

impl MaxFlow {
    pub fn flow_on(&self, key: ArcKey) -> f64 {
        self.flows.get(&key).copied().unwrap_or(0.0)
    }
}

/// Maximum `source`-`sink` flow under arc capacities.
pub fn max_flow(
    network: &Network,
    source: NodeId,
    sink: NodeId,
    backend: LpSolverKind,
) -> NetlpResult<MaxFlow> {
    validate_terminals(network, source, sink)?;
    validate_non_negative(network, ArcAttribute::Capacity)?;

    let mut model = MilpModel::new("max_flow");
    let throughput = model.add_variable(VarDomain::non_negative());
    let flows: BTreeMap<ArcKey, Variable> = network
        .arcs()
        .map(|arc| (arc.key(), model.add_variable(VarDomain::bounded(0.0, arc.capacity))))
        .collect();

    for node in network.node_ids() {
        let mut balance = Expression::from(0.0);
        for arc in network.out_arcs(node) {
            balance += flows[&arc.key()];
        }
        for arc in network.in_arcs(node) {
            balance -= flows[&arc.key()];
        }
        if node == source {
            model.add_constraint(constraint!(balance == throughput));
        } else if node == sink {
            model.add_constraint(constraint!(balance + throughput == 0));
        } else {
            model.add_constraint(constraint!(balance == 0));
        }
    }
    model.set_objective(throughput, ObjectiveSense::Maximise);

    let solution = model.solve(backend)?.ensure_bounded()?;
    if !solution.is_optimal() {
        // zero flow is always feasible
        return Err(NetlpError::Solver(format!(
            "max flow model reported {:?}",
            solution.status()
        )));
    }

    let value = solution.value(throughput).unwrap_or(0.0).max(0.0);
    let flows = flows
        .into_iter()
        .filter_map(|(key, var)| {
            let f = solution.value(var)?;
            (f > FLOW_EPSILON).then_some((key, f))
        })
        .collect();

    debug!(%source, %sink, value, "max flow solved");
    Ok(MaxFlow { value, flows })
}
