//! Epsilon-constraint enumerator.

use super::{ParetoFront, ParetoPoint};
use crate::path::{build_path_model, extract_path, selected_arcs, PathModel, ResourceBound};
use netlp_core::{
    is_integral, validate_non_negative, validate_terminals, ArcAttribute, BoundStep,
    LpSolverKind, NetlpError, NetlpResult, Network, NodeId, OptimizerConfig,
};
use std::iter::FusedIterator;
use tracing::{debug, info, warn};

/// Initial bound admitting every simple path: one unit above the sum of all
/// secondary lengths, so the first tightened bound still admits a path that
/// uses every arc.
pub fn default_bound(network: &Network) -> f64 {
    network.total_secondary_length() + 1.0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SearchState {
    Searching,
    Exhausted,
    Failed,
}

/// Lazy epsilon-constraint enumeration.
///
/// Yields one point per optimal solve. The sequence ends at the first
/// infeasible solve, or after yielding a single error for any fatal outcome.
/// It cannot be restarted: enumerate again by building a new enumerator from
/// the initial bound.
///
/// # Example
///
/// ```
/// use netlp_algo::pareto::{default_bound, EpsilonConstraint};
/// use netlp_core::{Arc, Network, OptimizerConfig};
///
/// let mut network = Network::new();
/// let s = network.add_node("s");
/// let m = network.add_node("m");
/// let t = network.add_node("t");
/// network.add_arc(Arc::new(s, t).with_lengths(1.0, 5.0))?;
/// network.add_arc(Arc::new(s, m).with_lengths(2.0, 1.0))?;
/// network.add_arc(Arc::new(m, t).with_lengths(2.0, 1.0))?;
///
/// let config = OptimizerConfig::default();
/// let bound = default_bound(&network);
/// let points: Vec<_> = EpsilonConstraint::new(&network, s, t, bound, &config)?
///     .collect::<Result<_, _>>()?;
///
/// assert_eq!(points.len(), 2);
/// assert_eq!(points[0].objectives, (1.0, 5.0));
/// assert_eq!(points[1].objectives, (4.0, 2.0));
/// # Ok::<(), netlp_core::NetlpError>(())
/// ```
pub struct EpsilonConstraint<'a> {
    network: &'a Network,
    source: NodeId,
    sink: NodeId,
    bound: f64,
    step: BoundStep,
    backend: LpSolverKind,
    max_points: Option<usize>,
    found: usize,
    solves: usize,
    state: SearchState,
}

impl<'a> EpsilonConstraint<'a> {
    pub fn new(
        network: &'a Network,
        source: NodeId,
        sink: NodeId,
        initial_bound: f64,
        config: &OptimizerConfig,
    ) -> NetlpResult<Self> {
        validate_terminals(network, source, sink)?;
        validate_non_negative(network, ArcAttribute::Length)?;
        validate_non_negative(network, ArcAttribute::SecondaryLength)?;
        config.validate()?;
        if !initial_bound.is_finite() {
            return Err(NetlpError::Validation(format!(
                "initial bound must be finite, got {}",
                initial_bound
            )));
        }

        let step = config.pareto.bound_step;
        if step == BoundStep::Integer && !is_integral(network, ArcAttribute::SecondaryLength) {
            warn!("integer bound step used with fractional secondary lengths; points may be skipped");
        }

        Ok(Self {
            network,
            source,
            sink,
            bound: initial_bound,
            step,
            backend: config.solver.backend,
            max_points: config.pareto.max_points,
            found: 0,
            solves: 0,
            state: SearchState::Searching,
        })
    }

    /// Current bound on the secondary objective.
    pub fn bound(&self) -> f64 {
        self.bound
    }

    /// Number of models solved so far, including the final infeasible one.
    pub fn solves(&self) -> usize {
        self.solves
    }

    fn solve_next(&mut self) -> NetlpResult<Option<ParetoPoint>> {
        let limit = self.step.tightened(self.bound);
        let PathModel { model, selection } = build_path_model(
            "biobjective_shortest_path",
            self.network,
            self.source,
            self.sink,
            ArcAttribute::Length,
            Some(ResourceBound {
                attribute: ArcAttribute::SecondaryLength,
                limit,
            }),
        );

        self.solves += 1;
        let solution = model.solve(self.backend)?.ensure_bounded()?;
        if !solution.is_optimal() {
            return Ok(None);
        }

        let selected = selected_arcs(&solution, &selection);
        let path = extract_path(self.network, self.source, self.sink, &selected)?;
        Ok(Some(ParetoPoint::from_path(self.network, path)))
    }
}

impl Iterator for EpsilonConstraint<'_> {
    type Item = NetlpResult<ParetoPoint>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.state != SearchState::Searching {
            return None;
        }
        if self.max_points.is_some_and(|max| self.found >= max) {
            warn!(points = self.found, "point limit reached, frontier may be incomplete");
            self.state = SearchState::Exhausted;
            return None;
        }

        let outcome = self.solve_next();
        self.advance(outcome)
    }
}

impl FusedIterator for EpsilonConstraint<'_> {}

impl EpsilonConstraint<'_> {
    /// Apply the outcome of one solve to the search state.
    fn advance(
        &mut self,
        outcome: NetlpResult<Option<ParetoPoint>>,
    ) -> Option<NetlpResult<ParetoPoint>> {
        match outcome {
            Ok(Some(point)) => {
                debug!(
                    iteration = self.solves,
                    bound = self.bound,
                    primary = point.primary(),
                    secondary = point.secondary(),
                    "found non-dominated point"
                );
                self.bound = point.secondary();
                self.found += 1;
                Some(Ok(point))
            }
            Ok(None) => {
                info!(
                    points = self.found,
                    solves = self.solves,
                    "frontier exhausted"
                );
                self.state = SearchState::Exhausted;
                None
            }
            Err(err) => {
                self.state = SearchState::Failed;
                Some(Err(err))
            }
        }
    }
}

/// Enumerate the weakly non-dominated points of the bi-objective shortest
/// path problem from `source` to `sink`.
///
/// `initial_bound` must be satisfied by the paths of interest; use
/// [`default_bound`] for the whole frontier.
pub fn eps_constraint(
    network: &Network,
    source: NodeId,
    sink: NodeId,
    initial_bound: f64,
    config: &OptimizerConfig,
) -> NetlpResult<ParetoFront> {
    let mut front = ParetoFront::new();
    for point in EpsilonConstraint::new(network, source, sink, initial_bound, config)? {
        front.push(point?)?;
    }
    Ok(front)
}
