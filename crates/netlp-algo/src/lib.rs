//! # netlp-algo: Network Optimization Algorithms
//!
//! Model builders and solution procedures on top of the [`netlp_core`] network
//! model and MILP adapter.
//!
//! | Problem | Entry point | Solves |
//! |---------|-------------|--------|
//! | Bi-objective shortest path | [`eps_constraint`], [`EpsilonConstraint`] | one MILP per frontier point |
//! | Max-flow interdiction | [`solve_max_flow_interdiction`] | one MILP |
//! | Shortest-path interdiction | [`solve_shortest_path_interdiction`] | one MILP |
//! | Weight-constrained shortest path | [`weight_constrained_shortest_path`] | one MILP |
//! | Maximum flow | [`max_flow`] | one LP |
//!
//! ## Epsilon-constraint enumeration
//!
//! The enumerator minimizes the primary length subject to a bound on the
//! secondary length, then tightens the bound to the secondary length just
//! found. The first infeasible solve ends the frontier. See [`pareto`].
//!
//! ## Interdiction
//!
//! A leader removes arcs under a budget and a follower optimizes on the rest.
//! The follower's LP is dualized so that each game is a single MILP. See
//! [`interdiction`].
//!
//! ## Example
//!
//! ```
//! use netlp_algo::{default_bound, eps_constraint, solve_shortest_path_interdiction};
//! use netlp_core::{Arc, LpSolverKind, Network, OptimizerConfig};
//!
//! let mut network = Network::new();
//! let s = network.add_node("s");
//! let t = network.add_node("t");
//! network.add_arc(Arc::new(s, t).with_lengths(3.0, 2.0).with_cost(1.0))?;
//!
//! let front = eps_constraint(&network, s, t, default_bound(&network), &OptimizerConfig::default())?;
//! assert_eq!(front.objectives(), vec![(3.0, 2.0)]);
//!
//! let plan = solve_shortest_path_interdiction(&network, 1.0, s, t, LpSolverKind::default())?
//!     .expect("budget is non-negative");
//! assert!(plan.disconnects());
//! # Ok::<(), netlp_core::NetlpError>(())
//! ```

pub mod flow;
pub mod interdiction;
pub mod pareto;
pub mod path;

pub use flow::{max_flow, MaxFlow};
pub use interdiction::{
    shortest_path_big_m, solve_max_flow_interdiction, solve_shortest_path_interdiction,
    MaxFlowInterdiction, ShortestPathInterdiction,
};
pub use pareto::{default_bound, eps_constraint, EpsilonConstraint, ParetoFront, ParetoPoint};
pub use path::{weight_constrained_shortest_path, ConstrainedPath};
