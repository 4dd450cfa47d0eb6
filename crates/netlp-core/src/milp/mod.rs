//! Solver-agnostic MILP models
//!
//! A [`MilpModel`] collects decision variables, linear constraints and one
//! linear objective, then hands them to a `good_lp` backend in a single
//! [`MilpModel::solve`] call:
//!
//! ```text
//! instance ──► model builder ──► MilpModel ──► solve(backend) ──► Solution
//!                                   │                                │
//!                          add_variable(domain)             status, value(var),
//!                          add_constraint(c)                objective
//!                          set_objective(expr, sense)
//! ```
//!
//! `solve` takes the model by value. The model, and any solver session
//! created for it, is dropped when the call returns, whatever the outcome, so
//! no state leaks from one solve into the next.
//!
//! ## Reading binary decisions
//!
//! MILP engines return integer variables as floats carrying round-off noise.
//! Every extraction goes through [`is_selected`], which compares against the
//! single shared [`SELECTION_TOLERANCE`].

mod backend;
mod model;

pub use backend::LpSolverKind;
pub use model::{MilpModel, ObjectiveSense, SolveStatus, Solution, VarDomain};

/// Distance from 1.0 within which a binary variable counts as chosen.
pub const SELECTION_TOLERANCE: f64 = 0.5;

/// Interpret a solver value of a binary variable.
#[inline]
pub fn is_selected(value: f64) -> bool {
    (value - 1.0).abs() < SELECTION_TOLERANCE
}
