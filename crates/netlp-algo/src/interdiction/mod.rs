//! Network interdiction as single-level MILPs
//!
//! A leader removes arcs under a budget; a follower then optimizes on what is
//! left. The follower's problem is an LP, so it is replaced by its dual and
//! the two levels collapse into one MILP solved in a single call:
//!
//! ```text
//!                leader (binary interdiction per arc)
//!                         │
//!     ┌───────────────────┴────────────────────┐
//!     │                                        │
//! max flow follower                    shortest path follower
//! dual: min s-t cut                    dual: node potentials
//! (Alpha, Beta, Gamma)                 (Pi, Theta, Y, Omega, big-M)
//!     │                                        │
//! minimize surviving cut capacity      maximize follower path length
//! ```
//!
//! Both solvers return `Ok(None)` when no interdiction fits the budget, which
//! is a legitimate answer rather than an error. An unbounded model is always a
//! fault and is returned as [`NetlpError::Unbounded`].

mod max_flow;
mod shortest_path;

pub use max_flow::{solve_max_flow_interdiction, MaxFlowInterdiction};
pub use shortest_path::{
    shortest_path_big_m, solve_shortest_path_interdiction, ShortestPathInterdiction,
};

use netlp_core::{NetlpError, NetlpResult};

/// A budget must be a finite number. Negative budgets are passed on and make
/// the model infeasible.
fn validate_budget(budget: f64) -> NetlpResult<()> {
    if budget.is_finite() {
        Ok(())
    } else {
        Err(NetlpError::Validation(format!(
            "interdiction budget must be finite, got {}",
            budget
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_budget() {
        assert!(validate_budget(0.0).is_ok());
        assert!(validate_budget(-3.0).is_ok());
        assert!(validate_budget(f64::INFINITY).is_err());
        assert!(validate_budget(f64::NAN).is_err());
    }
}
