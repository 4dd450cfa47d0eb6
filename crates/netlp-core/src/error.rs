//! Unified error type for netlp
//!
//! Every fallible operation in the workspace returns [`NetlpResult`]. Note that
//! an *infeasible* model is not an error: it is reported through
//! [`SolveStatus::Infeasible`](crate::SolveStatus) and interpreted by the
//! caller. An *unbounded* model always indicates a modeling fault and surfaces
//! as [`NetlpError::Unbounded`].
//!
//! # Example
//!
//! ```
//! use netlp_core::{NetlpError, NetlpResult};
//!
//! fn check_budget(budget: f64) -> NetlpResult<f64> {
//!     if !budget.is_finite() {
//!         return Err(NetlpError::Validation("budget must be finite".into()));
//!     }
//!     Ok(budget)
//! }
//!
//! assert!(check_budget(f64::NAN).is_err());
//! ```

use crate::{ArcKey, NodeId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum NetlpError {
    /// A node identifier that is not part of the network
    #[error("Unknown node: {0}")]
    UnknownNode(NodeId),

    /// A second arc for an ordered pair that already has one
    #[error("Duplicate arc: {0}")]
    DuplicateArc(ArcKey),

    /// Instance validation errors (bad terminals, negative attributes, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// The solver reported an unbounded objective: a constraint is missing
    #[error("Model '{model}' is unbounded (missing constraint?)")]
    Unbounded { model: String },

    /// Solver failures other than infeasibility/unboundedness
    #[error("Solver error: {0}")]
    Solver(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetlpResult<T> = Result<T, NetlpError>;

impl From<toml::de::Error> for NetlpError {
    fn from(err: toml::de::Error) -> Self {
        NetlpError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for NetlpError {
    fn from(err: toml::ser::Error) -> Self {
        NetlpError::Config(err.to_string())
    }
}
