//! MILP backend selection.
//!
//! All models are handed to `good_lp`, which forwards them to one of the
//! compiled-in engines:
//!
//! | Backend | Feature | Notes |
//! |---------|---------|-------|
//! | `microlp` | always on | Pure-Rust simplex with branch-and-bound |
//! | `highs` | `solver-highs` | Native HiGHS, branch-and-cut |

use crate::{NetlpError, NetlpResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LpSolverKind {
    #[default]
    Microlp,
    #[cfg(feature = "solver-highs")]
    Highs,
}

const AVAILABLE_LP_SOLVERS: &[&str] = &[
    "microlp",
    #[cfg(feature = "solver-highs")]
    "highs",
];

impl LpSolverKind {
    pub fn available() -> &'static [&'static str] {
        AVAILABLE_LP_SOLVERS
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LpSolverKind::Microlp => "microlp",
            #[cfg(feature = "solver-highs")]
            LpSolverKind::Highs => "highs",
        }
    }

    /// Whether the backend links a native (non-Rust) library.
    pub fn is_native(&self) -> bool {
        match self {
            LpSolverKind::Microlp => false,
            #[cfg(feature = "solver-highs")]
            LpSolverKind::Highs => true,
        }
    }
}

fn unknown_solver_error(label: &str) -> NetlpError {
    NetlpError::Config(format!(
        "unknown lp solver '{}'; supported values: {}",
        label,
        LpSolverKind::available().join(", ")
    ))
}

impl FromStr for LpSolverKind {
    type Err = NetlpError;

    fn from_str(value: &str) -> NetlpResult<Self> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "microlp" => Ok(LpSolverKind::Microlp),
            "highs" => {
                #[cfg(feature = "solver-highs")]
                {
                    Ok(LpSolverKind::Highs)
                }
                #[cfg(not(feature = "solver-highs"))]
                {
                    Err(unknown_solver_error(&normalized))
                }
            }
            other => Err(unknown_solver_error(other)),
        }
    }
}

impl TryFrom<String> for LpSolverKind {
    type Error = NetlpError;

    fn try_from(value: String) -> NetlpResult<Self> {
        value.parse()
    }
}

impl From<LpSolverKind> for String {
    fn from(kind: LpSolverKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for LpSolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("MicroLP".parse::<LpSolverKind>().unwrap(), LpSolverKind::Microlp);
        assert_eq!(" microlp ".parse::<LpSolverKind>().unwrap(), LpSolverKind::Microlp);
    }

    #[test]
    fn test_unknown_solver_lists_alternatives() {
        let err = "gurobi".parse::<LpSolverKind>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("gurobi"));
        assert!(msg.contains("microlp"));
    }

    #[cfg(not(feature = "solver-highs"))]
    #[test]
    fn test_highs_rejected_when_not_compiled() {
        assert!("highs".parse::<LpSolverKind>().is_err());
    }

    #[test]
    fn test_default_is_pure_rust() {
        let kind = LpSolverKind::default();
        assert!(!kind.is_native());
        assert!(LpSolverKind::available().contains(&kind.as_str()));
    }
}
