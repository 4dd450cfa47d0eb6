//! Optimizer configuration.
//!
//! [`OptimizerConfig`] is read from TOML and supports partial files where
//! unspecified values fall back to defaults:
//!
//! ```toml
//! [solver]
//! backend = "microlp"
//!
//! [pareto]
//! bound_step = { tolerance = 1e-6 }
//! max_points = 50
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{NetlpError, NetlpResult};
use crate::milp::LpSolverKind;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// MILP backend settings.
    pub solver: SolverSettings,

    /// Epsilon-constraint enumeration settings.
    pub pareto: ParetoSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Engine used for every model.
    pub backend: LpSolverKind,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParetoSettings {
    /// How the bound on the secondary objective is tightened after each point.
    pub bound_step: BoundStep,

    /// Stop after this many points (unlimited when absent).
    pub max_points: Option<usize>,
}

/// Tightening rule for the epsilon-constraint bound.
///
/// After a point with secondary value `M` is found, the next model requires
/// the secondary objective to be at most `M - 1` (`Integer`) or
/// `M - tolerance` (`Tolerance`, for continuous secondary lengths).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundStep {
    #[default]
    Integer,
    Tolerance(f64),
}

impl BoundStep {
    pub fn amount(&self) -> f64 {
        match self {
            BoundStep::Integer => 1.0,
            BoundStep::Tolerance(eps) => *eps,
        }
    }

    /// Right-hand side of the bound constraint given the current bound.
    #[inline]
    pub fn tightened(&self, bound: f64) -> f64 {
        bound - self.amount()
    }
}

impl OptimizerConfig {
    pub fn from_toml_str(contents: &str) -> NetlpResult<Self> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> NetlpResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    pub fn save_to(&self, path: impl AsRef<Path>) -> NetlpResult<()> {
        let contents = toml::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    pub fn validate(&self) -> NetlpResult<()> {
        if let BoundStep::Tolerance(eps) = self.pareto.bound_step {
            if !eps.is_finite() || eps <= 0.0 {
                return Err(NetlpError::Config(format!(
                    "pareto.bound_step tolerance must be positive, got {}",
                    eps
                )));
            }
        }
        if self.pareto.max_points == Some(0) {
            return Err(NetlpError::Config(
                "pareto.max_points must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    pub fn with_backend(mut self, backend: LpSolverKind) -> Self {
        self.solver.backend = backend;
        self
    }

    pub fn with_bound_step(mut self, step: BoundStep) -> Self {
        self.pareto.bound_step = step;
        self
    }

    pub fn with_max_points(mut self, max_points: usize) -> Self {
        self.pareto.max_points = Some(max_points);
        self
    }
}
