use super::{is_selected, LpSolverKind};
use crate::{NetlpError, NetlpResult};
use good_lp::solvers::microlp::microlp;
#[cfg(feature = "solver-highs")]
use good_lp::solvers::highs::highs;
use good_lp::{
    variable, Constraint, Expression, ProblemVariables, ResolutionError,
    Solution as LpSolution, SolverModel, Variable,
};
use std::collections::HashMap;
use tracing::debug;

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarDomain {
    Binary,
    /// Real-valued; `None` leaves that side unbounded
    Continuous {
        lower: Option<f64>,
        upper: Option<f64>,
    },
    Integer {
        lower: f64,
        upper: f64,
    },
}

impl VarDomain {
    pub fn free() -> Self {
        VarDomain::Continuous {
            lower: None,
            upper: None,
        }
    }

    pub fn non_negative() -> Self {
        VarDomain::Continuous {
            lower: Some(0.0),
            upper: None,
        }
    }

    pub fn non_positive() -> Self {
        VarDomain::Continuous {
            lower: None,
            upper: Some(0.0),
        }
    }

    pub fn bounded(lower: f64, upper: f64) -> Self {
        VarDomain::Continuous {
            lower: Some(lower),
            upper: Some(upper),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveSense {
    Minimise,
    Maximise,
}

/// Terminal status reported by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveStatus {
    Optimal,
    Infeasible,
    Unbounded,
}

/// A MILP under construction.
///
/// Variables are owned by the model; the [`Variable`] handles it returns are
/// only meaningful for this model and the [`Solution`] it produces.
pub struct MilpModel {
    name: String,
    vars: ProblemVariables,
    handles: Vec<Variable>,
    constraints: Vec<Constraint>,
    objective: Expression,
    sense: ObjectiveSense,
}

impl MilpModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            vars: ProblemVariables::new(),
            handles: Vec::new(),
            constraints: Vec::new(),
            objective: Expression::from(0.0),
            sense: ObjectiveSense::Minimise,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_variable(&mut self, domain: VarDomain) -> Variable {
        let definition = match domain {
            VarDomain::Binary => variable().binary(),
            VarDomain::Continuous { lower, upper } => {
                let mut def = variable();
                if let Some(lb) = lower {
                    def = def.min(lb);
                }
                if let Some(ub) = upper {
                    def = def.max(ub);
                }
                def
            }
            VarDomain::Integer { lower, upper } => variable().integer().min(lower).max(upper),
        };
        let var = self.vars.add(definition);
        self.handles.push(var);
        var
    }

    pub fn add_constraint(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub fn set_objective(&mut self, objective: impl Into<Expression>, sense: ObjectiveSense) {
        self.objective = objective.into();
        self.sense = sense;
    }

    pub fn num_variables(&self) -> usize {
        self.handles.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Solve the model, consuming it.
    ///
    /// Infeasible and unbounded models are reported through
    /// [`Solution::status`]; only engine failures are returned as errors.
    pub fn solve(self, backend: LpSolverKind) -> NetlpResult<Solution> {
        let MilpModel {
            name,
            vars,
            handles,
            constraints,
            objective,
            sense,
        } = self;

        debug!(
            model = %name,
            backend = backend.as_str(),
            variables = handles.len(),
            constraints = constraints.len(),
            "solving MILP"
        );

        let problem = match sense {
            ObjectiveSense::Minimise => vars.minimise(objective.clone()),
            ObjectiveSense::Maximise => vars.maximise(objective.clone()),
        };

        let solution = match backend {
            LpSolverKind::Microlp => {
                run(problem.using(microlp), constraints, &handles, &objective, name)
            }
            #[cfg(feature = "solver-highs")]
            LpSolverKind::Highs => {
                run(problem.using(highs), constraints, &handles, &objective, name)
            }
        }?;

        debug!(model = %solution.model, status = ?solution.status, "MILP solve finished");
        Ok(solution)
    }
}

fn run<M>(
    mut problem: M,
    constraints: Vec<Constraint>,
    handles: &[Variable],
    objective: &Expression,
    name: String,
) -> NetlpResult<Solution>
where
    M: SolverModel<Error = ResolutionError>,
{
    for constraint in constraints {
        problem = problem.with(constraint);
    }
    match problem.solve() {
        Ok(solved) => {
            let values = handles.iter().map(|v| (*v, solved.value(*v))).collect();
            let objective_value = solved.eval(objective.clone());
            Ok(Solution {
                model: name,
                status: SolveStatus::Optimal,
                values,
                objective: Some(objective_value),
            })
        }
        Err(ResolutionError::Infeasible) => Ok(Solution::without_values(name, SolveStatus::Infeasible)),
        Err(ResolutionError::Unbounded) => Ok(Solution::without_values(name, SolveStatus::Unbounded)),
        Err(other) => Err(NetlpError::Solver(format!("{}: {}", name, other))),
    }
}

/// Result of one solve.
#[derive(Debug, Clone)]
pub struct Solution {
    model: String,
    status: SolveStatus,
    values: HashMap<Variable, f64>,
    objective: Option<f64>,
}

impl Solution {
    fn without_values(model: String, status: SolveStatus) -> Self {
        Self {
            model,
            status,
            values: HashMap::new(),
            objective: None,
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn status(&self) -> SolveStatus {
        self.status
    }

    pub fn is_optimal(&self) -> bool {
        self.status == SolveStatus::Optimal
    }

    /// Objective value; `None` unless optimal.
    pub fn objective(&self) -> Option<f64> {
        self.objective
    }

    /// Value of a variable; `None` unless optimal.
    pub fn value(&self, var: Variable) -> Option<f64> {
        self.values.get(&var).copied()
    }

    /// Whether a binary variable is set, after tolerance rounding.
    pub fn is_selected(&self, var: Variable) -> bool {
        self.value(var).is_some_and(is_selected)
    }

    /// Turn an unbounded status into [`NetlpError::Unbounded`].
    pub fn ensure_bounded(self) -> NetlpResult<Self> {
        match self.status {
            SolveStatus::Unbounded => Err(NetlpError::Unbounded { model: self.model }),
            _ => Ok(self),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use good_lp::constraint;

    #[test]
    fn test_binary_knapsack_optimal() {
        // max 5a + 4b + 3c  s.t.  2a + 3b + c <= 4
        let mut model = MilpModel::new("knapsack");
        let a = model.add_variable(VarDomain::Binary);
        let b = model.add_variable(VarDomain::Binary);
        let c = model.add_variable(VarDomain::Binary);
        model.add_constraint(constraint!(2 * a + 3 * b + c <= 4));
        model.set_objective(5 * a + 4 * b + 3 * c, ObjectiveSense::Maximise);
        assert_eq!(model.num_variables(), 3);
        assert_eq!(model.num_constraints(), 1);

        let solution = model.solve(LpSolverKind::Microlp).unwrap();
        assert!(solution.is_optimal());
        assert!((solution.objective().unwrap() - 8.0).abs() < 1e-6);
        assert!(solution.is_selected(a));
        assert!(!solution.is_selected(b));
        assert!(solution.is_selected(c));
    }

    #[test]
    fn test_integer_domain_rounds_down() {
        let mut model = MilpModel::new("integer");
        let x = model.add_variable(VarDomain::Integer {
            lower: 0.0,
            upper: 10.0,
        });
        model.add_constraint(constraint!(2 * x <= 7));
        model.set_objective(x, ObjectiveSense::Maximise);

        let solution = model.solve(LpSolverKind::default()).unwrap();
        assert!((solution.value(x).unwrap() - 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_infeasible_is_a_status() {
        let mut model = MilpModel::new("infeasible");
        let x = model.add_variable(VarDomain::bounded(0.0, 1.0));
        model.add_constraint(constraint!(x >= 2));
        model.set_objective(x, ObjectiveSense::Minimise);

        let solution = model.solve(LpSolverKind::Microlp).unwrap();
        assert_eq!(solution.status(), SolveStatus::Infeasible);
        assert!(solution.objective().is_none());
        assert!(solution.value(x).is_none());
        assert!(!solution.is_selected(x));
        assert!(solution.ensure_bounded().is_ok());
    }

    #[test]
    fn test_unbounded_is_fatal_after_ensure() {
        let mut model = MilpModel::new("ray");
        let x = model.add_variable(VarDomain::non_negative());
        model.add_constraint(constraint!(x >= 1));
        model.set_objective(x, ObjectiveSense::Maximise);

        let solution = model.solve(LpSolverKind::Microlp).unwrap();
        assert_eq!(solution.status(), SolveStatus::Unbounded);
        let err = solution.ensure_bounded().unwrap_err();
        assert!(matches!(err, NetlpError::Unbounded { model } if model == "ray"));
    }

    #[test]
    fn test_free_and_non_positive_domains() {
        // min y - z  s.t.  y >= -3, z <= 0, z >= -2
        let mut model = MilpModel::new("domains");
        let y = model.add_variable(VarDomain::free());
        let z = model.add_variable(VarDomain::non_positive());
        model.add_constraint(constraint!(y >= -3));
        model.add_constraint(constraint!(z >= -2));
        model.set_objective(y - z, ObjectiveSense::Minimise);

        let solution = model.solve(LpSolverKind::Microlp).unwrap();
        assert!((solution.value(y).unwrap() + 3.0).abs() < 1e-6);
        assert!(solution.value(z).unwrap().abs() < 1e-6);
        assert!((solution.objective().unwrap() + 3.0).abs() < 1e-6);
    }
}
