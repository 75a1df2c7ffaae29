//! A small, dependency-free CSP/MILP-style solver.
//!
//! `spec.md` §1 scopes the solver out as an "assumed" external collaborator
//! ("a CP-SAT-style solver exposing boolean variables, bounded integer
//! variables, linear constraints, reified equality, `max`/`min` extraction,
//! and a linear objective"). This module supplies exactly that surface so
//! the crate compiles and runs end to end, grounded on `selen`'s public
//! `Model` API (`m.int`, `m.bool`, `m.lin_eq`/`lin_le`, `m.minimize`,
//! `Result<Solution, SolverError>`) but implemented independently: a plain
//! DFS branch-and-bound search over the `Constraint` list in
//! [`constraint`], narrowing domains at each node and falling back to the
//! exhaustive [`constraint::Linear::holds`] check at every leaf.

mod constraint;
mod domain;
mod search;
mod solution;
mod var;
mod vars;

pub use constraint::{Linear, Op};
pub use domain::Domain;
pub use solution::Solution;
pub use var::VarId;

use vars::Vars;

/// Resource limits on a single [`Model::solve`] / [`Model::minimize`] call.
///
/// Mirrors `selen::utils::config::SolverConfig`'s separation of search
/// effort limits from problem data: a caller tunes this independently of
/// the scheduling rules in `crate::config::BuildConfig`.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    pub max_nodes: u64,
    pub timeout: std::time::Duration,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            max_nodes: 2_000_000,
            timeout: std::time::Duration::from_secs(30),
        }
    }
}

impl SolverConfig {
    pub fn with_max_nodes(mut self, max_nodes: u64) -> Self {
        self.max_nodes = max_nodes;
        self
    }

    pub fn with_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Failure modes of a solve. A builder failure (`crate::report::BuildError`)
/// is a distinct, earlier-stage concern (see `spec.md` §4.15) — this enum is
/// only ever produced once a well-formed model exists and search is run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolverError {
    /// No assignment satisfies every hard constraint.
    Infeasible,
    /// Search exhausted its node budget before proving feasibility either way.
    NodeLimitExceeded,
    /// Search exceeded its wall-clock budget.
    Timeout,
}

impl std::fmt::Display for SolverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SolverError::Infeasible => write!(f, "no feasible assignment exists"),
            SolverError::NodeLimitExceeded => write!(f, "search node limit exceeded"),
            SolverError::Timeout => write!(f, "search exceeded its time budget"),
        }
    }
}

impl std::error::Error for SolverError {}

pub type SolverResult<T> = Result<T, SolverError>;

/// The constraint model under construction. Owns every variable and
/// constraint; `crate::rules` compilers take `&mut Model` to add to it and
/// never construct their own.
#[derive(Debug, Default)]
pub struct Model {
    vars: Vars,
    constraints: Vec<Linear>,
    objective: Vec<(i64, VarId)>,
}

impl Model {
    pub fn new() -> Self {
        Model::default()
    }

    /// New bounded integer variable.
    pub fn int(&mut self, lo: i64, hi: i64) -> VarId {
        self.vars.new_var(lo, hi)
    }

    /// New boolean variable (`int(0, 1)`).
    pub fn bool(&mut self) -> VarId {
        self.vars.new_var(0, 1)
    }

    /// Bulk boolean creation.
    pub fn bools(&mut self, n: usize) -> Vec<VarId> {
        (0..n).map(|_| self.bool()).collect()
    }

    pub fn num_vars(&self) -> usize {
        self.vars.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// `Σ coeffs[i]*vars[i] == rhs`.
    pub fn lin_eq(&mut self, terms: Vec<(i64, VarId)>, rhs: i64) {
        self.constraints.push(Linear::eq(terms, rhs));
    }

    /// `Σ coeffs[i]*vars[i] <= rhs`.
    pub fn lin_le(&mut self, terms: Vec<(i64, VarId)>, rhs: i64) {
        self.constraints.push(Linear::le(terms, rhs));
    }

    /// `Σ coeffs[i]*vars[i] >= rhs`.
    pub fn lin_ge(&mut self, terms: Vec<(i64, VarId)>, rhs: i64) {
        self.constraints.push(Linear::ge(terms, rhs));
    }

    /// Adds `(weight, var)` to the objective; skip when `weight == 0` (a
    /// soft rule with zero weight has, per `spec.md` §3, no effect).
    pub fn add_objective_term(&mut self, var: VarId, weight: i64) {
        if weight != 0 {
            self.objective.push((weight, var));
        }
    }

    pub fn objective_len(&self) -> usize {
        self.objective.len()
    }

    /// Runs branch-and-bound search minimizing the accumulated objective
    /// (empty objective degenerates to a pure satisfaction search, per
    /// `spec.md` §4.13).
    pub fn minimize(self, config: &SolverConfig) -> SolverResult<Solution> {
        search::solve(self.vars, self.constraints, self.objective, config)
    }

    /// Pure satisfaction search, ignoring any accumulated objective.
    pub fn solve(self, config: &SolverConfig) -> SolverResult<Solution> {
        let vars = self.vars;
        let constraints = self.constraints;
        search::solve(vars, constraints, Vec::new(), config)
    }
}
