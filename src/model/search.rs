//! Depth-first branch-and-bound search.
//!
//! Deliberately simple: pick the first unfixed variable with the smallest
//! domain, branch on its low value first, propagate every constraint's
//! [`Linear::narrow`] to a fixpoint, and prune the branch the moment any
//! domain goes empty or the partial objective can no longer beat the
//! incumbent. This mirrors `selen`'s own split between cheap bound
//! propagation and a ground-truth leaf check (`Linear::holds`), just
//! without `selen`'s dedicated global-constraint propagators — this crate
//! only ever needs linear (in)equalities.

use std::time::Instant;

use super::constraint::Linear;
use super::var::VarId;
use super::vars::Vars;
use super::{Solution, SolverConfig, SolverError, SolverResult};

pub(super) fn solve(
    vars: Vars,
    constraints: Vec<Linear>,
    objective: Vec<(i64, VarId)>,
    config: &SolverConfig,
) -> SolverResult<Solution> {
    let mut search = Search {
        constraints,
        objective,
        started: Instant::now(),
        nodes: 0,
        config: *config,
        best: None,
        timed_out: false,
    };
    search.run(vars);

    if let Some((values, obj)) = search.best {
        return Ok(Solution::new(values, obj));
    }
    if search.timed_out {
        return Err(SolverError::Timeout);
    }
    if search.nodes >= search.config.max_nodes {
        return Err(SolverError::NodeLimitExceeded);
    }
    Err(SolverError::Infeasible)
}

struct Search {
    constraints: Vec<Linear>,
    objective: Vec<(i64, VarId)>,
    started: Instant,
    nodes: u64,
    config: SolverConfig,
    best: Option<(Vec<i64>, i64)>,
    timed_out: bool,
}

impl Search {
    fn run(&mut self, root: Vars) {
        self.branch(root);
    }

    fn objective_lower_bound(&self, vars: &Vars) -> i64 {
        self.objective
            .iter()
            .map(|(w, v)| {
                let d = vars.domain(*v);
                if *w >= 0 {
                    w * d.lo
                } else {
                    w * d.hi
                }
            })
            .sum()
    }

    fn objective_value(&self, vars: &Vars) -> i64 {
        self.objective.iter().map(|(w, v)| w * vars.domain(*v).value().unwrap_or(0)).sum()
    }

    fn branch(&mut self, mut vars: Vars) {
        if self.timed_out {
            return;
        }
        self.nodes += 1;
        if self.nodes > self.config.max_nodes {
            return;
        }
        if self.started.elapsed() > self.config.timeout {
            self.timed_out = true;
            return;
        }

        // Propagate to a fixpoint; bail out the moment a domain empties.
        loop {
            let mut changed = false;
            for c in &self.constraints {
                if c.narrow(&mut vars) {
                    changed = true;
                }
                if self.has_empty_domain(&vars) {
                    return;
                }
            }
            if !changed {
                break;
            }
        }

        if !self.objective.is_empty() {
            if let Some((_, best_obj)) = &self.best {
                if self.objective_lower_bound(&vars) >= *best_obj {
                    return;
                }
            }
        }

        if let Some(v) = self.pick_branch_var(&vars) {
            let d = vars.domain(v);
            let mid = d.lo + (d.hi - d.lo) / 2;

            let mut lo_branch = vars.clone();
            let mut lo_d = lo_branch.domain(v);
            lo_d.hi = mid;
            lo_branch.set_domain(v, lo_d);
            self.branch(lo_branch);

            if self.timed_out || self.nodes > self.config.max_nodes {
                return;
            }

            let mut hi_branch = vars;
            let mut hi_d = hi_branch.domain(v);
            hi_d.lo = mid + 1;
            hi_branch.set_domain(v, hi_d);
            self.branch(hi_branch);
            return;
        }

        // Every variable fixed: ground-truth check every constraint.
        if !self.constraints.iter().all(|c| c.holds(&vars)) {
            return;
        }
        let obj = self.objective_value(&vars);
        let better = match &self.best {
            None => true,
            Some((_, best_obj)) => obj < *best_obj,
        };
        if better {
            self.best = Some((vars.snapshot_values(), obj));
        }
    }

    fn has_empty_domain(&self, vars: &Vars) -> bool {
        vars.all().any(|v| vars.domain(v).is_empty())
    }

    fn pick_branch_var(&self, vars: &Vars) -> Option<VarId> {
        vars.all()
            .filter(|v| !vars.domain(*v).is_fixed())
            .min_by_key(|v| vars.domain(*v).hi - vars.domain(*v).lo)
    }
}
