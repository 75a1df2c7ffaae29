//! Variable factory (`spec.md` §4.1): builds the `x[e,d,s]` assignment grid
//! and emits the sole universal hard constraint, **I1** ("one-hot per
//! cell"): `Σ_s x[e,d,s] = 1` for every `(e,d)`.
//!
//! Derived indicators (`work[e,d]`, §3) are created lazily and memoised
//! here too, keyed by `(employee, date)` exactly as `SPEC_FULL.md` §A
//! grounds it — a dense arena rather than a hash map, since both indices
//! are already small dense integers (`spec.md` §9: "Arena-allocated, keyed
//! by stable `(employee_index, date_index)` pairs ... avoids hashing and
//! makes determinism trivial").

use crate::domain::{EmployeeIdx, EmployeeTable, Horizon, ShiftAlphabet, ShiftId};
use crate::model::{Model, VarId};

/// The `x[e,d,s]` boolean grid plus memoised `work[e,d]` indicators.
#[derive(Debug)]
pub struct AssignmentGrid {
    employees: usize,
    dates: usize,
    shifts: usize,
    x: Vec<VarId>,
    work: Vec<Option<VarId>>,
}

impl AssignmentGrid {
    /// Creates `|E|*|D|*|S|` boolean variables and the I1 one-hot
    /// constraint for every `(e,d)`. No other side effects (`spec.md`
    /// §4.1).
    pub fn build(model: &mut Model, employees: &EmployeeTable, horizon: &Horizon, shifts: &ShiftAlphabet) -> Self {
        let (e_n, d_n, s_n) = (employees.len(), horizon.len(), shifts.len());
        let mut x = Vec::with_capacity(e_n * d_n * s_n);
        for _ in 0..(e_n * d_n * s_n) {
            x.push(model.bool());
        }
        let mut grid = AssignmentGrid { employees: e_n, dates: d_n, shifts: s_n, x, work: vec![None; e_n * d_n] };
        for e in 0..e_n {
            for d in 0..d_n {
                let terms = (0..s_n).map(|s| (1i64, grid.cell(e, d, s))).collect();
                model.lin_eq(terms, 1);
            }
        }
        grid
    }

    fn cell(&self, e: usize, d: usize, s: usize) -> VarId {
        self.x[(e * self.dates + d) * self.shifts + s]
    }

    pub fn x(&self, e: EmployeeIdx, d: usize, s: ShiftId) -> VarId {
        self.cell(e.0, d, s.0)
    }

    pub fn num_employees(&self) -> usize {
        self.employees
    }

    pub fn num_dates(&self) -> usize {
        self.dates
    }

    /// `Σ_s x[e,d,s]` restricted to `shifts`, as raw linear terms — used
    /// directly by compilers that only need the sum once (e.g. total
    /// workdays), without paying for a memoised variable.
    pub fn sum_terms(&self, e: EmployeeIdx, d: usize, shifts: &[ShiftId]) -> Vec<(i64, VarId)> {
        shifts.iter().map(|s| (1i64, self.x(e, d, *s))).collect()
    }

    /// The memoised `work[e,d]` indicator (`spec.md` §3): `Σ_{s∈W}
    /// x[e,d,s]`, materialised as its own boolean variable the first time
    /// it's asked for and cached thereafter, keyed by `(e,d)`.
    pub fn work(&mut self, model: &mut Model, working: &[ShiftId], e: EmployeeIdx, d: usize) -> VarId {
        let key = e.0 * self.dates + d;
        if let Some(v) = self.work[key] {
            return v;
        }
        let w = model.bool();
        let mut terms = self.sum_terms(e, d, working);
        terms.push((-1, w));
        model.lin_eq(terms, 0);
        self.work[key] = Some(w);
        w
    }
}
