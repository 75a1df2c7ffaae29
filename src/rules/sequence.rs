//! Sequential shift rule, `A → B` on consecutive days (`spec.md` §4.6).
//!
//! Skipped on the last day of `D`. For every `e` and `d ∈ D \ {d_{T-1}}`,
//! `a = x[e,d,A]`, `b = x[e,d+1,B]`:
//! - Hard: `a ≤ b` (`a=1 ⇒ b=1`).
//! - Soft: `v = max(0, a−b)` reified as `v ≥ a−b` (`v` is already a 0/1
//!   variable, so `v ≥ 0` and `v ≤ 1` come for free from its domain);
//!   penalty `(v, w)`.

use crate::domain::{ConstraintType, EmployeeTable, Horizon, ShiftAlphabet};
use crate::domain::Weight;
use crate::model::Model;
use crate::report::BuildReport;
use crate::variables::AssignmentGrid;

use super::resolve_shift;

#[derive(Debug, Clone)]
pub struct SequenceRule {
    pub previous_shift_name: String,
    pub next_shift_name: String,
    pub constraint_type: ConstraintType,
    pub penalty_weight: Weight,
}

pub fn compile(
    model: &mut Model,
    grid: &AssignmentGrid,
    employees: &EmployeeTable,
    horizon: &Horizon,
    shifts: &ShiftAlphabet,
    rules: &[SequenceRule],
    report: &mut BuildReport,
) {
    let Some(last) = horizon.last_index() else {
        return;
    };

    for (idx, rule) in rules.iter().enumerate() {
        let (Some(prev), Some(next)) =
            (resolve_shift(shifts, &rule.previous_shift_name), resolve_shift(shifts, &rule.next_shift_name))
        else {
            report.warn("sequence", Some(idx), "unknown previous_shift_name or next_shift_name");
            continue;
        };

        for (e, _) in employees.iter() {
            for d in 0..last {
                let a = grid.x(e, d, prev);
                let b = grid.x(e, d + 1, next);

                match rule.constraint_type {
                    ConstraintType::Hard => {
                        // a <= b
                        model.lin_le(vec![(1, a), (-1, b)], 0);
                    }
                    ConstraintType::Soft => {
                        let v = model.bool();
                        // v >= a - b  <=>  a - b - v <= 0
                        model.lin_le(vec![(1, a), (-1, b), (-1, v)], 0);
                        if !rule.penalty_weight.is_zero() {
                            model.add_objective_term(v, rule.penalty_weight.as_coefficient());
                        } else {
                            report.info("sequence", Some(idx), "penalty_weight is zero; term dropped");
                        }
                    }
                }
            }
        }
    }
}
