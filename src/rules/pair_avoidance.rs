//! Pair same-shift avoidance, hard-only (`spec.md` §4.9).
//!
//! For each `d ∈ D` and each `s ∈ avoid_shifts`: `x[e1,d,s] + x[e2,d,s] ≤
//! 1`.

use crate::domain::{ConstraintType, EmployeeTable, Horizon, ShiftAlphabet};
use crate::model::Model;
use crate::report::BuildReport;
use crate::variables::AssignmentGrid;

use super::{resolve_employee, resolve_shift};

#[derive(Debug, Clone)]
pub struct PairAvoidanceRule {
    pub employee_pair: [String; 2],
    pub avoid_shifts: Vec<String>,
    pub constraint_type: ConstraintType,
}

pub fn compile(
    model: &mut Model,
    grid: &AssignmentGrid,
    employees: &EmployeeTable,
    horizon: &Horizon,
    shifts: &ShiftAlphabet,
    rules: &[PairAvoidanceRule],
    report: &mut BuildReport,
) {
    for (idx, rule) in rules.iter().enumerate() {
        if rule.constraint_type != ConstraintType::Hard {
            report.warn("pair_avoidance", Some(idx), "family is hard-only; soft rule skipped");
            continue;
        }
        let (Some(e1), Some(e2)) =
            (resolve_employee(employees, &rule.employee_pair[0]), resolve_employee(employees, &rule.employee_pair[1]))
        else {
            report.warn("pair_avoidance", Some(idx), "unknown employee in employee_pair");
            continue;
        };
        let avoid: Vec<_> = rule.avoid_shifts.iter().filter_map(|s| resolve_shift(shifts, s)).collect();
        if avoid.len() != rule.avoid_shifts.len() {
            report.warn("pair_avoidance", Some(idx), "avoid_shifts references an unknown shift");
            continue;
        }

        for (d, _) in horizon.iter() {
            for shift in &avoid {
                let a = grid.x(e1, d, *shift);
                let b = grid.x(e2, d, *shift);
                model.lin_le(vec![(1, a), (1, b)], 1);
            }
        }
    }
}
