//! Individual shift-request rule (`spec.md` §4.8).
//!
//! A list of requests, each resolving to `(e, d, r)`:
//! - Hard: `x[e,d,r] = 1`.
//! - Soft: append `(1 − x[e,d,r], penalty_weight)`.
//!
//! Requests outside `D`, or referencing unknown ids/shifts, are skipped
//! with a warning.

use crate::domain::{ConstraintType, EmployeeTable, Horizon, ShiftAlphabet, Weight};
use crate::model::Model;
use crate::report::BuildReport;
use crate::variables::AssignmentGrid;

use super::{resolve_date_str, resolve_employee, resolve_shift};

#[derive(Debug, Clone)]
pub struct ShiftRequestRule {
    pub employee_id: String,
    pub date_str: String,
    pub requested_shift: String,
    pub constraint_type: ConstraintType,
    pub penalty_weight: Weight,
}

pub fn compile(
    model: &mut Model,
    grid: &AssignmentGrid,
    employees: &EmployeeTable,
    horizon: &Horizon,
    shifts: &ShiftAlphabet,
    rules: &[ShiftRequestRule],
    report: &mut BuildReport,
) {
    for (idx, rule) in rules.iter().enumerate() {
        let Some(e) = resolve_employee(employees, &rule.employee_id) else {
            report.warn("shift_request", Some(idx), format!("unknown employee {:?}", rule.employee_id));
            continue;
        };
        let Some(d) = resolve_date_str(horizon, &rule.date_str) else {
            report.warn("shift_request", Some(idx), format!("date {:?} outside horizon", rule.date_str));
            continue;
        };
        let Some(r) = resolve_shift(shifts, &rule.requested_shift) else {
            report.warn("shift_request", Some(idx), format!("unknown shift {:?}", rule.requested_shift));
            continue;
        };

        let x = grid.x(e, d, r);
        match rule.constraint_type {
            ConstraintType::Hard => {
                model.lin_eq(vec![(1, x)], 1);
            }
            ConstraintType::Soft => {
                if !rule.penalty_weight.is_zero() {
                    // (1 - x) is itself a valid 0/1 linear expression, but
                    // the objective only accepts a bare variable, so
                    // materialise it: v = 1 - x.
                    let v = model.bool();
                    model.lin_eq(vec![(1, v), (1, x)], 1);
                    model.add_objective_term(v, rule.penalty_weight.as_coefficient());
                } else {
                    report.info("shift_request", Some(idx), "penalty_weight is zero; term dropped");
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Employee, Horizon, ShiftAlphabet};
    use chrono::NaiveDate;
    use std::collections::HashSet;

    fn fixture() -> (Model, AssignmentGrid, EmployeeTable, Horizon, ShiftAlphabet) {
        let mut model = Model::new();
        let shifts = ShiftAlphabet::with_default_working(
            vec!["公休", "日勤"].into_iter().map(String::from).collect(),
        );
        let employees = EmployeeTable::new(vec![Employee {
            id: "A".into(),
            employment_type: "常勤".into(),
            floor: "1F".into(),
            status: None,
        }]);
        let horizon = Horizon::new(vec![NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()], &HashSet::new());
        let grid = AssignmentGrid::build(&mut model, &employees, &horizon, &shifts);
        (model, grid, employees, horizon, shifts)
    }

    #[test]
    fn hard_request_fixes_the_cell() {
        let (mut model, grid, employees, horizon, shifts) = fixture();
        let rule = ShiftRequestRule {
            employee_id: "A".into(),
            date_str: "2026-01-01".into(),
            requested_shift: "日勤".into(),
            constraint_type: ConstraintType::Hard,
            penalty_weight: Weight::ZERO,
        };
        let before = model.num_constraints();
        let mut report = BuildReport::default();
        compile(&mut model, &grid, &employees, &horizon, &shifts, &[rule], &mut report);
        assert_eq!(model.num_constraints(), before + 1);
    }

    #[test]
    fn request_outside_horizon_is_skipped() {
        let (mut model, grid, employees, horizon, shifts) = fixture();
        let rule = ShiftRequestRule {
            employee_id: "A".into(),
            date_str: "2030-01-01".into(),
            requested_shift: "日勤".into(),
            constraint_type: ConstraintType::Hard,
            penalty_weight: Weight::ZERO,
        };
        let mut report = BuildReport::default();
        compile(&mut model, &grid, &employees, &horizon, &shifts, &[rule], &mut report);
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn malformed_date_string_is_skipped() {
        let (mut model, grid, employees, horizon, shifts) = fixture();
        let rule = ShiftRequestRule {
            employee_id: "A".into(),
            date_str: "not-a-date".into(),
            requested_shift: "日勤".into(),
            constraint_type: ConstraintType::Hard,
            penalty_weight: Weight::ZERO,
        };
        let mut report = BuildReport::default();
        compile(&mut model, &grid, &employees, &horizon, &shifts, &[rule], &mut report);
        assert_eq!(report.warnings().count(), 1);
    }
}
