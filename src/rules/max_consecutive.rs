//! Maximum consecutive workdays (`spec.md` §4.5).
//!
//! `w[e,d] = Σ_{s∈work_shifts} x[e,d,s]`. For every window of length `L =
//! max_days+1` and every employee `e`:
//! - Hard: `Σ_{i=0..L-1} w[e,d+i] ≤ max_days`.
//! - Soft: `slack_{e,d} ≥ 0` with `Σ w[e,d+i] − slack_{e,d} ≤ max_days`;
//!   penalty `(slack_{e,d}, over_w)`.
//!
//! Per-window penalty is the resolved tie-break from `spec.md` §9 / open
//! question 1 (carried into `SPEC_FULL.md` §E.1): overlapping windows are
//! penalised independently, one slack variable each.

use crate::domain::{ConstraintType, EmployeeTable, Horizon, ShiftAlphabet, Weight};
use crate::model::Model;
use crate::report::BuildReport;
use crate::variables::AssignmentGrid;

use super::resolve_shift;

#[derive(Debug, Clone)]
pub struct MaxConsecutiveRule {
    pub max_days: i64,
    pub work_shifts: Vec<String>,
    pub constraint_type: ConstraintType,
    pub over_penalty_weight: Weight,
}

pub fn compile(
    model: &mut Model,
    grid: &AssignmentGrid,
    employees: &EmployeeTable,
    horizon: &Horizon,
    shifts: &ShiftAlphabet,
    rules: &[MaxConsecutiveRule],
    report: &mut BuildReport,
) {
    for (idx, rule) in rules.iter().enumerate() {
        if rule.max_days < 0 {
            report.warn("max_consecutive", Some(idx), "negative max_days");
            continue;
        }
        let resolved: Vec<_> = rule.work_shifts.iter().filter_map(|s| resolve_shift(shifts, s)).collect();
        if resolved.len() != rule.work_shifts.len() {
            report.warn("max_consecutive", Some(idx), "work_shifts references an unknown shift");
            continue;
        }
        if resolved.is_empty() {
            report.warn("max_consecutive", Some(idx), "work_shifts is empty");
            continue;
        }

        let window_len = (rule.max_days + 1) as usize;
        if horizon.len() < window_len {
            report.info(
                "max_consecutive",
                Some(idx),
                "horizon shorter than max_days+1; no window is fully contained",
            );
            continue;
        }

        for (e, _) in employees.iter() {
            for start in 0..=(horizon.len() - window_len) {
                let mut terms = Vec::new();
                for i in 0..window_len {
                    terms.extend(grid.sum_terms(e, start + i, &resolved));
                }

                match rule.constraint_type {
                    ConstraintType::Hard => {
                        model.lin_le(terms, rule.max_days);
                    }
                    ConstraintType::Soft => {
                        let slack = model.int(0, window_len as i64);
                        terms.push((-1, slack));
                        model.lin_le(terms, rule.max_days);
                        if !rule.over_penalty_weight.is_zero() {
                            model.add_objective_term(slack, rule.over_penalty_weight.as_coefficient());
                        } else {
                            report.info(
                                "max_consecutive",
                                Some(idx),
                                "over_penalty_weight is zero; term dropped",
                            );
                        }
                    }
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

    fn fixture(num_days: i64) -> (Model, AssignmentGrid, EmployeeTable, Horizon, ShiftAlphabet) {
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
        let dates = (1..=num_days)
            .map(|d| NaiveDate::from_ymd_opt(2026, 1, d as u32).unwrap())
            .collect();
        let horizon = Horizon::new(dates, &HashSet::new());
        let grid = AssignmentGrid::build(&mut model, &employees, &horizon, &shifts);
        (model, grid, employees, horizon, shifts)
    }

    #[test]
    fn hard_rule_emits_one_constraint_per_sliding_window() {
        let (mut model, grid, employees, horizon, shifts) = fixture(5);
        let rule = MaxConsecutiveRule {
            max_days: 2,
            work_shifts: vec!["日勤".into()],
            constraint_type: ConstraintType::Hard,
            over_penalty_weight: Weight::ZERO,
        };
        let before = model.num_constraints();
        let mut report = BuildReport::default();
        compile(&mut model, &grid, &employees, &horizon, &shifts, &[rule], &mut report);
        // windows of length 3 over 5 days: starts 0,1,2 => 3 windows
        assert_eq!(model.num_constraints(), before + 3);
    }

    #[test]
    fn too_short_horizon_is_a_noop_info() {
        let (mut model, grid, employees, horizon, shifts) = fixture(2);
        let rule = MaxConsecutiveRule {
            max_days: 5,
            work_shifts: vec!["日勤".into()],
            constraint_type: ConstraintType::Hard,
            over_penalty_weight: Weight::ZERO,
        };
        let mut report = BuildReport::default();
        let before = model.num_constraints();
        compile(&mut model, &grid, &employees, &horizon, &shifts, &[rule], &mut report);
        assert_eq!(model.num_constraints(), before);
        assert_eq!(report.diagnostics.len(), 1);
    }
}
