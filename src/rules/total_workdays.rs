//! Total workdays control (`spec.md` §4.10).
//!
//! `W_e = Σ_d Σ_{s∈W} x[e,d,s]`, against the alphabet's default working set
//! (`spec.md` §3), one rule per employee:
//!
//! | constraint_type | contract |
//! |---|---|
//! | `exact` | `W_e = days` |
//! | `max` | `W_e ≤ days` |
//! | `min` | `W_e ≥ days` |
//! | `soft_exact` | `W_e − days = pos_e − neg_e`; penalty `(pos_e+neg_e, w)` |
//! | `soft_max` | `W_e − days ≤ over_e`, `over_e ≥ 0`; penalty `(over_e, w)` |
//! | `soft_min` | `days − W_e ≤ under_e`, `under_e ≥ 0`; penalty `(under_e, w)` |
//!
//! This family's `constraint_type` is a six-way discriminator, distinct
//! from the hard/soft [`crate::domain::ConstraintType`] every other family
//! uses — `spec.md` §4.10 calls this out explicitly. Multiple rules for one
//! employee compose and may conflict; that's left for the solver to report
//! as infeasible (`spec.md` §4.10: "design choice: trust caller").

use crate::domain::{EmployeeTable, Horizon, ShiftAlphabet, Weight};
use crate::model::Model;
use crate::report::BuildReport;
use crate::variables::AssignmentGrid;

use super::resolve_employee;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TotalWorkdaysConstraint {
    Exact,
    Max,
    Min,
    SoftExact,
    SoftMax,
    SoftMin,
}

#[derive(Debug, Clone)]
pub struct TotalWorkdaysRule {
    pub employee_id: String,
    pub constraint_type: TotalWorkdaysConstraint,
    pub days: i64,
    pub penalty_weight: Weight,
}

pub fn compile(
    model: &mut Model,
    grid: &mut AssignmentGrid,
    employees: &EmployeeTable,
    horizon: &Horizon,
    shifts: &ShiftAlphabet,
    rules: &[TotalWorkdaysRule],
    report: &mut BuildReport,
) {
    use TotalWorkdaysConstraint::*;

    let working: Vec<_> = shifts.working_shifts().collect();
    let d_n = horizon.len() as i64;

    for (idx, rule) in rules.iter().enumerate() {
        let Some(e) = resolve_employee(employees, &rule.employee_id) else {
            report.warn("total_workdays", Some(idx), format!("unknown employee {:?}", rule.employee_id));
            continue;
        };
        if rule.days < 0 {
            report.warn("total_workdays", Some(idx), "negative days");
            continue;
        }

        // `work[e,d]` is memoised per `(e,d)` (`spec.md` §3, §9): every
        // total-workdays rule for the same employee reuses the same
        // indicator instead of re-deriving `Σ_{s∈W} x[e,d,s]`.
        let mut w_terms = Vec::with_capacity(horizon.len());
        for d in 0..horizon.len() {
            w_terms.push((1, grid.work(model, &working, e, d)));
        }

        match rule.constraint_type {
            Exact => model.lin_eq(w_terms, rule.days),
            Max => model.lin_le(w_terms, rule.days),
            Min => model.lin_ge(w_terms, rule.days),
            SoftExact => {
                let pos = model.int(0, d_n);
                let neg = model.int(0, d_n);
                // W_e - pos + neg = days
                let mut terms = w_terms;
                terms.push((-1, pos));
                terms.push((1, neg));
                model.lin_eq(terms, rule.days);
                if !rule.penalty_weight.is_zero() {
                    let combined = model.int(0, 2 * d_n);
                    model.lin_eq(vec![(1, pos), (1, neg), (-1, combined)], 0);
                    model.add_objective_term(combined, rule.penalty_weight.as_coefficient());
                } else {
                    report.info("total_workdays", Some(idx), "penalty_weight is zero; term dropped");
                }
            }
            SoftMax => {
                let over = model.int(0, d_n);
                // W_e - over <= days
                let mut terms = w_terms;
                terms.push((-1, over));
                model.lin_le(terms, rule.days);
                if !rule.penalty_weight.is_zero() {
                    model.add_objective_term(over, rule.penalty_weight.as_coefficient());
                } else {
                    report.info("total_workdays", Some(idx), "penalty_weight is zero; term dropped");
                }
            }
            SoftMin => {
                let under = model.int(0, d_n);
                // W_e + under >= days
                let mut terms = w_terms;
                terms.push((1, under));
                model.lin_ge(terms, rule.days);
                if !rule.penalty_weight.is_zero() {
                    model.add_objective_term(under, rule.penalty_weight.as_coefficient());
                } else {
                    report.info("total_workdays", Some(idx), "penalty_weight is zero; term dropped");
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
        let horizon = Horizon::new(
            vec![NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()],
            &HashSet::new(),
        );
        let grid = AssignmentGrid::build(&mut model, &employees, &horizon, &shifts);
        (model, grid, employees, horizon, shifts)
    }

    #[test]
    fn exact_emits_an_equality() {
        let (mut model, mut grid, employees, horizon, shifts) = fixture();
        let rule = TotalWorkdaysRule {
            employee_id: "A".into(),
            constraint_type: TotalWorkdaysConstraint::Exact,
            days: 1,
            penalty_weight: Weight::ZERO,
        };
        let before = model.num_constraints();
        let mut report = BuildReport::default();
        compile(&mut model, &mut grid, &employees, &horizon, &shifts, &[rule], &mut report);
        assert_eq!(model.num_constraints(), before + 1);
        assert!(report.warnings().next().is_none());
    }

    #[test]
    fn soft_exact_adds_a_combined_penalty_term() {
        let (mut model, mut grid, employees, horizon, shifts) = fixture();
        let rule = TotalWorkdaysRule {
            employee_id: "A".into(),
            constraint_type: TotalWorkdaysConstraint::SoftExact,
            days: 1,
            penalty_weight: Weight(2),
        };
        let mut report = BuildReport::default();
        compile(&mut model, &mut grid, &employees, &horizon, &shifts, &[rule], &mut report);
        assert_eq!(model.objective_len(), 1);
    }

    #[test]
    fn unknown_employee_is_skipped() {
        let (mut model, mut grid, employees, horizon, shifts) = fixture();
        let rule = TotalWorkdaysRule {
            employee_id: "ghost".into(),
            constraint_type: TotalWorkdaysConstraint::Max,
            days: 1,
            penalty_weight: Weight::ZERO,
        };
        let mut report = BuildReport::default();
        compile(&mut model, &mut grid, &employees, &horizon, &shifts, &[rule], &mut report);
        assert_eq!(report.warnings().count(), 1);
    }
}
