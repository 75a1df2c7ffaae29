//! Assignment-count balancing (`spec.md` §4.7).
//!
//! `G` = matching employee group (`target_employment_type`); skipped if
//! `|G| < 2`. `n_e = Σ_d x[e,d,target_shift]`, `M = max_e n_e`, `m = min_e
//! n_e`, `Δ = M − m`:
//! - Hard: `Δ ≤ max_diff_allowed` (requires `max_diff_allowed ≥ 0`).
//! - Soft: append `(Δ, penalty_weight)`.
//!
//! `M`/`m` are realised as integer variables with `M ≥ n_e`, `m ≤ n_e` for
//! every `e ∈ G` — no equality is needed, per `spec.md` §4.7: "the
//! objective or `Δ`-bound pulls them tight."

use crate::domain::{ConstraintType, EmployeeTable, Horizon, ShiftAlphabet, Weight};
use crate::model::Model;
use crate::report::BuildReport;
use crate::variables::AssignmentGrid;

use super::resolve_shift;

#[derive(Debug, Clone)]
pub struct BalanceRule {
    pub target_employment_type: String,
    pub target_shift_name: String,
    pub constraint_type: ConstraintType,
    pub max_diff_allowed: Option<i64>,
    pub penalty_weight: Weight,
}

pub fn compile(
    model: &mut Model,
    grid: &AssignmentGrid,
    employees: &EmployeeTable,
    horizon: &Horizon,
    shifts: &ShiftAlphabet,
    rules: &[BalanceRule],
    report: &mut BuildReport,
) {
    for (idx, rule) in rules.iter().enumerate() {
        let Some(shift) = resolve_shift(shifts, &rule.target_shift_name) else {
            report.warn("balance", Some(idx), format!("unknown shift {:?}", rule.target_shift_name));
            continue;
        };
        let group: Vec<_> = employees.by_employment_type(&rule.target_employment_type).collect();
        if group.len() < 2 {
            report.info("balance", Some(idx), "group has fewer than 2 members; rule has no effect");
            continue;
        }
        if rule.constraint_type == ConstraintType::Hard && rule.max_diff_allowed.map_or(true, |d| d < 0) {
            report.warn("balance", Some(idx), "hard balance rule requires max_diff_allowed >= 0");
            continue;
        }

        let d_n = horizon.len() as i64;
        let n_vars: Vec<_> = group
            .iter()
            .map(|e| {
                let terms = (0..horizon.len()).map(|d| (1i64, grid.x(*e, d, shift))).collect();
                let n = model.int(0, d_n);
                let mut t = terms;
                t.push((-1, n));
                model.lin_eq(t, 0);
                n
            })
            .collect();

        let max_var = model.int(0, d_n);
        let min_var = model.int(0, d_n);
        for n in &n_vars {
            model.lin_ge(vec![(1, max_var), (-1, *n)], 0);
            model.lin_le(vec![(1, min_var), (-1, *n)], 0);
        }

        let delta = model.int(0, d_n);
        model.lin_eq(vec![(1, max_var), (-1, min_var), (-1, delta)], 0);

        match rule.constraint_type {
            ConstraintType::Hard => {
                let bound = rule.max_diff_allowed.expect("validated above");
                model.lin_le(vec![(1, delta)], bound);
            }
            ConstraintType::Soft => {
                if !rule.penalty_weight.is_zero() {
                    model.add_objective_term(delta, rule.penalty_weight.as_coefficient());
                } else {
                    report.info("balance", Some(idx), "penalty_weight is zero; term dropped");
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
        let employees = EmployeeTable::new(vec![
            Employee { id: "A".into(), employment_type: "常勤".into(), floor: "1F".into(), status: None },
            Employee { id: "B".into(), employment_type: "常勤".into(), floor: "1F".into(), status: None },
        ]);
        let horizon = Horizon::new(vec![NaiveDate::from_ymd_opt(2026, 1, 1).unwrap()], &HashSet::new());
        let grid = AssignmentGrid::build(&mut model, &employees, &horizon, &shifts);
        (model, grid, employees, horizon, shifts)
    }

    #[test]
    fn single_member_group_is_noop() {
        let (mut model, grid, employees, horizon, shifts) = fixture();
        let rule = BalanceRule {
            target_employment_type: "パート".into(),
            target_shift_name: "日勤".into(),
            constraint_type: ConstraintType::Soft,
            max_diff_allowed: None,
            penalty_weight: Weight(1),
        };
        let mut report = BuildReport::default();
        let before = model.num_vars();
        compile(&mut model, &grid, &employees, &horizon, &shifts, &[rule], &mut report);
        assert_eq!(model.num_vars(), before);
        assert_eq!(report.diagnostics.len(), 1);
    }

    #[test]
    fn hard_rule_without_bound_is_a_warning() {
        let (mut model, grid, employees, horizon, shifts) = fixture();
        let rule = BalanceRule {
            target_employment_type: "常勤".into(),
            target_shift_name: "日勤".into(),
            constraint_type: ConstraintType::Hard,
            max_diff_allowed: None,
            penalty_weight: Weight::ZERO,
        };
        let mut report = BuildReport::default();
        compile(&mut model, &grid, &employees, &horizon, &shifts, &[rule], &mut report);
        assert_eq!(report.warnings().count(), 1);
    }

    #[test]
    fn soft_rule_with_two_members_adds_delta_penalty() {
        let (mut model, grid, employees, horizon, shifts) = fixture();
        let rule = BalanceRule {
            target_employment_type: "常勤".into(),
            target_shift_name: "日勤".into(),
            constraint_type: ConstraintType::Soft,
            max_diff_allowed: None,
            penalty_weight: Weight(5),
        };
        let mut report = BuildReport::default();
        compile(&mut model, &grid, &employees, &horizon, &shifts, &[rule], &mut report);
        assert_eq!(model.objective_len(), 1);
    }
}
