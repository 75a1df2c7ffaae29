//! Facility staffing rule, per floor × shift (`spec.md` §4.3).
//!
//! `c[floor,d,shift] = Σ_{e∈F(floor)} x[e,d,shift]`, applied for every `d ∈
//! D`:
//! - Hard: `c = target`.
//! - Soft: `c + shortage − excess = target`, `shortage, excess ≥ 0`;
//!   penalty `(shortage, under_w)` and `(excess, over_w)`.

use crate::domain::{ConstraintType, EmployeeTable, Horizon, ShiftAlphabet, Weight};
use crate::model::Model;
use crate::report::BuildReport;
use crate::variables::AssignmentGrid;

use super::resolve_shift;

#[derive(Debug, Clone)]
pub struct StaffingRule {
    pub floor: String,
    pub shift_name: String,
    pub target: i64,
    pub constraint_type: ConstraintType,
    pub under_penalty_weight: Weight,
    pub over_penalty_weight: Weight,
}

pub fn compile(
    model: &mut Model,
    grid: &AssignmentGrid,
    employees: &EmployeeTable,
    horizon: &Horizon,
    shifts: &ShiftAlphabet,
    rules: &[StaffingRule],
    report: &mut BuildReport,
) {
    for (idx, rule) in rules.iter().enumerate() {
        let Some(shift) = resolve_shift(shifts, &rule.shift_name) else {
            report.warn("staffing", Some(idx), format!("unknown shift {:?}", rule.shift_name));
            continue;
        };
        let floor_employees: Vec<_> = employees.by_floor(&rule.floor).collect();
        if floor_employees.is_empty() {
            report.warn("staffing", Some(idx), format!("no employees on floor {:?}", rule.floor));
            continue;
        }
        if rule.target < 0 {
            report.warn("staffing", Some(idx), "negative target");
            continue;
        }

        for (d, _day) in horizon.iter() {
            let mut terms: Vec<_> = floor_employees.iter().map(|e| (1i64, grid.x(*e, d, shift))).collect();

            match rule.constraint_type {
                ConstraintType::Hard => {
                    model.lin_eq(terms, rule.target);
                }
                ConstraintType::Soft => {
                    // `shortage` must reach `target` itself when `c` bottoms
                    // out at 0, or a high target makes this soft rule
                    // infeasible instead of penalised.
                    let shortage = model.int(0, rule.target.max(floor_employees.len() as i64));
                    let excess = model.int(0, floor_employees.len() as i64);
                    // c + shortage - excess = target
                    terms.push((1, shortage));
                    terms.push((-1, excess));
                    model.lin_eq(terms, rule.target);
                    if !rule.under_penalty_weight.is_zero() {
                        model.add_objective_term(shortage, rule.under_penalty_weight.as_coefficient());
                    } else {
                        report.info("staffing", Some(idx), "under_penalty_weight is zero; shortage term dropped");
                    }
                    if !rule.over_penalty_weight.is_zero() {
                        model.add_objective_term(excess, rule.over_penalty_weight.as_coefficient());
                    } else {
                        report.info("staffing", Some(idx), "over_penalty_weight is zero; excess term dropped");
                    }
                }
            }
        }
    }
}
