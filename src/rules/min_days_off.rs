//! Minimum personal days-off rule (`spec.md` §4.4).
//!
//! `h_e = Σ_d x[e,d,OFF]`, for every `e` whose employment type matches:
//! - Hard: `h_e ≥ min_days`.
//! - Soft: `h_e + shortage_e ≥ min_days`, `shortage_e ≥ 0`; penalty
//!   `(shortage_e, under_w)`.

use crate::domain::{ConstraintType, EmployeeTable, Horizon, ShiftAlphabet, Weight};
use crate::model::Model;
use crate::report::BuildReport;
use crate::variables::AssignmentGrid;

#[derive(Debug, Clone)]
pub struct MinDaysOffRule {
    pub min_days: i64,
    pub target_employment_type: String,
    pub constraint_type: ConstraintType,
    pub under_penalty_weight: Weight,
}

pub fn compile(
    model: &mut Model,
    grid: &AssignmentGrid,
    employees: &EmployeeTable,
    horizon: &Horizon,
    shifts: &ShiftAlphabet,
    rules: &[MinDaysOffRule],
    report: &mut BuildReport,
) {
    let Some(off) = shifts.off() else {
        // Fatal-configuration territory is handled by the façade before any
        // compiler runs; if we got this far OFF exists. Defensive only.
        report.warn("min_days_off", None, "OFF shift undefined; skipping family");
        return;
    };

    for (idx, rule) in rules.iter().enumerate() {
        if rule.min_days < 0 {
            report.warn("min_days_off", Some(idx), "negative min_days");
            continue;
        }
        let matching: Vec<_> = employees.by_employment_type(&rule.target_employment_type).collect();
        if matching.is_empty() {
            report.warn(
                "min_days_off",
                Some(idx),
                format!("no employees of type {:?}", rule.target_employment_type),
            );
            continue;
        }

        for e in matching {
            let mut terms: Vec<_> = (0..horizon.len()).map(|d| (1i64, grid.x(e, d, off))).collect();

            match rule.constraint_type {
                ConstraintType::Hard => {
                    model.lin_ge(terms, rule.min_days);
                }
                ConstraintType::Soft => {
                    // Must reach `min_days` itself when `h_e` bottoms out at
                    // 0, or a high `min_days` makes this soft rule infeasible
                    // instead of penalised.
                    let shortage = model.int(0, rule.min_days.max(horizon.len() as i64));
                    // h_e + shortage_e >= min_days
                    terms.push((1, shortage));
                    model.lin_ge(terms, rule.min_days);
                    if !rule.under_penalty_weight.is_zero() {
                        model.add_objective_term(shortage, rule.under_penalty_weight.as_coefficient());
                    } else {
                        report.info("min_days_off", Some(idx), "under_penalty_weight is zero; term dropped");
                    }
                }
            }
        }
    }
}
