//! Weekend & public-holiday off rule (`spec.md` §4.11).
//!
//! `WEH = { d ∈ D | d is Sat/Sun or d.is_public_holiday }`, unioned with
//! any extra dates in this rule's own `holidays_list` (outside-`D` entries
//! ignored, per `spec.md` §4.11). For each targeted `e` and `d ∈ WEH`:
//! - Hard: `x[e,d,OFF] = 1`.
//! - Soft: append `(1 − x[e,d,OFF], penalty_weight)`.

use chrono::NaiveDate;

use crate::domain::{ConstraintType, EmployeeTable, Horizon, ShiftAlphabet, Weight};
use crate::model::Model;
use crate::report::BuildReport;
use crate::variables::AssignmentGrid;

use super::resolve_targets;

#[derive(Debug, Clone, Default)]
pub struct WeekendHolidayRule {
    pub holidays_list: Vec<String>,
    pub target_employees: Vec<String>,
    pub constraint_type: ConstraintType,
    pub penalty_weight: Weight,
}

pub fn compile(
    model: &mut Model,
    grid: &AssignmentGrid,
    employees: &EmployeeTable,
    horizon: &Horizon,
    shifts: &ShiftAlphabet,
    rules: &[WeekendHolidayRule],
    report: &mut BuildReport,
) {
    let Some(off) = shifts.off() else {
        report.warn("weekend_holiday", None, "OFF shift undefined; skipping family");
        return;
    };

    for (idx, rule) in rules.iter().enumerate() {
        let extra_holidays: std::collections::HashSet<usize> = rule
            .holidays_list
            .iter()
            .filter_map(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
            .filter_map(|date| horizon.index_of(date))
            .collect();

        let targets = resolve_targets(employees, &rule.target_employees);
        if targets.is_empty() {
            report.warn("weekend_holiday", Some(idx), "no resolvable target employees");
            continue;
        }

        for (d, day) in horizon.iter() {
            if !(day.is_weekend_or_holiday() || extra_holidays.contains(&d)) {
                continue;
            }
            for &e in &targets {
                let x = grid.x(e, d, off);
                match rule.constraint_type {
                    ConstraintType::Hard => {
                        model.lin_eq(vec![(1, x)], 1);
                    }
                    ConstraintType::Soft => {
                        if !rule.penalty_weight.is_zero() {
                            let v = model.bool();
                            model.lin_eq(vec![(1, v), (1, x)], 1);
                            model.add_objective_term(v, rule.penalty_weight.as_coefficient());
                        } else {
                            report.info(
                                "weekend_holiday",
                                Some(idx),
                                "penalty_weight is zero; term dropped",
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
        // 2026-08-01 is a Saturday.
        let horizon = Horizon::new(vec![NaiveDate::from_ymd_opt(2026, 8, 1).unwrap()], &HashSet::new());
        let grid = AssignmentGrid::build(&mut model, &employees, &horizon, &shifts);
        (model, grid, employees, horizon, shifts)
    }

    #[test]
    fn hard_rule_forces_off_on_weekend() {
        let (mut model, grid, employees, horizon, shifts) = fixture();
        let rule = WeekendHolidayRule { constraint_type: ConstraintType::Hard, ..Default::default() };
        let before = model.num_constraints();
        let mut report = BuildReport::default();
        compile(&mut model, &grid, &employees, &horizon, &shifts, &[rule], &mut report);
        assert_eq!(model.num_constraints(), before + 1);
    }

    #[test]
    fn holidays_outside_horizon_are_ignored() {
        let (mut model, grid, employees, horizon, shifts) = fixture();
        let rule = WeekendHolidayRule {
            holidays_list: vec!["1999-01-01".into()],
            constraint_type: ConstraintType::Hard,
            ..Default::default()
        };
        let before = model.num_constraints();
        let mut report = BuildReport::default();
        compile(&mut model, &grid, &employees, &horizon, &shifts, &[rule], &mut report);
        // still just the one weekend day, not an extra constraint for the
        // out-of-range holiday.
        assert_eq!(model.num_constraints(), before + 1);
    }
}
