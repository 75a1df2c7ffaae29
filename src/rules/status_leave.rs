//! Status-based full-horizon leave, hard-only (`spec.md` §4.12).
//!
//! For every `e` with `status ∈ status_values_for_full_leave` and every `d
//! ∈ D`: `x[e,d,leave_shift_name] = 1`.
//!
//! Unlike every other family, an undefined `leave_shift_name` is a
//! **fatal** configuration error (`spec.md` §4.15: "a rule requires `OFF`
//! or `leave_shift_name` that is not in `S`"), not a per-rule warning —
//! this family is checked before any compiler runs a single constraint, so
//! [`compile`] returns a `Result` instead of only pushing diagnostics.

use crate::domain::{EmployeeTable, Horizon, ShiftAlphabet};
use crate::model::Model;
use crate::report::{BuildError, BuildReport};
use crate::variables::AssignmentGrid;

use super::resolve_targets;

#[derive(Debug, Clone)]
pub struct StatusLeaveRule {
    pub status_values_for_full_leave: Vec<String>,
    pub leave_shift_name: String,
    pub target_employees: Vec<String>,
}

impl StatusLeaveRule {
    /// `leave_shift_name` defaults to `OFF` (`公休`), per `spec.md` §4.12.
    pub fn new(status_values_for_full_leave: Vec<String>) -> Self {
        StatusLeaveRule {
            status_values_for_full_leave,
            leave_shift_name: crate::domain::OFF_SHIFT.to_string(),
            target_employees: Vec::new(),
        }
    }
}

pub fn compile(
    model: &mut Model,
    grid: &AssignmentGrid,
    employees: &EmployeeTable,
    horizon: &Horizon,
    shifts: &ShiftAlphabet,
    rules: &[StatusLeaveRule],
    report: &mut BuildReport,
) -> Result<(), BuildError> {
    for rule in rules {
        let Some(leave_shift) = shifts.find(&rule.leave_shift_name) else {
            return Err(BuildError::UndefinedLeaveShift {
                field: "leave_shift_name",
                shift: rule.leave_shift_name.clone(),
            });
        };

        let target_scope = resolve_targets(employees, &rule.target_employees);
        let matching: Vec<_> = employees
            .iter()
            .filter(|(idx, e)| {
                target_scope.contains(idx)
                    && e.status.as_deref().map(|s| rule.status_values_for_full_leave.iter().any(|v| v == s)).unwrap_or(false)
            })
            .map(|(idx, _)| idx)
            .collect();

        if matching.is_empty() {
            report.info("status_leave", None, "no employee currently matches the configured status values");
            continue;
        }

        for e in matching {
            for (d, _) in horizon.iter() {
                model.lin_eq(vec![(1, grid.x(e, d, leave_shift))], 1);
            }
        }
    }
    Ok(())
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
            Employee {
                id: "A".into(),
                employment_type: "常勤".into(),
                floor: "1F".into(),
                status: Some("育休".into()),
            },
            Employee { id: "B".into(), employment_type: "常勤".into(), floor: "1F".into(), status: None },
        ]);
        let horizon = Horizon::new(
            vec![NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(), NaiveDate::from_ymd_opt(2026, 1, 2).unwrap()],
            &HashSet::new(),
        );
        let grid = AssignmentGrid::build(&mut model, &employees, &horizon, &shifts);
        (model, grid, employees, horizon, shifts)
    }

    #[test]
    fn matching_status_forces_off_every_day() {
        let (mut model, grid, employees, horizon, shifts) = fixture();
        let rule = StatusLeaveRule::new(vec!["育休".into()]);
        let before = model.num_constraints();
        let mut report = BuildReport::default();
        compile(&mut model, &grid, &employees, &horizon, &shifts, &[rule], &mut report).unwrap();
        assert_eq!(model.num_constraints(), before + horizon.len());
    }

    #[test]
    fn undefined_leave_shift_is_fatal() {
        let (mut model, grid, employees, horizon, shifts) = fixture();
        let mut rule = StatusLeaveRule::new(vec!["育休".into()]);
        rule.leave_shift_name = "休暇".into();
        let mut report = BuildReport::default();
        let result = compile(&mut model, &grid, &employees, &horizon, &shifts, &[rule], &mut report);
        assert!(matches!(result, Err(BuildError::UndefinedLeaveShift { .. })));
    }

    #[test]
    fn no_matching_status_is_info_not_warning() {
        let (mut model, grid, employees, horizon, shifts) = fixture();
        let rule = StatusLeaveRule::new(vec!["病休".into()]);
        let mut report = BuildReport::default();
        compile(&mut model, &grid, &employees, &horizon, &shifts, &[rule], &mut report).unwrap();
        assert_eq!(report.warnings().count(), 0);
        assert_eq!(report.diagnostics.len(), 1);
    }
}
