//! Builder façade (`spec.md` §4.14): the single entry point that sequences
//! the variable factory and every rule compiler in the fixed order and
//! returns the populated solver model plus diagnostics.

use chrono::NaiveDate;

use crate::config::BuildConfig;
use crate::domain::{EmployeeTable, Horizon, ShiftAlphabet};
use crate::model::{Model, VarId};
use crate::report::{BuildError, BuildReport};
use crate::rules;
use crate::variables::AssignmentGrid;

/// The façade's full output: the populated solver model, the diagnostics
/// report, and every piece the variable factory produced — `spec.md` §4.1
/// describes the grid as "a three-way lookup keyed by `(employee_id, date,
/// shift_name)`", which is only usable by a caller doing result decoding
/// (explicitly a collaborator out of this crate's scope, `spec.md` §1) if
/// that lookup survives the façade call. [`BuildOutput::var`] is that
/// lookup.
#[derive(Debug)]
pub struct BuildOutput {
    pub model: Model,
    pub report: BuildReport,
    grid: AssignmentGrid,
    employees: EmployeeTable,
    horizon: Horizon,
    shifts: ShiftAlphabet,
}

impl BuildOutput {
    /// Resolves `(employee_id, date, shift_name)` to the assignment
    /// variable `x[e,d,s]`, or `None` if any of the three doesn't resolve
    /// against this build's roster/horizon/alphabet.
    pub fn var(&self, employee_id: &str, date: NaiveDate, shift_name: &str) -> Option<VarId> {
        let e = self.employees.find(employee_id)?;
        let d = self.horizon.index_of(date)?;
        let s = self.shifts.find(shift_name)?;
        Some(self.grid.x(e, d, s))
    }
}

/// `spec.md` §4.14's fixed invocation order: variable factory → status
/// leave → shift requests → weekend/holiday → staffing → min holidays →
/// max consecutive → sequence rules → balance → pair avoidance → total
/// workdays → objective assembler. "Observable behaviour is
/// order-independent because the solver is [too]" — the order exists to
/// let pure-fixing constraints tighten the model before soft ones run, not
/// because later rules depend on earlier ones.
pub fn build(config: &BuildConfig) -> Result<BuildOutput, BuildError> {
    let shifts = config.shift_alphabet();
    let horizon = config.horizon();
    let employees = config.employee_table();

    // Fatal configuration errors (`spec.md` §4.15) are checked before a
    // single variable is created.
    if shifts.off().is_none() {
        return Err(BuildError::MissingOffShift);
    }
    if employees.is_empty() {
        return Err(BuildError::EmptyRoster);
    }
    if horizon.is_empty() {
        return Err(BuildError::EmptyHorizon);
    }

    let mut model = Model::new();
    let mut report = BuildReport::default();
    let mut grid = AssignmentGrid::build(&mut model, &employees, &horizon, &shifts);

    rules::status_leave::compile(
        &mut model,
        &grid,
        &employees,
        &horizon,
        &shifts,
        &config.status_leave,
        &mut report,
    )?;

    rules::requests::compile(&mut model, &grid, &employees, &horizon, &shifts, &config.requests, &mut report);

    rules::weekend_holiday::compile(
        &mut model,
        &grid,
        &employees,
        &horizon,
        &shifts,
        &config.weekend_holiday,
        &mut report,
    );

    rules::staffing::compile(&mut model, &grid, &employees, &horizon, &shifts, &config.staffing, &mut report);

    rules::min_days_off::compile(
        &mut model,
        &grid,
        &employees,
        &horizon,
        &shifts,
        &config.min_days_off,
        &mut report,
    );

    rules::max_consecutive::compile(
        &mut model,
        &grid,
        &employees,
        &horizon,
        &shifts,
        &config.max_consecutive,
        &mut report,
    );

    rules::sequence::compile(&mut model, &grid, &employees, &horizon, &shifts, &config.sequence, &mut report);

    rules::balance::compile(&mut model, &grid, &employees, &horizon, &shifts, &config.balance, &mut report);

    rules::pair_avoidance::compile(
        &mut model,
        &grid,
        &employees,
        &horizon,
        &shifts,
        &config.pair_avoidance,
        &mut report,
    );

    rules::total_workdays::compile(
        &mut model,
        &mut grid,
        &employees,
        &horizon,
        &shifts,
        &config.total_workdays,
        &mut report,
    );

    // Objective assembler (`spec.md` §4.13): every compiler above has
    // already appended its penalty terms directly to `model`'s objective
    // as it ran; there is nothing left to assemble but the report.
    report.variables_count = model.num_vars();
    report.penalty_terms_count = model.objective_len();

    Ok(BuildOutput { model, report, grid, employees, horizon, shifts })
}
