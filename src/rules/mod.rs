//! Rule registry and compilers (`spec.md` §4.2–§4.12).
//!
//! `spec.md` §9 re-architects "dictionary-typed rule parameters with a
//! discriminator string" into "a tagged variant; `constraint_type` becomes
//! the discriminator" with "compile-time required fields on the variant;
//! optional fields carry defaults." That's exactly what each family module
//! below does: a plain Rust struct/enum per rule schema, validated once
//! (shared helpers here) and compiled by a dedicated function the builder
//! façade calls in the fixed §4.14 order.
//!
//! Every family is **fail-soft**: a malformed individual rule is skipped
//! with a [`crate::report::Diagnostic`] pushed to the [`crate::report::BuildReport`],
//! never a [`crate::report::BuildError`] (`spec.md` §4.2, §7).

pub mod balance;
pub mod max_consecutive;
pub mod min_days_off;
pub mod pair_avoidance;
pub mod requests;
pub mod sequence;
pub mod staffing;
pub mod status_leave;
pub mod total_workdays;
pub mod weekend_holiday;

use chrono::NaiveDate;

use crate::domain::{EmployeeIdx, EmployeeTable, Horizon, ShiftAlphabet, ShiftId};

/// Resolves a shift name against the alphabet; `None` means the rule
/// references an undefined shift and must be skipped (`spec.md` §4.2).
pub(crate) fn resolve_shift(shifts: &ShiftAlphabet, name: &str) -> Option<ShiftId> {
    shifts.find(name)
}

/// Resolves an employee id against the roster; `None` means the rule
/// references an unknown id and must be skipped.
pub(crate) fn resolve_employee(employees: &EmployeeTable, id: &str) -> Option<EmployeeIdx> {
    employees.find(id)
}

/// Parses an ISO `YYYY-MM-DD` date string and resolves it to a horizon
/// index. `None` covers both an unparseable string and a date outside `D`
/// (`spec.md` §4.8: "Requests outside `D` ... are skipped with a warning").
pub(crate) fn resolve_date_str(horizon: &Horizon, date_str: &str) -> Option<usize> {
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d").ok()?;
    horizon.index_of(date)
}

/// Resolves an explicit `target_employees` scope list, falling back to the
/// whole roster when it's empty/absent — the common default across
/// families that carry this optional field (§6's enumerated options
/// table).
pub(crate) fn resolve_targets(
    employees: &EmployeeTable,
    target_employees: &[String],
) -> Vec<EmployeeIdx> {
    if target_employees.is_empty() {
        employees.iter().map(|(idx, _)| idx).collect()
    } else {
        target_employees.iter().filter_map(|id| resolve_employee(employees, id)).collect()
    }
}
