//! Inputs to the builder façade (`spec.md` §6): a plain owned-data bundle,
//! not a file format or wire protocol — "no wire protocol, no CLI, no
//! persisted state owned by the core" (`spec.md` §6).

use std::collections::HashSet;

use chrono::NaiveDate;

use crate::domain::{Employee, EmployeeTable, Horizon, ShiftAlphabet};
use crate::rules::balance::BalanceRule;
use crate::rules::max_consecutive::MaxConsecutiveRule;
use crate::rules::min_days_off::MinDaysOffRule;
use crate::rules::pair_avoidance::PairAvoidanceRule;
use crate::rules::requests::ShiftRequestRule;
use crate::rules::sequence::SequenceRule;
use crate::rules::staffing::StaffingRule;
use crate::rules::status_leave::StatusLeaveRule;
use crate::rules::total_workdays::TotalWorkdaysRule;
use crate::rules::weekend_holiday::WeekendHolidayRule;

/// Everything the façade needs: the shift alphabet, the planning horizon,
/// the roster, and the ten rule collections bundled by family (`spec.md`
/// §6: "A configuration object bundling the ten rule collections by
/// family").
#[derive(Debug, Clone, Default)]
pub struct BuildConfig {
    pub shifts: Vec<String>,
    pub working_shifts: Vec<String>,
    pub dates: Vec<NaiveDate>,
    pub holidays: HashSet<NaiveDate>,
    pub employees: Vec<Employee>,

    pub staffing: Vec<StaffingRule>,
    pub min_days_off: Vec<MinDaysOffRule>,
    pub max_consecutive: Vec<MaxConsecutiveRule>,
    pub sequence: Vec<SequenceRule>,
    pub balance: Vec<BalanceRule>,
    pub requests: Vec<ShiftRequestRule>,
    pub pair_avoidance: Vec<PairAvoidanceRule>,
    pub total_workdays: Vec<TotalWorkdaysRule>,
    pub weekend_holiday: Vec<WeekendHolidayRule>,
    pub status_leave: Vec<StatusLeaveRule>,
}

impl BuildConfig {
    /// Builds the shift alphabet from `shifts`/`working_shifts`, falling
    /// back to `spec.md` §3's documented default working set `{日勤, 早出,
    /// 夜勤, 明勤}` when `working_shifts` is empty.
    pub(crate) fn shift_alphabet(&self) -> ShiftAlphabet {
        if self.working_shifts.is_empty() {
            ShiftAlphabet::with_default_working(self.shifts.clone())
        } else {
            let working: Vec<&str> = self.working_shifts.iter().map(String::as_str).collect();
            ShiftAlphabet::new(self.shifts.clone(), &working)
        }
    }

    pub(crate) fn horizon(&self) -> Horizon {
        Horizon::new(self.dates.clone(), &self.holidays)
    }

    pub(crate) fn employee_table(&self) -> EmployeeTable {
        EmployeeTable::new(self.employees.clone())
    }
}
