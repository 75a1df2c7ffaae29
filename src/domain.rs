//! Scheduling domain model: the shift alphabet, the planning horizon, the
//! employee roster, and the handful of types every rule family shares
//! (`spec.md` §3).

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, Weekday};

/// The shift code every facility is required to carry (`spec.md` §3): the
/// designated off-duty shift.
pub const OFF_SHIFT: &str = "公休";
pub const DAY_SHIFT: &str = "日勤";
pub const EARLY_SHIFT: &str = "早出";
pub const NIGHT_SHIFT: &str = "夜勤";
pub const POST_NIGHT_SHIFT: &str = "明勤";

/// Index into a [`ShiftAlphabet`]. Stable for the lifetime of the alphabet
/// it was handed out by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ShiftId(pub usize);

/// The finite ordered set of shift codes known at build time (`spec.md` §3,
/// `S`), plus the "working" subset `W` used for workday counts.
#[derive(Debug, Clone)]
pub struct ShiftAlphabet {
    codes: Vec<String>,
    working: HashSet<usize>,
}

impl ShiftAlphabet {
    /// Builds the alphabet. `working` names the subset `W`; unrecognised
    /// names in `working` are ignored (validation happens once, here, not
    /// per rule).
    pub fn new(codes: Vec<String>, working: &[&str]) -> Self {
        let working_idx = working
            .iter()
            .filter_map(|name| codes.iter().position(|c| c == name))
            .collect();
        ShiftAlphabet { codes, working: working_idx }
    }

    /// The default working set `{日勤, 早出, 夜勤, 明勤}` per `spec.md` §3,
    /// restricted to whatever of those four codes are actually present.
    pub fn with_default_working(codes: Vec<String>) -> Self {
        Self::new(codes, &[DAY_SHIFT, EARLY_SHIFT, NIGHT_SHIFT, POST_NIGHT_SHIFT])
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn find(&self, name: &str) -> Option<ShiftId> {
        self.codes.iter().position(|c| c == name).map(ShiftId)
    }

    pub fn name(&self, id: ShiftId) -> &str {
        &self.codes[id.0]
    }

    pub fn off(&self) -> Option<ShiftId> {
        self.find(OFF_SHIFT)
    }

    pub fn is_working(&self, id: ShiftId) -> bool {
        self.working.contains(&id.0)
    }

    pub fn working_shifts(&self) -> impl Iterator<Item = ShiftId> + '_ {
        (0..self.codes.len()).filter(move |i| self.working.contains(i)).map(ShiftId)
    }

    pub fn all(&self) -> impl Iterator<Item = ShiftId> {
        (0..self.codes.len()).map(ShiftId)
    }
}

/// One calendar date in the planning horizon, weekday-derived and
/// holiday-flagged (`spec.md` §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Day {
    pub date: NaiveDate,
    pub is_public_holiday: bool,
}

impl Day {
    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// `WEH` membership test from `spec.md` §4.11: weekend OR public
    /// holiday, deduplicated (Open Question in §9, resolved in
    /// `SPEC_FULL.md` — a date that is both counts once).
    pub fn is_weekend_or_holiday(&self) -> bool {
        self.is_weekend() || self.is_public_holiday
    }
}

/// Ordered, contiguous calendar dates covered by the schedule (`spec.md`
/// §3, `D`).
#[derive(Debug, Clone)]
pub struct Horizon {
    days: Vec<Day>,
}

impl Horizon {
    /// `dates` need not be pre-sorted; holidays is the externally supplied
    /// holiday set referenced by `spec.md` §6.
    pub fn new(mut dates: Vec<NaiveDate>, holidays: &HashSet<NaiveDate>) -> Self {
        dates.sort_unstable();
        dates.dedup();
        let days = dates
            .into_iter()
            .map(|date| Day { date, is_public_holiday: holidays.contains(&date) })
            .collect();
        Horizon { days }
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    pub fn day(&self, idx: usize) -> Day {
        self.days[idx]
    }

    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        self.days.iter().position(|d| d.date == date)
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, Day)> + '_ {
        self.days.iter().copied().enumerate()
    }

    pub fn last_index(&self) -> Option<usize> {
        self.days.len().checked_sub(1)
    }
}

/// Index into an [`EmployeeTable`]. Stable for the lifetime of the table it
/// was handed out by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EmployeeIdx(pub usize);

/// One roster record (`spec.md` §3).
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: String,
    pub employment_type: String,
    pub floor: String,
    pub status: Option<String>,
}

/// The fixed employee set `E`, indexable by position and by id.
#[derive(Debug, Clone, Default)]
pub struct EmployeeTable {
    employees: Vec<Employee>,
}

impl EmployeeTable {
    pub fn new(employees: Vec<Employee>) -> Self {
        EmployeeTable { employees }
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    pub fn get(&self, idx: EmployeeIdx) -> &Employee {
        &self.employees[idx.0]
    }

    pub fn find(&self, id: &str) -> Option<EmployeeIdx> {
        self.employees.iter().position(|e| e.id == id).map(EmployeeIdx)
    }

    pub fn iter(&self) -> impl Iterator<Item = (EmployeeIdx, &Employee)> {
        self.employees.iter().enumerate().map(|(i, e)| (EmployeeIdx(i), e))
    }

    pub fn by_floor<'a>(&'a self, floor: &'a str) -> impl Iterator<Item = EmployeeIdx> + 'a {
        self.iter().filter(move |(_, e)| e.floor == floor).map(|(i, _)| i)
    }

    pub fn by_employment_type<'a>(
        &'a self,
        employment_type: &'a str,
    ) -> impl Iterator<Item = EmployeeIdx> + 'a {
        self.iter().filter(move |(_, e)| e.employment_type == employment_type).map(|(i, _)| i)
    }
}

/// Hard vs soft discriminator shared by most rule families (`spec.md` §3,
/// `constraint_type`). `spec.md` §4.10 extends this set with three more
/// variants local to that family — see `crate::rules::total_workdays`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintType {
    Hard,
    Soft,
}

impl Default for ConstraintType {
    /// Hard is the conservative default: an omitted `constraint_type` should
    /// never silently downgrade a rule to a penalised-but-ignorable one.
    fn default() -> Self {
        ConstraintType::Hard
    }
}

/// A non-negative penalty weight. `0` (the default) means the soft term is
/// skipped entirely — `spec.md` §3: "`weight = 0` or missing means the term
/// is skipped entirely".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Weight(pub u32);

impl Weight {
    pub const ZERO: Weight = Weight(0);

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }

    pub fn as_coefficient(self) -> i64 {
        i64::from(self.0)
    }
}

impl From<u32> for Weight {
    fn from(w: u32) -> Self {
        Weight(w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_working_set_matches_spec() {
        let shifts = ShiftAlphabet::with_default_working(
            [OFF_SHIFT, DAY_SHIFT, EARLY_SHIFT, NIGHT_SHIFT, POST_NIGHT_SHIFT]
                .into_iter()
                .map(String::from)
                .collect(),
        );
        assert!(!shifts.is_working(shifts.off().unwrap()));
        assert!(shifts.is_working(shifts.find(DAY_SHIFT).unwrap()));
        assert!(shifts.is_working(shifts.find(POST_NIGHT_SHIFT).unwrap()));
    }

    #[test]
    fn weekend_or_holiday_deduplicates() {
        // 2026-08-01 is a Saturday and we also mark it a public holiday;
        // it must still only count once as a WEH day (no double semantics
        // to test beyond the boolean itself, but this pins the OR).
        let mut holidays = HashSet::new();
        let sat = ymd(2026, 8, 1);
        holidays.insert(sat);
        let horizon = Horizon::new(vec![sat], &holidays);
        let day = horizon.day(0);
        assert!(day.is_weekend());
        assert!(day.is_public_holiday);
        assert!(day.is_weekend_or_holiday());
    }

    #[test]
    fn horizon_sorts_and_dedups_dates() {
        let d1 = ymd(2026, 1, 2);
        let d2 = ymd(2026, 1, 1);
        let horizon = Horizon::new(vec![d1, d2, d1], &HashSet::new());
        assert_eq!(horizon.len(), 2);
        assert_eq!(horizon.day(0).date, d2);
        assert_eq!(horizon.day(1).date, d1);
    }

    #[test]
    fn weight_zero_is_skipped() {
        assert!(Weight::ZERO.is_zero());
        assert!(Weight(0).is_zero());
        assert!(!Weight(1).is_zero());
    }
}
