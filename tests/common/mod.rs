//! Shared fixtures for the property and scenario integration tests
//! (`spec.md` §8). Not itself a test binary — included via `mod common;`.

use chrono::NaiveDate;

use careshift_core::domain::Employee;

pub fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn emp(id: &str, employment_type: &str, floor: &str, status: Option<&str>) -> Employee {
    Employee {
        id: id.to_string(),
        employment_type: employment_type.to_string(),
        floor: floor.to_string(),
        status: status.map(str::to_string),
    }
}
