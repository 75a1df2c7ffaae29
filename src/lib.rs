//! # careshift-core
//!
//! A constraint-model builder for multi-floor care-facility shift
//! scheduling.
//!
//! Given a planning horizon, an employee roster, and a declarative rule
//! set (`spec.md` §1), this crate's [`builder::build`] façade emits a
//! constraint-satisfaction/optimization model whose variables encode a
//! full per-employee, per-day shift assignment and whose objective
//! minimises a weighted sum of soft-rule violations. Ten rule families
//! (§4.3–§4.12) compose into that single model: facility staffing,
//! minimum days off, maximum consecutive workdays, sequential shifts,
//! assignment-count balancing, individual shift requests, pair-avoidance,
//! total-workdays control, weekend/holiday leave, and status-driven
//! full-horizon leave.
//!
//! ## Quick start
//!
//! ```rust
//! use std::collections::HashSet;
//! use chrono::NaiveDate;
//! use careshift_core::builder;
//! use careshift_core::config::BuildConfig;
//! use careshift_core::domain::Employee;
//! use careshift_core::model::SolverConfig;
//!
//! let config = BuildConfig {
//!     shifts: vec!["公休".into(), "日勤".into(), "夜勤".into()],
//!     dates: vec![
//!         NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
//!         NaiveDate::from_ymd_opt(2026, 1, 2).unwrap(),
//!     ],
//!     holidays: HashSet::new(),
//!     employees: vec![Employee {
//!         id: "A".into(),
//!         employment_type: "常勤".into(),
//!         floor: "1F".into(),
//!         status: None,
//!     }],
//!     ..Default::default()
//! };
//!
//! let out = builder::build(&config).expect("fatal configuration error");
//! assert!(out.report.warnings().next().is_none());
//! let solution = out.model.solve(&SolverConfig::default());
//! assert!(solution.is_ok());
//! ```
//!
//! The underlying solver (CP-SAT-style: boolean/bounded-integer variables,
//! linear constraints, reified equality, `min`/`max` extraction, a linear
//! objective) is out of scope for the builder itself (`spec.md` §1
//! "assumed external collaborator") but this crate carries a small,
//! dependency-free implementation of exactly that surface under
//! [`model`], so the whole pipeline compiles and runs end to end — see
//! `SPEC_FULL.md` §A.

pub mod builder;
pub mod config;
pub mod domain;
pub mod model;
pub mod report;
pub mod rules;
pub mod variables;
