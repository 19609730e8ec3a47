//! # metricap
//!
//! Process capability analysis (Cp, Cpk) for dimensional quality-control
//! data: capability studies, per-cavity breakdowns, conformance tallies,
//! and chart-ready histogram and run-chart series.
//!
//! Measurement exports are messy — readings arrive as numbers or
//! decimal-comma strings, field names switch between English and
//! Spanish, tolerances carry inconsistent signs. This crate cleans all
//! of that at the boundary; the numeric core operates on plain finite
//! `f64` data without knowledge of any upstream convention.
//!
//! ## Modules
//!
//! - [`capability`] — Capability studies (Cp, Cpk, Cpu, Cpl), grading and verdicts
//! - [`tolerance`] — Validated specifications, USL/LSL limits, in/out classification
//! - [`sample`] — Raw value normalization (decimal commas, `value`/`valor`, exclusion)
//! - [`record`] — Canonical measurement/dimension records and the boundary adapter
//! - [`cavity`] — Per-cavity breakdown against the overall study
//! - [`conformance`] — Pass/fail tally over recorded inspection results
//! - [`histogram`] — Tolerance-anchored binning with a scaled normal overlay
//! - [`runchart`] — Ordered series with center line, limits, and display domain
//! - [`stats`] — Numerically stable descriptive statistics
//!
//! ## Design Philosophy
//!
//! - **Pure computation**: No I/O, no shared state; deterministic and cheap
//!   enough to re-run on every filter change
//! - **Mess stops at the boundary**: Field-name fallbacks and decimal
//!   normalization live in [`record`] and [`sample`] only
//! - **Exclusion over failure**: Bad readings are dropped, a bad
//!   specification is a typed error, too little data is a normal outcome
//! - **Numerical stability**: Compensated summation and Welford's
//!   recurrence in [`stats`]

pub mod capability;
pub mod cavity;
pub mod conformance;
pub mod histogram;
pub mod record;
pub mod runchart;
pub mod sample;
pub mod stats;
pub mod tolerance;
