//! Process capability studies and their assessment.
//!
//! - [`compute_capability`] — Study straight from raw upstream values
//! - [`Capability`] — Study outcome: a report, or too little data
//! - [`CapabilityReport`] — Descriptive statistics plus Cp/Cpk/Cpu/Cpl
//! - [`CapabilityGrade`], [`ProcessVerdict`] — Acceptance thresholds
//!   applied the way the quality dashboards read them
//!
//! # References
//!
//! - Montgomery (2019), *Introduction to Statistical Quality Control*, 8th ed.
//! - Kane (1986), "Process Capability Indices", *Journal of Quality
//!   Technology* 18(1).

mod assess;
mod report;

pub use assess::{
    CapabilityGrade, ProcessVerdict, CAPABLE_CPK, MARGINAL_CPK, MIN_RECOMMENDED_SAMPLE,
};
pub use report::{compute_capability, Capability, CapabilityReport};
