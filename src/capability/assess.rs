//! Assessment of a capability study against accepted thresholds.
//!
//! A report is just numbers; shop-floor decisions come from two gates:
//!
//! - **Sample adequacy**: capability figures from fewer than 25
//!   measurements are treated as preliminary. A study still runs from
//!   2 points (that is the mathematical floor), but its verdict says
//!   so.
//! - **Cpk grading**: 1.33 (the conventional "four sigma" margin) is
//!   the acceptance boundary for an existing process; between 1.00 and
//!   1.33 the process conforms but without margin; below 1.00 it
//!   produces nonconforming parts.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality
//!   Control*, 8th ed. Wiley. Section 8.3 (recommended minimum Cpk).

use serde::{Deserialize, Serialize};

use super::report::{Capability, CapabilityReport};

/// Minimum sample size for a non-preliminary capability study.
pub const MIN_RECOMMENDED_SAMPLE: usize = 25;

/// Cpk at or above which a process is graded capable.
pub const CAPABLE_CPK: f64 = 1.33;

/// Cpk at or above which a process is graded marginal.
pub const MARGINAL_CPK: f64 = 1.0;

/// Cpk grading against the conventional boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapabilityGrade {
    /// `cpk >= 1.33`.
    Capable,
    /// `1.0 <= cpk < 1.33`.
    Marginal,
    /// `cpk < 1.0`.
    Incapable,
}

impl CapabilityGrade {
    /// Grades a Cpk value.
    ///
    /// # Examples
    /// ```
    /// use metricap::capability::CapabilityGrade;
    /// assert_eq!(CapabilityGrade::from_cpk(1.45), CapabilityGrade::Capable);
    /// assert_eq!(CapabilityGrade::from_cpk(1.10), CapabilityGrade::Marginal);
    /// assert_eq!(CapabilityGrade::from_cpk(0.80), CapabilityGrade::Incapable);
    /// ```
    pub fn from_cpk(cpk: f64) -> Self {
        if cpk >= CAPABLE_CPK {
            CapabilityGrade::Capable
        } else if cpk >= MARGINAL_CPK {
            CapabilityGrade::Marginal
        } else {
            CapabilityGrade::Incapable
        }
    }
}

/// Overall verdict on a study: what the operator should do next.
///
/// The sample-size gate is checked first; a spectacular Cpk from a
/// dozen parts is still a preliminary result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessVerdict {
    /// Fewer than [`MIN_RECOMMENDED_SAMPLE`] measurements; collect
    /// more before acting on the indices.
    InsufficientSample,
    /// Adequate sample and `cpk >= 1.33`; no action needed.
    Stable,
    /// Adequate sample but `cpk < 1.33`; the process needs review.
    ReviewRequired,
}

impl ProcessVerdict {
    /// Verdict for a study outcome, covering the no-report case.
    ///
    /// [`Capability::Insufficient`] always maps to
    /// [`ProcessVerdict::InsufficientSample`].
    pub fn from_outcome(outcome: &Capability) -> Self {
        match outcome {
            Capability::Insufficient { .. } => ProcessVerdict::InsufficientSample,
            Capability::Report(report) => report.verdict(),
        }
    }
}

impl CapabilityReport {
    /// Cpk grading for this report.
    pub fn grade(&self) -> CapabilityGrade {
        CapabilityGrade::from_cpk(self.cpk)
    }

    /// Whether the sample meets the recommended minimum size.
    pub fn has_recommended_sample(&self) -> bool {
        self.n >= MIN_RECOMMENDED_SAMPLE
    }

    /// Overall verdict: sample-size gate first, then the Cpk gate.
    ///
    /// # Examples
    /// ```
    /// use metricap::capability::ProcessVerdict;
    /// use metricap::tolerance::ToleranceSpec;
    ///
    /// let spec = ToleranceSpec::new(50.0, 12.0, 12.0)?;
    /// let wide: Vec<f64> = (0..30).map(|i| 49.0 + 0.07 * i as f64).collect();
    /// let report = *spec.capability(&wide).report().unwrap();
    /// assert_eq!(report.verdict(), ProcessVerdict::Stable);
    /// # Ok::<(), metricap::tolerance::SpecError>(())
    /// ```
    pub fn verdict(&self) -> ProcessVerdict {
        if !self.has_recommended_sample() {
            ProcessVerdict::InsufficientSample
        } else if self.cpk >= CAPABLE_CPK {
            ProcessVerdict::Stable
        } else {
            ProcessVerdict::ReviewRequired
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
