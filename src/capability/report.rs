//! Capability study: descriptive statistics plus the Cp/Cpk family.
//!
//! A study takes a measurement sample and a [`ToleranceSpec`] and
//! produces one immutable report. With the sample mean `x̄` and the
//! Bessel-corrected sample standard deviation `σ`:
//!
//! ```text
//! Cp  = (USL − LSL) / 6σ      potential capability, centering ignored
//! Cpu = (USL − x̄) / 3σ        upper one-sided capability
//! Cpl = (x̄ − LSL) / 3σ        lower one-sided capability
//! Cpk = min(Cpu, Cpl)          actual capability, worst side
//! ```
//!
//! # Zero-variance policy
//!
//! When every retained measurement is identical (`σ == 0`) all four
//! indices are reported as 0 rather than ±∞ or NaN. A dispersion-free
//! sample carries no evidence of process spread, and a zero keeps an
//! off-target uniform sample from scoring as infinitely capable. This
//! clamp is part of the public contract and is pinned by tests.
//!
//! # References
//!
//! - Montgomery, D.C. (2019). *Introduction to Statistical Quality
//!   Control*, 8th ed. Wiley. Chapter 8.
//! - Kane, V.E. (1986). "Process Capability Indices". *Journal of
//!   Quality Technology* 18(1), pp. 41–52.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sample;
use crate::stats;
use crate::tolerance::{SpecError, SpecLimits, ToleranceSpec};

/// Outcome of a capability study.
///
/// Fewer than 2 retained measurements is a normal outcome, not an
/// error: dispersion needs `n − 1 >= 1` degrees of freedom, and the
/// caller is expected to show "need more samples" with the observed
/// count rather than a crash or a half-filled report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Capability {
    /// The study succeeded.
    Report(CapabilityReport),
    /// Too few valid measurements; `n` is the retained count (0 or 1).
    Insufficient {
        /// Number of measurements that survived cleaning.
        n: usize,
    },
}

impl Capability {
    /// Returns the report, or `None` for an insufficient sample.
    pub fn report(&self) -> Option<&CapabilityReport> {
        match self {
            Capability::Report(report) => Some(report),
            Capability::Insufficient { .. } => None,
        }
    }

    /// Whether the sample was too small to study.
    pub fn is_insufficient(&self) -> bool {
        matches!(self, Capability::Insufficient { .. })
    }

    /// Number of retained measurements, for either outcome.
    pub fn sample_count(&self) -> usize {
        match self {
            Capability::Report(report) => report.n,
            Capability::Insufficient { n } => *n,
        }
    }
}

/// Immutable result of one capability study.
///
/// Computed fresh on every invocation; holds no references and no
/// lifecycle. All specification-derived fields (`usl`, `lsl`,
/// `nominal`) are echoed into the report so a consumer never has to
/// re-derive them and risk disagreeing with the study.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapabilityReport {
    /// Retained sample size.
    pub n: usize,
    /// Sample mean.
    pub mean: f64,
    /// Smallest retained measurement.
    pub min: f64,
    /// Largest retained measurement.
    pub max: f64,
    /// Sample standard deviation (Bessel-corrected, `n − 1` divisor).
    pub sigma: f64,
    /// Potential capability `(USL − LSL) / 6σ`; 0 when `σ == 0`.
    pub cp: f64,
    /// Actual capability `min(Cpu, Cpl)`; 0 when `σ == 0`.
    pub cpk: f64,
    /// Upper one-sided capability `(USL − x̄) / 3σ`; 0 when `σ == 0`.
    pub cpu: f64,
    /// Lower one-sided capability `(x̄ − LSL) / 3σ`; 0 when `σ == 0`.
    pub cpl: f64,
    /// Upper specification limit used by the study.
    pub usl: f64,
    /// Lower specification limit used by the study.
    pub lsl: f64,
    /// Nominal (target) value of the specification.
    pub nominal: f64,
}

impl CapabilityReport {
    /// Limits the study was computed against.
    ///
    /// Identical to [`ToleranceSpec::limits`] on the originating
    /// specification, so per-value classification downstream of a
    /// report can never drift from the study itself.
    pub fn limits(&self) -> SpecLimits {
        SpecLimits {
            usl: self.usl,
            lsl: self.lsl,
        }
    }
}

impl ToleranceSpec {
    /// Runs a capability study over a measurement sample.
    ///
    /// Non-finite entries are excluded before anything is computed, so
    /// a pre-cleaned sample and a raw float sample go through the same
    /// retention rule. Fewer than 2 retained values yields
    /// [`Capability::Insufficient`].
    ///
    /// # Examples
    /// ```
    /// use metricap::tolerance::ToleranceSpec;
    ///
    /// let spec = ToleranceSpec::new(50.0, 12.0, 12.0)?;
    /// let outcome = spec.capability(&[49.0, 50.0, 51.0]);
    /// let report = outcome.report().unwrap();
    /// assert_eq!(report.mean, 50.0);
    /// assert_eq!(report.sigma, 1.0);
    /// assert_eq!(report.cp, 4.0);
    /// assert_eq!(report.cpk, 4.0);
    /// # Ok::<(), metricap::tolerance::SpecError>(())
    /// ```
    pub fn capability(&self, values: &[f64]) -> Capability {
        let data: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
        if data.len() < 2 {
            return Capability::Insufficient { n: data.len() };
        }
        match study(&data, self) {
            Some(report) => Capability::Report(report),
            // data is finite with n >= 2, so the study always lands in
            // the first arm.
            None => Capability::Insufficient { n: data.len() },
        }
    }
}

/// Computes a capability study straight from raw upstream values.
///
/// The entry point matching how measurement data actually arrives:
/// `raw` may mix numbers, decimal-comma strings, and `value`/`valor`
/// records (see [`crate::sample`]); unparsable entries are excluded.
/// The specification inputs are validated first and rejected with a
/// typed error if non-finite, before any data is touched.
///
/// # Errors
/// [`SpecError`] if `nominal`, `tol_sup`, or `tol_inf` is NaN or
/// infinite.
///
/// # Examples
/// ```
/// use metricap::capability::compute_capability;
/// use serde_json::json;
///
/// let raw = vec![
///     json!(9.98),
///     json!("10,02"),
///     json!({ "valor": 10.01 }),
///     json!(9.99),
///     json!(10.00),
/// ];
/// let outcome = compute_capability(&raw, 10.0, 0.05, 0.05)?;
/// let report = outcome.report().unwrap();
/// assert_eq!(report.n, 5);
/// assert_eq!(report.mean, 10.0);
/// assert_eq!(report.usl, 10.05);
/// assert_eq!(report.lsl, 9.95);
/// assert!((report.cpk - 1.054).abs() < 1e-3);
/// # Ok::<(), metricap::tolerance::SpecError>(())
/// ```
pub fn compute_capability(
    raw: &[Value],
    nominal: f64,
    tol_sup: f64,
    tol_inf: f64,
) -> Result<Capability, SpecError> {
    let spec = ToleranceSpec::new(nominal, tol_sup, tol_inf)?;
    Ok(spec.capability(&sample::clean(raw)))
}

/// Study over cleaned data. `data` must be finite with `len >= 2`.
fn study(data: &[f64], spec: &ToleranceSpec) -> Option<CapabilityReport> {
    let n = data.len();
    let mean = stats::mean(data)?;
    let min = stats::min(data)?;
    let max = stats::max(data)?;
    let sigma = stats::sample_std_dev(data)?;
    let SpecLimits { usl, lsl } = spec.limits();

    let (cp, cpu, cpl) = if sigma > 0.0 {
        (
            (usl - lsl) / (6.0 * sigma),
            (usl - mean) / (3.0 * sigma),
            (mean - lsl) / (3.0 * sigma),
        )
    } else {
        (0.0, 0.0, 0.0)
    };
    let cpk = cpu.min(cpl);

    Some(CapabilityReport {
        n,
        mean,
        min,
        max,
        sigma,
        cp,
        cpk,
        cpu,
        cpl,
        usl,
        lsl,
        nominal: spec.nominal(),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(nominal: f64, tol_sup: f64, tol_inf: f64) -> ToleranceSpec {
        ToleranceSpec::new(nominal, tol_sup, tol_inf).unwrap()
    }

    // ---- insufficient data ----

    #[test]
    fn empty_sample_is_insufficient_with_zero() {
        let outcome = spec(10.0, 0.1, 0.1).capability(&[]);
        assert_eq!(outcome, Capability::Insufficient { n: 0 });
        assert!(outcome.is_insufficient());
        assert_eq!(outcome.sample_count(), 0);
    }

    #[test]
    fn single_value_is_insufficient_with_one() {
        let outcome = spec(10.0, 0.1, 0.1).capability(&[10.02]);
        assert_eq!(outcome, Capability::Insufficient { n: 1 });
    }

    #[test]
    fn non_finite_values_do_not_count_toward_the_sample() {
        let outcome = spec(10.0, 0.1, 0.1).capability(&[f64::NAN, 10.0, f64::INFINITY]);
        assert_eq!(outcome, Capability::Insufficient { n: 1 });
    }

    #[test]
    fn all_garbage_input_is_insufficient_with_zero() {
        let raw = vec![json!("abc"), json!(null), json!(true)];
        let outcome = compute_capability(&raw, 10.0, 0.1, 0.1).unwrap();
        assert_eq!(outcome, Capability::Insufficient { n: 0 });
    }

    // ---- minimum viable sample ----

    #[test]
    fn two_values_produce_a_full_report() {
        let outcome = spec(10.0, 0.5, 0.5).capability(&[10.0, 10.1]);
        let report = outcome.report().unwrap();
        assert_eq!(report.n, 2);
        assert_eq!(report.mean, 10.05);
        assert_eq!(report.min, 10.0);
        assert_eq!(report.max, 10.1);
        assert!((report.sigma - 0.1 / 2.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn two_equal_values_report_zero_sigma() {
        let report = *spec(10.0, 0.5, 0.5)
            .capability(&[10.02, 10.02])
            .report()
            .unwrap();
        assert_eq!(report.sigma, 0.0);
        assert_eq!(report.cpk, 0.0);
    }

    // ---- descriptive statistics ----

    #[test]
    fn centered_sample_matches_hand_computation() {
        let data = [9.98, 10.02, 10.01, 9.99, 10.00];
        let report = *spec(10.0, 0.05, 0.05).capability(&data).report().unwrap();
        assert_eq!(report.n, 5);
        assert_eq!(report.mean, 10.0);
        assert_eq!(report.min, 9.98);
        assert_eq!(report.max, 10.02);
        assert_eq!(report.usl, 10.05);
        assert_eq!(report.lsl, 9.95);
        assert_eq!(report.nominal, 10.0);
        // σ = sqrt(0.00025) with the n−1 divisor
        assert!((report.sigma - 0.0158113883).abs() < 1e-9);
        assert!((report.cpk - 1.0540925534).abs() < 1e-9);
        assert!(report.cpk.is_finite() && report.cpk > 0.0);
    }

    #[test]
    fn capable_centered_process() {
        // mean 50, σ 1, limits 38/62: Cp = 24/6 = 4
        let report = *spec(50.0, 12.0, 12.0)
            .capability(&[49.0, 50.0, 51.0])
            .report()
            .unwrap();
        assert_eq!(report.cp, 4.0);
        assert_eq!(report.cpu, 4.0);
        assert_eq!(report.cpl, 4.0);
        assert_eq!(report.cpk, 4.0);
    }

    #[test]
    fn off_center_process_takes_the_worse_side() {
        // mean 53, σ 1, limits 38/62: Cpu = 3, Cpl = 5
        let report = *spec(50.0, 12.0, 12.0)
            .capability(&[52.0, 53.0, 54.0])
            .report()
            .unwrap();
        assert_eq!(report.cp, 4.0);
        assert_eq!(report.cpu, 3.0);
        assert_eq!(report.cpl, 5.0);
        assert_eq!(report.cpk, 3.0);
    }

    // ---- zero-variance clamp ----

    #[test]
    fn identical_values_clamp_all_indices_to_zero() {
        let report = *spec(10.0, 0.1, 0.1)
            .capability(&[10.0, 10.0, 10.0])
            .report()
            .unwrap();
        assert_eq!(report.sigma, 0.0);
        assert_eq!(report.cp, 0.0);
        assert_eq!(report.cpu, 0.0);
        assert_eq!(report.cpl, 0.0);
        assert_eq!(report.cpk, 0.0);
    }

    #[test]
    fn clamp_applies_even_off_nominal() {
        // Uniform but off target: still 0, never ±∞.
        let report = *spec(10.0, 0.1, 0.1)
            .capability(&[10.3, 10.3])
            .report()
            .unwrap();
        assert_eq!(report.cpk, 0.0);
        assert!(report.cpk.is_finite());
    }

    // ---- specification handling ----

    #[test]
    fn non_finite_specification_is_rejected_before_cleaning() {
        let raw = vec![json!(10.0), json!(10.1)];
        assert!(matches!(
            compute_capability(&raw, f64::NAN, 0.1, 0.1),
            Err(SpecError::NonFiniteNominal(_))
        ));
        assert!(matches!(
            compute_capability(&raw, 10.0, f64::INFINITY, 0.1),
            Err(SpecError::NonFiniteTolSup(_))
        ));
        assert!(matches!(
            compute_capability(&raw, 10.0, 0.1, f64::NAN),
            Err(SpecError::NonFiniteTolInf(_))
        ));
    }

    #[test]
    fn negative_tolerances_study_identically() {
        let data = [9.98, 10.02, 10.01, 9.99];
        let a = spec(10.0, -0.2, -0.3).capability(&data);
        let b = spec(10.0, 0.2, 0.3).capability(&data);
        assert_eq!(a, b);
    }

    #[test]
    fn zero_tolerance_is_a_legitimate_specification() {
        let report = *spec(10.0, 0.0, 0.0)
            .capability(&[10.0, 10.01])
            .report()
            .unwrap();
        assert_eq!(report.usl, 10.0);
        assert_eq!(report.lsl, 10.0);
        // Band width 0: Cp is 0 regardless of spread, and a mean above
        // the collapsed band drives Cpk negative.
        assert_eq!(report.cp, 0.0);
        assert!(report.cpk < 0.0);
    }

    // ---- raw entry point ----

    #[test]
    fn mixed_raw_input_cleans_then_studies() {
        let raw = vec![
            json!(10.1),
            json!("abc"),
            json!(null),
            json!(9.9),
        ];
        let report = *compute_capability(&raw, 10.0, 0.5, 0.5)
            .unwrap()
            .report()
            .unwrap();
        assert_eq!(report.n, 2);
        assert_eq!(report.mean, 10.0);
    }

    #[test]
    fn decimal_comma_strings_join_the_sample() {
        let raw = vec![json!("12,5"), json!(12.5)];
        let report = *compute_capability(&raw, 12.5, 0.1, 0.1)
            .unwrap()
            .report()
            .unwrap();
        assert_eq!(report.n, 2);
        assert_eq!(report.mean, 12.5);
        assert_eq!(report.sigma, 0.0);
    }

    // ---- report accessors ----

    #[test]
    fn report_limits_match_spec_limits() {
        let spec = spec(25.0, 0.1, 0.4);
        let report = *spec.capability(&[24.9, 25.0, 25.1]).report().unwrap();
        assert_eq!(report.limits(), spec.limits());
    }

    #[test]
    fn insufficient_outcome_has_no_report() {
        let outcome = spec(10.0, 0.1, 0.1).capability(&[10.0]);
        assert!(outcome.report().is_none());
    }
}
