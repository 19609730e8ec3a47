//! Tolerance specifications and derived specification limits.
//!
//! A dimension is specified as a nominal (target) value plus how far a
//! part may deviate above and below it. The tolerances are magnitudes:
//! drawings and capture forms write them with inconsistent signs
//! (`+0.05/-0.05`, `0.05/0.05`, even `-0.05` for the lower band), so
//! the absolute value is applied once, at construction, and every
//! downstream computation sees the same limits.
//!
//! Specification inputs are the one place this crate fails fast: a NaN
//! nominal is operator or catalog error, and letting it through would
//! poison every derived statistic. Compare [`crate::sample`], where
//! bad *measurement* values are silently excluded instead.

use serde::Serialize;
use thiserror::Error;

/// Rejected specification input.
///
/// Carried values are reported back in the message so a bad catalog row
/// can be identified from logs alone.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum SpecError {
    /// The nominal was NaN or infinite.
    #[error("nominal must be a finite number, got {0}")]
    NonFiniteNominal(f64),

    /// The upper tolerance was NaN or infinite.
    #[error("upper tolerance must be a finite number, got {0}")]
    NonFiniteTolSup(f64),

    /// The lower tolerance was NaN or infinite.
    #[error("lower tolerance must be a finite number, got {0}")]
    NonFiniteTolInf(f64),
}

/// Upper and lower specification limits derived from a tolerance.
///
/// `usl >= nominal >= lsl` always holds, because both tolerances are
/// non-negative by the time limits are derived.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpecLimits {
    /// Upper specification limit, `nominal + tol_sup`.
    pub usl: f64,
    /// Lower specification limit, `nominal - tol_inf`.
    pub lsl: f64,
}

impl SpecLimits {
    /// Whether a measurement violates the specification.
    ///
    /// A value is out of tolerance iff `v < lsl || v > usl`; values
    /// exactly on a limit conform. Non-finite probes return `false` —
    /// cleaning happens at the boundary, not here.
    ///
    /// # Examples
    /// ```
    /// use metricap::tolerance::ToleranceSpec;
    /// let limits = ToleranceSpec::new(10.0, 0.05, 0.05)?.limits();
    /// assert!(!limits.is_out_of_tolerance(10.05));
    /// assert!(limits.is_out_of_tolerance(10.051));
    /// assert!(limits.is_out_of_tolerance(9.94));
    /// # Ok::<(), metricap::tolerance::SpecError>(())
    /// ```
    pub fn is_out_of_tolerance(&self, v: f64) -> bool {
        v < self.lsl || v > self.usl
    }

    /// Whether a measurement conforms to the specification.
    pub fn contains(&self, v: f64) -> bool {
        !self.is_out_of_tolerance(v)
    }
}

/// A validated dimension specification: nominal plus tolerance band.
///
/// Construction is the validation boundary; a `ToleranceSpec` always
/// holds finite values with non-negative tolerances.
///
/// # Examples
/// ```
/// use metricap::tolerance::ToleranceSpec;
///
/// let spec = ToleranceSpec::new(10.0, 0.05, 0.05)?;
/// let limits = spec.limits();
/// assert_eq!(limits.usl, 10.05);
/// assert_eq!(limits.lsl, 9.95);
/// # Ok::<(), metricap::tolerance::SpecError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ToleranceSpec {
    nominal: f64,
    tol_sup: f64,
    tol_inf: f64,
}

impl ToleranceSpec {
    /// Creates a specification from a nominal and two tolerance values.
    ///
    /// Tolerance signs are ignored; `new(10.0, -0.2, -0.3)` and
    /// `new(10.0, 0.2, 0.3)` describe the same band. Zero tolerances
    /// are legitimate (an exact dimension where any deviation is out
    /// of tolerance).
    ///
    /// # Errors
    /// Returns a [`SpecError`] naming the offending field if any input
    /// is NaN or infinite.
    pub fn new(nominal: f64, tol_sup: f64, tol_inf: f64) -> Result<Self, SpecError> {
        if !nominal.is_finite() {
            return Err(SpecError::NonFiniteNominal(nominal));
        }
        if !tol_sup.is_finite() {
            return Err(SpecError::NonFiniteTolSup(tol_sup));
        }
        if !tol_inf.is_finite() {
            return Err(SpecError::NonFiniteTolInf(tol_inf));
        }
        Ok(Self {
            nominal,
            tol_sup: tol_sup.abs(),
            tol_inf: tol_inf.abs(),
        })
    }

    /// Target value for the dimension.
    pub fn nominal(&self) -> f64 {
        self.nominal
    }

    /// Upper tolerance magnitude (absolute value applied).
    pub fn tol_sup(&self) -> f64 {
        self.tol_sup
    }

    /// Lower tolerance magnitude (absolute value applied).
    pub fn tol_inf(&self) -> f64 {
        self.tol_inf
    }

    /// Derives the specification limits `nominal ± tol`.
    pub fn limits(&self) -> SpecLimits {
        SpecLimits {
            usl: self.nominal + self.tol_sup,
            lsl: self.nominal - self.tol_inf,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- construction ----

    #[test]
    fn new_rejects_non_finite_nominal() {
        assert!(matches!(
            ToleranceSpec::new(f64::NAN, 0.1, 0.1),
            Err(SpecError::NonFiniteNominal(_))
        ));
        assert!(matches!(
            ToleranceSpec::new(f64::INFINITY, 0.1, 0.1),
            Err(SpecError::NonFiniteNominal(_))
        ));
    }

    #[test]
    fn new_rejects_non_finite_tolerances() {
        assert!(matches!(
            ToleranceSpec::new(10.0, f64::NAN, 0.1),
            Err(SpecError::NonFiniteTolSup(_))
        ));
        assert!(matches!(
            ToleranceSpec::new(10.0, 0.1, f64::NEG_INFINITY),
            Err(SpecError::NonFiniteTolInf(_))
        ));
    }

    #[test]
    fn tolerance_signs_are_ignored() {
        let a = ToleranceSpec::new(10.0, -0.2, -0.3).unwrap();
        let b = ToleranceSpec::new(10.0, 0.2, 0.3).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.limits(), b.limits());
    }

    // ---- limits ----

    #[test]
    fn limits_are_nominal_plus_minus_tolerance() {
        let limits = ToleranceSpec::new(10.0, 0.05, 0.05).unwrap().limits();
        assert_eq!(limits.usl, 10.05);
        assert_eq!(limits.lsl, 9.95);
    }

    #[test]
    fn asymmetric_band() {
        let limits = ToleranceSpec::new(25.0, 0.1, 0.4).unwrap().limits();
        assert_eq!(limits.usl, 25.1);
        assert_eq!(limits.lsl, 24.6);
    }

    #[test]
    fn limits_bracket_nominal() {
        let spec = ToleranceSpec::new(-3.2, 0.02, 0.07).unwrap();
        let limits = spec.limits();
        assert!(limits.lsl <= spec.nominal() && spec.nominal() <= limits.usl);
    }

    #[test]
    fn zero_tolerance_collapses_band_to_nominal() {
        let limits = ToleranceSpec::new(5.0, 0.0, 0.0).unwrap().limits();
        assert_eq!(limits.usl, 5.0);
        assert_eq!(limits.lsl, 5.0);
        assert!(limits.contains(5.0));
        assert!(limits.is_out_of_tolerance(5.0001));
        assert!(limits.is_out_of_tolerance(4.9999));
    }

    // ---- classification ----

    #[test]
    fn values_on_the_limit_conform() {
        let limits = ToleranceSpec::new(10.0, 0.05, 0.05).unwrap().limits();
        assert!(limits.contains(10.05));
        assert!(limits.contains(9.95));
        assert!(limits.contains(10.0));
    }

    #[test]
    fn values_past_the_limit_do_not_conform() {
        let limits = ToleranceSpec::new(10.0, 0.05, 0.05).unwrap().limits();
        assert!(limits.is_out_of_tolerance(10.0501));
        assert!(limits.is_out_of_tolerance(9.9499));
    }

    #[test]
    fn nan_probe_is_not_flagged() {
        let limits = ToleranceSpec::new(10.0, 0.05, 0.05).unwrap().limits();
        assert!(!limits.is_out_of_tolerance(f64::NAN));
    }

    #[test]
    fn error_messages_carry_the_offending_value() {
        let err = ToleranceSpec::new(10.0, f64::INFINITY, 0.1).unwrap_err();
        assert_eq!(err.to_string(), "upper tolerance must be a finite number, got inf");
    }
}
