//! Descriptive statistics over measurement samples.
//!
//! The capability computations only ever need a handful of descriptive
//! quantities (mean, sample dispersion, extremes), but dimensional data
//! routinely carries large offsets (a 120 mm nominal with micron-level
//! spread), so every function here uses a numerically stable algorithm
//! rather than the naive textbook formula.
//!
//! # Algorithms
//!
//! - **Mean**: Neumaier compensated summation, O(ε) error independent
//!   of sample size.
//! - **Variance / standard deviation**: Welford's online recurrence,
//!   which avoids the catastrophic cancellation of `E[X²] − (E[X])²`.
//!
//! # References
//!
//! - Welford, B.P. (1962). "Note on a Method for Calculating Corrected
//!   Sums of Squares and Products". *Technometrics* 4(3), pp. 419–420.
//! - Neumaier, A. (1974). "Rundungsfehleranalyse einiger Verfahren zur
//!   Summation endlicher Summen". *ZAMM* 54(1), pp. 39–51.

/// Sums a slice with Neumaier's compensated summation.
///
/// A running compensation term recovers the low-order bits that plain
/// accumulation drops, including when an addend is larger in magnitude
/// than the running sum.
pub fn kahan_sum(data: &[f64]) -> f64 {
    let mut sum = 0.0_f64;
    let mut comp = 0.0_f64;
    for &x in data {
        let t = sum + x;
        if sum.abs() >= x.abs() {
            comp += (sum - t) + x;
        } else {
            comp += (x - t) + sum;
        }
        sum = t;
    }
    sum + comp
}

/// Arithmetic mean via compensated summation.
///
/// # Returns
/// - `None` if `data` is empty or contains any NaN/Inf.
///
/// # Examples
/// ```
/// use metricap::stats::mean;
/// assert_eq!(mean(&[9.98, 10.02, 10.01, 9.99, 10.00]), Some(10.0));
/// assert_eq!(mean(&[]), None);
/// ```
pub fn mean(data: &[f64]) -> Option<f64> {
    if data.is_empty() || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    Some(kahan_sum(data) / data.len() as f64)
}

/// Sample variance with Bessel's correction (denominator `n − 1`).
///
/// Uses Welford's single-pass recurrence.
///
/// # Returns
/// - `None` if `data.len() < 2` or `data` contains any NaN/Inf.
///
/// # Examples
/// ```
/// use metricap::stats::sample_variance;
/// let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
/// assert!((sample_variance(&v).unwrap() - 32.0 / 7.0).abs() < 1e-12);
/// assert_eq!(sample_variance(&[1.0]), None);
/// ```
pub fn sample_variance(data: &[f64]) -> Option<f64> {
    if data.len() < 2 || !data.iter().all(|x| x.is_finite()) {
        return None;
    }
    let mut count = 0.0_f64;
    let mut running_mean = 0.0_f64;
    let mut m2 = 0.0_f64;
    for &x in data {
        count += 1.0;
        let delta = x - running_mean;
        running_mean += delta / count;
        m2 += delta * (x - running_mean);
    }
    Some(m2 / (count - 1.0))
}

/// Sample standard deviation, `sqrt(sample_variance)`.
///
/// # Returns
/// - `None` if `data.len() < 2` or `data` contains any NaN/Inf.
///
/// # Examples
/// ```
/// use metricap::stats::sample_std_dev;
/// let v = [9.98, 10.02, 10.01, 9.99, 10.00];
/// let sigma = sample_std_dev(&v).unwrap();
/// assert!((sigma - 0.0158113883).abs() < 1e-9);
/// ```
pub fn sample_std_dev(data: &[f64]) -> Option<f64> {
    sample_variance(data).map(f64::sqrt)
}

/// Smallest value in the slice.
///
/// # Returns
/// - `None` if `data` is empty or contains NaN.
pub fn min(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    data.iter().copied().try_fold(f64::INFINITY, |acc, x| {
        if x.is_nan() {
            None
        } else {
            Some(acc.min(x))
        }
    })
}

/// Largest value in the slice.
///
/// # Returns
/// - `None` if `data` is empty or contains NaN.
pub fn max(data: &[f64]) -> Option<f64> {
    if data.is_empty() {
        return None;
    }
    data.iter().copied().try_fold(f64::NEG_INFINITY, |acc, x| {
        if x.is_nan() {
            None
        } else {
            Some(acc.max(x))
        }
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // ---- mean ----

    #[test]
    fn mean_of_known_sample() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
    }

    #[test]
    fn mean_rejects_empty_and_non_finite() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[1.0, f64::NAN]), None);
        assert_eq!(mean(&[1.0, f64::INFINITY]), None);
    }

    #[test]
    fn mean_survives_large_offset() {
        // 1e9 + [1..=5]; naive accumulation is fine here but the
        // compensated path must not make it worse.
        let data: Vec<f64> = (1..=5).map(|i| 1e9 + i as f64).collect();
        assert!((mean(&data).unwrap() - (1e9 + 3.0)).abs() < 1e-6);
    }

    // ---- variance / std dev ----

    #[test]
    fn variance_uses_bessel_correction() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        // Σ(x−5)² = 32, n−1 = 7
        assert!((sample_variance(&v).unwrap() - 32.0 / 7.0).abs() < 1e-12);
    }

    #[test]
    fn variance_needs_two_points() {
        assert_eq!(sample_variance(&[]), None);
        assert_eq!(sample_variance(&[42.0]), None);
        assert!(sample_variance(&[42.0, 42.0]).is_some());
    }

    #[test]
    fn variance_of_constant_sample_is_zero() {
        let v = [7.5; 50];
        assert!(sample_variance(&v).unwrap().abs() < 1e-15);
    }

    #[test]
    fn variance_stable_under_large_offset() {
        // [1e9+1 .. 1e9+5] has the variance of [1..5] = 2.5; the naive
        // E[X²]−(E[X])² formula loses it to cancellation.
        let data: Vec<f64> = (1..=5).map(|i| 1e9 + i as f64).collect();
        let var = sample_variance(&data).unwrap();
        assert!((var - 2.5).abs() < 1e-5, "got {var}");
    }

    #[test]
    fn std_dev_matches_manual_sqrt() {
        let v = [9.98, 10.02, 10.01, 9.99, 10.00];
        let sd = sample_std_dev(&v).unwrap();
        assert!((sd - 0.00025_f64.sqrt()).abs() < 1e-15);
    }

    // ---- min / max ----

    #[test]
    fn min_max_of_unsorted_sample() {
        let v = [3.0, 1.0, 4.0, 1.0, 5.0, 9.0, 2.0];
        assert_eq!(min(&v), Some(1.0));
        assert_eq!(max(&v), Some(9.0));
    }

    #[test]
    fn min_max_reject_empty_and_nan() {
        assert_eq!(min(&[]), None);
        assert_eq!(max(&[]), None);
        assert_eq!(min(&[2.0, f64::NAN]), None);
        assert_eq!(max(&[2.0, f64::NAN]), None);
    }

    // ---- kahan_sum ----

    #[test]
    fn kahan_sum_preserves_small_addend() {
        // Plain summation of 1e16 + 1.0 − 1e16 loses the 1.0.
        let v = [1e16, 1.0, -1e16];
        let s = kahan_sum(&v);
        assert!((s - 1.0).abs() < 1e-10, "got {s}");
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn finite_vec(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
        proptest::collection::vec(
            prop::num::f64::NORMAL.prop_filter("finite", |x| x.is_finite() && x.abs() < 1e12),
            min_len..=max_len,
        )
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(500))]

        #[test]
        fn variance_is_non_negative(data in finite_vec(2, 100)) {
            let var = sample_variance(&data).unwrap();
            prop_assert!(var >= 0.0, "variance must be >= 0, got {}", var);
        }

        #[test]
        fn variance_of_constant_is_zero(
            value in prop::num::f64::NORMAL.prop_filter("finite", |x| x.is_finite()),
            n in 2_usize..50,
        ) {
            let data = vec![value; n];
            let var = sample_variance(&data).unwrap();
            prop_assert!(var.abs() < 1e-10, "got {}", var);
        }

        #[test]
        fn std_dev_squares_back_to_variance(data in finite_vec(2, 100)) {
            let var = sample_variance(&data).unwrap();
            let sd = sample_std_dev(&data).unwrap();
            prop_assert!((sd * sd - var).abs() < 1e-10 * var.max(1.0));
        }

        #[test]
        fn mean_lies_between_extremes(data in finite_vec(1, 100)) {
            let m = mean(&data).unwrap();
            let lo = min(&data).unwrap();
            let hi = max(&data).unwrap();
            prop_assert!(lo - 1e-9 <= m && m <= hi + 1e-9);
        }
    }
}
