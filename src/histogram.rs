//! Capability histogram preparation.
//!
//! Unlike a general-purpose histogram, a capability histogram anchors
//! its window to the specification: the bins must always cover both
//! limits and a ±4σ band around the mean, so the distribution is seen
//! in context even when every reading sits in a narrow cluster or a
//! limit lies far outside the data. Rendering is the caller's concern;
//! this module only produces the bins and the overlay curve samples.

use serde::{Deserialize, Serialize};

use crate::capability::CapabilityReport;

/// Bin count used by the capture dashboards.
pub const DEFAULT_BIN_COUNT: usize = 15;

/// One histogram bin over `[start, end)`; the final bin is closed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistogramBin {
    /// Inclusive lower edge.
    pub start: f64,
    /// Upper edge.
    pub end: f64,
    /// Bin center, where a bar is plotted.
    pub midpoint: f64,
    /// Readings in the bin.
    pub count: usize,
}

/// Equal-width bins over the tolerance-anchored window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapabilityHistogram {
    /// Bins in ascending order, covering `[x_min, x_max]`.
    pub bins: Vec<HistogramBin>,
    /// Width of every bin.
    pub bin_width: f64,
    /// Window low edge.
    pub x_min: f64,
    /// Window high edge.
    pub x_max: f64,
}

/// A sampled point of the overlay curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Position along the measurement axis.
    pub x: f64,
    /// Curve height in count units.
    pub y: f64,
}

/// Bins a sample over the window implied by its capability study.
///
/// The window is `[min(data min, LSL, x̄ − 4s), max(data max, USL,
/// x̄ + 4s)]` with `s = σ`, or `0.1` when the sample has zero spread,
/// so a degenerate study still gets a visible window. `data` should be
/// the cleaned sample the study ran on; non-finite values are ignored.
///
/// # Returns
/// - `None` if `data` is empty or `bin_count` is 0.
///
/// # Examples
/// ```
/// use metricap::histogram::{capability_histogram, DEFAULT_BIN_COUNT};
/// use metricap::tolerance::ToleranceSpec;
///
/// let data = [9.98, 10.02, 10.01, 9.99, 10.00];
/// let spec = ToleranceSpec::new(10.0, 0.05, 0.05)?;
/// let report = *spec.capability(&data).report().unwrap();
///
/// let hist = capability_histogram(&data, &report, DEFAULT_BIN_COUNT).unwrap();
/// assert_eq!(hist.bins.len(), 15);
/// assert!(hist.x_min <= report.lsl && hist.x_max >= report.usl);
/// assert_eq!(hist.bins.iter().map(|b| b.count).sum::<usize>(), 5);
/// # Ok::<(), metricap::tolerance::SpecError>(())
/// ```
pub fn capability_histogram(
    data: &[f64],
    report: &CapabilityReport,
    bin_count: usize,
) -> Option<CapabilityHistogram> {
    if data.is_empty() || bin_count == 0 {
        return None;
    }

    let spread = if report.sigma > 0.0 { report.sigma } else { 0.1 };
    let padding = 4.0 * spread;
    let x_min = report.min.min(report.lsl).min(report.mean - padding);
    let x_max = report.max.max(report.usl).max(report.mean + padding);
    let bin_width = (x_max - x_min) / bin_count as f64;

    let mut counts = vec![0_usize; bin_count];
    for &v in data {
        if !v.is_finite() || v < x_min || v > x_max {
            continue;
        }
        // Clamping folds the window maximum into the last bin.
        let idx = (((v - x_min) / bin_width).floor() as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    let bins = counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let start = x_min + i as f64 * bin_width;
            let end = if i + 1 == bin_count {
                x_max
            } else {
                x_min + (i + 1) as f64 * bin_width
            };
            HistogramBin {
                start,
                end,
                midpoint: start + bin_width / 2.0,
                count,
            }
        })
        .collect();

    Some(CapabilityHistogram {
        bins,
        bin_width,
        x_min,
        x_max,
    })
}

/// Samples the scaled normal curve implied by the study.
///
/// The curve is scaled to count units so it overlays the bars
/// directly: `y = n·w / (σ√(2π)) · exp(−((x − x̄)/σ)² / 2)` with `w`
/// the bin width. Returns `intervals + 1` evenly spaced points across
/// the histogram window; the dashboards sample 100 intervals.
///
/// Empty when `σ == 0` (no curve exists) or `intervals == 0`.
pub fn normal_overlay(
    report: &CapabilityReport,
    histogram: &CapabilityHistogram,
    intervals: usize,
) -> Vec<CurvePoint> {
    if report.sigma <= 0.0 || intervals == 0 {
        return Vec::new();
    }

    let factor = report.n as f64 * histogram.bin_width
        / (report.sigma * (2.0 * std::f64::consts::PI).sqrt());
    let step = (histogram.x_max - histogram.x_min) / intervals as f64;

    (0..=intervals)
        .map(|i| {
            let x = histogram.x_min + i as f64 * step;
            let z = (x - report.mean) / report.sigma;
            CurvePoint {
                x,
                y: factor * (-0.5 * z * z).exp(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
