//! Run-chart series preparation.
//!
//! A run chart shows the readings in capture order against the center
//! line and both specification limits, which is how a drifting or
//! oscillating process is spotted before the indices move. This module
//! prepares the series and its display domain; drawing is the caller's
//! concern.

use serde::{Deserialize, Serialize};

use crate::capability::CapabilityReport;

/// One plotted reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunPoint {
    /// Zero-based position in capture order (displays usually label
    /// from 1).
    pub index: usize,
    /// The reading.
    pub value: f64,
    /// Whether the reading violates the specification limits.
    pub out_of_tolerance: bool,
}

/// Ordered series plus the lines and domain needed to plot it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSeries {
    /// Readings in capture order, non-finite entries dropped.
    pub points: Vec<RunPoint>,
    /// Center line, the study mean.
    pub center: f64,
    /// Upper specification limit line.
    pub usl: f64,
    /// Lower specification limit line.
    pub lsl: f64,
    /// Display domain low edge.
    pub y_min: f64,
    /// Display domain high edge.
    pub y_max: f64,
}

/// Builds the run-chart series for a sample and its study.
///
/// The display domain covers every plotted value plus both limits and
/// the center line, padded by 15% of the span (0.01 when the span is
/// zero, so a flat series still has height).
///
/// # Returns
/// - `None` if `data` holds no finite values.
///
/// # Examples
/// ```
/// use metricap::runchart::run_series;
/// use metricap::tolerance::ToleranceSpec;
///
/// let data = [9.98, 10.02, 10.01, 9.99, 10.06];
/// let spec = ToleranceSpec::new(10.0, 0.05, 0.05)?;
/// let report = *spec.capability(&data).report().unwrap();
///
/// let series = run_series(&data, &report).unwrap();
/// assert_eq!(series.points.len(), 5);
/// assert!(series.points[4].out_of_tolerance);
/// assert!(series.y_min < series.lsl && series.y_max > series.usl);
/// # Ok::<(), metricap::tolerance::SpecError>(())
/// ```
pub fn run_series(data: &[f64], report: &CapabilityReport) -> Option<RunSeries> {
    let limits = report.limits();
    let points: Vec<RunPoint> = data
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .enumerate()
        .map(|(index, value)| RunPoint {
            index,
            value,
            out_of_tolerance: limits.is_out_of_tolerance(value),
        })
        .collect();
    if points.is_empty() {
        return None;
    }

    let mut lo = limits.lsl.min(report.mean);
    let mut hi = limits.usl.max(report.mean);
    for p in &points {
        lo = lo.min(p.value);
        hi = hi.max(p.value);
    }
    let span = hi - lo;
    let pad = if span > 0.0 { span * 0.15 } else { 0.01 };

    Some(RunSeries {
        points,
        center: report.mean,
        usl: limits.usl,
        lsl: limits.lsl,
        y_min: lo - pad,
        y_max: hi + pad,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
