//! Per-cavity breakdown of a measurement set.
//!
//! Multi-cavity molds produce parts from physically distinct cavities,
//! and a healthy overall Cpk can hide one cavity drifting on its own.
//! The breakdown groups readings by cavity and positions each cavity
//! against the overall study: how far its mean sits from the sample
//! mean, and whether that mean is outside the specification limits.
//!
//! Records without a cavity or without a reading are skipped; the
//! overall study itself is computed over *all* readings, cavity-less
//! ones included.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::capability::CapabilityReport;
use crate::record::MeasurementRecord;
use crate::stats;

/// One cavity's readings summarized against the overall study.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CavitySummary {
    /// Cavity number.
    pub cavity: u32,
    /// Readings attributed to this cavity.
    pub n: usize,
    /// Mean of this cavity's readings.
    pub mean: f64,
    /// Smallest reading in this cavity.
    pub min: f64,
    /// Largest reading in this cavity.
    pub max: f64,
    /// `mean − overall mean`; signed offset from the whole sample.
    pub delta: f64,
    /// Whether this cavity's mean violates the specification limits.
    pub out_of_limits: bool,
}

impl CavitySummary {
    /// Whether the cavity mean has drifted at least `2σ` from the
    /// overall mean, with `sigma` taken from the overall study.
    pub fn drifted(&self, sigma: f64) -> bool {
        self.delta.abs() >= 2.0 * sigma
    }
}

/// Groups records by cavity and summarizes each against the study.
///
/// Rows come back sorted by cavity number. The `report` should be the
/// study computed over the same record set (see [`crate::record::readings`]).
///
/// # Examples
/// ```
/// use metricap::cavity::cavity_breakdown;
/// use metricap::record::{adapt_measurements, readings};
/// use metricap::tolerance::ToleranceSpec;
/// use serde_json::json;
///
/// let rows = vec![
///     json!({ "cavity": 2, "value": 10.04 }),
///     json!({ "cavity": 1, "value": 9.98 }),
///     json!({ "cavity": 1, "value": 10.00 }),
///     json!({ "cavity": 2, "value": 10.02 }),
/// ];
/// let records = adapt_measurements(&rows);
/// let spec = ToleranceSpec::new(10.0, 0.05, 0.05)?;
/// let report = *spec.capability(&readings(&records)).report().unwrap();
///
/// let rows = cavity_breakdown(&records, &report);
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].cavity, 1);
/// assert_eq!(rows[0].n, 2);
/// assert_eq!(rows[1].cavity, 2);
/// assert_eq!(rows[1].mean, 10.03);
/// # Ok::<(), metricap::tolerance::SpecError>(())
/// ```
pub fn cavity_breakdown(
    records: &[MeasurementRecord],
    report: &CapabilityReport,
) -> Vec<CavitySummary> {
    let mut groups: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for record in records {
        if let (Some(cavity), Some(value)) = (record.cavity, record.value) {
            groups.entry(cavity).or_default().push(value);
        }
    }

    let limits = report.limits();
    groups
        .into_iter()
        .filter_map(|(cavity, values)| {
            let mean = stats::mean(&values)?;
            Some(CavitySummary {
                cavity,
                n: values.len(),
                mean,
                min: stats::min(&values)?,
                max: stats::max(&values)?,
                delta: mean - report.mean,
                out_of_limits: limits.is_out_of_tolerance(mean),
            })
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
