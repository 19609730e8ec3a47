//! Conformance summary over recorded inspection results.
//!
//! This is the recorded-outcome view: it counts what the inspector
//! wrote down (`OK`/`NG`), not where the readings fall against the
//! limits. The two usually agree, but the recorded result is the one
//! with traceability, so the KPI is computed from it. Rows with an
//! unrecognized or missing result count against conformance; only an
//! explicit pass counts as passed.

use serde::{Deserialize, Serialize};

use crate::record::MeasurementRecord;

/// Pass/fail tally over a set of measurement records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConformanceSummary {
    /// Rows considered.
    pub total: usize,
    /// Rows with an explicit pass result.
    pub passed: usize,
    /// Everything else, failed and unrecognized alike.
    pub failed: usize,
}

impl ConformanceSummary {
    /// Pass rate as a percentage in `[0, 100]`; `0.0` for an empty set.
    ///
    /// # Examples
    /// ```
    /// use metricap::conformance::summarize;
    /// use metricap::record::adapt_measurements;
    /// use serde_json::json;
    ///
    /// let rows = vec![
    ///     json!({ "result": "OK" }),
    ///     json!({ "result": "NG" }),
    ///     json!({ "result": "APROBADO" }),
    ///     json!({ "result": "OK" }),
    /// ];
    /// let summary = summarize(&adapt_measurements(&rows));
    /// assert_eq!(summary.passed, 3);
    /// assert_eq!(summary.failed, 1);
    /// assert_eq!(summary.pass_rate(), 75.0);
    /// ```
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.passed as f64 / self.total as f64 * 100.0
        }
    }
}

/// Tallies recorded results over a set of records.
pub fn summarize(records: &[MeasurementRecord]) -> ConformanceSummary {
    let total = records.len();
    let passed = records.iter().filter(|r| r.passed()).count();
    ConformanceSummary {
        total,
        passed,
        failed: total - passed,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
