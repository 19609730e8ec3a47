//! Raw measurement normalization.
//!
//! Measurement exports are messy: hand-held gauges and spreadsheet
//! backends deliver readings as numbers, as strings with a decimal
//! comma (`"12,5"`), or wrapped in records that name the field `value`
//! or `valor` depending on the capture form's locale. This module is
//! the single place that mess is resolved; everything downstream works
//! on plain finite `f64` samples.
//!
//! Unparsable entries are *excluded*, never errors: a reading that
//! cannot be interpreted is routine dirt in the data, and dropping it
//! (with a debug log) is the correct handling. Contrast with the
//! specification inputs in [`crate::tolerance`], which fail fast.

use serde_json::Value;

/// Parses a numeric string, accepting a decimal comma.
///
/// Normalization: trim surrounding whitespace, replace the first comma
/// with a dot, parse as `f64`. Only finite results are accepted.
///
/// # Returns
/// - `None` for empty/blank strings, non-numeric text, and values that
///   parse to NaN or ±Inf.
///
/// # Examples
/// ```
/// use metricap::sample::parse_decimal;
/// assert_eq!(parse_decimal("12,5"), Some(12.5));
/// assert_eq!(parse_decimal(" 10.02 "), Some(10.02));
/// assert_eq!(parse_decimal(""), None);
/// assert_eq!(parse_decimal("n/a"), None);
/// ```
pub fn parse_decimal(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let normalized = trimmed.replacen(',', ".", 1);
    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Extracts a finite numeric reading from one raw element.
///
/// Accepts bare numbers, numeric strings (via [`parse_decimal`]), and
/// records carrying the reading under `value` or `valor` (one level
/// deep). `value` wins when both are present, but an explicit null
/// `value` falls through to `valor`, the way the upstream rows use the
/// two fields. Booleans, nulls, arrays, and nested records yield
/// nothing.
///
/// # Examples
/// ```
/// use metricap::sample::numeric_value;
/// use serde_json::json;
///
/// assert_eq!(numeric_value(&json!(10.01)), Some(10.01));
/// assert_eq!(numeric_value(&json!("9,99")), Some(9.99));
/// assert_eq!(numeric_value(&json!({ "valor": "10,02" })), Some(10.02));
/// assert_eq!(numeric_value(&json!(null)), None);
/// ```
pub fn numeric_value(raw: &Value) -> Option<f64> {
    match raw {
        Value::Object(map) => map
            .get("value")
            .filter(|v| !v.is_null())
            .or_else(|| map.get("valor"))
            .and_then(scalar_numeric),
        other => scalar_numeric(other),
    }
}

fn scalar_numeric(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        Value::String(s) => parse_decimal(s),
        _ => None,
    }
}

/// Cleans a raw collection down to the finite numeric sample.
///
/// Order preserving; every element goes through [`numeric_value`] and
/// failures are dropped. The dropped count is logged at debug level so
/// noisy upstream data is visible without failing anything.
///
/// # Examples
/// ```
/// use metricap::sample::clean;
/// use serde_json::json;
///
/// let raw = vec![json!(10.1), json!("abc"), json!(null), json!(9.9)];
/// assert_eq!(clean(&raw), vec![10.1, 9.9]);
/// ```
pub fn clean(raw: &[Value]) -> Vec<f64> {
    let data: Vec<f64> = raw.iter().filter_map(numeric_value).collect();
    let dropped = raw.len() - data.len();
    if dropped > 0 {
        tracing::debug!(dropped, retained = data.len(), "excluded unparsable measurement values");
    }
    data
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
