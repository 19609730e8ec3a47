//! Canonical measurement and dimension records.
//!
//! The upstream store grew organically: the same logical field arrives
//! under English or Spanish names (`value`/`valor`, `cavity`/`cavidad`),
//! sometimes nested under the sampling header (`muestreo.lot`,
//! `muestreo.cavity`), sometimes as the first element of a `cavities`
//! array. Historically every consumer re-implemented its own fallback
//! chain, and they did not all agree.
//!
//! This module is the only place those conventions are known. Raw JSON
//! rows are adapted once into [`MeasurementRecord`] /
//! [`DimensionRecord`], and everything downstream works with canonical
//! field names and parsed types.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::sample;
use crate::tolerance::ToleranceSpec;

/// Unit reported when a dimension row does not carry one.
pub const DEFAULT_UNIT: &str = "mm";

/// Recorded pass/fail outcome of one inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InspectionResult {
    /// The part was accepted (`OK` / `APROBADO`).
    Pass,
    /// The part was rejected (`NG`).
    Fail,
}

impl InspectionResult {
    /// Parses the result strings the store is known to hold.
    ///
    /// Matching is case-insensitive on the trimmed input; anything
    /// unrecognized yields `None` and is later counted against
    /// conformance, never as a pass.
    ///
    /// # Examples
    /// ```
    /// use metricap::record::InspectionResult;
    /// assert_eq!(InspectionResult::parse("OK"), Some(InspectionResult::Pass));
    /// assert_eq!(InspectionResult::parse("aprobado"), Some(InspectionResult::Pass));
    /// assert_eq!(InspectionResult::parse("NG"), Some(InspectionResult::Fail));
    /// assert_eq!(InspectionResult::parse("pending"), None);
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "OK" | "APROBADO" => Some(InspectionResult::Pass),
            "NG" => Some(InspectionResult::Fail),
            _ => None,
        }
    }

    /// Whether this result is a pass.
    pub fn is_pass(&self) -> bool {
        matches!(self, InspectionResult::Pass)
    }
}

/// One measurement row in canonical shape.
///
/// Every field is optional because upstream rows really do arrive with
/// any subset missing; consumers decide what they require (the cavity
/// breakdown needs `cavity` + `value`, conformance only `result`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRecord {
    /// Row identifier (`medicion_id`).
    pub measurement_id: Option<String>,
    /// Numeric reading, already normalized and finite.
    pub value: Option<f64>,
    /// Mold cavity that produced the part.
    pub cavity: Option<u32>,
    /// Piece index within the cavity's sample.
    pub piece: Option<u32>,
    /// Dimension the reading belongs to.
    pub dimension_id: Option<String>,
    /// Product the reading belongs to.
    pub product_id: Option<String>,
    /// Production lot.
    pub lot: Option<String>,
    /// Unit of the reading.
    pub unit: Option<String>,
    /// Measuring equipment used.
    pub equipment: Option<String>,
    /// Recorded pass/fail outcome.
    pub result: Option<InspectionResult>,
    /// Capture timestamp, carried verbatim.
    pub timestamp: Option<String>,
}

impl MeasurementRecord {
    /// Adapts one raw upstream row onto the canonical shape.
    ///
    /// Fallback chains, resolved here and nowhere else:
    /// - value: `value` ?? `valor` (numbers or decimal-comma strings);
    /// - cavity: `cavity` ?? `cavidad` ?? `muestreo.cavity` ??
    ///   `cavities[0]`;
    /// - lot: `muestreo.lot` ?? `lot`;
    /// - result: see [`InspectionResult::parse`].
    ///
    /// A row that is not a JSON object adapts to an all-`None` record.
    ///
    /// # Examples
    /// ```
    /// use metricap::record::MeasurementRecord;
    /// use serde_json::json;
    ///
    /// let row = json!({
    ///     "medicion_id": "M-0042",
    ///     "valor": "10,02",
    ///     "cavidad": "3",
    ///     "muestreo": { "lot": "L-2408" },
    ///     "result": "OK",
    /// });
    /// let record = MeasurementRecord::from_json(&row);
    /// assert_eq!(record.value, Some(10.02));
    /// assert_eq!(record.cavity, Some(3));
    /// assert_eq!(record.lot.as_deref(), Some("L-2408"));
    /// ```
    pub fn from_json(raw: &Value) -> Self {
        let Some(map) = raw.as_object() else {
            tracing::trace!("measurement row is not an object, adapting to empty record");
            return Self::empty();
        };
        let muestreo = map.get("muestreo").and_then(Value::as_object);

        let value = sample::numeric_value(raw);
        if value.is_none() {
            tracing::trace!("measurement row carries no numeric reading");
        }

        let cavity = field(map, "cavity")
            .or_else(|| field(map, "cavidad"))
            .or_else(|| muestreo.and_then(|m| field(m, "cavity")))
            .or_else(|| {
                field(map, "cavities")
                    .and_then(Value::as_array)
                    .and_then(|c| c.first())
            })
            .and_then(index_number);

        let lot = muestreo
            .and_then(|m| field(m, "lot"))
            .and_then(scalar_string)
            .or_else(|| field(map, "lot").and_then(scalar_string));

        Self {
            measurement_id: field(map, "medicion_id").and_then(scalar_string),
            value,
            cavity,
            piece: field(map, "piece").and_then(index_number),
            dimension_id: field(map, "dimension_id").and_then(scalar_string),
            product_id: field(map, "product_id").and_then(scalar_string),
            lot,
            unit: field(map, "unit").and_then(scalar_string),
            equipment: field(map, "equipment").and_then(scalar_string),
            result: field(map, "result")
                .and_then(Value::as_str)
                .and_then(InspectionResult::parse),
            timestamp: field(map, "timestamp").and_then(scalar_string),
        }
    }

    fn empty() -> Self {
        Self {
            measurement_id: None,
            value: None,
            cavity: None,
            piece: None,
            dimension_id: None,
            product_id: None,
            lot: None,
            unit: None,
            equipment: None,
            result: None,
            timestamp: None,
        }
    }

    /// Whether the recorded outcome is an explicit pass.
    pub fn passed(&self) -> bool {
        self.result.is_some_and(|r| r.is_pass())
    }
}

/// Adapts a whole upstream response.
pub fn adapt_measurements(rows: &[Value]) -> Vec<MeasurementRecord> {
    rows.iter().map(MeasurementRecord::from_json).collect()
}

/// Extracts the finite readings from adapted records, in order.
///
/// The values are already normalized by the adapter, so this feeds
/// directly into [`crate::tolerance::ToleranceSpec::capability`].
pub fn readings(records: &[MeasurementRecord]) -> Vec<f64> {
    records.iter().filter_map(|r| r.value).collect()
}

/// One dimension-specification row in canonical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionRecord {
    /// Dimension identifier.
    pub dimension_id: String,
    /// Short drawing code.
    pub code: Option<String>,
    /// Human description (upstream `desc`).
    pub description: Option<String>,
    /// Target value.
    pub nominal: Option<f64>,
    /// Upper tolerance.
    pub tol_sup: Option<f64>,
    /// Lower tolerance.
    pub tol_inf: Option<f64>,
    /// Unit of measure.
    pub unit: Option<String>,
    /// Whether the dimension is marked critical.
    pub critical: bool,
}

impl DimensionRecord {
    /// Adapts one raw dimension row.
    ///
    /// Numeric fields accept numbers or decimal-comma strings. The
    /// `critical` flag follows the upstream convention: an explicit
    /// boolean, a nonzero number, or a non-empty string all mark the
    /// dimension critical.
    ///
    /// Returns `None` when the row has no `dimension_id`.
    pub fn from_json(raw: &Value) -> Option<Self> {
        let map = raw.as_object()?;
        let dimension_id = field(map, "dimension_id").and_then(scalar_string)?;
        Some(Self {
            dimension_id,
            code: field(map, "code").and_then(scalar_string),
            description: field(map, "desc").and_then(scalar_string),
            nominal: field(map, "nominal").and_then(sample::numeric_value),
            tol_sup: field(map, "tol_sup").and_then(sample::numeric_value),
            tol_inf: field(map, "tol_inf").and_then(sample::numeric_value),
            unit: field(map, "unit").and_then(scalar_string),
            critical: field(map, "critical").is_some_and(truthy),
        })
    }

    /// Unit of measure, defaulting to [`DEFAULT_UNIT`].
    pub fn unit_or_default(&self) -> &str {
        self.unit.as_deref().unwrap_or(DEFAULT_UNIT)
    }

    /// Builds the validated tolerance specification for this dimension.
    ///
    /// # Returns
    /// - `None` if any of nominal/tol_sup/tol_inf is missing; the
    ///   original system renders such a dimension without limits.
    pub fn tolerance(&self) -> Option<ToleranceSpec> {
        match (self.nominal, self.tol_sup, self.tol_inf) {
            // Adapter values are finite, so construction cannot fail.
            (Some(nominal), Some(sup), Some(inf)) => ToleranceSpec::new(nominal, sup, inf).ok(),
            _ => None,
        }
    }
}

/// Adapts a whole dimension catalog, skipping rows without an id.
pub fn adapt_dimensions(rows: &[Value]) -> Vec<DimensionRecord> {
    rows.iter().filter_map(DimensionRecord::from_json).collect()
}

// ---------------------------------------------------------------------------
// Field-level parsers
// ---------------------------------------------------------------------------

/// Field lookup with `??` semantics: an explicit null is as absent as
/// a missing key, so fallback chains keep going past it.
fn field<'a>(map: &'a serde_json::Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|v| !v.is_null())
}

/// String or number identifier, stringified; empty strings are absent.
fn scalar_string(v: &Value) -> Option<String> {
    match v {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Small non-negative index (cavity, piece), numeric or numeric string.
fn index_number(v: &Value) -> Option<u32> {
    match v {
        Value::Number(n) => match n.as_u64() {
            Some(u) => u32::try_from(u).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0 && *f <= f64::from(u32::MAX))
                .map(|f| f as u32),
        },
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    }
}

/// Upstream truthiness for flag columns.
fn truthy(v: &Value) -> bool {
    match v {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
