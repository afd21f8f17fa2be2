// File: crates/spark-core/src/dataset.rs
// Summary: Dataset normalization: JSON value/label parsing, gap repair, min/max, shift.

use serde_json::Value;
use tracing::warn;

/// Raw parsed series: optional values plus labels aligned by index.
/// The label vec may be shorter than the value vec.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub values: Vec<Option<f64>>,
    pub labels: Vec<Option<String>>,
}

impl Dataset {
    pub fn parse(values_attr: Option<&str>, labels_attr: Option<&str>) -> Self {
        let values = values_attr.map(parse_values).unwrap_or_default();
        let labels = labels_attr.map(parse_labels).unwrap_or_default();
        Self { values, labels }
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// One slot of a normalized series. `shifted` is the raw value moved up by
/// the series shift so layout math sees only non-negative magnitudes;
/// `raw` is kept for tooltips and labels.
#[derive(Clone, Debug, PartialEq)]
pub struct NormalizedPoint {
    pub index: usize,
    pub raw: Option<f64>,
    pub shifted: Option<f64>,
    pub label: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct NormalizedSeries {
    pub points: Vec<NormalizedPoint>,
    /// Amount added to every present value (|min| when min < 0, else 0).
    pub shift: f64,
    /// Max over shifted present values; -inf when the series has no data.
    pub max: f64,
}

impl NormalizedSeries {
    pub fn from_dataset(dataset: &Dataset) -> Self {
        let (min, _) = min_max(&dataset.values);
        let shift = if min < 0.0 { min.abs() } else { 0.0 };
        let points: Vec<NormalizedPoint> = dataset
            .values
            .iter()
            .enumerate()
            .map(|(index, raw)| NormalizedPoint {
                index,
                raw: *raw,
                shifted: raw.map(|v| v + shift),
                label: dataset.labels.get(index).cloned().flatten(),
            })
            .collect();
        let (_, max) = min_max_points(&points);
        Self { points, shift, max }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether any slot carries a value at all.
    pub fn has_data(&self) -> bool {
        self.points.iter().any(|p| p.raw.is_some())
    }

    /// Last present raw value, for the last-value label.
    pub fn last_value(&self) -> Option<f64> {
        self.points.iter().rev().find_map(|p| p.raw)
    }
}

/// Parse the value attribute as a JSON numeric array with explicit gaps.
/// Malformed input degrades to an empty series; it never panics or errors out.
pub fn parse_values(raw: &str) -> Vec<Option<f64>> {
    let repaired = repair_gaps(raw);
    let parsed: Value = match serde_json::from_str(&repaired) {
        Ok(v) => v,
        Err(err) => {
            warn!(%err, "value attribute is not valid JSON");
            return Vec::new();
        }
    };
    let Value::Array(items) = parsed else {
        warn!("value attribute is not an array");
        return Vec::new();
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Null => out.push(None),
            Value::Number(n) => match n.as_f64() {
                Some(v) => out.push(Some(v)),
                None => {
                    warn!("value attribute contains a non-finite number");
                    return Vec::new();
                }
            },
            other => {
                warn!(kind = json_kind(&other), "value attribute contains a non-numeric element");
                return Vec::new();
            }
        }
    }
    out
}

/// Parse the label attribute as a JSON string array. Nulls mean "no label";
/// any other non-string element rejects the whole list.
pub fn parse_labels(raw: &str) -> Vec<Option<String>> {
    let parsed: Value = match serde_json::from_str(raw) {
        Ok(v) => v,
        Err(err) => {
            warn!(%err, "label attribute is not valid JSON");
            return Vec::new();
        }
    };
    let Value::Array(items) = parsed else {
        warn!("label attribute is not an array");
        return Vec::new();
    };
    let mut out = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Null => out.push(None),
            Value::String(s) => out.push(Some(s)),
            other => {
                warn!(kind = json_kind(&other), "label attribute contains a non-string element");
                return Vec::new();
            }
        }
    }
    out
}

/// Repair bare-comma gap syntax before JSON parsing, so `[1,,3]`, `[,1,2]`
/// and `[1,2,]` read as explicit nulls. Only structural commas are touched;
/// the value payload carries no strings, so no quote tracking is needed.
pub fn repair_gaps(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 8);
    // Last significant (non-whitespace) char already emitted.
    let mut prev: Option<char> = None;
    for c in raw.chars() {
        if c == ',' && matches!(prev, Some('[') | Some(',')) {
            out.push_str("null");
        }
        if c == ']' && matches!(prev, Some(',')) {
            out.push_str("null");
        }
        out.push(c);
        if !c.is_whitespace() {
            prev = Some(c);
        }
    }
    out
}

/// Min/max over present values only. An all-missing series yields the
/// (+inf, -inf) sentinels, which downstream layout treats as "no data".
pub fn min_max(values: &[Option<f64>]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in values.iter().flatten() {
        min = min.min(*v);
        max = max.max(*v);
    }
    (min, max)
}

fn min_max_points(points: &[NormalizedPoint]) -> (f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for v in points.iter().filter_map(|p| p.shifted) {
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gap_repair_covers_bare_commas() {
        assert_eq!(repair_gaps("[1,,3]"), "[1,null,3]");
        assert_eq!(repair_gaps("[,1,2]"), "[null,1,2]");
        assert_eq!(repair_gaps("[1,2,]"), "[1,2,null]");
        assert_eq!(repair_gaps("[ 1 , , 3 ]"), "[ 1 , null, 3 ]");
    }
}
