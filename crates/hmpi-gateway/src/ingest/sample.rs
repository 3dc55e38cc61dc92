//! Per-value validation into a concentration mapping.
//!
//! Bad values never fail a request on their own: each one is skipped and
//! recorded, and the caller decides what an empty result means.

use std::collections::BTreeMap;

use hmpi_core::error::HmpiError;
use serde_json::Value;

/// Cell markers read as missing data, compared case-insensitively.
const MISSING_MARKERS: &[&str] = &[
    "nan", "-nan", "na", "n/a", "#n/a", "#na", "#n/a n/a", "<na>", "null", "none",
    "1.#ind", "-1.#ind", "1.#qnan", "-1.#qnan",
];

fn is_missing(raw: &str) -> bool {
    raw.is_empty() || MISSING_MARKERS.iter().any(|m| raw.eq_ignore_ascii_case(m))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    NotNumeric,
    Negative,
    NonFinite,
}

impl SkipReason {
    pub fn as_str(self) -> &'static str {
        match self {
            SkipReason::NotNumeric => "not_numeric",
            SkipReason::Negative => "negative",
            SkipReason::NonFinite => "non_finite",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SkippedValue {
    pub metal: String,
    pub raw: String,
    pub reason: SkipReason,
}

impl SkippedValue {
    pub fn to_error(&self) -> HmpiError {
        HmpiError::MalformedValue(format!(
            "{}={} ({})",
            self.metal,
            self.raw,
            self.reason.as_str()
        ))
    }
}

/// Concentrations that passed validation plus what was dropped.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Sample {
    pub concentrations: BTreeMap<String, f64>,
    pub skipped: Vec<SkippedValue>,
}

impl Sample {
    pub fn is_empty(&self) -> bool {
        self.concentrations.is_empty()
    }

    pub fn push_number(&mut self, metal: &str, v: f64) {
        let reason = if !v.is_finite() {
            SkipReason::NonFinite
        } else if v < 0.0 {
            SkipReason::Negative
        } else {
            self.concentrations.insert(metal.to_string(), v);
            return;
        };
        self.skip(metal, v.to_string(), reason);
    }

    /// JSON numbers and numeric strings; bools, nulls, containers and
    /// strings that do not parse are skipped.
    pub fn push_json(&mut self, metal: &str, v: &Value) {
        let parsed = match v {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        match parsed {
            Some(n) => self.push_number(metal, n),
            None => self.skip(metal, v.to_string(), SkipReason::NotNumeric),
        }
    }

    /// Tabular cell. Empty cells are missing data, not malformed values.
    pub fn push_cell(&mut self, metal: &str, raw: &str) {
        let raw = raw.trim();
        if is_missing(raw) {
            return;
        }
        match raw.parse::<f64>() {
            Ok(n) => self.push_number(metal, n),
            Err(_) => self.skip(metal, raw.to_string(), SkipReason::NotNumeric),
        }
    }

    fn skip(&mut self, metal: &str, raw: String, reason: SkipReason) {
        let skipped = SkippedValue { metal: metal.to_string(), raw, reason };
        tracing::debug!(error = %skipped.to_error(), "concentration skipped");
        self.skipped.push(skipped);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_values_are_filtered() {
        let mut s = Sample::default();
        s.push_json("Lead (Pb)", &json!(0.02));
        s.push_json("Zinc (Zn)", &json!(1));
        s.push_json("Iron (Fe)", &json!(" 0.3 "));
        s.push_json("Copper (Cu)", &json!(-0.5));
        s.push_json("Nickel (Ni)", &json!(null));
        s.push_json("Arsenic (As)", &json!("high"));
        s.push_json("Cadmium (Cd)", &json!("-0.1"));

        assert_eq!(s.concentrations.len(), 3);
        assert_eq!(s.concentrations["Zinc (Zn)"], 1.0);
        assert_eq!(s.concentrations["Iron (Fe)"], 0.3);
        let reasons: Vec<_> = s.skipped.iter().map(|k| k.reason).collect();
        assert_eq!(
            reasons,
            vec![
                SkipReason::Negative,
                SkipReason::NotNumeric,
                SkipReason::NotNumeric,
                SkipReason::Negative,
            ]
        );
    }

    #[test]
    fn cells_treat_blank_and_nan_as_missing() {
        let mut s = Sample::default();
        s.push_cell("Lead (Pb)", "  ");
        s.push_cell("Lead (Pb)", "NaN");
        s.push_cell("Mercury (Hg)", " 0.0007 ");
        s.push_cell("Arsenic (As)", "abc");
        s.push_cell("Cadmium (Cd)", "inf");

        assert_eq!(s.concentrations.len(), 1);
        assert_eq!(s.concentrations["Mercury (Hg)"], 0.0007);
        assert_eq!(s.skipped.len(), 2);
        assert_eq!(s.skipped[1].reason, SkipReason::NonFinite);
        assert_eq!(s.skipped[0].to_error().client_code().as_str(), "MALFORMED_VALUE");
    }

    #[test]
    fn spreadsheet_missing_markers_are_not_skips() {
        let mut s = Sample::default();
        for raw in ["n/a", "N/A", "NA", "null", "NULL", "None", "#N/A", "<NA>", "-nan"] {
            s.push_cell("Lead (Pb)", raw);
        }
        assert!(s.is_empty());
        assert!(s.skipped.is_empty());
    }

    #[test]
    fn zero_is_a_valid_concentration() {
        let mut s = Sample::default();
        s.push_number("Lead (Pb)", 0.0);
        assert!(!s.is_empty());
        assert!(s.skipped.is_empty());
    }
}
