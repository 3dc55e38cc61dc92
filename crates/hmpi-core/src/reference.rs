//! Reference tables: permissible limits, unit weights and risk bands.
//!
//! Tables are built once at startup and shared read-only. The built-in set
//! follows WHO/BIS drinking water limits; deployments may replace it through
//! config, in which case [`ReferenceTables::new`] validates the replacement.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{HmpiError, Result};

const UNKNOWN_CATEGORY: &str = "Unknown";
const UNKNOWN_COLOR: &str = "#6b7280";
const UNKNOWN_DESCRIPTION: &str = "Unable to determine risk level";
const UNDESCRIBED_BAND: &str = "Unknown risk level";

/// (metal, standard limit in mg/L, unit weight)
const BUILTIN_METALS: [(&str, f64, f64); 11] = [
    ("Lead (Pb)", 0.01, 0.15),
    ("Cadmium (Cd)", 0.003, 0.20),
    ("Mercury (Hg)", 0.001, 0.25),
    ("Arsenic (As)", 0.01, 0.18),
    ("Chromium (Cr)", 0.05, 0.12),
    ("Nickel (Ni)", 0.02, 0.10),
    ("Zinc (Zn)", 3.0, 0.05),
    ("Copper (Cu)", 2.0, 0.08),
    ("Iron (Fe)", 0.3, 0.03),
    ("Manganese (Mn)", 0.1, 0.04),
    ("Aluminum (Al)", 0.2, 0.02),
];

/// (name, min, max, color, description)
const BUILTIN_BANDS: [(&str, f64, Option<f64>, &str, &str); 5] = [
    ("Safe", 0.0, Some(25.0), "#22c55e", "Water quality is excellent and safe for consumption"),
    ("Moderate", 25.0, Some(50.0), "#eab308", "Water quality is good with minor concerns"),
    ("Risky", 50.0, Some(75.0), "#f97316", "Water quality requires attention and monitoring"),
    ("High Risk", 75.0, Some(100.0), "#ef4444", "Water quality is poor and needs immediate treatment"),
    ("Critical", 100.0, None, "#dc2626", "Water quality is extremely poor and poses serious health risks"),
];

/// One HMPI range `[min, max)`. `max: None` is unbounded above.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RiskBand {
    pub name: String,
    pub min: f64,
    #[serde(default)]
    pub max: Option<f64>,
    pub color: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl RiskBand {
    pub fn contains(&self, hmpi: f64) -> bool {
        hmpi >= self.min && self.max.map_or(true, |max| hmpi < max)
    }

    fn description(&self) -> &str {
        if let Some(d) = &self.description {
            return d;
        }
        BUILTIN_BANDS
            .iter()
            .find(|(name, ..)| *name == self.name)
            .map(|(.., d)| *d)
            .unwrap_or(UNDESCRIBED_BAND)
    }
}

/// Risk classification attached to a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskClassification {
    pub category: String,
    pub color: String,
    pub description: String,
}

impl RiskClassification {
    /// Fallback when no band covers the value.
    pub fn unknown() -> Self {
        Self {
            category: UNKNOWN_CATEGORY.into(),
            color: UNKNOWN_COLOR.into(),
            description: UNKNOWN_DESCRIPTION.into(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.category == UNKNOWN_CATEGORY
    }
}

/// Process-wide lookup tables for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTables {
    standard_limits: BTreeMap<String, f64>,
    unit_weights: BTreeMap<String, f64>,
    bands: Vec<RiskBand>,
}

impl Default for ReferenceTables {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ReferenceTables {
    pub fn builtin() -> Self {
        let standard_limits = BUILTIN_METALS
            .iter()
            .map(|(m, limit, _)| (m.to_string(), *limit))
            .collect();
        let unit_weights = BUILTIN_METALS
            .iter()
            .map(|(m, _, weight)| (m.to_string(), *weight))
            .collect();
        let bands = BUILTIN_BANDS
            .iter()
            .map(|(name, min, max, color, description)| RiskBand {
                name: name.to_string(),
                min: *min,
                max: *max,
                color: color.to_string(),
                description: Some(description.to_string()),
            })
            .collect();
        Self { standard_limits, unit_weights, bands }
    }

    /// Build validated tables from deploy-time values.
    pub fn new(
        standard_limits: BTreeMap<String, f64>,
        unit_weights: BTreeMap<String, f64>,
        bands: Vec<RiskBand>,
    ) -> Result<Self> {
        let tables = Self { standard_limits, unit_weights, bands };
        tables.validate()?;
        Ok(tables)
    }

    pub fn validate(&self) -> Result<()> {
        if self.standard_limits.is_empty() {
            return Err(HmpiError::InvalidReference("standard_limits must not be empty".into()));
        }
        if let Some(m) = self.standard_limits.keys().find(|m| !self.unit_weights.contains_key(*m)) {
            return Err(HmpiError::InvalidReference(format!("{m} has a standard limit but no unit weight")));
        }
        if let Some(m) = self.unit_weights.keys().find(|m| !self.standard_limits.contains_key(*m)) {
            return Err(HmpiError::InvalidReference(format!("{m} has a unit weight but no standard limit")));
        }
        for (m, limit) in &self.standard_limits {
            if !limit.is_finite() || *limit <= 0.0 {
                return Err(HmpiError::InvalidReference(format!("standard limit of {m} must be > 0")));
            }
        }
        for (m, weight) in &self.unit_weights {
            if !weight.is_finite() || *weight <= 0.0 {
                return Err(HmpiError::InvalidReference(format!("unit weight of {m} must be > 0")));
            }
        }

        if self.bands.is_empty() {
            return Err(HmpiError::InvalidReference("risk_bands must not be empty".into()));
        }
        for b in &self.bands {
            if b.name.trim().is_empty() {
                return Err(HmpiError::InvalidReference("risk band name must not be empty".into()));
            }
            if !b.min.is_finite() || b.max.is_some_and(|max| !max.is_finite() || max <= b.min) {
                return Err(HmpiError::InvalidReference(format!(
                    "risk band {} must satisfy min < max",
                    b.name
                )));
            }
        }
        if self.bands[0].min > 0.0 {
            tracing::warn!(min = self.bands[0].min, "risk bands leave a gap above 0");
        }
        for pair in self.bands.windows(2) {
            let (lo, hi) = (&pair[0], &pair[1]);
            let Some(lo_max) = lo.max else {
                return Err(HmpiError::InvalidReference(format!(
                    "unbounded risk band {} must be last",
                    lo.name
                )));
            };
            if hi.min < lo_max {
                return Err(HmpiError::InvalidReference(format!(
                    "risk bands {} and {} overlap or are out of order",
                    lo.name, hi.name
                )));
            }
            if hi.min > lo_max {
                tracing::warn!(from = lo_max, to = hi.min, "risk bands leave a gap");
            }
        }
        if self.bands.last().and_then(|b| b.max).is_some() {
            tracing::warn!("last risk band is bounded; values above it classify as Unknown");
        }
        Ok(())
    }

    pub fn standard_limit(&self, metal: &str) -> Option<f64> {
        self.standard_limits.get(metal).copied()
    }

    pub fn unit_weight(&self, metal: &str) -> Option<f64> {
        self.unit_weights.get(metal).copied()
    }

    pub fn is_known(&self, metal: &str) -> bool {
        self.standard_limits.contains_key(metal)
    }

    pub fn metals(&self) -> impl Iterator<Item = &str> {
        self.standard_limits.keys().map(String::as_str)
    }

    pub fn bands(&self) -> &[RiskBand] {
        &self.bands
    }

    /// First band whose `[min, max)` holds `hmpi`, or the Unknown fallback.
    pub fn classify(&self, hmpi: f64) -> RiskClassification {
        match self.bands.iter().find(|b| b.contains(hmpi)) {
            Some(b) => RiskClassification {
                category: b.name.clone(),
                color: b.color.clone(),
                description: b.description().to_string(),
            },
            None => RiskClassification::unknown(),
        }
    }

    /// Borrowed view in the `/standards` response shape.
    pub fn view(&self) -> StandardsView<'_> {
        StandardsView {
            standard_limits: &self.standard_limits,
            unit_weights: &self.unit_weights,
            risk_categories: RiskCategories(&self.bands),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StandardsView<'a> {
    pub standard_limits: &'a BTreeMap<String, f64>,
    pub unit_weights: &'a BTreeMap<String, f64>,
    pub risk_categories: RiskCategories<'a>,
}

/// Serializes bands as an ordered `name -> {min, max, color}` map.
#[derive(Debug)]
pub struct RiskCategories<'a>(&'a [RiskBand]);

#[derive(Serialize)]
struct BandLimits<'a> {
    min: f64,
    max: Option<f64>,
    color: &'a str,
}

impl Serialize for RiskCategories<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|b| {
            (
                b.name.as_str(),
                BandLimits { min: b.min, max: b.max, color: &b.color },
            )
        }))
    }
}
