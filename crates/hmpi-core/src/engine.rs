//! HMPI engine: concentrations in, metrics report out.
//!
//! Pure and synchronous. Metals missing from the reference tables are
//! skipped, never reported as errors. Callers validate that concentrations
//! are finite and non-negative before handing them over.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::reference::{ReferenceTables, RiskClassification};

/// Per-metal figures under `hazard_quotients`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardEntry {
    pub concentration: f64,
    pub standard_limit: f64,
    pub quality_index: f64,
    pub hazard_quotient: f64,
    pub unit_weight: f64,
}

/// Weighted quality index of one metal and its share of the total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub contribution: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatioStatus {
    Safe,
    Exceeded,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityRatio {
    pub ratio: f64,
    pub status: RatioStatus,
}

/// Result of one sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    pub hmpi: f64,
    pub hazard_quotients: BTreeMap<String, HazardEntry>,
    pub hazard_index: f64,
    pub risk_category: RiskClassification,
    pub metal_contributions: BTreeMap<String, Contribution>,
    pub quality_ratios: BTreeMap<String, QualityRatio>,
}

/// Compute the report for one sample. Keys are unique, so every metal is
/// counted once in the totals and once in the per-metal maps.
pub fn compute(tables: &ReferenceTables, concentrations: &BTreeMap<String, f64>) -> MetricsReport {
    let mut hazard_quotients = BTreeMap::new();
    let mut metal_contributions = BTreeMap::new();
    let mut quality_ratios = BTreeMap::new();

    let mut total_weighted_qi = 0.0;
    let mut total_weight = 0.0;
    let mut hazard_index = 0.0;

    for (metal, &c) in concentrations {
        let (Some(limit), Some(weight)) = (tables.standard_limit(metal), tables.unit_weight(metal))
        else {
            tracing::trace!(%metal, "metal not in reference tables, skipped");
            continue;
        };

        let hq = c / limit;
        let qi = hq * 100.0;
        let weighted_qi = weight * qi;

        total_weighted_qi += weighted_qi;
        total_weight += weight;
        hazard_index += hq;

        hazard_quotients.insert(
            metal.clone(),
            HazardEntry {
                concentration: c,
                standard_limit: limit,
                quality_index: qi,
                hazard_quotient: hq,
                unit_weight: weight,
            },
        );
        metal_contributions.insert(
            metal.clone(),
            Contribution { contribution: weighted_qi, percentage: 0.0 },
        );
        quality_ratios.insert(
            metal.clone(),
            QualityRatio {
                ratio: hq,
                status: if c <= limit { RatioStatus::Safe } else { RatioStatus::Exceeded },
            },
        );
    }

    // Both guards only trip for an empty included set or all-zero input.
    let hmpi = if total_weight > 0.0 { total_weighted_qi / total_weight } else { 0.0 };
    if total_weighted_qi > 0.0 {
        for c in metal_contributions.values_mut() {
            c.percentage = c.contribution / total_weighted_qi * 100.0;
        }
    }

    MetricsReport {
        hmpi,
        hazard_quotients,
        hazard_index,
        risk_category: tables.classify(hmpi),
        metal_contributions,
        quality_ratios,
    }
}
