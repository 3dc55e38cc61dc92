//! Batch statistics over already-computed reports.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::engine::MetricsReport;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_samples: usize,
    pub average_hmpi: f64,
    pub min_hmpi: f64,
    pub max_hmpi: f64,
    /// Population standard deviation.
    pub std_hmpi: f64,
    pub risk_distribution: BTreeMap<String, usize>,
}

/// Fold reports into batch statistics. `None` when there are no reports.
pub fn summarize<'a, I>(reports: I) -> Option<BatchSummary>
where
    I: IntoIterator<Item = &'a MetricsReport>,
{
    // Welford: running mean and sum of squared deviations.
    let mut count = 0usize;
    let mut mean = 0.0;
    let mut m2 = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut risk_distribution = BTreeMap::new();

    for r in reports {
        count += 1;
        let delta = r.hmpi - mean;
        mean += delta / count as f64;
        m2 += delta * (r.hmpi - mean);
        min = min.min(r.hmpi);
        max = max.max(r.hmpi);
        *risk_distribution
            .entry(r.risk_category.category.clone())
            .or_insert(0) += 1;
    }

    if count == 0 {
        return None;
    }

    let variance = (m2 / count as f64).max(0.0);

    Some(BatchSummary {
        total_samples: count,
        average_hmpi: mean,
        min_hmpi: min,
        max_hmpi: max,
        std_hmpi: variance.sqrt(),
        risk_distribution,
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::reference::ReferenceTables;

    fn report_with_hmpi(tables: &ReferenceTables, hmpi: f64) -> MetricsReport {
        MetricsReport {
            hmpi,
            hazard_quotients: BTreeMap::new(),
            hazard_index: 0.0,
            risk_category: tables.classify(hmpi),
            metal_contributions: BTreeMap::new(),
            quality_ratios: BTreeMap::new(),
        }
    }

    #[test]
    fn five_sample_batch() {
        let t = ReferenceTables::builtin();
        let reports: Vec<_> = [10.0, 20.0, 30.0, 40.0, 50.0]
            .into_iter()
            .map(|h| report_with_hmpi(&t, h))
            .collect();

        let s = summarize(&reports).unwrap();
        assert_eq!(s.total_samples, 5);
        assert!((s.average_hmpi - 30.0).abs() < 1e-12);
        assert_eq!(s.min_hmpi, 10.0);
        assert_eq!(s.max_hmpi, 50.0);
        assert!((s.std_hmpi - 200f64.sqrt()).abs() < 1e-9);
        assert_eq!(s.risk_distribution.values().sum::<usize>(), 5);
        assert_eq!(s.risk_distribution["Safe"], 2);
        assert_eq!(s.risk_distribution["Moderate"], 2);
        assert_eq!(s.risk_distribution["Risky"], 1);
    }

    #[test]
    fn single_sample_has_zero_spread() {
        let t = ReferenceTables::builtin();
        let reports = vec![report_with_hmpi(&t, 80.0)];
        let s = summarize(&reports).unwrap();
        assert_eq!(s.average_hmpi, 80.0);
        assert_eq!(s.std_hmpi, 0.0);
        assert_eq!(s.risk_distribution["High Risk"], 1);
    }

    #[test]
    fn spread_survives_large_close_values() {
        let t = ReferenceTables::builtin();
        let base = 1.0e9;
        let reports: Vec<_> = [base + 4.0, base + 7.0, base + 13.0, base + 16.0]
            .into_iter()
            .map(|h| report_with_hmpi(&t, h))
            .collect();

        let s = summarize(&reports).unwrap();
        assert!((s.average_hmpi - (base + 10.0)).abs() < 1e-6);
        assert!((s.std_hmpi - 22.5f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn empty_batch_has_no_summary() {
        let reports: Vec<MetricsReport> = Vec::new();
        assert!(summarize(&reports).is_none());
    }
}
