//! End-to-end engine + summary over a handful of samples.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::BTreeMap;

use hmpi_core::{compute, summarize, MetricsReport, ReferenceTables};

fn sample(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(m, c)| (m.to_string(), *c)).collect()
}

#[test]
fn per_sample_reports_fold_into_summary() {
    let tables = ReferenceTables::builtin();
    let samples = [
        sample(&[("Lead (Pb)", 0.001), ("Zinc (Zn)", 0.3)]),
        sample(&[("Mercury (Hg)", 0.0004), ("Arsenic (As)", 0.003)]),
        sample(&[
            ("Lead (Pb)", 0.015),
            ("Cadmium (Cd)", 0.004),
            ("Mercury (Hg)", 0.0012),
            ("Arsenic (As)", 0.012),
            ("Chromium (Cr)", 0.08),
        ]),
    ];

    let reports: Vec<MetricsReport> = samples.iter().map(|s| compute(&tables, s)).collect();
    let summary = summarize(&reports).expect("three reports");

    assert_eq!(summary.total_samples, 3);
    assert_eq!(summary.risk_distribution.get("Critical"), Some(&1));
    assert_eq!(summary.risk_distribution.values().sum::<usize>(), 3);

    let max = reports.iter().map(|r| r.hmpi).fold(f64::MIN, f64::max);
    let min = reports.iter().map(|r| r.hmpi).fold(f64::MAX, f64::min);
    assert_eq!(summary.max_hmpi, max);
    assert_eq!(summary.min_hmpi, min);
    assert!(summary.min_hmpi <= summary.average_hmpi && summary.average_hmpi <= summary.max_hmpi);
}

#[test]
fn reports_are_order_independent() {
    let tables = ReferenceTables::builtin();
    let a = sample(&[("Nickel (Ni)", 0.01), ("Iron (Fe)", 0.6)]);
    let b = sample(&[("Copper (Cu)", 2.5)]);

    let forward = summarize(&[compute(&tables, &a), compute(&tables, &b)]).unwrap();
    let reverse = summarize(&[compute(&tables, &b), compute(&tables, &a)]).unwrap();
    assert_eq!(forward.risk_distribution, reverse.risk_distribution);
    assert!((forward.average_hmpi - reverse.average_hmpi).abs() < 1e-12);
}
