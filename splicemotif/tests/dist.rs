use std::sync::atomic::AtomicBool;
use std::sync::Arc;
use std::time::Duration;

use splicemotif::motifs;
use splicemotif::pwm::dist::BIN_COUNT;
use splicemotif::Error;
use splicemotif::Histogram;
use splicemotif::NullDistributionBuilder;
use splicemotif::SamplingMode;

macro_rules! assert_almost_eq {
    ($x:expr, $y:expr, $tol:expr) => {{
        let (x, y): (f64, f64) = ($x, $y);
        assert!((x - y).abs() <= $tol, "{} != {} (tolerance {})", x, y, $tol);
    }};
}

#[test]
fn exhaustive_donor() {
    let donor = motifs::donor();
    let dist = NullDistributionBuilder::new().seed(1).build(donor).unwrap();
    assert_eq!(dist.mode(), SamplingMode::Exhaustive);
    assert_eq!(dist.len(), 262_144);
    assert_eq!(dist.deltas().len(), 262_144);

    // every sequence is realized once, so the mean is the sum of column means
    let expected: f64 = donor
        .matrix()
        .iter()
        .map(|row| row.iter().sum::<f64>() / 4.0)
        .sum();
    assert_almost_eq!(dist.mean(), expected, 1e-6);

    let max = dist.values().iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    assert_almost_eq!(max, donor.max_score(), 1e-9);
}

#[test]
fn exhaustive_values_do_not_depend_on_seed() {
    let donor = motifs::donor();
    let d1 = NullDistributionBuilder::new().seed(1).build(donor).unwrap();
    let d2 = NullDistributionBuilder::new().seed(2).build(donor).unwrap();
    assert_eq!(d1.values(), d2.values());
    assert_ne!(d1.deltas(), d2.deltas());
}

#[test]
fn same_seed_same_deltas() {
    let builder = NullDistributionBuilder::new().samples(20_000).seed(42);
    let d1 = builder.build(motifs::acceptor()).unwrap();
    let d2 = builder.build(motifs::acceptor()).unwrap();
    assert_eq!(d1.seed(), 42);
    assert_eq!(d1.values(), d2.values());
    assert_eq!(d1.deltas(), d2.deltas());
}

#[test]
fn sampled_acceptor_size() {
    let builder = NullDistributionBuilder::new().samples(1_234).seed(3);
    assert_eq!(builder.mode_for(motifs::acceptor()), SamplingMode::Sampled);
    let dist = builder.build(motifs::acceptor()).unwrap();
    assert_eq!(dist.mode(), SamplingMode::Sampled);
    assert_eq!(dist.len(), 1_234);
    assert_eq!(dist.deltas().len(), 1_234);
}

#[test]
fn forced_sampling() {
    let builder = NullDistributionBuilder::new()
        .exhaustive_threshold(0)
        .samples(100)
        .seed(3);
    let dist = builder.build(motifs::donor()).unwrap();
    assert_eq!(dist.mode(), SamplingMode::Sampled);
    assert_eq!(dist.len(), 100);
}

#[test]
fn cancelled_build() {
    let flag = Arc::new(AtomicBool::new(true));
    let result = NullDistributionBuilder::new()
        .cancel_flag(flag)
        .build(motifs::donor());
    assert!(matches!(result, Err(Error::Interrupted)));
}

#[test]
fn expired_build() {
    let result = NullDistributionBuilder::new()
        .timeout(Duration::ZERO)
        .build(motifs::acceptor());
    assert!(matches!(result, Err(Error::Interrupted)));
}

#[test]
fn huge_timeout() {
    let dist = NullDistributionBuilder::new()
        .seed(1)
        .samples(10)
        .timeout(Duration::MAX)
        .build(motifs::acceptor())
        .unwrap();
    assert_eq!(dist.len(), 10);
}

#[test]
fn donor_histogram() {
    let dist = NullDistributionBuilder::new()
        .seed(42)
        .build(motifs::donor())
        .unwrap();
    let histogram = dist.histogram().unwrap();
    assert_eq!(histogram.counts().len(), BIN_COUNT);
    assert_eq!(histogram.total(), dist.len());
    assert_eq!(histogram.skipped(), 0);
    assert_almost_eq!(histogram.frequencies().iter().sum(), 1.0, 1e-9);
    assert_almost_eq!(histogram.upper(BIN_COUNT - 1), histogram.max(), 1e-9);
}

#[test]
fn disruptive_variant_is_rare() {
    let donor = motifs::donor();
    let dist = NullDistributionBuilder::new().seed(42).build(donor).unwrap();
    let delta = donor.delta("AAGGTCAGA", "AAGATCAGA").unwrap();
    assert!(dist.delta_pvalue(delta) < 0.05);
    assert_eq!(dist.delta_pvalue(f64::NEG_INFINITY), 1.0);
}

#[test]
fn constant_histogram() {
    assert_eq!(
        Histogram::new(&[1.5; 10]),
        Err(Error::DegenerateDistribution(1.5))
    );
}
