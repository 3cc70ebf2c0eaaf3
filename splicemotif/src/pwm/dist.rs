//! Null distributions of scores and single-nucleotide score changes.
//!
//! A [`NullDistribution`] characterizes a [`ScoringMatrix`] over the space of
//! all sequences of its length: for every sequence it records the individual
//! information `R` of the sequence, and the change `R - R'` caused by one
//! random single-nucleotide substitution. An observed variant can then be
//! compared to this background.
//!
//! Short motifs (the 9-nucleotide donor, with `4^9 = 262 144` sequences) are
//! enumerated exhaustively, longer ones (the 27-nucleotide acceptor) are
//! sampled uniformly.
//!
//! # Example
//! ```
//! # use splicemotif::pwm::dist::*;
//! let donor = splicemotif::motifs::donor();
//! let dist = NullDistributionBuilder::new()
//!     .seed(42)
//!     .build(donor)
//!     .unwrap();
//! assert_eq!(dist.mode(), SamplingMode::Exhaustive);
//! assert_eq!(dist.values().len(), 262_144);
//!
//! let histogram = dist.histogram().unwrap();
//! assert_eq!(histogram.counts().len(), BIN_COUNT);
//! ```

use std::sync::atomic::AtomicBool;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::Rng;
use rand::SeedableRng;
#[cfg(feature = "parallel")]
use rayon::iter::IntoParallelRefIterator;
#[cfg(feature = "parallel")]
use rayon::iter::ParallelIterator;

use crate::abc::Nucleotide;
use crate::err::Error;

use super::ScoringMatrix;

/// The number of bins of a [`Histogram`].
pub const BIN_COUNT: usize = 51;

/// The largest population enumerated exhaustively by default.
pub const DEFAULT_EXHAUSTIVE_THRESHOLD: u64 = 300_000;

/// The default number of sequences drawn in sampling mode.
pub const DEFAULT_SAMPLES: usize = 100_000;

/// The number of sequences processed by a single partition.
const PARTITION_SIZE: u64 = 16_384;

/// The number of sequences processed between two interruption checks.
const CHECK_INTERVAL: u64 = 1_024;

const SYMBOLS: usize = Nucleotide::ALL.len();

// --- SamplingMode ------------------------------------------------------------

/// The strategy used to cover the sequence space.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SamplingMode {
    /// Every sequence of the motif length was scored once.
    Exhaustive,
    /// A fixed number of sequences were drawn uniformly at random.
    Sampled,
}

// --- Partition ---------------------------------------------------------------

/// A contiguous chunk of work with its own random generator.
#[derive(Clone, Debug)]
struct Partition {
    index: u64,
    start: u64,
    count: u64,
}

impl Partition {
    fn split(total: u64) -> Vec<Self> {
        (0..total.div_ceil(PARTITION_SIZE))
            .map(|index| {
                let start = index * PARTITION_SIZE;
                Partition {
                    index,
                    start,
                    count: PARTITION_SIZE.min(total - start),
                }
            })
            .collect()
    }

    fn rng(&self, seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed ^ self.index.wrapping_mul(0x9E37_79B9_7F4A_7C15))
    }
}

/// Write the base-4 digits of `index` into `indices`, least significant first.
#[inline]
fn decode(mut index: u64, indices: &mut [usize]) {
    for x in indices.iter_mut() {
        *x = (index % SYMBOLS as u64) as usize;
        index /= SYMBOLS as u64;
    }
}

// --- Worker ------------------------------------------------------------------

struct Worker<'a> {
    matrix: &'a ScoringMatrix,
    mode: SamplingMode,
    population: Option<u64>,
    cancel: Option<&'a AtomicBool>,
    deadline: Option<Instant>,
}

impl Worker<'_> {
    fn check(&self) -> Result<(), Error> {
        let cancelled = self
            .cancel
            .map(|flag| flag.load(Ordering::Relaxed))
            .unwrap_or(false);
        let expired = self
            .deadline
            .map(|deadline| Instant::now() >= deadline)
            .unwrap_or(false);
        if cancelled || expired {
            Err(Error::Interrupted)
        } else {
            Ok(())
        }
    }

    fn run(&self, partition: &Partition, seed: u64) -> Result<(Vec<f64>, Vec<f64>), Error> {
        let width = self.matrix.len();
        let mut rng = partition.rng(seed);
        let mut indices = vec![0; width];
        let mut values = Vec::with_capacity(partition.count as usize);
        let mut deltas = Vec::with_capacity(partition.count as usize);

        for k in 0..partition.count {
            if k % CHECK_INTERVAL == 0 {
                self.check()?;
            }

            // select the original sequence
            match (self.mode, self.population) {
                (SamplingMode::Exhaustive, _) => decode(partition.start + k, &mut indices),
                (SamplingMode::Sampled, Some(n)) => decode(rng.gen_range(0..n), &mut indices),
                (SamplingMode::Sampled, None) => indices
                    .iter_mut()
                    .for_each(|x| *x = rng.gen_range(0..SYMBOLS)),
            }
            let score = self.matrix.score_unchecked(&indices);

            // substitute one random position with a different base
            let position = rng.gen_range(0..width);
            let original = indices[position];
            let mut base = rng.gen_range(0..SYMBOLS);
            while base == original {
                base = rng.gen_range(0..SYMBOLS);
            }
            indices[position] = base;
            let variant = self.matrix.score_unchecked(&indices);

            values.push(score);
            deltas.push(score - variant);
        }

        Ok((values, deltas))
    }
}

// --- NullDistributionBuilder -------------------------------------------------

/// A builder to configure the construction of a [`NullDistribution`].
///
/// Without an explicit seed, a fresh seed is drawn from the thread-local
/// generator, so the `deltas` of two builds will differ. The `values` of an
/// exhaustive build never depend on the seed.
#[derive(Debug, Clone)]
pub struct NullDistributionBuilder {
    exhaustive_threshold: u64,
    samples: usize,
    seed: Option<u64>,
    cancel: Option<Arc<AtomicBool>>,
    timeout: Option<Duration>,
}

impl Default for NullDistributionBuilder {
    fn default() -> Self {
        Self {
            exhaustive_threshold: DEFAULT_EXHAUSTIVE_THRESHOLD,
            samples: DEFAULT_SAMPLES,
            seed: None,
            cancel: None,
            timeout: None,
        }
    }
}

impl NullDistributionBuilder {
    /// Create a new builder with default parameters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the largest population size that is enumerated exhaustively.
    pub fn exhaustive_threshold(mut self, threshold: u64) -> Self {
        self.exhaustive_threshold = threshold;
        self
    }

    /// Set the number of sequences drawn in sampling mode.
    pub fn samples(mut self, samples: usize) -> Self {
        self.samples = samples;
        self
    }

    /// Set the seed of the random generators.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Draw the seed of the random generators from the given generator.
    pub fn with_rng<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.seed = Some(rng.gen());
        self
    }

    /// Use a flag to cancel the construction from another thread.
    pub fn cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Abort the construction if it takes longer than `timeout`.
    ///
    /// A timeout too large to be represented as a deadline never expires.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Get the sampling mode that will be used for the given matrix.
    pub fn mode_for(&self, matrix: &ScoringMatrix) -> SamplingMode {
        match population(matrix.len()) {
            Some(n) if n <= self.exhaustive_threshold => SamplingMode::Exhaustive,
            _ => SamplingMode::Sampled,
        }
    }

    /// Build the null distribution of the given matrix.
    pub fn build(&self, matrix: &ScoringMatrix) -> Result<NullDistribution, Error> {
        if matrix.is_empty() {
            return Err(Error::Validation(
                "cannot build a null distribution for an empty matrix".into(),
            ));
        }

        let seed = self.seed.unwrap_or_else(|| rand::thread_rng().gen());
        let mode = self.mode_for(matrix);
        let population = population(matrix.len());
        let total = match (mode, population) {
            (SamplingMode::Exhaustive, Some(n)) => n,
            _ => self.samples as u64,
        };
        log::debug!(
            "building {:?} null distribution of {} sequences over {} positions (seed={})",
            mode,
            total,
            matrix.len(),
            seed
        );

        let worker = Worker {
            matrix,
            mode,
            population,
            cancel: self.cancel.as_deref(),
            deadline: self.timeout.and_then(|t| Instant::now().checked_add(t)),
        };
        let partitions = Partition::split(total);

        #[cfg(feature = "parallel")]
        let results = partitions
            .par_iter()
            .map(|p| worker.run(p, seed))
            .collect::<Result<Vec<_>, Error>>()?;
        #[cfg(not(feature = "parallel"))]
        let results = partitions
            .iter()
            .map(|p| worker.run(p, seed))
            .collect::<Result<Vec<_>, Error>>()?;

        let mut values = Vec::with_capacity(total as usize);
        let mut deltas = Vec::with_capacity(total as usize);
        for (v, d) in results {
            values.extend(v);
            deltas.extend(d);
        }

        Ok(NullDistribution {
            mode,
            seed,
            values,
            deltas,
        })
    }
}

/// The number of sequences of the given length, if it fits in a `u64`.
fn population(width: usize) -> Option<u64> {
    u32::try_from(width)
        .ok()
        .and_then(|w| (SYMBOLS as u64).checked_pow(w))
}

// --- NullDistribution --------------------------------------------------------

/// The empirical distribution of scores over the sequences of a motif length.
#[derive(Debug, Clone)]
pub struct NullDistribution {
    mode: SamplingMode,
    seed: u64,
    values: Vec<f64>,
    deltas: Vec<f64>,
}

impl NullDistribution {
    /// The individual information of every realized sequence.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// The score change caused by a random substitution in every sequence.
    #[inline]
    pub fn deltas(&self) -> &[f64] {
        &self.deltas
    }

    /// The number of realized sequences.
    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check whether the distribution is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// The strategy used to realize the sequences.
    #[inline]
    pub fn mode(&self) -> SamplingMode {
        self.mode
    }

    /// The seed used to generate the substitutions (and samples).
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// The arithmetic mean of the realized scores.
    ///
    /// In exhaustive mode this is the exact mean over all sequences, in
    /// sampling mode it is only the mean of the sample.
    pub fn mean(&self) -> f64 {
        mean(&self.values)
    }

    /// The arithmetic mean of the realized score changes.
    pub fn mean_delta(&self) -> f64 {
        mean(&self.deltas)
    }

    /// The fraction of realized score changes at least as large as `delta`.
    pub fn delta_pvalue(&self, delta: f64) -> f64 {
        let n = self.deltas.iter().filter(|&&d| d >= delta).count();
        n as f64 / self.deltas.len() as f64
    }

    /// Bin the score changes into a histogram.
    pub fn histogram(&self) -> Result<Histogram, Error> {
        Histogram::new(&self.deltas)
    }
}

fn mean(x: &[f64]) -> f64 {
    x.iter().sum::<f64>() / x.len() as f64
}

impl ScoringMatrix {
    /// Build the null distribution of this matrix with default parameters.
    pub fn to_null_distribution(&self) -> Result<NullDistribution, Error> {
        NullDistributionBuilder::new().build(self)
    }
}

// --- Histogram ---------------------------------------------------------------

/// A histogram of [`BIN_COUNT`] equal-width bins spanning `[min, max]`.
///
/// A value `v` falls in bin `ceil((BIN_COUNT - 1) * (v - min) / (max - min))`,
/// so the first bin only ever holds the minimum and bin `i > 0` covers the
/// half-open interval `(upper(i - 1), upper(i)]`. Non-finite values are not
/// binned.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    min: f64,
    max: f64,
    counts: Vec<usize>,
    skipped: usize,
}

impl Histogram {
    /// Bin the given values.
    pub fn new(values: &[f64]) -> Result<Self, Error> {
        let (min, max) = values
            .iter()
            .filter(|x| x.is_finite())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        if min > max {
            return Err(Error::DegenerateDistribution(f64::NAN));
        }
        if min == max {
            return Err(Error::DegenerateDistribution(min));
        }

        let span = max - min;
        let mut counts = vec![0; BIN_COUNT];
        let mut skipped = 0;
        for &x in values {
            if x.is_finite() {
                let normalized = (x - min) / span;
                let bin = ((BIN_COUNT - 1) as f64 * normalized).ceil() as usize;
                counts[bin.min(BIN_COUNT - 1)] += 1;
            } else {
                skipped += 1;
            }
        }

        Ok(Self {
            min,
            max,
            counts,
            skipped,
        })
    }

    /// The smallest binned value.
    #[inline]
    pub fn min(&self) -> f64 {
        self.min
    }

    /// The largest binned value.
    #[inline]
    pub fn max(&self) -> f64 {
        self.max
    }

    /// The number of values in each bin.
    #[inline]
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    /// The number of binned values.
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// The number of non-finite values that were ignored.
    #[inline]
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// The width of a bin.
    pub fn bin_width(&self) -> f64 {
        (self.max - self.min) / (BIN_COUNT - 1) as f64
    }

    /// The inclusive upper bound of bin `i`.
    pub fn upper(&self, i: usize) -> f64 {
        self.min + i as f64 * self.bin_width()
    }

    /// The midpoint of bin `i`.
    ///
    /// The first bin is degenerate, its center is the minimum.
    pub fn bin_center(&self, i: usize) -> f64 {
        if i == 0 {
            self.min
        } else {
            self.upper(i) - self.bin_width() / 2.0
        }
    }

    /// The fraction of binned values in each bin.
    pub fn frequencies(&self) -> Vec<f64> {
        let total = self.total() as f64;
        self.counts.iter().map(|&c| c as f64 / total).collect()
    }
}
