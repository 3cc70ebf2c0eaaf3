//! Sliding-window scoring with k-mer tables.
//!
//! Exonic splicing enhancers and silencers are commonly summarized as a
//! table giving a regulatory score to every hexamer or heptamer. A sequence
//! is scored by summing the scores of all its overlapping windows, and a
//! variant by the difference between the reference and alternate scores.

use std::collections::HashMap;

use super::err::Error;

/// The window length of hexamer tables.
pub const HEXAMER: usize = 6;

/// The window length of heptamer tables.
pub const HEPTAMER: usize = 7;

// --- KmerMap -----------------------------------------------------------------

/// A table of scores for k-mers of a fixed length.
#[derive(Clone, Debug, PartialEq)]
pub struct KmerMap {
    k: usize,
    scores: HashMap<String, f64>,
}

impl KmerMap {
    /// Create a new k-mer table from `(kmer, score)` entries.
    ///
    /// Keys are upper-cased, and must all be exactly `k` characters long.
    pub fn new<I, S>(k: usize, entries: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        if k == 0 {
            return Err(Error::Validation("k-mer length must be positive".into()));
        }
        let mut scores = HashMap::new();
        for (kmer, score) in entries {
            let kmer = kmer.as_ref();
            if kmer.len() != k {
                return Err(Error::Validation(format!(
                    "k-mer {:?} does not have length {}",
                    kmer, k
                )));
            }
            scores.insert(kmer.to_ascii_uppercase(), score);
        }
        Ok(Self { k, scores })
    }

    /// The length of the k-mers of the table.
    #[inline]
    pub fn k(&self) -> usize {
        self.k
    }

    /// The number of k-mers in the table.
    #[inline]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// Check whether the table is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Get the score of a k-mer, if it is in the table.
    ///
    /// The lookup is case-sensitive, keys are stored upper-cased.
    #[inline]
    pub fn get(&self, kmer: &str) -> Option<f64> {
        self.scores.get(kmer).copied()
    }

    fn window(&self, window: &[u8]) -> Option<f64> {
        std::str::from_utf8(window).ok().and_then(|w| self.get(w))
    }
}

// --- KmerScorer --------------------------------------------------------------

/// A scorer summing k-mer scores over all the windows of a sequence.
///
/// The scorer handles missing k-mers with two different policies: a missing
/// window makes [`KmerScorer::score_sequence`] return `NaN`, whereas it
/// counts as `0.0` in [`KmerScorer::kmer_score_array`]. The two methods are
/// not interchangeable.
#[derive(Clone, Debug)]
pub struct KmerScorer {
    map: KmerMap,
    padding: usize,
}

impl KmerScorer {
    /// Create a new scorer from a k-mer table.
    pub fn new(map: KmerMap) -> Self {
        let padding = map.k() - 1;
        Self { map, padding }
    }

    /// The k-mer table of the scorer.
    #[inline]
    pub fn map(&self) -> &KmerMap {
        &self.map
    }

    /// The number of flanking bases a window needs around a variant.
    #[inline]
    pub fn padding(&self) -> usize {
        self.padding
    }

    /// The length of the sequences expected by [`KmerScorer::kmer_score_array`].
    #[inline]
    pub fn window_length(&self) -> usize {
        self.map.k() + self.padding
    }

    /// Compute the total score of all the k-mers of a sequence.
    ///
    /// Returns `NaN` if the sequence is shorter than `k`, or if any of its
    /// windows is missing from the table.
    pub fn score_sequence(&self, sequence: &str) -> f64 {
        let k = self.map.k();
        if sequence.len() < k {
            return f64::NAN;
        }
        sequence
            .to_ascii_uppercase()
            .as_bytes()
            .windows(k)
            .map(|w| self.map.window(w).unwrap_or(f64::NAN))
            .sum()
    }

    /// Compute the score difference between a reference and an alternate
    /// sequence.
    ///
    /// A positive value means the alternate allele lowers the score.
    pub fn delta(&self, reference: &str, alternate: &str) -> f64 {
        self.score_sequence(reference) - self.score_sequence(alternate)
    }

    /// Get the score of each of the `k` windows of a sequence of length
    /// `k + padding`.
    ///
    /// Windows missing from the table score `0.0`.
    pub fn kmer_score_array(&self, sequence: &str) -> Result<Vec<f64>, Error> {
        if sequence.len() != self.window_length() {
            return Err(Error::InvalidSequenceLength {
                found: sequence.len(),
                expected: vec![self.window_length()],
            });
        }
        Ok(sequence
            .to_ascii_uppercase()
            .as_bytes()
            .windows(self.map.k())
            .map(|w| self.map.window(w).unwrap_or(0.0))
            .collect())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn scorer() -> KmerScorer {
        let map = KmerMap::new(3, [("aaa", 1.0), ("AAC", 0.5), ("ACG", -2.0)]).unwrap();
        KmerScorer::new(map)
    }

    #[test]
    fn test_kmer_map_new() {
        assert!(KmerMap::new(0, Vec::<(&str, f64)>::new()).is_err());
        assert!(KmerMap::new(3, [("AAAA", 1.0)]).is_err());
        let map = KmerMap::new(3, [("acg", 1.0)]).unwrap();
        assert_eq!(map.get("ACG"), Some(1.0));
        assert_eq!(map.get("acg"), None);
    }

    #[test]
    fn test_score_sequence() {
        let scorer = scorer();
        assert_eq!(scorer.score_sequence("AAACG"), 1.0 + 0.5 - 2.0);
        assert_eq!(scorer.score_sequence("aaacg"), 1.0 + 0.5 - 2.0);
        assert!(scorer.score_sequence("AAACGT").is_nan());
        assert!(scorer.score_sequence("AA").is_nan());
    }

    #[test]
    fn test_kmer_score_array() {
        let scorer = scorer();
        assert_eq!(scorer.padding(), 2);
        assert_eq!(scorer.kmer_score_array("AAACG").unwrap(), vec![1.0, 0.5, -2.0]);
        assert_eq!(scorer.kmer_score_array("AACGT").unwrap(), vec![0.5, -2.0, 0.0]);
        assert!(scorer.kmer_score_array("AACG").is_err());
    }

    #[test]
    fn test_delta() {
        let scorer = scorer();
        assert_eq!(scorer.delta("AAAC", "AAAC"), 0.0);
        assert_eq!(scorer.delta("AAAA", "AAAC"), 0.5);
    }
}
