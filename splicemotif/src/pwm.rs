//! Count, frequency and information-content matrices.

use super::abc::Nucleotide;
use super::abc::Symbol;
use super::abc::K;
use super::dense::DenseMatrix;
use super::err::Error;
use super::seq::check_length;
use super::seq::validate_pair;
use super::seq::EncodedSequence;

pub mod dist;

/// The default tolerance on column sums of a frequency matrix.
pub const DEFAULT_TOLERANCE: f64 = 0.01;

/// Transpose one row per base into a dense matrix with one row per position.
fn from_base_rows<T, R>(rows: &[R]) -> Result<DenseMatrix<T, K>, Error>
where
    T: Default + Copy,
    R: AsRef<[T]>,
{
    if rows.len() != Nucleotide::ALL.len() {
        return Err(Error::validation(format!(
            "expected {} rows, found {}",
            Nucleotide::ALL.len(),
            rows.len()
        )));
    }
    let width = rows[0].as_ref().len();
    let mut data = DenseMatrix::new(width);
    for (row, n) in rows.iter().zip(Nucleotide::ALL) {
        let row = row.as_ref();
        if row.len() != width {
            return Err(Error::validation(format!(
                "row {} has {} columns, expected {}",
                n,
                row.len(),
                width
            )));
        }
        for (i, &x) in row.iter().enumerate() {
            data[i][n.as_index()] = x;
        }
    }
    Ok(data)
}

// --- CountMatrix -------------------------------------------------------------

/// A matrix storing symbol occurences at each position.
#[derive(Clone, Debug, PartialEq)]
pub struct CountMatrix {
    /// The actual counts for each position of the motif.
    data: DenseMatrix<u32, K>,
}

impl CountMatrix {
    /// Create a new count matrix from the given data.
    pub fn new(data: DenseMatrix<u32, K>) -> Self {
        Self { data }
    }

    /// Create a new count matrix from one row of counts per base.
    ///
    /// Rows are expected in `A`, `C`, `G`, `T` order and must all have
    /// the same length.
    pub fn from_rows<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, Error> {
        from_base_rows(rows).map(Self::new)
    }

    /// Create a new count matrix from aligned sites of the same length.
    pub fn from_sequences<I>(sequences: I) -> Result<Self, Error>
    where
        I: IntoIterator,
        <I as IntoIterator>::Item: AsRef<str>,
    {
        let mut data: Option<DenseMatrix<u32, K>> = None;
        for seq in sequences {
            let seq = EncodedSequence::encode(seq.as_ref())?;
            let d = data.get_or_insert_with(|| DenseMatrix::new(seq.len()));
            if seq.len() != d.rows() {
                return Err(Error::InvalidSequenceLength {
                    found: seq.len(),
                    expected: vec![d.rows()],
                });
            }
            for (i, x) in seq.iter().enumerate() {
                d[i][x.as_index()] += 1;
            }
        }
        Ok(Self::new(data.unwrap_or_else(|| DenseMatrix::new(0))))
    }

    /// The length of the motif encoded in this count matrix.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.rows()
    }

    /// Check whether the count matrix is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.rows() == 0
    }

    /// The raw counts from the count matrix.
    #[inline]
    pub fn counts(&self) -> &DenseMatrix<u32, K> {
        &self.data
    }

    /// Build a frequency matrix from this count matrix using pseudo-counts.
    ///
    /// Every position is normalized by its total count. A position where
    /// the total (including pseudo-counts) is zero cannot be normalized
    /// and is rejected.
    pub fn to_freq(&self, pseudocount: f64) -> Result<ScoringMatrix, Error> {
        let mut probas = DenseMatrix::new(self.data.rows());
        for (i, (src, dst)) in self.data.iter().zip(probas.iter_mut()).enumerate() {
            for (x, y) in src.iter().zip(dst.iter_mut()) {
                *y = *x as f64 + pseudocount;
            }
            let total: f64 = dst.iter().sum();
            if total <= 0.0 {
                return Err(Error::validation(format!(
                    "column {} has a total count of zero",
                    i
                )));
            }
            for y in dst.iter_mut() {
                *y /= total;
            }
        }
        Ok(ScoringMatrix::new_unchecked(MatrixKind::Frequency, probas))
    }
}

impl AsRef<DenseMatrix<u32, K>> for CountMatrix {
    fn as_ref(&self) -> &DenseMatrix<u32, K> {
        &self.data
    }
}

// --- MatrixKind --------------------------------------------------------------

/// The semantics of the values stored in a [`ScoringMatrix`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatrixKind {
    /// Base frequencies, in `[0, 1]`, each column summing to one.
    Frequency,
    /// Information content in bits, `2 + log2(f)`, possibly negative.
    InformationContent,
    /// Sequence logo heights in bits, never negative.
    Height,
}

// --- ScoringMatrix -----------------------------------------------------------

/// A 4×L table of per-base, per-position values.
///
/// The matrix is addressed with `(base, column)` coordinates where the base
/// is the row index of a [`Nucleotide`] and the column a motif position.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoringMatrix {
    kind: MatrixKind,
    data: DenseMatrix<f64, K>,
}

impl ScoringMatrix {
    pub(crate) fn new_unchecked(kind: MatrixKind, data: DenseMatrix<f64, K>) -> Self {
        Self { kind, data }
    }

    /// Create a new frequency matrix from one row of frequencies per base.
    ///
    /// Rows are expected in `A`, `C`, `G`, `T` order. Every column must
    /// sum to one, give or take `tolerance`.
    ///
    /// # Example
    /// ```
    /// # use splicemotif::pwm::*;
    /// let rows = [
    ///     [0.25, 0.70],
    ///     [0.25, 0.10],
    ///     [0.25, 0.10],
    ///     [0.25, 0.10],
    /// ];
    /// let freqs = ScoringMatrix::from_frequencies(&rows, DEFAULT_TOLERANCE).unwrap();
    /// assert_eq!(freqs.len(), 2);
    /// assert_eq!(freqs.kind(), MatrixKind::Frequency);
    /// ```
    pub fn from_frequencies<R: AsRef<[f64]>>(rows: &[R], tolerance: f64) -> Result<Self, Error> {
        let data = from_base_rows(rows)?;
        for (i, column) in data.iter().enumerate() {
            if let Some(x) = column.iter().find(|x| !(**x >= 0.0)) {
                return Err(Error::validation(format!(
                    "column {} contains an invalid frequency: {}",
                    i, x
                )));
            }
            let sum: f64 = column.iter().sum();
            if (sum - 1.0).abs() > tolerance {
                return Err(Error::validation(format!(
                    "column {} sums to {}, expected 1 \u{b1} {}",
                    i, sum, tolerance
                )));
            }
        }
        Ok(Self::new_unchecked(MatrixKind::Frequency, data))
    }

    /// Create a new frequency matrix from one row of counts per base.
    pub fn from_counts<R: AsRef<[u32]>>(rows: &[R]) -> Result<Self, Error> {
        CountMatrix::from_rows(rows)?.to_freq(0.0)
    }

    /// The semantics of the values stored in the matrix.
    #[inline]
    pub fn kind(&self) -> MatrixKind {
        self.kind
    }

    /// The length of the motif encoded in this matrix.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.rows()
    }

    /// Check whether the matrix has no columns.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.rows() == 0
    }

    /// The raw values, with one row per motif position.
    #[inline]
    pub fn matrix(&self) -> &DenseMatrix<f64, K> {
        &self.data
    }

    fn expect_frequencies(&self) -> Result<(), Error> {
        match self.kind {
            MatrixKind::Frequency => Ok(()),
            other => Err(Error::validation(format!(
                "expected a frequency matrix, found {:?}",
                other
            ))),
        }
    }

    /// Apply a frequency transform without checking the matrix kind.
    pub(crate) fn transform(&self, kind: MatrixKind) -> Self {
        let mut data = self.data.clone();
        for row in data.iter_mut() {
            match kind {
                MatrixKind::Frequency => (),
                MatrixKind::InformationContent => {
                    for x in row.iter_mut() {
                        *x = 2.0 + x.log2();
                    }
                }
                MatrixKind::Height => {
                    let entropy = -row
                        .iter()
                        .filter(|&&f| f > 0.0)
                        .map(|&f| f * f.log2())
                        .sum::<f64>();
                    let conservation = 2.0 - entropy;
                    for x in row.iter_mut() {
                        *x *= conservation;
                    }
                }
            }
        }
        Self::new_unchecked(kind, data)
    }

    /// Compute the information content matrix of this frequency matrix.
    ///
    /// Each cell is transformed independently with `IC(f) = 2 + log2(f)`.
    /// No correction for finite sample sizes is applied, and bases rarer
    /// than the uniform background keep their negative score.
    pub fn to_information_content(&self) -> Result<Self, Error> {
        self.expect_frequencies()?;
        Ok(self.transform(MatrixKind::InformationContent))
    }

    /// Compute the sequence logo heights of this frequency matrix.
    ///
    /// Each column is scaled by its conservation `R = 2 - H`, where `H` is
    /// the Shannon entropy of the column, so that the heights of a column
    /// sum to `R`.
    pub fn to_height_matrix(&self) -> Result<Self, Error> {
        self.expect_frequencies()?;
        Ok(self.transform(MatrixKind::Height))
    }

    fn check_column(&self, column: usize) -> Result<(), Error> {
        if column < self.len() {
            Ok(())
        } else {
            Err(Error::IndexOutOfRange {
                index: column,
                bound: self.len(),
            })
        }
    }

    /// Get the value of a base at a motif position.
    pub fn get(&self, base: usize, column: usize) -> Result<f64, Error> {
        self.check_column(column)?;
        self.data
            .get(column, base)
            .copied()
            .ok_or(Error::IndexOutOfRange {
                index: base,
                bound: Nucleotide::ALL.len(),
            })
    }

    /// Set the value of a base at a motif position.
    pub fn put(&mut self, base: usize, column: usize, value: f64) -> Result<(), Error> {
        self.check_column(column)?;
        let cell = self
            .data
            .get_mut(column, base)
            .ok_or(Error::IndexOutOfRange {
                index: base,
                bound: Nucleotide::ALL.len(),
            })?;
        *cell = value;
        Ok(())
    }

    /// Score indices already known to be valid for this matrix.
    #[inline]
    pub(crate) fn score_unchecked(&self, indices: &[usize]) -> f64 {
        indices
            .iter()
            .enumerate()
            .map(|(i, &b)| self.data[i][b])
            .sum()
    }

    /// Compute the individual information of an encoded sequence.
    ///
    /// The score is the sum of the matrix values of the base found at each
    /// position, given as row indices.
    pub fn score(&self, indices: &[usize]) -> Result<f64, Error> {
        if indices.len() != self.len() {
            return Err(Error::validation(format!(
                "expected {} indices, found {}",
                self.len(),
                indices.len()
            )));
        }
        indices
            .iter()
            .enumerate()
            .map(|(i, &b)| self.get(b, i))
            .sum()
    }

    /// Compute the individual information of an encoded sequence.
    pub fn score_encoded(&self, sequence: &EncodedSequence) -> Result<f64, Error> {
        check_length(sequence.len(), self)?;
        Ok(self.score_unchecked(&sequence.indices()))
    }

    /// Compute the individual information of a nucleotide sequence.
    ///
    /// # Example
    /// ```
    /// let donor = splicemotif::motifs::donor();
    /// let canonical = donor.score_sequence("CAGGTAAGT").unwrap();
    /// let broken = donor.score_sequence("CAGCTAAGT").unwrap();
    /// assert!(canonical > broken);
    /// ```
    pub fn score_sequence(&self, sequence: &str) -> Result<f64, Error> {
        let encoded = EncodedSequence::encode(sequence)?;
        self.score_encoded(&encoded)
    }

    /// Compute the score difference between a reference and an alternate
    /// sequence.
    ///
    /// A positive value means the alternate sequence matches the motif
    /// worse than the reference.
    pub fn delta(&self, reference: &str, alternate: &str) -> Result<f64, Error> {
        validate_pair(reference, alternate)?;
        Ok(self.score_sequence(reference)? - self.score_sequence(alternate)?)
    }

    /// Get the four base values of a column, by decreasing value.
    ///
    /// Ties keep the `A`, `C`, `G`, `T` order. Consumers of this method
    /// (logo rendering, for instance) expect non-negative values, so a
    /// column holding a negative or `NaN` value is rejected: call it on a height
    /// matrix rather than on an information content matrix.
    pub fn ic_values_column(&self, column: usize) -> Result<[(Nucleotide, f64); 4], Error> {
        self.check_column(column)?;
        let row = &self.data[column];
        let mut values = [
            (Nucleotide::A, row[0]),
            (Nucleotide::C, row[1]),
            (Nucleotide::G, row[2]),
            (Nucleotide::T, row[3]),
        ];
        if let Some((n, x)) = values.iter().find(|(_, x)| !(*x >= 0.0)) {
            return Err(Error::validation(format!(
                "negative value {} for base {} at column {}",
                x, n, column
            )));
        }
        values.sort_by(|a, b| b.1.total_cmp(&a.1));
        Ok(values)
    }

    /// The highest score reachable by a sequence.
    pub fn max_score(&self) -> f64 {
        self.data
            .iter()
            .map(|row| row.iter().cloned().fold(f64::NEG_INFINITY, f64::max))
            .sum()
    }

    /// The lowest score reachable by a sequence.
    pub fn min_score(&self) -> f64 {
        self.data
            .iter()
            .map(|row| row.iter().cloned().fold(f64::INFINITY, f64::min))
            .sum()
    }
}

impl AsRef<ScoringMatrix> for ScoringMatrix {
    fn as_ref(&self) -> &Self {
        self
    }
}

impl AsRef<DenseMatrix<f64, K>> for ScoringMatrix {
    fn as_ref(&self) -> &DenseMatrix<f64, K> {
        &self.data
    }
}
