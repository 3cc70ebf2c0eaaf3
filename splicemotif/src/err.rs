//! Error types raised by the scoring engine.

use std::fmt::Display;
use std::fmt::Formatter;

/// The given character is not a valid symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidSymbol(pub char);

impl Display for InvalidSymbol {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid symbol: {:?}", self.0)
    }
}

impl std::error::Error for InvalidSymbol {}

/// An error raised while building or querying a scoring matrix.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Invalid data was passed to initialize or query a matrix.
    Validation(String),
    /// A sequence contains a character outside of `ACGTacgt`.
    InvalidNucleotide { sequence: String, symbol: char },
    /// A sequence does not have any of the admissible lengths.
    InvalidSequenceLength { found: usize, expected: Vec<usize> },
    /// An index is outside of the valid `0..bound` range.
    IndexOutOfRange { index: usize, bound: usize },
    /// All the values of a distribution are identical.
    DegenerateDistribution(f64),
    /// A null distribution build was cancelled or timed out.
    Interrupted,
}

impl Error {
    pub(crate) fn validation<S: Into<String>>(message: S) -> Self {
        Error::Validation(message.into())
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Validation(message) => write!(f, "invalid data: {}", message),
            Error::InvalidNucleotide { sequence, symbol } => {
                write!(f, "invalid nucleotide {:?} in sequence {:?}", symbol, sequence)
            }
            Error::InvalidSequenceLength { found, expected } => {
                let expected = expected
                    .iter()
                    .map(|x| x.to_string())
                    .collect::<Vec<_>>()
                    .join(" or ");
                write!(
                    f,
                    "invalid sequence length: found {}, expected {}",
                    found, expected
                )
            }
            Error::IndexOutOfRange { index, bound } => {
                write!(f, "index {} out of range 0..{}", index, bound)
            }
            Error::DegenerateDistribution(value) => {
                write!(f, "degenerate distribution: all values equal {}", value)
            }
            Error::Interrupted => f.write_str("null distribution build interrupted"),
        }
    }
}

impl std::error::Error for Error {}

/// A specialized `Result` type for the scoring engine.
pub type Result<T> = std::result::Result<T, Error>;
