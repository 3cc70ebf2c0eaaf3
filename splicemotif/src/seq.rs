//! Encoding and length validation for nucleotide sequences.

use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FmtResult;
use std::ops::Index;
use std::str::FromStr;

use super::abc::Nucleotide;
use super::abc::Symbol;
use super::err::Error;
use super::motifs::SpliceSite;
use super::pwm::ScoringMatrix;

/// Encode a nucleotide sequence into an array of row indices.
///
/// The encoding is case-insensitive, with `A=0`, `C=1`, `G=2` and `T=3`.
///
/// # Example
/// ```
/// # use splicemotif::seq::encode;
/// assert_eq!(encode("acGT").unwrap(), vec![0, 1, 2, 3]);
/// assert!(encode("ACNT").is_err());
/// ```
pub fn encode(sequence: &str) -> Result<Vec<usize>, Error> {
    EncodedSequence::encode(sequence).map(|seq| seq.indices())
}

/// Get the splice site family of a sequence from its length.
///
/// Donor sequences span 9 nucleotides and acceptor sequences span 27
/// nucleotides, any other length is rejected.
pub fn classify_length(length: usize) -> Result<SpliceSite, Error> {
    match length {
        l if l == SpliceSite::Donor.len() => Ok(SpliceSite::Donor),
        l if l == SpliceSite::Acceptor.len() => Ok(SpliceSite::Acceptor),
        _ => Err(Error::InvalidSequenceLength {
            found: length,
            expected: vec![SpliceSite::Donor.len(), SpliceSite::Acceptor.len()],
        }),
    }
}

/// Check that a sequence length matches the width of a scoring matrix.
pub fn check_length(length: usize, matrix: &ScoringMatrix) -> Result<(), Error> {
    if length == matrix.len() {
        Ok(())
    } else {
        Err(Error::InvalidSequenceLength {
            found: length,
            expected: vec![matrix.len()],
        })
    }
}

/// Check that a reference and an alternate sequence have the same length.
pub fn validate_pair(reference: &str, alternate: &str) -> Result<(), Error> {
    if reference.len() == alternate.len() {
        Ok(())
    } else {
        Err(Error::InvalidSequenceLength {
            found: alternate.len(),
            expected: vec![reference.len()],
        })
    }
}

// --- EncodedSequence ---------------------------------------------------------

/// A nucleotide sequence encoded as a sequence of symbols.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EncodedSequence {
    data: Vec<Nucleotide>,
}

impl EncodedSequence {
    /// Create a new encoded sequence.
    pub fn new(data: Vec<Nucleotide>) -> Self {
        Self { data }
    }

    /// Create a new encoded sequence from a textual representation.
    pub fn encode(sequence: &str) -> Result<Self, Error> {
        sequence
            .chars()
            .map(Nucleotide::from_char)
            .collect::<Result<_, _>>()
            .map(Self::new)
            .map_err(|e| Error::InvalidNucleotide {
                sequence: sequence.to_string(),
                symbol: e.0,
            })
    }

    /// Return the number of symbols in the sequence.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check whether the sequence is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterate over the symbols in the sequence.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Nucleotide> {
        self.data.iter()
    }

    /// Get the row index of every symbol in the sequence.
    pub fn indices(&self) -> Vec<usize> {
        self.data.iter().map(Symbol::as_index).collect()
    }
}

impl AsRef<[Nucleotide]> for EncodedSequence {
    fn as_ref(&self) -> &[Nucleotide] {
        self.data.as_slice()
    }
}

impl Display for EncodedSequence {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        for c in self.data.iter() {
            write!(f, "{}", c.as_char())?;
        }
        Ok(())
    }
}

impl FromStr for EncodedSequence {
    type Err = Error;
    fn from_str(seq: &str) -> Result<Self, Self::Err> {
        Self::encode(seq)
    }
}

impl From<Vec<Nucleotide>> for EncodedSequence {
    fn from(data: Vec<Nucleotide>) -> Self {
        Self::new(data)
    }
}

impl Index<usize> for EncodedSequence {
    type Output = Nucleotide;
    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl<'a> IntoIterator for &'a EncodedSequence {
    type Item = &'a Nucleotide;
    type IntoIter = std::slice::Iter<'a, Nucleotide>;
    fn into_iter(self) -> Self::IntoIter {
        self.data.iter()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_encode_error_names_sequence() {
        match encode("AAGXTC") {
            Err(Error::InvalidNucleotide { sequence, symbol }) => {
                assert_eq!(sequence, "AAGXTC");
                assert_eq!(symbol, 'X');
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_display() {
        let seq = EncodedSequence::encode("aaggtcaga").unwrap();
        assert_eq!(seq.to_string(), "AAGGTCAGA");
        assert_eq!(seq[3], Nucleotide::G);
    }

    #[test]
    fn test_validate_pair() {
        assert!(validate_pair("AAG", "AAT").is_ok());
        assert_eq!(
            validate_pair("AAG", "AA"),
            Err(Error::InvalidSequenceLength {
                found: 2,
                expected: vec![3]
            })
        );
    }
}
