#![doc = include_str!("../README.md")]

extern crate generic_array;
extern crate typenum;

pub mod abc;
pub mod dense;
pub mod err;
pub mod kmer;
pub mod motifs;
pub mod pwm;
pub mod seq;

pub use abc::Nucleotide;
pub use abc::Symbol;
pub use dense::DenseMatrix;
pub use err::Error;
pub use err::InvalidSymbol;
pub use kmer::KmerMap;
pub use kmer::KmerScorer;
pub use motifs::SpliceSite;
pub use pwm::dist::Histogram;
pub use pwm::dist::NullDistribution;
pub use pwm::dist::NullDistributionBuilder;
pub use pwm::dist::SamplingMode;
pub use pwm::CountMatrix;
pub use pwm::MatrixKind;
pub use pwm::ScoringMatrix;
pub use seq::EncodedSequence;
