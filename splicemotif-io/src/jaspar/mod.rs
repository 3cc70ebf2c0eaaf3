//! Parser implementation for count matrices in bracketed JASPAR format.
//!
//! Each record starts with a FASTA-like header holding exactly two
//! tab-separated fields, the matrix identifier and its name, followed by
//! one line per nucleotide storing the counts at each position between
//! square brackets:
//! ```text
//! >SS0001.1	DONOR
//! A  [  33  63  10   0   0  60  71   7  17 ]
//! C  [  36  11   3   0   1   3   7   5  15 ]
//! G  [  18  12  80 100   0  35  12  80  19 ]
//! T  [  13  14   7   0  99   2  10   8  49 ]
//! ```
//!
//! The four nucleotides must each appear exactly once, in any order, and
//! all the count lists must have the same length.

use std::io::BufRead;

use splicemotif::abc::Nucleotide;
use splicemotif::abc::Symbol;
use splicemotif::abc::K;
use splicemotif::dense::DenseMatrix;
use splicemotif::pwm::CountMatrix;
use splicemotif::pwm::ScoringMatrix;

use crate::error::Error;

mod parse;

// ---

/// A JASPAR record.
#[derive(Debug, Clone)]
pub struct Record {
    id: String,
    name: String,
    matrix: CountMatrix,
}

impl Record {
    /// Validate the parsed header and matrix lines of a record.
    fn from_parts(header: &str, columns: Vec<(Nucleotide, Vec<u32>)>) -> Result<Self, Error> {
        let fields = header.split('\t').map(str::trim).collect::<Vec<_>>();
        if fields.len() != 2 || fields.iter().any(|f| f.is_empty()) {
            return Err(Error::malformed(format!(
                "expected `>ID<TAB>Name` header, found {:?}",
                header
            )));
        }

        let width = columns.first().map(|(_, c)| c.len()).unwrap_or(0);
        if width == 0 {
            return Err(Error::malformed(format!("empty matrix in record {:?}", fields[0])));
        }
        let mut done = [false; 4];
        let mut data = DenseMatrix::<u32, K>::new(width);
        for (n, counts) in columns {
            if done[n.as_index()] {
                return Err(Error::malformed(format!("duplicate row for {}", n)));
            }
            if counts.len() != width {
                return Err(Error::malformed(format!(
                    "row {} has {} counts, expected {}",
                    n,
                    counts.len(),
                    width
                )));
            }
            for (i, x) in counts.into_iter().enumerate() {
                data[i][n.as_index()] = x;
            }
            done[n.as_index()] = true;
        }
        if let Some(n) = Nucleotide::ALL.iter().find(|n| !done[n.as_index()]) {
            return Err(Error::malformed(format!("missing row for {}", n)));
        }

        Ok(Self {
            id: fields[0].to_string(),
            name: fields[1].to_string(),
            matrix: CountMatrix::new(data),
        })
    }

    /// Get the identifier of the record.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the name of the record.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the count matrix of the record.
    pub fn matrix(&self) -> &CountMatrix {
        &self.matrix
    }

    /// Take the count matrix of the record.
    pub fn into_matrix(self) -> CountMatrix {
        self.matrix
    }

    /// Build the information content matrix of the record.
    ///
    /// Counts are normalized without pseudo-counts, so a position with
    /// a total count of zero is rejected.
    pub fn to_information_content(&self) -> Result<ScoringMatrix, Error> {
        let freqs = self.matrix.to_freq(0.0)?;
        Ok(freqs.to_information_content()?)
    }
}

impl AsRef<CountMatrix> for Record {
    fn as_ref(&self) -> &CountMatrix {
        &self.matrix
    }
}

// ---

/// An iterative reader for the JASPAR format.
///
/// The reader stops after the first error.
pub struct Reader<B: BufRead> {
    buffer: Vec<u8>,
    bufread: B,
    start: usize,
    failed: bool,
}

impl<B: BufRead> Reader<B> {
    pub fn new(mut reader: B) -> Self {
        let mut buffer = Vec::new();
        let (start, failed) = match reader.read_until(b'>', &mut buffer) {
            Ok(n) => (n.saturating_sub(1), false),
            Err(_) => (0, true),
        };
        Self {
            bufread: reader,
            buffer,
            start,
            failed,
        }
    }

    fn fail(&mut self, error: Error) -> Option<Result<Record, Error>> {
        self.failed = true;
        Some(Err(error))
    }
}

impl<B: BufRead> Iterator for Reader<B> {
    type Item = Result<Record, Error>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Err(e) = self.bufread.read_until(b'>', &mut self.buffer) {
            return self.fail(Error::from(e));
        }

        let text = match std::str::from_utf8(&self.buffer[self.start..]) {
            Ok(text) => text,
            Err(_) => return self.fail(Error::malformed("invalid UTF-8")),
        };
        if text.trim().is_empty() {
            return None;
        }
        if !text.starts_with('>') {
            return self.fail(Error::malformed("missing record header"));
        }

        let (rest, record) = match self::parse::record(text) {
            Ok(parsed) => parsed,
            Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => {
                let message = format!("invalid line {:?}", line_at(text, e.input));
                return self.fail(Error::malformed(message));
            }
            Err(nom::Err::Incomplete(_)) => {
                return self.fail(Error::malformed("unexpected end of input"));
            }
        };
        // a row that failed to parse stops the matrix early
        if !rest.is_empty() && !rest.starts_with('>') {
            let message = format!("invalid line {:?}", line_at(text, rest));
            return self.fail(Error::malformed(message));
        }
        self.start += text.len() - rest.len();
        if self.start > self.buffer.capacity() / 2 {
            let n = self.buffer.len();
            self.buffer.copy_within(self.start.., 0);
            self.buffer.truncate(n - self.start);
            self.start = 0;
        }

        match record {
            Ok(record) => Some(Ok(record)),
            Err(e) => self.fail(e),
        }
    }
}

/// Get the line of `text` where its suffix `rest` starts.
fn line_at<'a>(text: &'a str, rest: &str) -> &'a str {
    let offset = text.len() - rest.len();
    let start = text[..offset].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let end = text[offset..]
        .find('\n')
        .map(|i| offset + i)
        .unwrap_or(text.len());
    text[start..end].trim_end()
}

/// Read the records from a file in JASPAR format.
pub fn read<B: BufRead>(reader: B) -> self::Reader<B> {
    self::Reader::new(reader)
}
