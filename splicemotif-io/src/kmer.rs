//! Reader for tab-separated k-mer score tables.
//!
//! Each line holds a k-mer and its score, separated by a single tab:
//! ```text
//! # hexamer   score
//! AAAAAA	-0.25
//! AAAAAC	0.61
//! ```
//!
//! Blank lines and lines starting with `#` are ignored. The k-mer length
//! is taken from the first record; lines with the wrong number of fields,
//! a score that is not a number, or a k-mer of a different length are
//! skipped with a warning.

use std::io::BufRead;

use memchr::memchr;
use splicemotif::kmer::KmerMap;

use crate::error::Error;

/// Parse a single line into a k-mer and its score.
fn parse_line(line: &[u8]) -> Result<(&str, f64), String> {
    let i = memchr(b'\t', line).ok_or_else(|| String::from("missing tab separator"))?;
    let (kmer, score) = (&line[..i], &line[i + 1..]);
    if memchr(b'\t', score).is_some() {
        return Err(String::from("more than two fields"));
    }
    let kmer = std::str::from_utf8(kmer)
        .map_err(|_| String::from("k-mer is not valid UTF-8"))?
        .trim();
    if kmer.is_empty() {
        return Err(String::from("empty k-mer"));
    }
    let score = std::str::from_utf8(score)
        .ok()
        .and_then(|s| s.trim().parse::<f64>().ok())
        .ok_or_else(|| String::from("score is not a number"))?;
    Ok((kmer, score))
}

/// Read a k-mer score table.
pub fn read<B: BufRead>(mut reader: B) -> Result<KmerMap, Error> {
    let mut k = None;
    let mut entries = Vec::new();
    let mut line = Vec::new();
    let mut lineno = 0;

    loop {
        line.clear();
        if reader.read_until(b'\n', &mut line)? == 0 {
            break;
        }
        lineno += 1;

        let text = line.trim_ascii();
        if text.is_empty() || text[0] == b'#' {
            continue;
        }
        let (kmer, score) = match parse_line(text) {
            Ok(entry) => entry,
            Err(reason) => {
                log::warn!("skipping k-mer table line {}: {}", lineno, reason);
                continue;
            }
        };
        let width = *k.get_or_insert(kmer.len());
        if kmer.len() != width {
            log::warn!(
                "skipping k-mer table line {}: {:?} does not have length {}",
                lineno,
                kmer,
                width
            );
            continue;
        }
        entries.push((kmer.to_string(), score));
    }

    match k {
        Some(k) => Ok(KmerMap::new(k, entries)?),
        None => Err(Error::malformed("no k-mer records found")),
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line(b"ACGTAC\t1.5"), Ok(("ACGTAC", 1.5)));
        assert!(parse_line(b"ACGTAC 1.5").is_err());
        assert!(parse_line(b"ACGTAC\t1.5\t2").is_err());
        assert!(parse_line(b"ACGTAC\tabc").is_err());
        assert!(parse_line(b"\t1.0").is_err());
    }

    #[test]
    fn test_read_crlf() {
        let map = read(std::io::Cursor::new("AAA\t1.0\r\nAAC\t-0.5\r\n")).unwrap();
        assert_eq!(map.k(), 3);
        assert_eq!(map.get("AAC"), Some(-0.5));
    }

    #[test]
    fn test_read_empty() {
        let err = read(std::io::Cursor::new("# header only\n\n")).unwrap_err();
        assert!(matches!(err, Error::Malformed(Some(_))));
    }
}
