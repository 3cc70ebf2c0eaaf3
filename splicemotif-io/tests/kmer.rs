use splicemotif::kmer::KmerScorer;
use splicemotif_io::error::Error;
use splicemotif_io::kmer;
use std::io::Cursor;

const HEXAMERS: &str = include_str!("hexamers.tsv");

#[test]
fn test_skips_bad_lines() {
    let map = kmer::read(Cursor::new(HEXAMERS)).unwrap();
    assert_eq!(map.k(), 6);
    assert_eq!(map.len(), 4);
    assert_eq!(map.get("AAAAAA"), Some(-0.25));
    assert_eq!(map.get("GAAGAA"), Some(2.75));
    assert_eq!(map.get("AAAAAT"), None);
    assert_eq!(map.get("AAAACA"), None);
    assert_eq!(map.get("AAAACC"), None);
}

#[test]
fn test_scorer() {
    let scorer = KmerScorer::new(kmer::read(Cursor::new(HEXAMERS)).unwrap());
    assert_eq!(scorer.padding(), 5);

    let score = scorer.score_sequence("AAAAAAC");
    assert!((score - 0.36).abs() < 1e-9);
    assert!(scorer.score_sequence("AAAAAAT").is_nan());
    assert_eq!(scorer.delta("AAAAAAC", "AAAAAAC"), 0.0);

    let scores = scorer.kmer_score_array("AAAAAGAAGAA").unwrap();
    assert_eq!(scores, vec![1.5, 0.0, 0.0, 0.0, 0.0, 2.75]);
}

#[test]
fn test_no_records() {
    let err = kmer::read(Cursor::new("# empty\nAAAAAA\n")).unwrap_err();
    assert!(matches!(err, Error::Malformed(_)));
}
