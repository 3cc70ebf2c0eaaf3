use splicemotif::motifs;
use splicemotif_io::error::Error;
use splicemotif_io::jaspar;
use std::io::Cursor;

const SS: &str = include_str!("SS.jaspar");

fn first(text: &str) -> Result<jaspar::Record, Error> {
    jaspar::read(Cursor::new(text)).next().unwrap()
}

#[test]
fn test_read_all() {
    let records = jaspar::read(Cursor::new(SS))
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id(), "SS0001.1");
    assert_eq!(records[0].name(), "DONOR");
    assert_eq!(records[0].matrix().len(), 9);
    assert_eq!(records[1].id(), "SS0002.1");
    assert_eq!(records[1].name(), "BRANCH");
    assert_eq!(records[1].matrix().len(), 5);
}

#[test]
fn test_information_content() {
    let record = first(SS).unwrap();
    let matrix = record.to_information_content().unwrap();
    assert_eq!(matrix.len(), 9);

    // the consensus should score close to the built-in donor motif
    let parsed = matrix.score_sequence("CAGGTAAGT").unwrap();
    let builtin = motifs::donor().score_sequence("CAGGTAAGT").unwrap();
    assert!((parsed - builtin).abs() < 1.0);
    assert!(matrix.delta("CAGGTAAGT", "CAGCTAAGT").unwrap() > 0.0);
}

#[test]
fn test_zero_column() {
    let text = concat!(
        ">SS0003.1\tEMPTY\n",
        "A [ 1 0 ]\n",
        "C [ 1 0 ]\n",
        "G [ 1 0 ]\n",
        "T [ 1 0 ]\n",
    );
    let record = first(text).unwrap();
    assert!(matches!(
        record.to_information_content(),
        Err(Error::Motif(splicemotif::Error::Validation(_)))
    ));
}

#[test]
fn test_bad_header() {
    let rows = "A [ 1 ]\nC [ 1 ]\nG [ 1 ]\nT [ 1 ]\n";
    for header in [">SS0001.1 DONOR\n", ">SS0001.1\tDONOR\textra\n", ">\tDONOR\n"] {
        let text = format!("{}{}", header, rows);
        assert!(
            matches!(first(&text), Err(Error::Malformed(_))),
            "header {:?} accepted",
            header
        );
    }
}

fn assert_malformed_line(text: &str, line: &str) {
    match first(text) {
        Err(Error::Malformed(Some(message))) => {
            assert!(message.contains(line), "{:?} does not name {:?}", message, line)
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_missing_brackets() {
    let text = ">SS0001.1\tDONOR\nA 1 2\nC [ 1 2 ]\nG [ 1 2 ]\nT [ 1 2 ]\n";
    assert_malformed_line(text, "A 1 2");
    let text = ">SS0001.1\tDONOR\nA [ 1 2 ]\nC [ 1 2 ]\nG [ 1 2\nT [ 1 2 ]\n";
    assert_malformed_line(text, "G [ 1 2");
}

#[test]
fn test_non_integer_counts() {
    let text = ">SS0001.1\tDONOR\nA [ 1 2.5 ]\nC [ 1 2 ]\nG [ 1 2 ]\nT [ 1 2 ]\n";
    assert_malformed_line(text, "A [ 1 2.5 ]");
    let text = ">SS0001.1\tDONOR\nA [ 1 2 ]\nC [ 1 2.5 ]\nG [ 1 2 ]\nT [ 1 2 ]\n";
    assert_malformed_line(text, "C [ 1 2.5 ]");
}

#[test]
fn test_invalid_row_in_second_record() {
    let bad = SS.replace("C  [  40  10   5   5  30 ]", "C  [  40  10   5   x  30 ]");
    let mut reader = jaspar::read(Cursor::new(bad));
    assert_eq!(reader.next().unwrap().unwrap().id(), "SS0001.1");
    assert!(matches!(reader.next(), Some(Err(Error::Malformed(_)))));
    assert!(reader.next().is_none());
}

#[test]
fn test_duplicate_base() {
    let text = ">SS0001.1\tDONOR\nA [ 1 2 ]\nC [ 1 2 ]\nA [ 1 2 ]\nT [ 1 2 ]\n";
    assert!(matches!(first(text), Err(Error::Malformed(_))));
}

#[test]
fn test_missing_base() {
    let text = ">SS0001.1\tDONOR\nA [ 1 2 ]\nC [ 1 2 ]\nG [ 1 2 ]\n";
    assert!(matches!(first(text), Err(Error::Malformed(_))));
}

#[test]
fn test_unequal_lengths() {
    let text = ">SS0001.1\tDONOR\nA [ 1 2 ]\nC [ 1 2 ]\nG [ 1 2 3 ]\nT [ 1 2 ]\n";
    assert!(matches!(first(text), Err(Error::Malformed(_))));
}
