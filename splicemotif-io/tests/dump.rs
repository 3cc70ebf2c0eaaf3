use splicemotif::motifs;
use splicemotif::pwm::dist::NullDistributionBuilder;
use splicemotif_io::dump;
use std::io::Cursor;

#[test]
fn test_null_distribution_dump() {
    let dist = NullDistributionBuilder::new()
        .samples(500)
        .seed(7)
        .build(motifs::acceptor())
        .unwrap();

    let mut buffer = Vec::new();
    dump::write(&mut buffer, dist.deltas()).unwrap();
    let text = String::from_utf8(buffer).unwrap();
    assert_eq!(text.lines().count(), 500);

    let values = dump::read(Cursor::new(text)).unwrap();
    assert_eq!(values.as_slice(), dist.deltas());
}

#[test]
fn test_read_skips_blank_lines() {
    let values = dump::read(Cursor::new("0.5\n\n-1.25\n")).unwrap();
    assert_eq!(values, vec![0.5, -1.25]);
}
