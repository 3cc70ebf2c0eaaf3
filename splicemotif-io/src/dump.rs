//! Plain-text dumps of floating-point values.
//!
//! Values are written one per line with no header, using the shortest
//! representation that parses back to the same number.

use std::io::BufRead;
use std::io::Write;

use crate::error::Error;

/// Write values to a dump, one per line.
pub fn write<W: Write>(mut writer: W, values: &[f64]) -> Result<(), Error> {
    for value in values {
        writeln!(writer, "{}", value)?;
    }
    writer.flush()?;
    Ok(())
}

/// Read values from a dump, ignoring blank lines.
pub fn read<B: BufRead>(reader: B) -> Result<Vec<f64>, Error> {
    let mut values = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value = line.parse::<f64>().map_err(|_| {
            Error::malformed(format!("line {}: {:?} is not a number", i + 1, line))
        })?;
        values.push(value);
    }
    Ok(values)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_write() {
        let mut out = Vec::new();
        write(&mut out, &[1.0, -0.25, f64::NAN]).unwrap();
        assert_eq!(std::str::from_utf8(&out).unwrap(), "1\n-0.25\nNaN\n");
    }

    #[test]
    fn test_read_invalid() {
        let err = read(std::io::Cursor::new("1.0\nx\n")).unwrap_err();
        assert!(matches!(err, Error::Malformed(Some(_))));
    }
}
