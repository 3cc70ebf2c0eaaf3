use std::fmt::Display;
use std::fmt::Formatter;
use std::sync::Arc;

use nom::error::Error as NomError;

#[derive(Clone, Debug)]
pub enum Error {
    /// The input does not follow the expected format.
    Malformed(Option<String>),
    Io(Arc<std::io::Error>),
    Nom(Arc<NomError<String>>),
    /// The input was parsed but describes an invalid motif.
    Motif(splicemotif::Error),
}

impl Error {
    pub(crate) fn malformed<S: Into<String>>(message: S) -> Self {
        Error::Malformed(Some(message.into()))
    }
}

impl From<splicemotif::Error> for Error {
    fn from(error: splicemotif::Error) -> Self {
        Error::Motif(error)
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        Error::Io(Arc::new(error))
    }
}

impl From<NomError<&'_ str>> for Error {
    fn from(error: NomError<&'_ str>) -> Self {
        Error::Nom(Arc::new(NomError::new(error.input.to_string(), error.code)))
    }
}

impl From<nom::Err<NomError<&'_ str>>> for Error {
    fn from(err: nom::Err<NomError<&'_ str>>) -> Self {
        match err {
            nom::Err::Incomplete(_) => Error::Malformed(Some("unexpected end of input".into())),
            nom::Err::Error(e) => Error::from(e),
            nom::Err::Failure(e) => Error::from(e),
        }
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Malformed(None) => f.write_str("malformed input"),
            Error::Malformed(Some(x)) => write!(f, "malformed input: {}", x),
            Error::Io(err) => err.fmt(f),
            Error::Nom(err) => err.fmt(f),
            Error::Motif(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Malformed(_) => None,
            Error::Io(e) => Some(e),
            Error::Nom(e) => Some(e),
            Error::Motif(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod test {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn test_motif_source() {
        let err = Error::from(splicemotif::Error::Interrupted);
        assert!(err.source().is_some());
        assert_eq!(err.to_string(), "null distribution build interrupted");
    }

    #[test]
    fn test_malformed_display() {
        assert_eq!(Error::Malformed(None).to_string(), "malformed input");
        assert_eq!(
            Error::malformed("bad header").to_string(),
            "malformed input: bad header"
        );
    }
}
