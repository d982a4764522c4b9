use thiserror::Error;

/// Errors raised while framing or validating a sentence.
/// The GSV decoder itself never fails, see [crate::gsv::decode].
#[derive(Debug, Error)]
pub enum Error {
    #[error("missing start delimiter ('$' or '!')")]
    MissingStartDelimiter,

    #[error("missing checksum delimiter")]
    MissingChecksum,

    #[error("invalid checksum field \"{0}\"")]
    ChecksumFormat(String),

    #[error("checksum mismatch: expected {expected:02X}, found {found:02X}")]
    ChecksumMismatch { expected: u8, found: u8 },

    #[error("invalid address field \"{0}\"")]
    InvalidAddress(String),

    #[error("unexpected sentence \"{0}\"")]
    UnexpectedSentence(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod test {
    use super::Error;

    #[test]
    fn test_io_error() {
        let e = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "port closed");
        let e = Error::from(e);

        assert!(matches!(e, Error::Io(_)));
        assert_eq!(e.to_string(), "i/o error: port closed");
    }
}
