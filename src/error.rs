use std::io;

use derive_more::{Display, Error, From};

#[derive(Debug, Display, From, Error)]
pub enum EncodeError {
    /// Reading the source or writing the encoded stream failed.
    #[display("io error: {_0}")]
    Io(#[error(source)] io::Error),
    /// The source file could not be decoded into pixels.
    #[display("failed to decode source image: {_0}")]
    Image(#[error(source)] image::ImageError),
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;

    #[test]
    fn io_error_is_source() {
        let err = EncodeError::from(io::Error::new(io::ErrorKind::NotFound, "gone"));
        assert!(matches!(err, EncodeError::Io(_)));
        assert_eq!(err.to_string(), "io error: gone");
        assert!(err.source().is_some());
    }
}
