//! Errors surfaced by the `DELTA_BINARY_PACKED` codec.

/// Errors that can occur while encoding or decoding a `DELTA_BINARY_PACKED` stream.
#[derive(Debug)]
pub enum Error {
    /// The caller-supplied `block_size`/`miniblock_size` combination violates the
    /// encoding's invariants. Reported eagerly, before any byte is written.
    InvalidConfig(String),
    /// The input byte stream does not conform to the wire format: a varint
    /// overflowed, a bit-width exceeded the value width, or the input ended
    /// before a field could be fully read. Carries the byte offset at which the
    /// problem was detected.
    Malformed {
        /// Byte offset into the input at which the problem was detected.
        offset: usize,
        /// Human-readable description of what went wrong.
        message: String,
    },
    /// The byte sink returned an I/O error while encoding.
    Sink(std::io::Error),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::InvalidConfig(message) => {
                write!(fmt, "invalid delta-binary-packed configuration: {}", message)
            }
            Error::Malformed { offset, message } => {
                write!(
                    fmt,
                    "malformed delta-binary-packed stream at byte {}: {}",
                    offset, message
                )
            }
            Error::Sink(e) => write!(fmt, "underlying sink error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Sink(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Error {
        Error::Sink(e)
    }
}

/// A specialized `Result` for delta-binary-packed errors.
pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn malformed<T>(offset: usize, message: impl Into<String>) -> Result<T> {
    Err(Error::Malformed {
        offset,
        message: message.into(),
    })
}
