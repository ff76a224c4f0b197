//! Numeric Error Types
//!
//! Every crate in the workspace reports failures through [`NumericError`].
//! Each error carries a stable message key (see [`keys`]) so that a caller
//! with its own message catalogue can render localized text; the `Display`
//! implementation provides plain English.

use std::io;
use thiserror::Error;

/// Stable message keys attached to [`NumericError`] values.
pub mod keys {
    pub const BAD_NUMBER: &str = "math#numeric.badNumber";
    pub const BAD_PRECISION: &str = "math#numeric.badPrecision";
    pub const BAD_ROUNDING: &str = "math#numeric.badRoundingMode";
    pub const DIVIDE_BY_ZERO: &str = "math#numeric.divideByZero";
    pub const WHOLE_INTEGER: &str = "util#math.wholeInteger";
    pub const OUT_OF_RANGE: &str = "util#numeric.outOfRange";
    pub const SQRT_NEGATIVE: &str = "util#math.sqrtNegative";
    pub const TOO_MANY_DIGITS: &str = "util#math.tooManyDigits";
    pub const PRIME_TOO_BIG: &str = "util#math.primeTooBig";
    pub const BAD_BCD: &str = "math#numeric.badBCD";
    pub const BAD_DATA_TYPE: &str = "math#numeric.badDataType";
    pub const BAD_DATA_TYPE_CODE: &str = "math#numeric.badDataTypeCode";
    pub const BAD_CHAR: &str = "math#numeric.badChar";
    pub const UNKNOWN_BYTE_ORDER: &str = "math#numeric.unknownByteOrder";
    pub const UNKNOWN_STRING_LENGTH: &str = "math#numeric.unknownStringLength";
    pub const UNKNOWN_CHARSET: &str = "math#numeric.unknownCharset";
    pub const STRING_TOO_LONG: &str = "math#numeric.stringLengthTooBig";
    pub const END_OF_STREAM: &str = "math#numeric.endOfStream";
    pub const DIGIT_MISMATCH: &str = "util#math.piDigitMismatch";
    pub const IO_FAILURE: &str = "util#io.failure";
}

/// Errors raised by the numeric kernel.
#[derive(Debug, Error)]
pub enum NumericError {
    /// Malformed or unsupported input
    #[error("invalid argument: {detail}")]
    InvalidArgument {
        /// Message key for localized rendering
        key: &'static str,
        /// Human-readable detail (the message arguments)
        detail: String,
    },

    /// A string payload does not fit its length prefix
    #[error("string length {length} exceeds the maximum of {max} bytes")]
    Overflow {
        /// Encoded byte length of the payload
        length: usize,
        /// Largest length the discipline can express
        max: usize,
    },

    /// The stream ended before a complete payload was read
    #[error("unexpected end of stream while reading {context}")]
    EndOfStream {
        /// What was being read when the stream ran dry
        context: &'static str,
    },

    /// A generator produced a result that contradicts its own contract
    #[error("internal inconsistency: {detail}")]
    InternalInconsistency {
        /// Description of the mismatch
        detail: String,
    },

    /// Any other failure of the underlying byte stream
    #[error("I/O failure: {0}")]
    Io(#[source] io::Error),
}

impl NumericError {
    /// Build an [`NumericError::InvalidArgument`] from a key and detail text.
    pub fn invalid(key: &'static str, detail: impl Into<String>) -> Self {
        NumericError::InvalidArgument {
            key,
            detail: detail.into(),
        }
    }

    /// The message key of this error.
    pub fn key(&self) -> &'static str {
        match self {
            NumericError::InvalidArgument { key, .. } => key,
            NumericError::Overflow { .. } => keys::STRING_TOO_LONG,
            NumericError::EndOfStream { .. } => keys::END_OF_STREAM,
            NumericError::InternalInconsistency { .. } => keys::DIGIT_MISMATCH,
            NumericError::Io(_) => keys::IO_FAILURE,
        }
    }

    /// Map an I/O error raised while reading `context`, turning a short read
    /// into [`NumericError::EndOfStream`].
    pub fn from_read(err: io::Error, context: &'static str) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            NumericError::EndOfStream { context }
        } else {
            NumericError::Io(err)
        }
    }
}

impl From<io::Error> for NumericError {
    fn from(err: io::Error) -> Self {
        NumericError::from_read(err, "payload")
    }
}

/// Result alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, NumericError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_carries_key() {
        let err = NumericError::invalid(keys::BAD_NUMBER, "abc");
        assert_eq!(err.key(), keys::BAD_NUMBER);
        assert!(err.to_string().contains("abc"));
    }

    #[test]
    fn test_unexpected_eof_maps_to_end_of_stream() {
        let io_err = io::Error::new(io::ErrorKind::UnexpectedEof, "short");
        let err = NumericError::from_read(io_err, "int32");
        assert!(matches!(err, NumericError::EndOfStream { context: "int32" }));
    }

    #[test]
    fn test_other_io_errors_are_kept() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "nope");
        let err: NumericError = io_err.into();
        assert!(matches!(err, NumericError::Io(_)));
        assert_eq!(err.key(), keys::IO_FAILURE);
    }

    #[test]
    fn test_overflow_message() {
        let err = NumericError::Overflow { length: 300, max: 255 };
        assert_eq!(err.to_string(), "string length 300 exceeds the maximum of 255 bytes");
    }
}
