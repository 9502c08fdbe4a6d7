/*!
error module defines the error types used in mrt-events.
*/
use std::io;
use thiserror::Error;

/// Coarse classification of a [ParserError].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Input ended in the middle of a field.
    Truncated,
    /// A field violates its invariant, e.g. lengths that do not reconcile.
    Malformed,
    /// A recognized but unimplemented type, subtype or address family.
    Unsupported,
    /// Failure of the underlying byte source.
    Io,
}

#[derive(Debug, Error)]
pub enum ParserError {
    /// Fewer bytes were available than a field requires.
    ///
    /// ## Occurs during:
    ///  - Reading an MRT header or payload from the byte source (fatal for the stream)
    ///  - Reading any fixed-width field from a buffered payload
    #[error("truncated input: need {needed} bytes, {available} available")]
    Truncated { needed: usize, available: usize },
    /// A field violates its invariant.
    ///
    /// ## Occurs during:
    ///  - Reconciling declared lengths (prefix lists, attributes, NLRI span)
    ///  - Reading prefix lengths and enumerated values
    #[error("malformed {0}")]
    Malformed(String),
    /// Recognized but not implemented.
    ///
    /// ## Occurs during:
    ///  - Routing MRT types, BGP4MP subtypes and BGP message types
    ///  - Reading address family identifiers
    #[error("unsupported {0}")]
    Unsupported(String),
    /// A general IO error triggered by the internal reader.
    #[error(transparent)]
    IoError(#[from] io::Error),
    /// The byte source ended while a record was partially read.
    #[error("stream ended inside {section}: expected {expected} bytes, read {read}")]
    TruncatedStream {
        section: &'static str,
        expected: usize,
        read: usize,
    },
}

impl ParserError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ParserError::Truncated { .. } | ParserError::TruncatedStream { .. } => {
                ErrorKind::Truncated
            }
            ParserError::Malformed(_) => ErrorKind::Malformed,
            ParserError::Unsupported(_) => ErrorKind::Unsupported,
            ParserError::IoError(_) => ErrorKind::Io,
        }
    }

    /// Whether the byte source can no longer be read record by record.
    ///
    /// Errors raised while decoding a fully buffered payload leave the source aligned at the next
    /// record header. A short read or an IO failure does not.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ParserError::TruncatedStream { .. } | ParserError::IoError(_)
        )
    }

    pub(crate) fn malformed(msg: impl Into<String>) -> Self {
        ParserError::Malformed(msg.into())
    }

    pub(crate) fn unsupported(msg: impl Into<String>) -> Self {
        ParserError::Unsupported(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind() {
        let err = ParserError::Truncated {
            needed: 4,
            available: 2,
        };
        assert_eq!(err.kind(), ErrorKind::Truncated);
        assert!(!err.is_fatal());

        let err = ParserError::TruncatedStream {
            section: "MRT payload",
            expected: 10,
            read: 3,
        };
        assert_eq!(err.kind(), ErrorKind::Truncated);
        assert!(err.is_fatal());

        assert_eq!(
            ParserError::malformed("prefix").kind(),
            ErrorKind::Malformed
        );
        assert_eq!(
            ParserError::unsupported("MRT type 12").kind(),
            ErrorKind::Unsupported
        );
        let io_err = ParserError::from(io::Error::other("boom"));
        assert_eq!(io_err.kind(), ErrorKind::Io);
        assert!(io_err.is_fatal());
    }

    #[test]
    fn test_error_display() {
        let err = ParserError::Truncated {
            needed: 4,
            available: 2,
        };
        assert_eq!(err.to_string(), "truncated input: need 4 bytes, 2 available");
        assert_eq!(
            ParserError::malformed("NLRI span -3").to_string(),
            "malformed NLRI span -3"
        );
    }
}
