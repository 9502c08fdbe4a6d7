use std::fmt::{Display, Formatter};

/// A non-fatal finding made while decoding one record.
///
/// Diagnostics never abort a decode. They are returned next to the events of the record so the
/// caller decides whether to report them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Diagnostic {
    /// A path attribute with an unhandled type code was skipped.
    UnknownAttribute { type_code: u8, length: usize },
    /// AS4_PATH or AS4_AGGREGATOR was recognized and skipped.
    IgnoredAttribute { type_code: u8 },
    /// Bytes left in AS_PATH after its first segment. Only the first segment is decoded.
    TrailingAsPathData { remaining: usize },
    /// Bytes left in a BGP4MP record after the state change or BGP message.
    TrailingRecordData { remaining: usize },
    /// The reserved octet of MP_REACH_NLRI was not zero.
    NonZeroReserved { value: u8 },
    /// A TABLE_DUMP_V2 record was accepted without decoding.
    TableDumpV2Skipped { subtype: u16 },
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::UnknownAttribute { type_code, length } => {
                write!(f, "skipped unknown attribute {} ({} bytes)", type_code, length)
            }
            Diagnostic::IgnoredAttribute { type_code } => {
                write!(f, "attribute {} recognized but not decoded", type_code)
            }
            Diagnostic::TrailingAsPathData { remaining } => {
                write!(f, "{} bytes after the first AS_PATH segment", remaining)
            }
            Diagnostic::TrailingRecordData { remaining } => {
                write!(f, "{} bytes after the end of the BGP4MP record body", remaining)
            }
            Diagnostic::NonZeroReserved { value } => {
                write!(f, "MP_REACH_NLRI reserved octet is {}", value)
            }
            Diagnostic::TableDumpV2Skipped { subtype } => {
                write!(f, "TABLE_DUMP_V2 subtype {} not decoded", subtype)
            }
        }
    }
}
