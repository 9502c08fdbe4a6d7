//! MRT envelope structs.

pub mod bgp4mp;

pub use bgp4mp::*;

use chrono::{DateTime, Utc};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// Length in bytes of the MRT common header.
pub const MRT_HEADER_LEN: usize = 12;

/// MRT common header.
///
/// A CommonHeader ([RFC6396 section 2][header-link]) is constructed as the following:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           Timestamp                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |             Type              |            Subtype            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                             Length                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// `length` counts every payload byte following the header, including the microsecond
/// timestamp of `_ET` types. The microsecond offset is filled in once the payload of a
/// `BGP4MP_ET` record has been opened.
///
/// [header-link]: https://datatracker.ietf.org/doc/html/rfc6396#section-2
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MrtHeader {
    pub timestamp: u32,
    pub microsecond_timestamp: Option<u32>,
    pub entry_type: u16,
    pub entry_subtype: u16,
    pub length: u32,
}

impl MrtHeader {
    /// The record time, including the microsecond offset when one was present.
    ///
    /// The offset is an unsigned 32-bit number of microseconds and is added to the seconds
    /// field, so it may carry over into whole seconds.
    pub fn time(&self) -> DateTime<Utc> {
        let micros = self.timestamp as i64 * 1_000_000
            + self.microsecond_timestamp.unwrap_or_default() as i64;
        DateTime::from_timestamp_micros(micros).unwrap_or_default()
    }

    /// The recognized MRT type, if any.
    pub fn mrt_type(&self) -> Option<EntryType> {
        EntryType::try_from(self.entry_type).ok()
    }
}

/// MRT entry type.
///
/// <https://datatracker.ietf.org/doc/html/rfc6396#section-4>
/// One MRT record with its decoded body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MrtRecord {
    pub common_header: MrtHeader,
    pub message: MrtMessage,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MrtMessage {
    Bgp4Mp(Bgp4MpEnum),
    /// A TABLE_DUMP_V2 record, accepted without decoding its body.
    TableDumpV2,
}

#[allow(non_camel_case_types)]
#[derive(Debug, TryFromPrimitive, IntoPrimitive, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum EntryType {
    // START DEPRECATED
    NULL = 0,
    START = 1,
    DIE = 2,
    I_AM_DEAD = 3,
    PEER_DOWN = 4,
    BGP = 5,
    RIP = 6,
    IDRP = 7,
    RIPNG = 8,
    BGP4PLUS = 9,
    BGP4PLUS_01 = 10,
    // END DEPRECATED
    OSPFv2 = 11,
    TABLE_DUMP = 12,
    TABLE_DUMP_V2 = 13,
    BGP4MP = 16,
    BGP4MP_ET = 17,
    ISIS = 32,
    ISIS_ET = 33,
    OSPFv3 = 48,
    OSPFv3_ET = 49,
}
