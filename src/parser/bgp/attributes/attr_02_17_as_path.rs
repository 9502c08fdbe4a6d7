use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

/// Parse the AS_PATH attribute.
///
/// Only the first path segment is decoded: one segment-type byte (ignored), one count byte and
/// `count` AS numbers of width `asn_len`. The number of bytes left after that segment is
/// returned so the caller can report it.
///
/// An empty attribute yields an empty path.
///
/// AS4_PATH (17) has the same layout with 4-byte AS numbers. It is recognized by the attribute
/// parser and left undecoded.
pub fn parse_as_path(
    mut input: Bytes,
    asn_len: AsnLength,
) -> Result<(Vec<Asn>, usize), ParserError> {
    if !input.has_remaining() {
        return Ok((vec![], 0));
    }
    let _segment_type = input.read_u8()?;
    let count = input.read_u8()? as usize;
    let path = input.read_asns(asn_len, count)?;
    Ok((path, input.remaining()))
}
