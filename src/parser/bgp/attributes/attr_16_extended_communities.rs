//! <https://datatracker.ietf.org/doc/html/rfc4360>
use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

/// Parse the EXTENDED_COMMUNITIES attribute.
///
/// Each record is 8 bytes: a 2-byte type (high and low octet) and a 6-byte value. Values are
/// kept opaque.
pub fn parse_extended_community(mut input: Bytes) -> Result<Vec<Community>, ParserError> {
    if input.remaining() % 8 != 0 {
        return Err(ParserError::malformed(format!(
            "EXTENDED_COMMUNITIES length {}",
            input.remaining()
        )));
    }
    let mut communities = Vec::with_capacity(input.remaining() / 8);
    while input.has_remaining() {
        let ext_type = input.read_u16()?;
        let value = input.read_u48()?;
        communities.push(Community::Extended { ext_type, value });
    }
    Ok(communities)
}
