use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};

/// Parse the COMMUNITIES attribute: a list of 4-byte values.
pub fn parse_regular_communities(mut input: Bytes) -> Result<Vec<Community>, ParserError> {
    if input.remaining() % 4 != 0 {
        return Err(ParserError::malformed(format!(
            "COMMUNITIES length {}",
            input.remaining()
        )));
    }
    let mut communities = Vec::with_capacity(input.remaining() / 4);
    while input.has_remaining() {
        communities.push(Community::Regular(input.read_u32()?));
    }
    Ok(communities)
}
