use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::Bytes;
use std::net::Ipv4Addr;

/// Parse aggregator attribute.
///
/// https://www.rfc-editor.org/rfc/rfc4271.html#section-5.1.7
///
/// ```text
///    AGGREGATOR is an optional transitive attribute, which MAY be included
///    in updates that are formed by aggregation (see Section 9.2.2.2).  A
///    BGP speaker that performs route aggregation MAY add the AGGREGATOR
///    attribute, which SHALL contain its own AS number and IP address.  The
///    IP address SHOULD be the same as the BGP Identifier of the speaker.`
/// ```
///
/// The AS number width follows the record subtype, so the attribute must be exactly
/// `asn_len + 4` bytes. AS4_AGGREGATOR (18) is the 4-byte form; the attribute parser
/// recognizes it and leaves it undecoded.
pub fn parse_aggregator(
    mut input: Bytes,
    asn_len: AsnLength,
) -> Result<(Asn, Ipv4Addr), ParserError> {
    input.expect_remaining_eq(asn_len.byte_len() + 4, "AGGREGATOR")?;
    let asn = input.read_asn(asn_len)?;
    let identifier = input.read_ipv4_address()?;
    Ok((asn, identifier))
}
