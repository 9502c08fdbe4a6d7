use crate::models::*;
use crate::parser::ReadUtils;
use crate::ParserError;
use bytes::{Buf, Bytes};
use std::net::IpAddr;

/// Parse the NEXT_HOP attribute, always a single IPv4 address.
pub fn parse_next_hop(mut input: Bytes) -> Result<IpAddr, ParserError> {
    input.expect_remaining_eq(4, "NEXT_HOP")?;
    input.read_address(Afi::Ipv4)
}

/// Parse the next hop field of MP_REACH_NLRI.
///
/// The address is taken from the first address-width bytes of the field. Longer fields, such as
/// an IPv6 global address followed by a link-local one, keep only the first address.
pub fn parse_mp_next_hop(mut input: Bytes, afi: Afi) -> Result<IpAddr, ParserError> {
    if input.remaining() < afi.address_len() {
        return Err(ParserError::malformed(format!(
            "MP_REACH_NLRI next hop length {} for {:?}",
            input.remaining(),
            afi
        )));
    }
    input.read_address(afi)
}
