use crate::models::*;
use crate::parser::bgp::attributes::attr_03_next_hop::parse_mp_next_hop;
use crate::parser::{parse_prefix_list, ReadUtils};
use crate::ParserError;
use bytes::{Buf, Bytes};
use log::warn;

///
/// <https://datatracker.ietf.org/doc/html/rfc4760#section-3>
/// The attribute is encoded as shown below:
/// +---------------------------------------------------------+
/// | Address Family Identifier (2 octets)                    |
/// +---------------------------------------------------------+
/// | Subsequent Address Family Identifier (1 octet)          |
/// +---------------------------------------------------------+
/// | Length of Next Hop Network Address (1 octet)            |
/// +---------------------------------------------------------+
/// | Network Address of Next Hop (variable)                  |
/// +---------------------------------------------------------+
/// | Reserved (1 octet)                                      |
/// +---------------------------------------------------------+
/// | Network Layer Reachability Information (variable)       |
/// +---------------------------------------------------------+
///
/// MP_UNREACH_NLRI carries only the AFI, the SAFI and the withdrawn routes.
///
/// Prefixes use the address family of the attribute. A non-zero reserved octet is reported
/// through `diagnostics`.
pub fn parse_nlri(
    mut input: Bytes,
    reachable: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Nlri, ParserError> {
    let fixed_len = if reachable { 5 } else { 3 };
    if input.remaining() < fixed_len {
        return Err(ParserError::malformed(format!(
            "{} length {}",
            attr_name(reachable),
            input.remaining()
        )));
    }

    let afi = input.read_afi()?;
    let safi = input.read_u8()?;

    let mut next_hop = None;
    if reachable {
        let next_hop_length = input.read_u8()? as usize;
        // the next hop and the reserved octet must both fit
        if input.remaining() < next_hop_length + 1 {
            return Err(ParserError::malformed(format!(
                "MP_REACH_NLRI next hop length {} with {} bytes left",
                next_hop_length,
                input.remaining()
            )));
        }
        let next_hop_bytes = input.split_span(next_hop_length)?;
        next_hop = Some(parse_mp_next_hop(next_hop_bytes, afi)?);

        let reserved = input.read_u8()?;
        if reserved != 0 {
            warn!("MP_REACH_NLRI reserved byte not 0: {}", reserved);
            diagnostics.push(Diagnostic::NonZeroReserved { value: reserved });
        }
    }

    let prefixes = parse_prefix_list(input, afi)?;

    Ok(Nlri {
        afi,
        safi,
        next_hop,
        prefixes,
    })
}

const fn attr_name(reachable: bool) -> &'static str {
    match reachable {
        true => "MP_REACH_NLRI",
        false => "MP_UNREACH_NLRI",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipnet::IpNet;
    use std::net::IpAddr;
    use std::str::FromStr;

    #[test]
    fn test_parsing_unreach_nlri() {
        let test_bytes = Bytes::from(vec![
            0x00, 0x01, // address family: IPv4
            0x01, // safi: unicast
            // NLRI
            0x18, // 24 bits prefix length
            0xC0, 0x00, 0x02, // 192.0.2
        ]);
        let mut diagnostics = vec![];
        let nlri = parse_nlri(test_bytes, false, &mut diagnostics).unwrap();
        assert!(!nlri.is_reachable());
        assert_eq!(nlri.afi, Afi::Ipv4);
        assert_eq!(nlri.safi, 1);
        assert_eq!(
            nlri.prefixes,
            vec![IpNet::from_str("192.0.2.0/24").unwrap()]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_parsing_reach_nlri_ipv6() {
        let test_bytes = Bytes::from(vec![
            0x00, 0x02, // address family: IPv6
            0x01, // safi: unicast
            0x10, // next hop length: 16
            0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01, // 2001:db8::1
            0x00, // reserved
            0x20, 0x20, 0x01, 0x0d, 0xb8, // 2001:db8::/32
        ]);
        let mut diagnostics = vec![];
        let nlri = parse_nlri(test_bytes, true, &mut diagnostics).unwrap();
        assert!(nlri.is_reachable());
        assert_eq!(nlri.afi, Afi::Ipv6);
        assert_eq!(
            nlri.next_hop,
            Some(IpAddr::from_str("2001:db8::1").unwrap())
        );
        assert_eq!(
            nlri.prefixes,
            vec![IpNet::from_str("2001:db8::/32").unwrap()]
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_non_zero_reserved() {
        let test_bytes = Bytes::from(vec![
            0x00, 0x01, // IPv4
            0x01, // unicast
            0x04, 10, 0, 0, 1, // next hop 10.0.0.1
            0x07, // reserved
        ]);
        let mut diagnostics = vec![];
        let nlri = parse_nlri(test_bytes, true, &mut diagnostics).unwrap();
        assert!(nlri.prefixes.is_empty());
        assert_eq!(diagnostics, vec![Diagnostic::NonZeroReserved { value: 7 }]);
    }

    #[test]
    fn test_invalid_nlri() {
        let mut diagnostics = vec![];
        // unknown AFI
        let test_bytes = Bytes::from(vec![0x00, 0x03, 0x01]);
        assert!(matches!(
            parse_nlri(test_bytes, false, &mut diagnostics),
            Err(ParserError::Unsupported(_))
        ));

        // next hop shorter than an IPv6 address
        let test_bytes = Bytes::from(vec![0x00, 0x02, 0x01, 0x04, 10, 0, 0, 1, 0x00]);
        assert!(matches!(
            parse_nlri(test_bytes, true, &mut diagnostics),
            Err(ParserError::Malformed(_))
        ));

        // next hop length runs past the attribute
        let test_bytes = Bytes::from(vec![0x00, 0x01, 0x01, 0x10, 10, 0, 0, 1, 0x00]);
        assert!(matches!(
            parse_nlri(test_bytes, true, &mut diagnostics),
            Err(ParserError::Malformed(_))
        ));

        // shorter than the fixed fields
        let test_bytes = Bytes::from(vec![0x00, 0x01]);
        assert!(matches!(
            parse_nlri(test_bytes, false, &mut diagnostics),
            Err(ParserError::Malformed(_))
        ));
    }
}
