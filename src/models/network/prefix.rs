use crate::error::ParserError;
use crate::models::Afi;
use ipnet::{IpNet, Ipv4Net, Ipv6Net};
use std::net::{Ipv4Addr, Ipv6Addr};

/// Builds a network prefix from left-aligned address bytes.
///
/// `bytes` holds at most `afi.address_len()` leading octets of the network; missing octets are
/// zero. Host bits beyond `prefix_len` are always cleared, so the returned prefix satisfies
/// `prefix.addr() == prefix.network()`.
pub fn masked_prefix(afi: Afi, bytes: &[u8], prefix_len: u8) -> Result<IpNet, ParserError> {
    if prefix_len > afi.max_prefix_len() {
        return Err(ParserError::malformed(format!(
            "prefix length {} for {:?}",
            prefix_len, afi
        )));
    }
    if bytes.len() > afi.address_len() {
        return Err(ParserError::malformed(format!(
            "{} prefix bytes for {:?}",
            bytes.len(),
            afi
        )));
    }
    let mut buf = [0u8; 16];
    buf[..bytes.len()].copy_from_slice(bytes);

    let net = match afi {
        Afi::Ipv4 => {
            let addr = Ipv4Addr::new(buf[0], buf[1], buf[2], buf[3]);
            IpNet::V4(
                Ipv4Net::new(addr, prefix_len)
                    .map_err(|_| ParserError::malformed(format!("prefix length {}", prefix_len)))?
                    .trunc(),
            )
        }
        Afi::Ipv6 => {
            let addr = Ipv6Addr::from(buf);
            IpNet::V6(
                Ipv6Net::new(addr, prefix_len)
                    .map_err(|_| ParserError::malformed(format!("prefix length {}", prefix_len)))?
                    .trunc(),
            )
        }
    };
    Ok(net)
}
