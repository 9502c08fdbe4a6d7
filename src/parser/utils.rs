/*!
Provides IO utility functions for read bytes of different length and converting to corresponding structs.
*/
use crate::error::ParserError;
use crate::models::*;
use bytes::{Buf, Bytes};
use ipnet::IpNet;
use log::debug;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

impl ReadUtils for Bytes {}

/// Bounds-checked big-endian reads on top of [Buf].
///
/// Every method either consumes exactly the width it reads or fails with
/// [ParserError::Truncated] and consumes nothing.
pub trait ReadUtils: Buf + Sized {
    #[inline]
    fn has_n_remaining(&self, n: usize) -> Result<(), ParserError> {
        let available = self.remaining();
        if available < n {
            Err(ParserError::Truncated {
                needed: n,
                available,
            })
        } else {
            Ok(())
        }
    }

    /// Fails with [ParserError::Malformed] unless exactly `n` bytes remain.
    ///
    /// Used by fixed-size fields whose declared length must match their encoding.
    #[inline]
    fn expect_remaining_eq(&self, n: usize, target: &str) -> Result<(), ParserError> {
        if self.remaining() != n {
            return Err(ParserError::malformed(format!(
                "{} length: expected {} bytes, found {}",
                target,
                n,
                self.remaining()
            )));
        }
        Ok(())
    }

    #[inline]
    fn read_u8(&mut self) -> Result<u8, ParserError> {
        self.has_n_remaining(1)?;
        Ok(self.get_u8())
    }

    #[inline]
    fn read_u16(&mut self) -> Result<u16, ParserError> {
        self.has_n_remaining(2)?;
        Ok(self.get_u16())
    }

    #[inline]
    fn read_u32(&mut self) -> Result<u32, ParserError> {
        self.has_n_remaining(4)?;
        Ok(self.get_u32())
    }

    /// Reads a 6-byte unsigned integer, e.g. the value of an extended community.
    #[inline]
    fn read_u48(&mut self) -> Result<u64, ParserError> {
        self.has_n_remaining(6)?;
        Ok(self.get_uint(6))
    }

    fn read_n_bytes(&mut self, n_bytes: usize) -> Result<Vec<u8>, ParserError> {
        self.has_n_remaining(n_bytes)?;
        Ok(self.copy_to_bytes(n_bytes).into())
    }

    #[inline]
    fn advance_by(&mut self, n_bytes: usize) -> Result<(), ParserError> {
        self.has_n_remaining(n_bytes)?;
        self.advance(n_bytes);
        Ok(())
    }

    /// Splits off the next `n_bytes` as an independent cursor.
    ///
    /// For [Bytes] the split shares the underlying buffer.
    #[inline]
    fn split_span(&mut self, n_bytes: usize) -> Result<Bytes, ParserError> {
        self.has_n_remaining(n_bytes)?;
        Ok(self.copy_to_bytes(n_bytes))
    }

    fn read_ipv4_address(&mut self) -> Result<Ipv4Addr, ParserError> {
        let addr = self.read_u32()?;
        Ok(Ipv4Addr::from(addr))
    }

    fn read_ipv6_address(&mut self) -> Result<Ipv6Addr, ParserError> {
        self.has_n_remaining(16)?;
        let buf = self.get_u128();
        Ok(Ipv6Addr::from(buf))
    }

    fn read_address(&mut self, afi: Afi) -> Result<IpAddr, ParserError> {
        match afi {
            Afi::Ipv4 => self.read_ipv4_address().map(IpAddr::V4),
            Afi::Ipv6 => self.read_ipv6_address().map(IpAddr::V6),
        }
    }

    #[inline]
    fn read_asn(&mut self, asn_len: AsnLength) -> Result<Asn, ParserError> {
        match asn_len {
            AsnLength::Bits16 => self.read_u16().map(Asn::from),
            AsnLength::Bits32 => self.read_u32().map(Asn::from),
        }
    }

    fn read_asns(&mut self, asn_len: AsnLength, count: usize) -> Result<Vec<Asn>, ParserError> {
        self.has_n_remaining(count * asn_len.byte_len())?;
        let mut path = Vec::with_capacity(count);
        for _ in 0..count {
            path.push(self.read_asn(asn_len)?);
        }
        Ok(path)
    }

    fn read_afi(&mut self) -> Result<Afi, ParserError> {
        let afi = self.read_u16()?;
        Afi::try_from(afi).map_err(|_| ParserError::unsupported(format!("AFI {}", afi)))
    }

    /// Read one announced/withdrawn prefix.
    ///
    /// The length in bits is 1 byte, followed by just enough bytes to hold it. A prefix whose
    /// bytes run past the end of the cursor is malformed rather than truncated: the cursor is
    /// always a span whose size was declared by an enclosing field.
    fn read_nlri_prefix(&mut self, afi: Afi) -> Result<IpNet, ParserError> {
        let bit_len = self.read_u8()?;
        if bit_len > afi.max_prefix_len() {
            return Err(ParserError::malformed(format!(
                "prefix length {} for {:?}",
                bit_len, afi
            )));
        }
        let byte_len = (bit_len as usize).div_ceil(8);
        if self.remaining() < byte_len {
            return Err(ParserError::malformed(format!(
                "prefix /{} needs {} bytes, {} left in span",
                bit_len,
                byte_len,
                self.remaining()
            )));
        }
        let mut buf = [0u8; 16];
        self.copy_to_slice(&mut buf[..byte_len]);
        masked_prefix(afi, &buf[..byte_len], bit_len)
    }
}

/// Decodes prefixes until `input` is exactly exhausted.
///
/// `input` must be the span declared for the list, so trailing bytes that cannot form a prefix
/// surface as [ParserError::Malformed].
pub fn parse_prefix_list(mut input: Bytes, afi: Afi) -> Result<Vec<IpNet>, ParserError> {
    let mut prefixes = vec![];
    while input.has_remaining() {
        prefixes.push(input.read_nlri_prefix(afi)?);
    }
    debug!("decoded {} {:?} prefixes", prefixes.len(), afi);
    Ok(prefixes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_read_u8() {
        let mut buf = Bytes::from_static(&[0x12]);
        assert_eq!(buf.read_u8().unwrap(), 0x12);
        assert!(matches!(
            buf.read_u8(),
            Err(ParserError::Truncated {
                needed: 1,
                available: 0
            })
        ));
    }

    #[test]
    fn test_read_fixed_width() {
        let mut buf = Bytes::from_static(&[
            0x12, 0x34, // u16
            0x12, 0x34, 0x56, 0x78, // u32
            0x00, 0x02, 0x00, 0x00, 0x00, 0x07, // u48
        ]);
        assert_eq!(buf.read_u16().unwrap(), 0x1234);
        assert_eq!(buf.read_u32().unwrap(), 0x12345678);
        assert_eq!(buf.read_u48().unwrap(), 0x0002_0000_0007);
        assert_eq!(buf.remaining(), 0);
    }

    #[test]
    fn test_failed_read_consumes_nothing() {
        let mut buf = Bytes::from_static(&[1, 2, 3]);
        assert!(buf.read_u32().is_err());
        assert_eq!(buf.remaining(), 3);
        assert!(buf.advance_by(4).is_err());
        assert!(buf.split_span(4).is_err());
        assert_eq!(buf.remaining(), 3);
    }

    #[test]
    fn test_expect_remaining_eq() {
        let buf = Bytes::from_static(&[1, 2, 3, 4]);
        assert!(buf.expect_remaining_eq(4, "MED").is_ok());
        assert!(matches!(
            buf.expect_remaining_eq(1, "ORIGIN"),
            Err(ParserError::Malformed(_))
        ));
    }

    #[test]
    fn test_split_span() {
        let mut buf = Bytes::from_static(&[1, 2, 3, 4, 5]);
        let mut span = buf.split_span(2).unwrap();
        assert_eq!(span.read_u16().unwrap(), 0x0102);
        assert!(span.read_u8().is_err());
        assert_eq!(buf.read_u8().unwrap(), 3);
        buf.advance_by(1).unwrap();
        assert_eq!(buf.read_n_bytes(1).unwrap(), vec![5]);
    }

    #[test]
    fn test_read_address() {
        let mut buf = Bytes::from_static(&[192, 0, 2, 1]);
        assert_eq!(
            buf.read_address(Afi::Ipv4).unwrap(),
            IpAddr::from_str("192.0.2.1").unwrap()
        );

        let mut buf = Bytes::from(vec![
            0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0x01,
        ]);
        assert_eq!(
            buf.read_address(Afi::Ipv6).unwrap(),
            IpAddr::from_str("2001:db8::1").unwrap()
        );
    }

    #[test]
    fn test_read_asn() {
        let mut buf = Bytes::from_static(&[0xfd, 0xe9, 0x00, 0x00, 0xfd, 0xe9]);
        let a = buf.read_asn(AsnLength::Bits16).unwrap();
        let b = buf.read_asn(AsnLength::Bits32).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, 65001);

        let mut buf = Bytes::from_static(&[0x00, 0x01, 0x00, 0x02, 0x00]);
        assert_eq!(
            buf.read_asns(AsnLength::Bits16, 2).unwrap(),
            vec![Asn::new(1), Asn::new(2)]
        );
        assert!(buf.read_asns(AsnLength::Bits16, 1).is_err());
    }

    #[test]
    fn test_read_afi() {
        let mut buf = Bytes::from_static(&[0, 1, 0, 2, 0, 3]);
        assert_eq!(buf.read_afi().unwrap(), Afi::Ipv4);
        assert_eq!(buf.read_afi().unwrap(), Afi::Ipv6);
        assert!(matches!(buf.read_afi(), Err(ParserError::Unsupported(_))));
    }

    #[test]
    fn test_read_nlri_prefix() {
        let mut buf = Bytes::from_static(&[24, 10, 0, 0]);
        assert_eq!(
            buf.read_nlri_prefix(Afi::Ipv4).unwrap(),
            IpNet::from_str("10.0.0.0/24").unwrap()
        );

        let mut buf = Bytes::from_static(&[33, 10, 0, 0, 0, 0]);
        assert!(matches!(
            buf.read_nlri_prefix(Afi::Ipv4),
            Err(ParserError::Malformed(_))
        ));

        let mut buf = Bytes::from_static(&[24, 10, 0]);
        assert!(matches!(
            buf.read_nlri_prefix(Afi::Ipv4),
            Err(ParserError::Malformed(_))
        ));
    }

    #[test]
    fn test_parse_prefix_list() {
        let input = Bytes::from_static(&[24, 10, 0, 0, 0, 16, 172, 16]);
        let prefixes = parse_prefix_list(input, Afi::Ipv4).unwrap();
        assert_eq!(
            prefixes,
            vec![
                IpNet::from_str("10.0.0.0/24").unwrap(),
                IpNet::from_str("0.0.0.0/0").unwrap(),
                IpNet::from_str("172.16.0.0/16").unwrap(),
            ]
        );

        assert!(parse_prefix_list(Bytes::new(), Afi::Ipv6)
            .unwrap()
            .is_empty());

        // the last prefix claims one byte more than the span holds
        let input = Bytes::from_static(&[24, 10, 0, 0, 24, 10, 0]);
        assert!(matches!(
            parse_prefix_list(input, Afi::Ipv4),
            Err(ParserError::Malformed(_))
        ));
    }

    #[test]
    fn test_prefix_host_bits_cleared() {
        let input = Bytes::from_static(&[20, 192, 168, 0xff]);
        let prefixes = parse_prefix_list(input, Afi::Ipv4).unwrap();
        assert_eq!(prefixes[0], IpNet::from_str("192.168.240.0/20").unwrap());
        assert_eq!(prefixes[0].addr(), prefixes[0].network());
    }
}
