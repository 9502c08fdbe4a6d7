//! BGP attribute structs
mod nlri;
mod origin;

pub use nlri::*;
pub use origin::*;

use crate::models::*;
use bitflags::bitflags;
use num_enum::{FromPrimitive, IntoPrimitive};
use std::net::{IpAddr, Ipv4Addr};

bitflags! {
    /// The high-order bit (bit 0) of the Attribute Flags octet is the
    /// Optional bit.  It defines whether the attribute is optional (if
    /// set to 1) or well-known (if set to 0).
    ///
    /// The second high-order bit (bit 1) of the Attribute Flags octet
    /// is the Transitive bit.  It defines whether an optional
    /// attribute is transitive (if set to 1) or non-transitive (if set
    /// to 0).
    ///
    /// The third high-order bit (bit 2) of the Attribute Flags octet
    /// is the Partial bit.  It defines whether the information
    /// contained in the optional transitive attribute is partial (if
    /// set to 1) or complete (if set to 0).
    ///
    /// The fourth high-order bit (bit 3) of the Attribute Flags octet
    /// is the Extended Length bit.  It defines whether the Attribute
    /// Length is one octet (if set to 0) or two octets (if set to 1).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct AttrFlags: u8 {
        const OPTIONAL   = 0b10000000;
        const TRANSITIVE = 0b01000000;
        const PARTIAL    = 0b00100000;
        const EXTENDED   = 0b00010000;
    }
}

/// Attribute types handled by the decoder.
///
/// Every other code maps to `Unknown` and is skipped.
#[allow(non_camel_case_types)]
#[derive(Debug, FromPrimitive, IntoPrimitive, PartialEq, Eq, Hash, Copy, Clone)]
#[repr(u8)]
pub enum AttrType {
    ORIGIN = 1,
    AS_PATH = 2,
    NEXT_HOP = 3,
    MULTI_EXIT_DISCRIMINATOR = 4,
    LOCAL_PREFERENCE = 5,
    ATOMIC_AGGREGATE = 6,
    AGGREGATOR = 7,
    COMMUNITIES = 8,
    /// <https://tools.ietf.org/html/rfc4760>
    MP_REACHABLE_NLRI = 14,
    MP_UNREACHABLE_NLRI = 15,
    /// <https://datatracker.ietf.org/doc/html/rfc4360>
    EXTENDED_COMMUNITIES = 16,
    /// <https://datatracker.ietf.org/doc/html/rfc6793>
    AS4_PATH = 17,
    AS4_AGGREGATOR = 18,
    #[num_enum(catch_all)]
    Unknown(u8),
}

/// Path attributes collected from one UPDATE message.
///
/// Singleton attributes hold at most one value; a repeated attribute replaces the earlier one.
/// AS path and communities keep wire order. Events copy what they need out of the set, so
/// changing the set after an event was built never alters that event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathAttributeSet {
    pub origin: Option<Origin>,
    pub as_path: Vec<Asn>,
    pub next_hop: Option<IpAddr>,
    pub med: Option<u32>,
    pub local_pref: Option<u32>,
    pub atomic_aggregate: bool,
    pub aggregator: Option<(Asn, Ipv4Addr)>,
    pub communities: Vec<Community>,
}

impl PathAttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn aggregator_as(&self) -> Option<Asn> {
        self.aggregator.map(|(asn, _)| asn)
    }

    pub fn aggregator_ip(&self) -> Option<IpAddr> {
        self.aggregator.map(|(_, ip)| IpAddr::V4(ip))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attr_type_codes() {
        assert_eq!(AttrType::from(1u8), AttrType::ORIGIN);
        assert_eq!(AttrType::from(14u8), AttrType::MP_REACHABLE_NLRI);
        assert_eq!(AttrType::from(18u8), AttrType::AS4_AGGREGATOR);
        assert_eq!(AttrType::from(32u8), AttrType::Unknown(32));
        assert_eq!(u8::from(AttrType::EXTENDED_COMMUNITIES), 16);
    }

    #[test]
    fn test_attr_flags() {
        let flags = AttrFlags::from_bits_retain(0x90);
        assert!(flags.contains(AttrFlags::OPTIONAL));
        assert!(flags.contains(AttrFlags::EXTENDED));
        assert!(!flags.contains(AttrFlags::TRANSITIVE));
    }

    #[test]
    fn test_aggregator_accessors() {
        let mut attrs = PathAttributeSet::new();
        assert_eq!(attrs.aggregator_as(), None);
        attrs.aggregator = Some((Asn::new(65000), Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(attrs.aggregator_as(), Some(Asn::new(65000)));
        assert_eq!(
            attrs.aggregator_ip(),
            Some(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)))
        );
    }
}
