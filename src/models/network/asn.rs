use std::fmt::{Display, Formatter};

/// Wire width of AS numbers in a BGP4MP record.
///
/// Only the decoder looks at this: it is selected by the BGP4MP subtype and never stored in an
/// [Asn].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AsnLength {
    Bits16,
    Bits32,
}

impl AsnLength {
    pub const fn byte_len(&self) -> usize {
        match self {
            AsnLength::Bits16 => 2,
            AsnLength::Bits32 => 4,
        }
    }
}

/// ASN -- Autonomous System Number
///
/// 16-bit values read from the wire are widened, so the same number compares equal regardless
/// of the subtype it was decoded from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Asn(u32);

impl Asn {
    pub const fn new(asn: u32) -> Self {
        Asn(asn)
    }

    pub const fn to_u32(&self) -> u32 {
        self.0
    }

    /// Checks if the given ASN is reserved for private use.
    ///
    /// <https://datatracker.ietf.org/doc/rfc6996/>
    pub const fn is_private(&self) -> bool {
        matches!(self.0, 64512..=65534 | 4200000000..=4294967294)
    }
}

impl From<u16> for Asn {
    fn from(v: u16) -> Self {
        Asn(v as u32)
    }
}

impl From<u32> for Asn {
    fn from(v: u32) -> Self {
        Asn(v)
    }
}

impl From<Asn> for u32 {
    fn from(value: Asn) -> Self {
        value.0
    }
}

impl PartialEq<u32> for Asn {
    fn eq(&self, other: &u32) -> bool {
        self.0 == *other
    }
}

impl Display for Asn {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
