use std::fmt::{Display, Formatter};

/// A community value attached to an announcement.
///
/// Regular ([RFC1997](https://datatracker.ietf.org/doc/html/rfc1997)) and extended
/// ([RFC4360](https://datatracker.ietf.org/doc/html/rfc4360)) communities share one list, in the
/// order their attributes appeared.
///
/// ## Display
///
/// Regular communities are displayed as `ASN:VALUE` (the high and low 16 bits). Extended
/// communities are displayed as `ecv:TYPE:VALUE` with the type as four hex digits and the
/// 48-bit value in decimal.
#[derive(Debug, PartialEq, Copy, Clone, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Community {
    Regular(u32),
    Extended { ext_type: u16, value: u64 },
}

impl Display for Community {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Community::Regular(v) => write!(f, "{}:{}", v >> 16, v & 0xffff),
            Community::Extended { ext_type, value } => {
                write!(f, "ecv:{:04x}:{}", ext_type, value)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Community::Regular(0x007B_01C8).to_string(), "123:456");
        assert_eq!(
            Community::Extended {
                ext_type: 0x0002,
                value: 0x0000_FDE8_0064,
            }
            .to_string(),
            "ecv:0002:4259840100"
        );
    }
}
