use crate::models::*;
use ipnet::IpNet;
use std::net::IpAddr;

/// Prefixes carried by an MP_REACH_NLRI or MP_UNREACH_NLRI attribute.
#[derive(Debug, PartialEq, Clone, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nlri {
    pub afi: Afi,
    pub safi: Safi,
    /// Present only for MP_REACH_NLRI.
    pub next_hop: Option<IpAddr>,
    pub prefixes: Vec<IpNet>,
}

impl Nlri {
    /// Returns true if this NLRI refers to reachable prefixes
    pub const fn is_reachable(&self) -> bool {
        self.next_hop.is_some()
    }
}

/// An MP_REACH_NLRI or MP_UNREACH_NLRI attribute of an UPDATE, with the attribute values
/// decoded before it.
///
/// Announcements built from `nlri` use `attributes`, so attributes that follow on the wire
/// never reach them.
#[derive(Debug, PartialEq, Clone, Eq)]
pub struct MpNlri {
    pub nlri: Nlri,
    pub attributes: PathAttributeSet,
}
