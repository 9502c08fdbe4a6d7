//! MRT BGP4MP structs
use crate::models::*;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::net::IpAddr;

/// BGP finite state machine states, as recorded by BGP4MP state changes.
#[derive(Debug, TryFromPrimitive, IntoPrimitive, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum BgpState {
    Idle = 1,
    Connect = 2,
    Active = 3,
    OpenSent = 4,
    OpenConfirm = 5,
    Established = 6,
}

/// BGP4MP message subtypes.
///
/// <https://datatracker.ietf.org/doc/html/rfc6396#section-4.4>
#[derive(Debug, TryFromPrimitive, IntoPrimitive, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u16)]
pub enum Bgp4MpType {
    StateChange = 0,
    Message = 1,
    MessageAs4 = 4,
    StateChangeAs4 = 5,
    MessageLocal = 6,
    MessageAs4Local = 7,
    MessageAddpath = 8,
    MessageAs4Addpath = 9,
    MessageLocalAddpath = 10,
    MessageLocalAs4Addpath = 11,
}

impl Bgp4MpType {
    /// AS number width used by the envelope and the embedded BGP message.
    pub const fn asn_len(&self) -> AsnLength {
        match self {
            Bgp4MpType::StateChange
            | Bgp4MpType::Message
            | Bgp4MpType::MessageLocal
            | Bgp4MpType::MessageAddpath
            | Bgp4MpType::MessageLocalAddpath => AsnLength::Bits16,
            Bgp4MpType::MessageAs4
            | Bgp4MpType::StateChangeAs4
            | Bgp4MpType::MessageAs4Local
            | Bgp4MpType::MessageAs4Addpath
            | Bgp4MpType::MessageLocalAs4Addpath => AsnLength::Bits32,
        }
    }
}

/// Peering session identity read from a BGP4MP envelope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bgp4MpPeer {
    pub peer_asn: Asn,
    pub local_asn: Asn,
    pub interface_index: u16,
    pub afi: Afi,
    pub peer_ip: IpAddr,
    pub local_ip: IpAddr,
}

/// BGP4MP message body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Bgp4MpEnum {
    StateChange(Bgp4MpStateChange),
    Message(Bgp4MpMessage),
}

/// BGP4MP_STATE_CHANGE and BGP4MP_STATE_CHANGE_AS4.
///
/// States are kept as raw values, see [BgpState] for their meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bgp4MpStateChange {
    pub msg_type: Bgp4MpType,
    pub peer: Bgp4MpPeer,
    pub old_state: u16,
    pub new_state: u16,
}

/// BGP4MP_MESSAGE and BGP4MP_MESSAGE_AS4.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bgp4MpMessage {
    pub msg_type: Bgp4MpType,
    pub peer: Bgp4MpPeer,
    pub bgp_message: BgpMessage,
}

impl Bgp4MpEnum {
    pub const fn peer(&self) -> &Bgp4MpPeer {
        match self {
            Bgp4MpEnum::StateChange(x) => &x.peer,
            Bgp4MpEnum::Message(x) => &x.peer,
        }
    }
}
