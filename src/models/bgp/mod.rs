//! BGP messages and relevant structs.

pub mod attributes;
pub mod community;

pub use attributes::*;
pub use community::*;

use crate::models::Asn;
use ipnet::IpNet;
use num_enum::{IntoPrimitive, TryFromPrimitive};
use std::net::Ipv4Addr;

/// Length of the BGP message header: 16-byte marker, 2-byte length, 1-byte type.
pub const BGP_HEADER_LEN: usize = 19;

/// BGP message types.
///
/// <https://datatracker.ietf.org/doc/html/rfc4271#section-4.1>
#[derive(Debug, TryFromPrimitive, IntoPrimitive, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum BgpMessageType {
    OPEN = 1,
    UPDATE = 2,
    NOTIFICATION = 3,
    KEEPALIVE = 4,
}

/// A decoded BGP message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BgpMessage {
    Open(BgpOpenMessage),
    Update(BgpUpdateMessage),
    Notification(BgpNotificationMessage),
    KeepAlive,
}

impl BgpMessage {
    pub const fn msg_type(&self) -> BgpMessageType {
        match self {
            BgpMessage::Open(_) => BgpMessageType::OPEN,
            BgpMessage::Update(_) => BgpMessageType::UPDATE,
            BgpMessage::Notification(_) => BgpMessageType::NOTIFICATION,
            BgpMessage::KeepAlive => BgpMessageType::KEEPALIVE,
        }
    }
}

/// BGP OPEN message. Optional parameters are counted but not decoded.
///
/// `asn` is read with the width of the enclosing BGP4MP subtype.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BgpOpenMessage {
    pub version: u8,
    pub asn: Asn,
    pub hold_time: u16,
    pub bgp_identifier: Ipv4Addr,
    pub opt_params_len: u8,
}

/// BGP UPDATE message.
///
/// `withdrawn_prefixes` and `announced_prefixes` come from the fixed fields of the message,
/// `mp_nlri` from MP_REACH_NLRI and MP_UNREACH_NLRI attributes in the order they appeared, each
/// with the attributes decoded before it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BgpUpdateMessage {
    pub withdrawn_prefixes: Vec<IpNet>,
    pub attributes: PathAttributeSet,
    pub mp_nlri: Vec<MpNlri>,
    pub announced_prefixes: Vec<IpNet>,
}

/// BGP NOTIFICATION message. Error data is not decoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BgpNotificationMessage {
    pub error_code: u8,
    pub error_subcode: u8,
}
