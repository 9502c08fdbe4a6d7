use crate::models::*;
use chrono::{DateTime, Utc};
use ipnet::IpNet;
use itertools::Itertools;
use std::fmt::{Display, Formatter};
use std::net::{IpAddr, Ipv4Addr};

/// Reachability of one prefix announced by a peer.
///
/// `next_hop` is the NEXT_HOP attribute for prefixes from the UPDATE NLRI field, or the next hop
/// carried inside MP_REACH_NLRI for prefixes announced there.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Announcement {
    pub timestamp: DateTime<Utc>,
    pub peer_ip: IpAddr,
    pub peer_as: Asn,
    pub prefix: IpNet,
    pub as_path: Vec<Asn>,
    pub origin: Option<Origin>,
    pub next_hop: Option<IpAddr>,
    pub local_pref: Option<u32>,
    pub med: Option<u32>,
    pub communities: Vec<Community>,
    pub atomic_aggregate: bool,
    pub aggregator_as: Option<Asn>,
    pub aggregator_ip: Option<IpAddr>,
}

/// A prefix withdrawn by a peer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Withdrawal {
    pub timestamp: DateTime<Utc>,
    pub peer_ip: IpAddr,
    pub peer_as: Asn,
    pub prefix: IpNet,
}

/// A BGP session state transition. States are raw codes, see [BgpState].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateChangeEvent {
    pub timestamp: DateTime<Utc>,
    pub peer_ip: IpAddr,
    pub peer_as: Asn,
    pub old_state: u16,
    pub new_state: u16,
}

impl StateChangeEvent {
    pub fn old_bgp_state(&self) -> Option<BgpState> {
        BgpState::try_from(self.old_state).ok()
    }

    pub fn new_bgp_state(&self) -> Option<BgpState> {
        BgpState::try_from(self.new_state).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OpenEvent {
    pub timestamp: DateTime<Utc>,
    pub version: u8,
    pub my_as: Asn,
    pub hold_time: u16,
    pub bgp_id: Ipv4Addr,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NotificationEvent {
    pub timestamp: DateTime<Utc>,
    pub error_code: u8,
    pub error_subcode: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct KeepaliveEvent {
    pub timestamp: DateTime<Utc>,
}

/// One decoded routing event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum RoutingEvent {
    Announcement(Announcement),
    Withdrawal(Withdrawal),
    StateChange(StateChangeEvent),
    Open(OpenEvent),
    Notification(NotificationEvent),
    Keepalive(KeepaliveEvent),
}

/// Discriminant of a [RoutingEvent].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EventType {
    Announcement,
    Withdrawal,
    StateChange,
    Open,
    Notification,
    Keepalive,
}

impl RoutingEvent {
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            RoutingEvent::Announcement(e) => e.timestamp,
            RoutingEvent::Withdrawal(e) => e.timestamp,
            RoutingEvent::StateChange(e) => e.timestamp,
            RoutingEvent::Open(e) => e.timestamp,
            RoutingEvent::Notification(e) => e.timestamp,
            RoutingEvent::Keepalive(e) => e.timestamp,
        }
    }

    pub fn event_type(&self) -> EventType {
        match self {
            RoutingEvent::Announcement(_) => EventType::Announcement,
            RoutingEvent::Withdrawal(_) => EventType::Withdrawal,
            RoutingEvent::StateChange(_) => EventType::StateChange,
            RoutingEvent::Open(_) => EventType::Open,
            RoutingEvent::Notification(_) => EventType::Notification,
            RoutingEvent::Keepalive(_) => EventType::Keepalive,
        }
    }

    /// The prefix of an announcement or withdrawal.
    pub fn prefix(&self) -> Option<IpNet> {
        match self {
            RoutingEvent::Announcement(e) => Some(e.prefix),
            RoutingEvent::Withdrawal(e) => Some(e.prefix),
            _ => None,
        }
    }
}

/// The outcome of decoding one MRT record.
///
/// `header` carries the microsecond offset of extended-timestamp records. `events` are in
/// wire order and share the record timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedRecord {
    pub header: MrtHeader,
    pub events: Vec<RoutingEvent>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Timestamps are printed as seconds with microsecond fraction.
struct Ts<'a>(&'a DateTime<Utc>);

impl Display for Ts<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{:06}",
            self.0.timestamp(),
            self.0.timestamp_subsec_micros()
        )
    }
}

struct OptionToStr<'a, T>(&'a Option<T>);

impl<T: Display> Display for OptionToStr<'_, T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.0 {
            None => Ok(()),
            Some(x) => write!(f, "{x}"),
        }
    }
}

impl Display for RoutingEvent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            RoutingEvent::Announcement(a) => write!(
                f,
                "A|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}",
                Ts(&a.timestamp),
                a.peer_ip,
                a.peer_as,
                a.prefix,
                a.as_path.iter().join(" "),
                OptionToStr(&a.origin),
                OptionToStr(&a.next_hop),
                OptionToStr(&a.local_pref),
                OptionToStr(&a.med),
                a.communities.iter().join(" "),
                a.atomic_aggregate,
                OptionToStr(&a.aggregator_as),
                OptionToStr(&a.aggregator_ip),
            ),
            RoutingEvent::Withdrawal(w) => write!(
                f,
                "W|{}|{}|{}|{}",
                Ts(&w.timestamp),
                w.peer_ip,
                w.peer_as,
                w.prefix
            ),
            RoutingEvent::StateChange(s) => write!(
                f,
                "STATE|{}|{}|{}|{}|{}",
                Ts(&s.timestamp),
                s.peer_ip,
                s.peer_as,
                s.old_state,
                s.new_state
            ),
            RoutingEvent::Open(o) => write!(
                f,
                "OPEN|{}|{}|{}|{}|{}",
                Ts(&o.timestamp),
                o.version,
                o.my_as,
                o.hold_time,
                o.bgp_id
            ),
            RoutingEvent::Notification(n) => write!(
                f,
                "NOTIFICATION|{}|{}|{}",
                Ts(&n.timestamp),
                n.error_code,
                n.error_subcode
            ),
            RoutingEvent::Keepalive(k) => write!(f, "KEEPALIVE|{}", Ts(&k.timestamp)),
        }
    }
}
