//! Conversion of decoded MRT records into routing events.
use crate::models::*;
use chrono::{DateTime, Utc};
use ipnet::IpNet;
use std::net::IpAddr;

/// Peer fields shared by every event of a BGP4MP record.
#[derive(Clone, Copy)]
struct PeerContext {
    timestamp: DateTime<Utc>,
    peer_ip: IpAddr,
    peer_as: Asn,
}

impl PeerContext {
    fn withdrawal(&self, prefix: IpNet) -> RoutingEvent {
        RoutingEvent::Withdrawal(Withdrawal {
            timestamp: self.timestamp,
            peer_ip: self.peer_ip,
            peer_as: self.peer_as,
            prefix,
        })
    }

    /// Every announcement gets its own copy of the attribute values.
    fn announcement(
        &self,
        prefix: IpNet,
        attrs: &PathAttributeSet,
        next_hop: Option<IpAddr>,
    ) -> RoutingEvent {
        RoutingEvent::Announcement(Announcement {
            timestamp: self.timestamp,
            peer_ip: self.peer_ip,
            peer_as: self.peer_as,
            prefix,
            as_path: attrs.as_path.clone(),
            origin: attrs.origin,
            next_hop,
            local_pref: attrs.local_pref,
            med: attrs.med,
            communities: attrs.communities.clone(),
            atomic_aggregate: attrs.atomic_aggregate,
            aggregator_as: attrs.aggregator_as(),
            aggregator_ip: attrs.aggregator_ip(),
        })
    }
}

/// Convert one MRT record into routing events, in wire order.
///
/// For an UPDATE the order is: withdrawn routes, then MP_REACH_NLRI and MP_UNREACH_NLRI contents
/// in attribute order, then the NLRI field. Announcements from the NLRI field carry the NEXT_HOP
/// attribute and the full attribute set. Those from MP_REACH_NLRI carry that attribute's own next
/// hop and only the attributes that came before it.
pub fn record_to_events(record: MrtRecord) -> Vec<RoutingEvent> {
    let timestamp = record.common_header.time();
    let msg = match record.message {
        MrtMessage::TableDumpV2 => return vec![],
        MrtMessage::Bgp4Mp(msg) => msg,
    };

    let peer = msg.peer();
    let ctx = PeerContext {
        timestamp,
        peer_ip: peer.peer_ip,
        peer_as: peer.peer_asn,
    };

    match msg {
        Bgp4MpEnum::StateChange(v) => {
            vec![RoutingEvent::StateChange(StateChangeEvent {
                timestamp,
                peer_ip: ctx.peer_ip,
                peer_as: ctx.peer_as,
                old_state: v.old_state,
                new_state: v.new_state,
            })]
        }
        Bgp4MpEnum::Message(v) => match v.bgp_message {
            BgpMessage::Open(open) => vec![RoutingEvent::Open(OpenEvent {
                timestamp,
                version: open.version,
                my_as: open.asn,
                hold_time: open.hold_time,
                bgp_id: open.bgp_identifier,
            })],
            BgpMessage::Notification(n) => {
                vec![RoutingEvent::Notification(NotificationEvent {
                    timestamp,
                    error_code: n.error_code,
                    error_subcode: n.error_subcode,
                })]
            }
            BgpMessage::KeepAlive => vec![RoutingEvent::Keepalive(KeepaliveEvent { timestamp })],
            BgpMessage::Update(update) => update_to_events(&ctx, update),
        },
    }
}

fn update_to_events(ctx: &PeerContext, update: BgpUpdateMessage) -> Vec<RoutingEvent> {
    let BgpUpdateMessage {
        withdrawn_prefixes,
        attributes,
        mp_nlri,
        announced_prefixes,
    } = update;

    let mut events = Vec::with_capacity(
        withdrawn_prefixes.len()
            + announced_prefixes.len()
            + mp_nlri.iter().map(|n| n.nlri.prefixes.len()).sum::<usize>(),
    );

    events.extend(withdrawn_prefixes.into_iter().map(|p| ctx.withdrawal(p)));

    for MpNlri {
        nlri,
        attributes: snapshot,
    } in mp_nlri
    {
        match nlri.next_hop {
            Some(next_hop) => events.extend(
                nlri.prefixes
                    .into_iter()
                    .map(|p| ctx.announcement(p, &snapshot, Some(next_hop))),
            ),
            None => events.extend(nlri.prefixes.into_iter().map(|p| ctx.withdrawal(p))),
        }
    }

    events.extend(
        announced_prefixes
            .into_iter()
            .map(|p| ctx.announcement(p, &attributes, attributes.next_hop)),
    );

    events
}
