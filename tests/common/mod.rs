//! Byte-level builders for MRT fixtures.
#![allow(dead_code)]

use bytes::{BufMut, BytesMut};
use std::net::IpAddr;

pub const BGP4MP: u16 = 16;
pub const BGP4MP_ET: u16 = 17;
pub const TABLE_DUMP_V2: u16 = 13;

pub const STATE_CHANGE: u16 = 0;
pub const MESSAGE: u16 = 1;
pub const MESSAGE_AS4: u16 = 4;
pub const STATE_CHANGE_AS4: u16 = 5;

/// Wraps `payload` in an MRT common header.
pub fn mrt_record(timestamp: u32, entry_type: u16, subtype: u16, payload: &[u8]) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(12 + payload.len());
    buf.put_u32(timestamp);
    buf.put_u16(entry_type);
    buf.put_u16(subtype);
    buf.put_u32(payload.len() as u32);
    buf.put_slice(payload);
    buf.to_vec()
}

/// Like [mrt_record], with the microsecond timestamp of BGP4MP_ET in front of `payload`.
pub fn mrt_record_et(timestamp: u32, micros: u32, subtype: u16, payload: &[u8]) -> Vec<u8> {
    let mut body = BytesMut::with_capacity(4 + payload.len());
    body.put_u32(micros);
    body.put_slice(payload);
    mrt_record(timestamp, BGP4MP_ET, subtype, &body)
}

/// BGP4MP peer header. The AS number width follows `as4`.
pub struct Envelope {
    pub peer_as: u32,
    pub local_as: u32,
    pub peer_ip: IpAddr,
    pub local_ip: IpAddr,
    pub as4: bool,
}

impl Envelope {
    pub fn v4(as4: bool) -> Self {
        Envelope {
            peer_as: 65001,
            local_as: 65002,
            peer_ip: "192.0.2.254".parse().unwrap(),
            local_ip: "192.0.2.253".parse().unwrap(),
            as4,
        }
    }

    pub fn v6(as4: bool) -> Self {
        Envelope {
            peer_as: 65001,
            local_as: 65002,
            peer_ip: "2001:db8::fe".parse().unwrap(),
            local_ip: "2001:db8::fd".parse().unwrap(),
            as4,
        }
    }

    pub fn encode(&self, buf: &mut BytesMut) {
        if self.as4 {
            buf.put_u32(self.peer_as);
            buf.put_u32(self.local_as);
        } else {
            buf.put_u16(self.peer_as as u16);
            buf.put_u16(self.local_as as u16);
        }
        buf.put_u16(0);
        match (self.peer_ip, self.local_ip) {
            (IpAddr::V4(p), IpAddr::V4(l)) => {
                buf.put_u16(1);
                buf.put_slice(&p.octets());
                buf.put_slice(&l.octets());
            }
            (IpAddr::V6(p), IpAddr::V6(l)) => {
                buf.put_u16(2);
                buf.put_slice(&p.octets());
                buf.put_slice(&l.octets());
            }
            _ => panic!("peer and local address families differ"),
        }
    }

    /// Envelope followed by `bgp_message`.
    pub fn message(&self, bgp_message: &[u8]) -> Vec<u8> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf);
        buf.put_slice(bgp_message);
        buf.to_vec()
    }

    pub fn state_change(&self, old_state: u16, new_state: u16) -> Vec<u8> {
        let mut buf = BytesMut::new();
        self.encode(&mut buf);
        buf.put_u16(old_state);
        buf.put_u16(new_state);
        buf.to_vec()
    }
}

/// A BGP message with the all-ones marker.
pub fn bgp_message(msg_type: u8, body: &[u8]) -> Vec<u8> {
    let mut buf = BytesMut::with_capacity(19 + body.len());
    buf.put_slice(&[0xff; 16]);
    buf.put_u16((19 + body.len()) as u16);
    buf.put_u8(msg_type);
    buf.put_slice(body);
    buf.to_vec()
}

pub fn keepalive() -> Vec<u8> {
    bgp_message(4, &[])
}

/// Encodes a CIDR prefix the way withdrawn routes and NLRI carry it.
pub fn prefix(buf: &mut BytesMut, len: u8, octets: &[u8]) {
    buf.put_u8(len);
    buf.put_slice(&octets[..(len as usize).div_ceil(8)]);
}

/// Assembles an UPDATE message section by section.
#[derive(Default)]
pub struct UpdateBuilder {
    withdrawn: BytesMut,
    attributes: BytesMut,
    nlri: BytesMut,
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn withdraw(mut self, len: u8, octets: &[u8]) -> Self {
        prefix(&mut self.withdrawn, len, octets);
        self
    }

    pub fn announce(mut self, len: u8, octets: &[u8]) -> Self {
        prefix(&mut self.nlri, len, octets);
        self
    }

    /// Adds an attribute, switching to a 2-byte length when the value needs it.
    pub fn attribute(mut self, flags: u8, type_code: u8, value: &[u8]) -> Self {
        if value.len() > 255 {
            self.attributes.put_u8(flags | 0x10);
            self.attributes.put_u8(type_code);
            self.attributes.put_u16(value.len() as u16);
        } else {
            self.attributes.put_u8(flags);
            self.attributes.put_u8(type_code);
            self.attributes.put_u8(value.len() as u8);
        }
        self.attributes.put_slice(value);
        self
    }

    pub fn origin(self, origin: u8) -> Self {
        self.attribute(0x40, 1, &[origin])
    }

    /// A single AS_SEQUENCE segment.
    pub fn as_path(self, asns: &[u32], as4: bool) -> Self {
        let mut value = BytesMut::new();
        value.put_u8(2);
        value.put_u8(asns.len() as u8);
        for asn in asns {
            match as4 {
                true => value.put_u32(*asn),
                false => value.put_u16(*asn as u16),
            }
        }
        self.attribute(0x40, 2, &value)
    }

    pub fn next_hop(self, octets: [u8; 4]) -> Self {
        self.attribute(0x40, 3, &octets)
    }

    pub fn build(self) -> Vec<u8> {
        let mut body = BytesMut::new();
        body.put_u16(self.withdrawn.len() as u16);
        body.put_slice(&self.withdrawn);
        body.put_u16(self.attributes.len() as u16);
        body.put_slice(&self.attributes);
        body.put_slice(&self.nlri);
        bgp_message(2, &body)
    }
}
