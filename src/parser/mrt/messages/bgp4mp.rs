use crate::error::ParserError;
use crate::models::*;
use crate::parser::bgp::messages::parse_bgp_message;
use crate::parser::ReadUtils;
use bytes::{Buf, Bytes};
use log::warn;

/// Parse MRT BGP4MP type
///
/// RFC: <https://www.rfc-editor.org/rfc/rfc6396#section-4.4>
///
/// Only the state change and message subtypes, in their 2-byte and 4-byte AS number variants,
/// are decoded. Every other subtype is [ParserError::Unsupported].
pub fn parse_bgp4mp(
    sub_type: u16,
    input: Bytes,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Bgp4MpEnum, ParserError> {
    let bgp4mp_type = Bgp4MpType::try_from(sub_type)
        .map_err(|_| ParserError::unsupported(format!("BGP4MP subtype {}", sub_type)))?;
    let msg = match bgp4mp_type {
        Bgp4MpType::StateChange | Bgp4MpType::StateChangeAs4 => {
            Bgp4MpEnum::StateChange(parse_bgp4mp_state_change(
                input,
                bgp4mp_type,
                diagnostics,
            )?)
        }
        Bgp4MpType::Message | Bgp4MpType::MessageAs4 => {
            Bgp4MpEnum::Message(parse_bgp4mp_message(input, bgp4mp_type, diagnostics)?)
        }
        t => {
            return Err(ParserError::unsupported(format!(
                "BGP4MP subtype {:?} ({})",
                t, sub_type
            )))
        }
    };

    Ok(msg)
}

/*
   0                   1                   2                   3
   0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |         Peer AS Number        |        Local AS Number        |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |        Interface Index        |        Address Family         |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |                      Peer IP Address (variable)               |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |                      Local IP Address (variable)              |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
*/
fn parse_bgp4mp_peer(data: &mut Bytes, asn_len: AsnLength) -> Result<Bgp4MpPeer, ParserError> {
    let peer_asn = data.read_asn(asn_len)?;
    let local_asn = data.read_asn(asn_len)?;
    let interface_index = data.read_u16()?;
    let afi = data.read_afi()?;
    let peer_ip = data.read_address(afi)?;
    let local_ip = data.read_address(afi)?;
    Ok(Bgp4MpPeer {
        peer_asn,
        local_asn,
        interface_index,
        afi,
        peer_ip,
        local_ip,
    })
}

/*
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |                    BGP Message... (variable)
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
*/
pub fn parse_bgp4mp_message(
    mut data: Bytes,
    msg_type: Bgp4MpType,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Bgp4MpMessage, ParserError> {
    let asn_len = msg_type.asn_len();
    let peer = parse_bgp4mp_peer(&mut data, asn_len)?;
    let bgp_message = parse_bgp_message(&mut data, peer.afi, asn_len, diagnostics)?;
    check_trailing(&data, msg_type, diagnostics);

    Ok(Bgp4MpMessage {
        msg_type,
        peer,
        bgp_message,
    })
}

/*
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
  |            Old State          |          New State            |
  +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
*/
pub fn parse_bgp4mp_state_change(
    mut input: Bytes,
    msg_type: Bgp4MpType,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Bgp4MpStateChange, ParserError> {
    let peer = parse_bgp4mp_peer(&mut input, msg_type.asn_len())?;
    let old_state = input.read_u16()?;
    let new_state = input.read_u16()?;
    check_trailing(&input, msg_type, diagnostics);
    Ok(Bgp4MpStateChange {
        msg_type,
        peer,
        old_state,
        new_state,
    })
}

fn check_trailing(data: &Bytes, msg_type: Bgp4MpType, diagnostics: &mut Vec<Diagnostic>) {
    if data.has_remaining() {
        warn!(
            "{} bytes left in {:?} record, not decoded",
            data.remaining(),
            msg_type
        );
        diagnostics.push(Diagnostic::TrailingRecordData {
            remaining: data.remaining(),
        });
    }
}
