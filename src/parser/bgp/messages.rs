use bytes::{Buf, Bytes};
use log::debug;

use crate::error::ParserError;
use crate::models::*;
use crate::parser::bgp::attributes::AttributeParser;
use crate::parser::{parse_prefix_list, ReadUtils};

/// Size of the fixed part of an UPDATE: BGP header plus the withdrawn routes length and total
/// path attribute length fields.
const UPDATE_FIXED_LEN: usize = BGP_HEADER_LEN + 4;

/// BGP message
///
/// Format:
/// ```text
/// 0                   1                   2                   3
/// 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                                                               |
/// +                                                               +
/// |                                                               |
/// +                                                               +
/// |                           Marker                              |
/// +                                                               +
/// |                                                               |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |          Length               |      Type     |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// `afi` is the address family of the BGP4MP envelope and applies to the withdrawn routes and
/// NLRI fields of an UPDATE. `asn_len` is the AS number width of the envelope subtype.
pub fn parse_bgp_message(
    data: &mut Bytes,
    afi: Afi,
    asn_len: AsnLength,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<BgpMessage, ParserError> {
    let total_size = data.remaining();
    data.has_n_remaining(BGP_HEADER_LEN)?;
    // https://tools.ietf.org/html/rfc4271#section-4
    // 16 (4 x 4 bytes) octets marker
    data.advance(16);
    /*
     This 2-octet unsigned integer indicates the total length of the
     message, including the header in octets.  Thus, it allows one
     to locate the (Marker field of the) next message in the TCP
     stream.
     */
    let length = data.read_u16()? as usize;
    if length < BGP_HEADER_LEN {
        return Err(ParserError::malformed(format!(
            "BGP message length {}",
            length
        )));
    }
    if length > total_size {
        return Err(ParserError::Truncated {
            needed: length,
            available: total_size,
        });
    }

    let msg_type_raw = data.read_u8()?;
    let msg_type = BgpMessageType::try_from(msg_type_raw)
        .map_err(|_| ParserError::unsupported(format!("BGP message type {}", msg_type_raw)))?;
    debug!("BGP {:?} message, {} bytes", msg_type, length);

    let bgp_msg_length = length - BGP_HEADER_LEN;
    let msg_data = data.split_span(bgp_msg_length)?;

    Ok(match msg_type {
        BgpMessageType::OPEN => BgpMessage::Open(parse_bgp_open_message(msg_data, asn_len)?),
        BgpMessageType::UPDATE => BgpMessage::Update(parse_bgp_update_message(
            msg_data,
            afi,
            asn_len,
            diagnostics,
        )?),
        BgpMessageType::NOTIFICATION => {
            BgpMessage::Notification(parse_bgp_notification_message(msg_data)?)
        }
        BgpMessageType::KEEPALIVE => BgpMessage::KeepAlive,
    })
}

pub fn parse_bgp_notification_message(
    mut input: Bytes,
) -> Result<BgpNotificationMessage, ParserError> {
    let error_code = input.read_u8()?;
    let error_subcode = input.read_u8()?;
    Ok(BgpNotificationMessage {
        error_code,
        error_subcode,
    })
}

/// Parse BGP OPEN message.
///
/// The "My Autonomous System" field is read with the width of the record subtype. Optional
/// parameters are left undecoded.
pub fn parse_bgp_open_message(
    mut input: Bytes,
    asn_len: AsnLength,
) -> Result<BgpOpenMessage, ParserError> {
    let version = input.read_u8()?;
    let asn = input.read_asn(asn_len)?;
    let hold_time = input.read_u16()?;
    let bgp_identifier = input.read_ipv4_address()?;
    let opt_params_len = input.read_u8()?;

    Ok(BgpOpenMessage {
        version,
        asn,
        hold_time,
        bgp_identifier,
        opt_params_len,
    })
}

/// Parse BGP UPDATE message.
///
/// ```text
/// +-----------------------------------------------------+
/// |   Withdrawn Routes Length (2 octets)                |
/// +-----------------------------------------------------+
/// |   Withdrawn Routes (variable)                       |
/// +-----------------------------------------------------+
/// |   Total Path Attribute Length (2 octets)            |
/// +-----------------------------------------------------+
/// |   Path Attributes (variable)                        |
/// +-----------------------------------------------------+
/// |   Network Layer Reachability Information (variable) |
/// +-----------------------------------------------------+
/// ```
///
/// The NLRI span is whatever the message length leaves after the two variable sections.
pub fn parse_bgp_update_message(
    mut input: Bytes,
    afi: Afi,
    asn_len: AsnLength,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<BgpUpdateMessage, ParserError> {
    let message_length = input.remaining() + BGP_HEADER_LEN;

    let withdrawn_length = input.read_u16()? as usize;
    let withdrawn_bytes = read_section(&mut input, withdrawn_length, "withdrawn routes")?;
    let withdrawn_prefixes = parse_prefix_list(withdrawn_bytes, afi)?;

    let attribute_length = input.read_u16()? as usize;
    let attr_bytes = read_section(&mut input, attribute_length, "path attributes")?;

    let nlri_length = message_length
        .checked_sub(UPDATE_FIXED_LEN + attribute_length + withdrawn_length)
        .ok_or_else(|| {
            ParserError::malformed(format!(
                "NLRI span: message length {} less than {} + {} + {}",
                message_length, UPDATE_FIXED_LEN, attribute_length, withdrawn_length
            ))
        })?;
    if nlri_length != input.remaining() {
        return Err(ParserError::malformed(format!(
            "NLRI span {} with {} bytes left",
            nlri_length,
            input.remaining()
        )));
    }

    let parsed = AttributeParser::new(asn_len).parse_attributes(attr_bytes)?;
    diagnostics.extend(parsed.diagnostics);

    let announced_prefixes = parse_prefix_list(input, afi)?;

    Ok(BgpUpdateMessage {
        withdrawn_prefixes,
        attributes: parsed.attributes,
        mp_nlri: parsed.mp_nlri,
        announced_prefixes,
    })
}

/// Split off a length-prefixed section of an UPDATE, which must fit in the message.
fn read_section(input: &mut Bytes, length: usize, name: &str) -> Result<Bytes, ParserError> {
    if input.remaining() < length {
        return Err(ParserError::malformed(format!(
            "{} length {} with {} bytes left in message",
            name,
            length,
            input.remaining()
        )));
    }
    input.split_span(length)
}
