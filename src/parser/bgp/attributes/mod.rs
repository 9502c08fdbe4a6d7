mod attr_01_origin;
mod attr_02_17_as_path;
mod attr_03_next_hop;
mod attr_04_med;
mod attr_05_local_pref;
mod attr_07_18_aggregator;
mod attr_08_communities;
mod attr_14_15_nlri;
mod attr_16_extended_communities;

use bytes::{Buf, Bytes};
use log::{debug, warn};

use crate::error::ParserError;
use crate::models::*;
use crate::parser::bgp::attributes::attr_01_origin::parse_origin;
use crate::parser::bgp::attributes::attr_02_17_as_path::parse_as_path;
use crate::parser::bgp::attributes::attr_03_next_hop::parse_next_hop;
use crate::parser::bgp::attributes::attr_04_med::parse_med;
use crate::parser::bgp::attributes::attr_05_local_pref::parse_local_pref;
use crate::parser::bgp::attributes::attr_07_18_aggregator::parse_aggregator;
use crate::parser::bgp::attributes::attr_08_communities::parse_regular_communities;
use crate::parser::bgp::attributes::attr_14_15_nlri::parse_nlri;
use crate::parser::bgp::attributes::attr_16_extended_communities::parse_extended_community;
use crate::parser::ReadUtils;

/// Everything decoded from the path attribute section of one UPDATE.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedAttributes {
    /// Final attribute values, shared by every announcement of the message.
    pub attributes: PathAttributeSet,
    /// MP_REACH_NLRI and MP_UNREACH_NLRI contents in attribute order.
    pub mp_nlri: Vec<MpNlri>,
    pub diagnostics: Vec<Diagnostic>,
}

pub struct AttributeParser {
    asn_len: AsnLength,
}

impl AttributeParser {
    pub fn new(asn_len: AsnLength) -> AttributeParser {
        AttributeParser { asn_len }
    }

    /// Parse BGP attributes from the path attribute section of an UPDATE message.
    ///
    /// `data` contains exactly the bytes declared by the Total Path Attribute Length field. The
    /// section must be consumed exactly: an attribute header or value running past its end is
    /// malformed.
    pub fn parse_attributes(&self, mut data: Bytes) -> Result<ParsedAttributes, ParserError> {
        let mut parsed = ParsedAttributes::default();

        while data.has_remaining() {
            let flag = AttrFlags::from_bits_retain(data.read_u8()?);
            let attr_type = data.read_u8().map_err(|_| overrun("attribute header"))?;
            let attr_length = match flag.contains(AttrFlags::EXTENDED) {
                false => data.read_u8().map(|v| v as usize),
                true => data.read_u16().map(|v| v as usize),
            }
            .map_err(|_| overrun("attribute header"))?;

            debug!(
                "reading attribute: type -- {:?}, length -- {}",
                &attr_type, attr_length
            );
            if data.remaining() < attr_length {
                return Err(ParserError::malformed(format!(
                    "attribute {} length {} with {} bytes left",
                    attr_type,
                    attr_length,
                    data.remaining()
                )));
            }
            let attr_data = data.split_span(attr_length)?;

            self.parse_attribute(AttrType::from(attr_type), attr_data, &mut parsed)
                .map_err(|e| match e {
                    ParserError::Truncated { .. } => {
                        overrun(&format!("{:?} value", AttrType::from(attr_type)))
                    }
                    e => e,
                })
                .inspect_err(|e| warn!("{}", e))?;
        }

        Ok(parsed)
    }

    fn parse_attribute(
        &self,
        attr_type: AttrType,
        attr_data: Bytes,
        parsed: &mut ParsedAttributes,
    ) -> Result<(), ParserError> {
        let attrs = &mut parsed.attributes;
        match attr_type {
            AttrType::ORIGIN => attrs.origin = Some(parse_origin(attr_data)?),
            AttrType::AS_PATH => {
                let (path, remaining) = parse_as_path(attr_data, self.asn_len)?;
                if remaining > 0 {
                    warn!(
                        "AS_PATH has {} bytes after its first segment, not decoded",
                        remaining
                    );
                    parsed
                        .diagnostics
                        .push(Diagnostic::TrailingAsPathData { remaining });
                }
                attrs.as_path = path;
            }
            AttrType::NEXT_HOP => attrs.next_hop = Some(parse_next_hop(attr_data)?),
            AttrType::MULTI_EXIT_DISCRIMINATOR => attrs.med = Some(parse_med(attr_data)?),
            AttrType::LOCAL_PREFERENCE => attrs.local_pref = Some(parse_local_pref(attr_data)?),
            AttrType::ATOMIC_AGGREGATE => {
                attr_data.expect_remaining_eq(0, "ATOMIC_AGGREGATE")?;
                attrs.atomic_aggregate = true;
            }
            AttrType::AGGREGATOR => {
                attrs.aggregator = Some(parse_aggregator(attr_data, self.asn_len)?)
            }
            AttrType::COMMUNITIES => attrs
                .communities
                .extend(parse_regular_communities(attr_data)?),
            AttrType::EXTENDED_COMMUNITIES => attrs
                .communities
                .extend(parse_extended_community(attr_data)?),
            AttrType::MP_REACHABLE_NLRI | AttrType::MP_UNREACHABLE_NLRI => {
                let reachable = attr_type == AttrType::MP_REACHABLE_NLRI;
                let nlri = parse_nlri(attr_data, reachable, &mut parsed.diagnostics)?;
                // attributes seen so far
                let attributes = attrs.clone();
                parsed.mp_nlri.push(MpNlri { nlri, attributes });
            }
            AttrType::AS4_PATH | AttrType::AS4_AGGREGATOR => {
                let type_code = u8::from(attr_type);
                debug!("attribute {} recognized, not decoded", type_code);
                parsed
                    .diagnostics
                    .push(Diagnostic::IgnoredAttribute { type_code });
            }
            AttrType::Unknown(type_code) => {
                warn!(
                    "unknown attribute type {}, skipping {} bytes",
                    type_code,
                    attr_data.len()
                );
                parsed.diagnostics.push(Diagnostic::UnknownAttribute {
                    type_code,
                    length: attr_data.len(),
                });
            }
        }
        Ok(())
    }
}

fn overrun(target: &str) -> ParserError {
    ParserError::malformed(format!("{} overruns the path attribute section", target))
}
