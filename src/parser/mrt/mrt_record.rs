use super::mrt_header::{parse_common_header, read_payload};
use crate::error::ParserError;
use crate::models::*;
use crate::parser::mrt::mrt_event::record_to_events;
use crate::parser::{parse_bgp4mp, ReadUtils};
use bytes::Bytes;
use log::{debug, warn};
use std::io::Read;

/// Read and decode the next record from `input`.
///
/// Returns `Ok(None)` when the input ends exactly at a record boundary. The whole payload is
/// consumed before decoding, so a non-fatal error leaves `input` at the next record header.
pub fn decode_next(input: &mut impl Read) -> Result<Option<DecodedRecord>, ParserError> {
    let header = match parse_common_header(input)? {
        Some(h) => h,
        None => return Ok(None),
    };
    debug!(
        "MRT record: type {}, subtype {}, {} bytes",
        header.entry_type, header.entry_subtype, header.length
    );
    let payload = read_payload(input, &header)?;
    parse_mrt_body(header, Bytes::from(payload)).map(Some)
}

/// Decode an already buffered payload into routing events.
///
/// A record decodes atomically: on error no events are returned for it.
pub fn parse_mrt_body(header: MrtHeader, data: Bytes) -> Result<DecodedRecord, ParserError> {
    let mut diagnostics = vec![];
    let record = parse_mrt_message(header, data, &mut diagnostics)?;
    let header = record.common_header;
    let events = record_to_events(record);
    Ok(DecodedRecord {
        header,
        events,
        diagnostics,
    })
}

/// Parse MRT message body with given common header.
///
/// For `BGP4MP_ET` the microsecond timestamp is read from the start of the payload and stored
/// in the returned header.
pub fn parse_mrt_message(
    mut common_header: MrtHeader,
    mut data: Bytes,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<MrtRecord, ParserError> {
    let etype = EntryType::try_from(common_header.entry_type).map_err(|_| {
        ParserError::unsupported(format!("MRT type {}", common_header.entry_type))
    })?;

    let message = match etype {
        EntryType::TABLE_DUMP_V2 => {
            debug!(
                "skipping TABLE_DUMP_V2 subtype {}",
                common_header.entry_subtype
            );
            diagnostics.push(Diagnostic::TableDumpV2Skipped {
                subtype: common_header.entry_subtype,
            });
            MrtMessage::TableDumpV2
        }
        EntryType::BGP4MP => MrtMessage::Bgp4Mp(parse_bgp4mp(
            common_header.entry_subtype,
            data,
            diagnostics,
        )?),
        EntryType::BGP4MP_ET => {
            common_header.microsecond_timestamp = Some(data.read_u32()?);
            MrtMessage::Bgp4Mp(parse_bgp4mp(
                common_header.entry_subtype,
                data,
                diagnostics,
            )?)
        }
        v => {
            warn!("unsupported MRT type: {:?}", v);
            return Err(ParserError::unsupported(format!(
                "MRT type {:?} ({})",
                v, common_header.entry_type
            )));
        }
    };

    Ok(MrtRecord {
        common_header,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn header(entry_type: u16, entry_subtype: u16, length: u32) -> MrtHeader {
        MrtHeader {
            timestamp: 1_600_000_000,
            microsecond_timestamp: None,
            entry_type,
            entry_subtype,
            length,
        }
    }

    fn keepalive_body() -> Vec<u8> {
        let mut data = vec![
            0xfd, 0xe9, 0xfd, 0xea, // peer and local AS
            0, 0, 0, 1, // interface index, IPv4
            192, 0, 2, 254, 192, 0, 2, 253, // peer and local IP
        ];
        data.extend([0xff; 16]);
        data.extend([0, 19, 4]);
        data
    }

    #[test]
    fn test_table_dump_v2_skipped() {
        let res = parse_mrt_body(header(13, 2, 3), Bytes::from_static(&[1, 2, 3])).unwrap();
        assert!(res.events.is_empty());
        assert_eq!(
            res.diagnostics,
            vec![Diagnostic::TableDumpV2Skipped { subtype: 2 }]
        );
    }

    #[test]
    fn test_extended_timestamp() {
        let mut data = vec![0x00, 0x07, 0xa1, 0x20]; // 500000 microseconds
        data.extend(keepalive_body());
        let res = parse_mrt_body(header(17, 1, data.len() as u32), Bytes::from(data)).unwrap();
        assert_eq!(res.header.microsecond_timestamp, Some(500_000));
        assert_eq!(res.events.len(), 1);
        let ts = res.events[0].timestamp();
        assert_eq!(ts.timestamp(), 1_600_000_000);
        assert_eq!(ts.timestamp_subsec_micros(), 500_000);
    }

    #[test]
    fn test_extended_timestamp_too_short() {
        assert!(matches!(
            parse_mrt_body(header(17, 1, 2), Bytes::from_static(&[0, 1])),
            Err(ParserError::Truncated { .. })
        ));
    }

    #[test]
    fn test_unsupported_types() {
        for entry_type in [12, 32, 99] {
            assert!(matches!(
                parse_mrt_body(header(entry_type, 0, 0), Bytes::new()),
                Err(ParserError::Unsupported(_))
            ));
        }
    }

    #[test]
    fn test_decode_next() {
        let body = keepalive_body();
        let mut data = vec![];
        data.extend(1_600_000_000u32.to_be_bytes());
        data.extend([0, 16, 0, 1]);
        data.extend((body.len() as u32).to_be_bytes());
        data.extend(&body);

        let mut input = Cursor::new(data);
        let record = decode_next(&mut input).unwrap().unwrap();
        assert_eq!(record.events.len(), 1);
        assert_eq!(record.events[0].event_type(), EventType::Keepalive);
        assert!(decode_next(&mut input).unwrap().is_none());
    }
}
