use crate::error::ParserError;
use crate::models::{MrtHeader, MRT_HEADER_LEN};
use bytes::Buf;
use std::io::{ErrorKind, Read};

/// MRT common header [RFC6396][header].
///
/// [header]: https://tools.ietf.org/html/rfc6396#section-4.1
///
/// A MRT record is constructed as the following:
/// ```text
///  0                   1                   2                   3
///  0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1 2 3 4 5 6 7 8 9 0 1
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                           Timestamp                           |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |             Type              |            Subtype            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                             Length                            |
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// |                      Message... (variable)
/// +-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+-+
/// ```
///
/// Returns `Ok(None)` when the source is exhausted before the first header byte. Any other short
/// read is [ParserError::TruncatedStream].
pub fn parse_common_header<T: Read>(input: &mut T) -> Result<Option<MrtHeader>, ParserError> {
    let mut raw_bytes = [0u8; MRT_HEADER_LEN];
    let read = read_full(input, &mut raw_bytes)?;
    if read == 0 {
        return Ok(None);
    }
    if read < MRT_HEADER_LEN {
        return Err(ParserError::TruncatedStream {
            section: "MRT header",
            expected: MRT_HEADER_LEN,
            read,
        });
    }
    let mut data = &raw_bytes[..];

    let timestamp = data.get_u32();
    let entry_type = data.get_u16();
    let entry_subtype = data.get_u16();
    // the length field does not include the length of the common header
    let length = data.get_u32();

    Ok(Some(MrtHeader {
        timestamp,
        microsecond_timestamp: None,
        entry_type,
        entry_subtype,
        length,
    }))
}

/// Reads the payload announced by `header`, exactly `header.length` bytes.
pub fn read_payload<T: Read>(input: &mut T, header: &MrtHeader) -> Result<Vec<u8>, ParserError> {
    let expected = header.length as usize;
    let mut buffer = Vec::with_capacity(expected.min(1 << 16));
    let read = input.take(expected as u64).read_to_end(&mut buffer)?;
    if read < expected {
        return Err(ParserError::TruncatedStream {
            section: "MRT payload",
            expected,
            read,
        });
    }
    Ok(buffer)
}

/// Fills `buf` as far as the source allows and returns the number of bytes read.
fn read_full<T: Read>(input: &mut T, buf: &mut [u8]) -> Result<usize, ParserError> {
    let mut read = 0;
    while read < buf.len() {
        match input.read(&mut buf[read..]) {
            Ok(0) => break,
            Ok(n) => read += n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Ok(read)
}
