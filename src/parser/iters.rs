/*!
Iterator implementations for [MrtEventReader].
*/
use crate::error::ParserError;
use crate::models::RoutingEvent;
use crate::parser::MrtEventReader;
use log::warn;
use std::io::Read;

/// Use [EventIterator] as the default iterator to return [RoutingEvent]s.
impl<R: Read> IntoIterator for MrtEventReader<R> {
    type Item = RoutingEvent;
    type IntoIter = EventIterator<R>;

    fn into_iter(self) -> Self::IntoIter {
        EventIterator { reader: self }
    }
}

/// Iterates over events, skipping records that fail to decode.
///
/// Skipped records are logged. Iteration ends at the end of the input or at the first fatal
/// error.
pub struct EventIterator<R> {
    reader: MrtEventReader<R>,
}

impl<R> EventIterator<R> {
    pub fn reader(&self) -> &MrtEventReader<R> {
        &self.reader
    }
}

impl<R: Read> Iterator for EventIterator<R> {
    type Item = RoutingEvent;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.reader.read() {
                Ok(event) => return event,
                Err(e) if e.is_fatal() => return None,
                Err(e) => {
                    warn!("Parsing error: {}", e);
                    continue;
                }
            }
        }
    }
}

/// Iterates over events and record errors.
///
/// Every record error is yielded once. A fatal error is the last item.
pub struct FallibleEventIterator<R> {
    reader: MrtEventReader<R>,
}

impl<R> FallibleEventIterator<R> {
    pub(crate) fn new(reader: MrtEventReader<R>) -> Self {
        FallibleEventIterator { reader }
    }

    pub fn reader(&self) -> &MrtEventReader<R> {
        &self.reader
    }
}

impl<R: Read> Iterator for FallibleEventIterator<R> {
    type Item = Result<RoutingEvent, ParserError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.reader.read().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    /// One record with an unsupported MRT type followed by a keepalive.
    fn mixed_stream() -> Vec<u8> {
        let mut data = vec![
            0, 0, 0, 1, // timestamp
            0, 12, // TABLE_DUMP, not handled
            0, 1, // subtype
            0, 0, 0, 2, // length
            0xaa, 0xbb,
        ];
        let mut body = vec![
            0xfd, 0xe9, 0xfd, 0xea, // peer and local AS
            0, 0, 0, 1, // interface index, IPv4
            192, 0, 2, 254, 192, 0, 2, 253, // peer and local IP
        ];
        body.extend([0xff; 16]);
        body.extend([0, 19, 4]);
        data.extend([0, 0, 0, 2, 0, 16, 0, 1]);
        data.extend((body.len() as u32).to_be_bytes());
        data.extend(body);
        data
    }

    #[test]
    fn test_event_iterator_skips_errors() {
        let reader = MrtEventReader::new(Cursor::new(mixed_stream()));
        let mut iter = reader.into_iter();
        let events: Vec<RoutingEvent> = iter.by_ref().collect();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].timestamp().timestamp(), 2);
        assert_eq!(iter.reader().records_skipped(), 1);
        assert_eq!(iter.reader().records_decoded(), 1);
    }

    #[test]
    fn test_fallible_iterator() {
        let reader = MrtEventReader::new(Cursor::new(mixed_stream()));
        let items: Vec<Result<RoutingEvent, ParserError>> =
            reader.into_fallible_iter().collect();
        assert_eq!(items.len(), 2);
        assert!(matches!(items[0], Err(ParserError::Unsupported(_))));
        assert!(items[1].is_ok());
    }

    #[test]
    fn test_fatal_error_ends_iteration() {
        let mut data = mixed_stream();
        data.extend([0, 0, 0, 3, 0, 16]); // partial header
        let reader = MrtEventReader::new(Cursor::new(data));
        let items: Vec<Result<RoutingEvent, ParserError>> =
            reader.into_fallible_iter().collect();
        assert_eq!(items.len(), 3);
        assert!(items[2].as_ref().is_err_and(|e| e.is_fatal()));
    }
}
