/*!
Decoders for each layer of an MRT BGP4MP stream and the pull-based [MrtEventReader].
*/
use std::collections::VecDeque;
use std::io::Read;

use log::error;

pub mod bgp;
pub mod iters;
pub mod mrt;
pub mod utils;

pub use self::utils::*;
pub(crate) use mrt::parse_bgp4mp;
pub use mrt::{decode_next, parse_mrt_body, record_to_events};

pub use crate::error::{ErrorKind, ParserError};
pub use iters::{EventIterator, FallibleEventIterator};

use crate::models::{Diagnostic, RoutingEvent};

/// Reads routing events one at a time from an MRT byte stream.
///
/// A record is decoded only once every event of the previous record has been read. Events come
/// out in wire order.
///
/// After a fatal error ([ParserError::is_fatal]) or the end of the input, [Self::read] keeps
/// returning `Ok(None)`.
pub struct MrtEventReader<R> {
    reader: R,
    queue: VecDeque<RoutingEvent>,
    diagnostics: Vec<Diagnostic>,
    records_decoded: u64,
    records_skipped: u64,
    finished: bool,
}

impl<R: Read> MrtEventReader<R> {
    pub fn new(reader: R) -> Self {
        MrtEventReader {
            reader,
            queue: VecDeque::new(),
            diagnostics: vec![],
            records_decoded: 0,
            records_skipped: 0,
            finished: false,
        }
    }

    /// Returns the next event, decoding new records as needed.
    ///
    /// Records without events (e.g. TABLE_DUMP_V2) are passed over. An error is returned as soon
    /// as a record fails; the failed record contributes no events and the next call moves on to
    /// the following record unless the error was fatal.
    pub fn read(&mut self) -> Result<Option<RoutingEvent>, ParserError> {
        if let Some(event) = self.queue.pop_front() {
            return Ok(Some(event));
        }
        self.diagnostics.clear();
        loop {
            if self.finished {
                return Ok(None);
            }
            match decode_next(&mut self.reader) {
                Ok(None) => {
                    self.finished = true;
                    return Ok(None);
                }
                Ok(Some(record)) => {
                    self.records_decoded += 1;
                    self.diagnostics.extend(record.diagnostics);
                    self.queue.extend(record.events);
                    if let Some(event) = self.queue.pop_front() {
                        return Ok(Some(event));
                    }
                }
                Err(e) => {
                    if e.is_fatal() {
                        error!("{}", e);
                        self.finished = true;
                    } else {
                        self.records_skipped += 1;
                    }
                    return Err(e);
                }
            }
        }
    }

    /// Diagnostics of the records decoded by the last [Self::read] call that had to decode.
    ///
    /// This includes records without events passed over on the way, so a TABLE_DUMP_V2 record
    /// followed by a KEEPALIVE reports its diagnostic next to the KEEPALIVE event. A record that
    /// fails to decode adds nothing. Calls served from already decoded events leave the list as
    /// it is.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn records_decoded(&self) -> u64 {
        self.records_decoded
    }

    /// Number of records dropped because of non-fatal errors.
    pub fn records_skipped(&self) -> u64 {
        self.records_skipped
    }

    pub fn is_finished(&self) -> bool {
        self.finished && self.queue.is_empty()
    }

    pub fn into_fallible_iter(self) -> FallibleEventIterator<R> {
        FallibleEventIterator::new(self)
    }
}
