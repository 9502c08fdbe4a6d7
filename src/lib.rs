/*!
mrt-events decodes MRT (RFC 6396) routing captures into a flat stream of per-prefix and
per-session routing events.

BGP4MP and BGP4MP_ET records are decoded down to the BGP message they carry. UPDATE messages
become one [Announcement](models::Announcement) or [Withdrawal](models::Withdrawal) per
prefix, each with its own copy of the path attributes. OPEN, NOTIFICATION, KEEPALIVE and
session state changes become one event each. TABLE_DUMP_V2 records are accepted and produce no
events.

# Examples

## Reading events from a file

```no_run
use mrt_events::MrtEventReader;

let file = std::fs::File::open("updates.20240101.0000").unwrap();
for event in MrtEventReader::new(std::io::BufReader::new(file)) {
    println!("{}", event);
}
```

## Handling errors

The default iterator logs and skips records that fail to decode. Use
[into_fallible_iter](MrtEventReader::into_fallible_iter) to see every error:

```no_run
use mrt_events::MrtEventReader;

let file = std::fs::File::open("updates.20240101.0000").unwrap();
for result in MrtEventReader::new(file).into_fallible_iter() {
    match result {
        Ok(event) => println!("{}", event),
        Err(e) if e.is_fatal() => {
            eprintln!("stream ended: {}", e);
        }
        Err(e) => eprintln!("record skipped: {}", e),
    }
}
```

## Decoding record by record

[decode_next] returns all events of one record together with the non-fatal
[Diagnostic](models::Diagnostic)s found while decoding it:

```no_run
use mrt_events::decode_next;

let mut input = std::fs::File::open("updates.20240101.0000").unwrap();
while let Some(record) = decode_next(&mut input).unwrap() {
    for d in &record.diagnostics {
        eprintln!("{}", d);
    }
    println!("{} events", record.events.len());
}
```
*/

pub mod error;
pub mod models;
pub mod parser;

pub use error::{ErrorKind, ParserError};
pub use models::*;
pub use parser::iters::{EventIterator, FallibleEventIterator};
pub use parser::{decode_next, parse_mrt_body, MrtEventReader};
