pub mod messages;
pub mod mrt_event;
pub mod mrt_header;
pub mod mrt_record;

pub(crate) use messages::bgp4mp::parse_bgp4mp;
pub use mrt_event::record_to_events;
pub use mrt_header::parse_common_header;
pub use mrt_record::{decode_next, parse_mrt_body, parse_mrt_message};
