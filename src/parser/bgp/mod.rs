/*!
Provides parsing of BGP messages carried by BGP4MP records.
*/
pub mod attributes;
pub mod messages;

pub use attributes::{AttributeParser, ParsedAttributes};
pub use messages::parse_bgp_message;
