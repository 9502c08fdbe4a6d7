/*!
Data structures produced by the decoder: network primitives, MRT and BGP wire enumerations,
path attributes and the routing events emitted per record.
*/
mod diagnostic;
mod event;

pub mod bgp;
pub mod mrt;
pub mod network;

pub use bgp::*;
pub use diagnostic::*;
pub use event::*;
pub use mrt::*;
pub use network::*;
