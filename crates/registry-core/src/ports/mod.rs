//! # Ports Layer
//!
//! Interfaces at the hexagon boundary.
//!
//! - `inbound`: the API hosts drive the registry through.
//! - `outbound`: the collaborators the registry depends on (ledger,
//!   gate, event sink, time source).

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
