//! # Adapters Layer (Outer Hexagon)
//!
//! Reference implementations of the outbound ports.
//!
//! - Adapters implement domain ports; production hosts may substitute
//!   their own (a durable event bus, the real balance ledger).
//! - Both authorization strategies live here, selected at service
//!   construction.

pub mod event_log;
pub mod memory_ledger;
pub mod role_table;
pub mod single_owner;
pub mod time;

pub use event_log::*;
pub use memory_ledger::*;
pub use role_table::*;
pub use single_owner::*;
pub use time::*;
