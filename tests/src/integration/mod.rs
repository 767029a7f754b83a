//! # Integration Tests
//!
//! Full-service flows exercising the registry through its public API
//! with the reference adapters wired in.

pub mod audit;
pub mod flows;
