//! # Token Registry Test Suite
//!
//! Unified test crate containing:
//!
//! ```text
//! tests/src/
//! └── integration/      # Full-service flows
//!     ├── flows.rs      # End-to-end lifecycle scenarios
//!     └── audit.rs      # Invariant, event-log, and conservation audits
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p registry-tests
//!
//! # By category
//! cargo test -p registry-tests integration::flows
//! cargo test -p registry-tests integration::audit
//! ```

#![allow(dead_code)]

pub mod integration;
