//! Shared test utilities for dex-navigator integration tests
//!
//! Everything here runs offline: catalog data comes from an in-memory
//! [`fake_source::FakeSource`] instead of the remote API.

pub mod fake_source;
pub mod fixtures;
