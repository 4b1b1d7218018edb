//! Adapter implementations for task board ports.
//!
//! - [`memory`]: lock-guarded in-memory task store
//! - [`postgres`]: Diesel-backed `PostgreSQL` task store
//! - [`audit_client`]: HTTP delivery of audit events

pub mod audit_client;
pub mod memory;
pub mod postgres;
