//! Audit log: an append-only record of actions taken against tasks.
//!
//! Entries are appended and listed newest first; nothing is updated or
//! deleted. Layout mirrors the task module:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
