//! Task board: stage and position management for work items.
//!
//! Tasks are created at the end of a stage, listed in board order, and
//! partially updated inside a single store transaction. Every successful
//! mutation emits an audit event on a detached task; audit delivery never
//! affects the mutation's result. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
