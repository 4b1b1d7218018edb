//! Taskboard: a kanban task board with a separate audit log.
//!
//! The task service stores work items in ordered stages and supports
//! partial updates of title, stage and position. After every successful
//! mutation it emits an audit event on a detached task; the audit service
//! appends these events to a log. Audit delivery is at-most-once and never
//! affects task mutations.
//!
//! # Architecture
//!
//! Both contexts follow hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, HTTP, memory)
//!
//! # Modules
//!
//! - [`task`]: Task lifecycle, stage ordering and audit emission
//! - [`audit`]: Append-only audit log
//! - [`http`]: axum routers for both services
//! - [`config`], [`db`], [`server`], [`telemetry`]: service plumbing

pub mod audit;
pub mod config;
pub mod db;
pub mod http;
pub mod server;
pub mod task;
pub mod telemetry;
