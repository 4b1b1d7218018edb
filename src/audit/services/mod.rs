//! Application services for the audit log.

mod log;

pub use log::{
    AppendEntryRequest, AuditLogError, AuditLogResult, AuditLogService, DEFAULT_RECENT_LIMIT,
};
