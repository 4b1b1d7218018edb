//! Fire-and-forget delivery of audit events.

use crate::task::ports::{AuditDeliveryError, AuditEvent, AuditSink};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Default budget for one delivery attempt.
pub const DEFAULT_AUDIT_BUDGET: Duration = Duration::from_secs(2);

/// Launches audit deliveries detached from the caller.
///
/// Each event gets one attempt on its own tokio task, bounded by the
/// configured budget. Outcomes are traced at debug level and otherwise
/// dropped; nothing is reported back to the mutation that triggered them.
pub struct AuditDispatcher<A>
where
    A: AuditSink,
{
    sink: Arc<A>,
    budget: Duration,
}

impl<A> Clone for AuditDispatcher<A>
where
    A: AuditSink,
{
    fn clone(&self) -> Self {
        Self {
            sink: Arc::clone(&self.sink),
            budget: self.budget,
        }
    }
}

impl<A> AuditDispatcher<A>
where
    A: AuditSink,
{
    /// Creates a dispatcher over `sink` with the default budget.
    #[must_use]
    pub const fn new(sink: Arc<A>) -> Self {
        Self {
            sink,
            budget: DEFAULT_AUDIT_BUDGET,
        }
    }

    /// Sets the per-delivery time budget.
    #[must_use]
    pub const fn with_budget(mut self, budget: Duration) -> Self {
        self.budget = budget;
        self
    }

    /// Spawns one delivery attempt for `event` and returns immediately.
    pub fn dispatch(&self, event: AuditEvent) {
        let sink = Arc::clone(&self.sink);
        let budget = self.budget;
        drop(tokio::spawn(async move {
            let task_id = event.task_id;
            let action = event.action.as_str();
            let outcome = tokio::time::timeout(budget, sink.deliver(event))
                .await
                .unwrap_or(Err(AuditDeliveryError::TimedOut));
            match outcome {
                Ok(()) => debug!(%task_id, action, "audit event delivered"),
                Err(err) => debug!(%task_id, action, error = %err, "audit event dropped"),
            }
        }));
    }
}
