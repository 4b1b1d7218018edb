//! HTTP surface of the task and audit services.
//!
//! Both services answer JSON and report errors as `{"error": "<message>"}`.
//! Routers come with request tracing and a permissive CORS policy.

mod audit;
mod error;
mod tasks;

pub use audit::audit_routes;
pub use error::{ApiError, ErrorBody};
pub use tasks::task_routes;

use crate::audit::{ports::AuditLogRepository, services::AuditLogService};
use crate::task::{
    ports::{AuditSink, TaskRepository},
    services::TaskLifecycleService,
};
use axum::{Router, http::Method};
use mockable::Clock;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

fn cors(methods: Vec<Method>) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(methods)
        .allow_headers(Any)
}

/// Complete task service application.
pub fn task_app<R, A, C>(service: TaskLifecycleService<R, A, C>) -> Router
where
    R: TaskRepository + 'static,
    A: AuditSink,
    C: Clock + Send + Sync + 'static,
{
    task_routes(service)
        .layer(cors(vec![Method::GET, Method::POST, Method::PUT, Method::OPTIONS]))
        .layer(TraceLayer::new_for_http())
}

/// Complete audit service application.
pub fn audit_app<R>(service: AuditLogService<R>) -> Router
where
    R: AuditLogRepository + 'static,
{
    audit_routes(service)
        .layer(cors(vec![Method::GET, Method::POST, Method::OPTIONS]))
        .layer(TraceLayer::new_for_http())
}
