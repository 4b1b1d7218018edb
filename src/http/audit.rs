//! Audit service routes.

use super::ApiError;
use crate::audit::{
    domain::AuditLogEntry,
    ports::AuditLogRepository,
    services::{AppendEntryRequest, AuditLogService, DEFAULT_RECENT_LIMIT},
};
use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    routing::get,
};
use serde::Deserialize;
use serde_json::Value;
use uuid::Uuid;

/// Body of `POST /logs`.
#[derive(Debug, Deserialize)]
struct AppendEntryBody {
    #[serde(default)]
    task_id: Option<Uuid>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default)]
    payload: Option<Value>,
}

/// Builds the `/logs` routes over `service`.
pub fn audit_routes<R>(service: AuditLogService<R>) -> Router
where
    R: AuditLogRepository + 'static,
{
    Router::new()
        .route("/logs", get(list_entries::<R>).post(append_entry::<R>))
        .with_state(service)
}

async fn append_entry<R>(
    State(service): State<AuditLogService<R>>,
    body: Result<Json<AppendEntryBody>, JsonRejection>,
) -> Result<(StatusCode, Json<AuditLogEntry>), ApiError>
where
    R: AuditLogRepository + 'static,
{
    let Json(body) = body.map_err(|_| ApiError::invalid_body())?;
    let mut request = AppendEntryRequest::new(body.action.unwrap_or_default())
        .with_payload(body.payload.unwrap_or(Value::Null));
    if let Some(task_id) = body.task_id {
        request = request.with_task_id(task_id);
    }

    let entry = service
        .append(request)
        .await
        .map_err(|err| ApiError::from_audit(err, "failed to create audit log"))?;
    Ok((StatusCode::CREATED, Json(entry)))
}

async fn list_entries<R>(
    State(service): State<AuditLogService<R>>,
) -> Result<Json<Vec<AuditLogEntry>>, ApiError>
where
    R: AuditLogRepository + 'static,
{
    service
        .list_recent(DEFAULT_RECENT_LIMIT)
        .await
        .map(Json)
        .map_err(|err| ApiError::from_audit(err, "failed to fetch logs"))
}
